mod feed;
mod post;

pub use feed::FeedPage;
pub use post::PostPage;
