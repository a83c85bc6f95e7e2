pub mod comment;
pub mod post;
pub mod profile;
pub mod report;
pub mod vote;

pub use comment::Entity as Comment;
pub use post::Entity as Post;
pub use profile::Entity as Profile;
pub use report::Entity as Report;
pub use vote::Entity as Vote;
