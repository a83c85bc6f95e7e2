use danga_app::application::StateCell;
use leptos::prelude::*;

/// Lets the interaction controllers keep their state in a Leptos signal, so
/// every reconciliation step re-renders the component that owns it.
pub struct SignalCell<T: Send + Sync + 'static>(pub RwSignal<T>);

impl<T: Send + Sync + 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.0.try_with(f)
    }
}
