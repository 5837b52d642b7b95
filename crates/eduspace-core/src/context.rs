use std::sync::Arc;

use crate::backend::Backend;
use crate::navigation::ViewKind;
use crate::notify::Notifier;

/// Collaborators every controller is built with.
pub struct AppContext<B> {
    pub backend: Arc<B>,
    pub notifier: Notifier,
}

impl<B: Backend> AppContext<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier) -> Self {
        Self { backend, notifier }
    }

    /// Same backend, notifications tagged with `view`.
    pub fn for_view(&self, view: ViewKind) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            notifier: self.notifier.for_view(view),
        }
    }
}

impl<B> Clone for AppContext<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            notifier: self.notifier.clone(),
        }
    }
}
