//! Context for score store failures.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::ScoreStore;

/// Attach the store location to an `io::Result` coming out of a [`ScoreStore`].
pub trait ScoreResultExt<T> {
    /// ```ignore
    /// let best = store.load_high_score().in_store("load high score", store)?;
    /// ```
    fn in_store(self, action: &str, store: &dyn ScoreStore) -> ApplicationResult<T>;
}

impl<T> ScoreResultExt<T> for io::Result<T> {
    fn in_store(self, action: &str, store: &dyn ScoreStore) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{} at {}", action, store.location().display()),
            source: Box::new(e),
        })
    }
}
