//! In-flight indicator for listing fetches.
//!
//! A view-model owns one [`LoadingFlag`]; clones observe the same flag, so a
//! renderer on another task can show a spinner while a fetch is pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared loading indicator. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raise the flag until the returned guard is dropped.
    ///
    /// The flag is lowered on every exit path, including a cancelled future.
    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn start(&self) -> LoadingGuard<'_> {
        self.0.store(true, Ordering::Release);
        LoadingGuard(self)
    }
}

/// Lowers its [`LoadingFlag`] when dropped.
#[derive(Debug)]
pub struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::Release);
    }
}
