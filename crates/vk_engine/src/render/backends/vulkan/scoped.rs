//! Scoped ownership of native handles
//!
//! A [`Scoped`] value owns one native handle together with the function that
//! releases it. Release happens exactly once, when the guard is dropped, so a
//! handle acquired halfway through initialization is still released if a
//! later step fails. Guards stored in a struct are released in field
//! declaration order; guards held in locals in reverse order of creation.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Owned native handle with guaranteed release
pub struct Scoped<T> {
    label: &'static str,
    value: Option<T>,
    release: Option<Box<dyn FnOnce(T)>>,
}

impl<T> Scoped<T> {
    /// Take ownership of `value`; `release` runs when the guard drops
    pub fn new(label: &'static str, value: T, release: impl FnOnce(T) + 'static) -> Self {
        log::debug!("Acquired {}", label);
        Self {
            label,
            value: Some(value),
            release: Some(Box::new(release)),
        }
    }

    /// What this guard owns, for logging
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T> Deref for Scoped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
            .as_ref()
            .unwrap_or_else(|| unreachable!("{} accessed after release", self.label))
    }
}

impl<T> DerefMut for Scoped<T> {
    fn deref_mut(&mut self) -> &mut T {
        let label = self.label;
        self.value
            .as_mut()
            .unwrap_or_else(|| unreachable!("{} accessed after release", label))
    }
}

impl<T> Drop for Scoped<T> {
    fn drop(&mut self) {
        if let (Some(value), Some(release)) = (self.value.take(), self.release.take()) {
            log::debug!("Releasing {}", self.label);
            release(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scoped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoped")
            .field("label", &self.label)
            .field("value", &self.value)
            .finish()
    }
}
