//! A deep-frozen snapshot wrapper.
//!
//! `getIR()` must hand back something the compiler cannot mutate.
//! Rust's strongest available immutability facility is ownership itself:
//! [`Frozen`] holds its value privately and exposes only a shared
//! reference, so there is no API surface through which a caller could
//! reach a `&mut` into it.

use std::ops::Deref;

#[derive(Debug, Clone)]
pub struct Frozen<T>(T);

impl<T> Frozen<T> {
    /// Freezes `value`. Callers should pass an already-deep-cloned value
    /// so the frozen snapshot shares no aliasing with live store state.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    /// Consumes the wrapper, releasing ownership of the frozen value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_only_shared_access() {
        let frozen = Frozen::new(vec![1, 2, 3]);
        assert_eq!(frozen.len(), 3);
        assert_eq!(frozen.get(), &vec![1, 2, 3]);
    }
}
