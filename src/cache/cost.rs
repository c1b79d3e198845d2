//! Cost Estimation Module
//!
//! Assigns a default cost (in bytes) to cached values when the caller does not
//! supply one explicitly.

use std::sync::Arc;

use bytes::Bytes;

// == Cost Trait ==
/// Estimates the memory cost of a value.
///
/// The estimate only needs to be consistent, not exact: it is what the cache
/// charges against its total-cost limit.
pub trait Cost {
    fn cost(&self) -> u64;
}

impl Cost for Vec<u8> {
    fn cost(&self) -> u64 {
        self.len() as u64
    }
}

impl Cost for Box<[u8]> {
    fn cost(&self) -> u64 {
        self.len() as u64
    }
}

impl Cost for Bytes {
    fn cost(&self) -> u64 {
        self.len() as u64
    }
}

impl Cost for String {
    fn cost(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: Cost + ?Sized> Cost for Arc<T> {
    fn cost(&self) -> u64 {
        (**self).cost()
    }
}
