//! Working-set persistence over bounded storage slots.
//!
//! `wset-store` serializes named collections of resource references into a
//! single delimiter-safe string, splits it across a fixed number of
//! size-limited slots (browser cookies, typically), and reassembles and
//! verifies it on the next request. The percent codec it relies on is also
//! the public encoder for identifiers embedded in links.

pub mod codec;
pub mod resource;
pub mod slots;
pub mod store;
pub mod types;

pub use store::{StoreError, StoreWarning, WorkingSetStore};
