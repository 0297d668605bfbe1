pub mod identifiers;
pub mod working_set;

pub use identifiers::StateVersion;
pub use working_set::{ResourceRef, WorkingSet};
