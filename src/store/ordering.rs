use std::cmp::Ordering;

use crate::types::WorkingSet;

/// Ordering of working sets within the collection, and so within the
/// serialized state.
pub trait SetOrder {
    fn compare(&self, a: &WorkingSet, b: &WorkingSet) -> Ordering;
}

/// Case-insensitive name order, ties broken by exact name.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByName;

impl SetOrder for ByName {
    fn compare(&self, a: &WorkingSet, b: &WorkingSet) -> Ordering {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    }
}

impl<F> SetOrder for F
where
    F: Fn(&WorkingSet, &WorkingSet) -> Ordering,
{
    fn compare(&self, a: &WorkingSet, b: &WorkingSet) -> Ordering {
        self(a, b)
    }
}
