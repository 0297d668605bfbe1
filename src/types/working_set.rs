use serde::{Deserialize, Serialize};

use crate::resource::Container;

/// A reference from a working set into the resource tree.
///
/// Items have no identity of their own: they are the child at `index` of
/// their container, resolved against whatever the tree holds at the time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceRef {
    Container { href: String },
    Item { container_href: String, index: usize },
}

impl ResourceRef {
    pub fn container(container: &Container) -> Self {
        ResourceRef::Container {
            href: container.href.clone(),
        }
    }

    pub fn item(container: &Container, index: usize) -> Self {
        ResourceRef::Item {
            container_href: container.href.clone(),
            index,
        }
    }

    /// Href of the container this reference lives in (itself, for containers).
    pub fn container_href(&self) -> &str {
        match self {
            ResourceRef::Container { href } => href,
            ResourceRef::Item { container_href, .. } => container_href,
        }
    }
}

/// A named, user-curated subset of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSet {
    pub name: String,
    pub elements: Vec<ResourceRef>,
}

impl WorkingSet {
    pub fn new(name: impl Into<String>, elements: Vec<ResourceRef>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}
