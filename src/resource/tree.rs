use serde::{Deserialize, Serialize};

/// A child entry of a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub href: String,
    #[serde(default)]
    pub label: String,
}

impl Item {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// A top-level resource. Its href is stable across sessions; its children are
/// addressed only by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub href: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<Item>,
}

impl Container {
    pub fn new(href: impl Into<String>, label: impl Into<String>, children: Vec<Item>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            children,
        }
    }
}

/// Read-only lookup into the live resource hierarchy.
///
/// Queried fresh on every restore and save; implementations must not cache
/// answers across tree changes.
pub trait ResourceTree {
    fn find_container(&self, href: &str) -> Option<&Container>;

    fn children_of<'a>(&'a self, container: &'a Container) -> &'a [Item] {
        &container.children
    }

    /// Bounds-checked positional lookup.
    fn find_item(&self, container_href: &str, index: usize) -> Option<&Item> {
        let container = self.find_container(container_href)?;
        self.children_of(container).get(index)
    }
}

/// In-memory tree of containers, e.g. the table of contents for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TocTree {
    containers: Vec<Container>,
}

impl TocTree {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Replace the children of `href`. Returns `false` if no such container.
    pub fn set_children(&mut self, href: &str, children: Vec<Item>) -> bool {
        match self.containers.iter_mut().find(|c| c.href == href) {
            Some(container) => {
                container.children = children;
                true
            }
            None => false,
        }
    }
}

impl ResourceTree for TocTree {
    fn find_container(&self, href: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.href == href)
    }
}
