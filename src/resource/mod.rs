pub mod tree;

pub use tree::{Container, Item, ResourceTree, TocTree};
