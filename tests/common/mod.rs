#![allow(dead_code)]

use wset_store::resource::{Container, Item, TocTree};
use wset_store::slots::SlotLimits;

pub const TOC_A: &str = "/plugin.a/toc.xml";
pub const TOC_B: &str = "/plugin.b/toc.xml";

pub fn items(prefix: &str, names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .map(|n| Item::new(format!("{prefix}/{n}.html"), *n))
        .collect()
}

pub fn sample_tree() -> TocTree {
    TocTree::new(vec![
        Container::new(TOC_A, "Plugin A", items("/plugin.a", &["intro", "setup", "faq"])),
        Container::new(TOC_B, "Plugin B", items("/plugin.b", &["overview", "reference"])),
    ])
}

pub fn limits(max_payload: usize, max_slots: usize) -> SlotLimits {
    SlotLimits::new(max_payload, max_slots).unwrap()
}
