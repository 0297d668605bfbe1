mod common;

use std::fs;

use chrono::Duration;
use common::{limits, sample_tree, TOC_A};
use tempfile::tempdir;
use wset_store::resource::ResourceTree;
use wset_store::slots::{DirSlots, SlotTransport, TransportError};
use wset_store::types::{ResourceRef, WorkingSet};
use wset_store::{StoreWarning, WorkingSetStore};

#[test]
fn slots_survive_across_store_instances() {
    let dir = tempdir().unwrap();
    let tree = sample_tree();
    let a = tree.find_container(TOC_A).unwrap();
    let ws = WorkingSet::new("On disk", vec![ResourceRef::item(a, 2)]);

    {
        let slots = DirSlots::open(&dir.path().join("slots"), "wset").unwrap();
        let mut store = WorkingSetStore::restore(&tree, slots, limits(12, 8));
        store.add_working_set(ws.clone()).unwrap();
        store.set_current_working_set("On disk").unwrap();
    }

    let slots = DirSlots::open(&dir.path().join("slots"), "wset").unwrap();
    assert!(slots.slot_path(1).exists());
    assert!(slots.slot_path(2).exists());

    let restored = WorkingSetStore::restore(&tree, slots, limits(12, 8));
    assert_eq!(restored.current_working_set(), "On disk");
    assert_eq!(restored.working_sets(), &[ws]);
}

#[test]
fn expiry_removes_slot_files() {
    let dir = tempdir().unwrap();
    let tree = sample_tree();
    let slots = DirSlots::open(dir.path(), "wset").unwrap();

    let mut store = WorkingSetStore::restore(&tree, slots, limits(4, 6));
    store
        .add_working_set(WorkingSet::new("abcdefghij", Vec::new()))
        .unwrap();
    assert!(store.transport().slot_path(3).exists());

    store.remove_working_set("abcdefghij").unwrap();
    for index in 1..=6 {
        assert!(!store.transport().slot_path(index).exists(), "slot {index}");
    }
}

#[test]
fn expired_ttl_reads_as_absent() {
    let dir = tempdir().unwrap();
    let mut slots = DirSlots::open(dir.path(), "wset").unwrap();

    slots.write_slot(1, "3<|ab", Duration::seconds(-1)).unwrap();
    assert_eq!(slots.read_slot(1).unwrap(), None);

    slots.write_slot(1, "3<|ab", Duration::seconds(60)).unwrap();
    assert_eq!(slots.read_slot(1).unwrap(), Some("3<|ab".to_string()));
}

#[test]
fn slot_zero_is_rejected() {
    let dir = tempdir().unwrap();
    let mut slots = DirSlots::open(dir.path(), "wset").unwrap();

    assert!(matches!(
        slots.write_slot(0, "x", Duration::seconds(60)),
        Err(TransportError::InvalidSlotIndex(0))
    ));
}

#[test]
fn corrupt_slot_file_restores_empty_with_warning() {
    let dir = tempdir().unwrap();
    let tree = sample_tree();
    let slots = DirSlots::open(dir.path(), "wset").unwrap();
    fs::write(slots.slot_path(1), b"not json").unwrap();

    let store = WorkingSetStore::restore(&tree, slots, limits(10, 4));
    assert!(store.working_sets().is_empty());
    assert!(matches!(
        store.warnings(),
        [StoreWarning::SlotReadFailed { .. }]
    ));
}
