mod common;

use common::limits;
use wset_store::slots::{
    chunk, reassemble, required_slots, ChunkError, MemorySlots, Reassembly, ReassemblyError,
    SlotTransport,
};

fn data_of_len(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

fn store_chunks(chunks: &[String]) -> MemorySlots {
    let mut slots = MemorySlots::new("wset");
    for (i, c) in chunks.iter().enumerate() {
        slots.put(i + 1, c.clone());
    }
    slots
}

#[test]
fn golden_single_slot_header() {
    let chunks = chunk("A|B&href12", &limits(10, 3)).unwrap();
    assert_eq!(chunks, vec!["10<A|B&href12".to_string()]);
}

#[test]
fn golden_three_slot_split() {
    let data = data_of_len(25);
    let chunks = chunk(&data, &limits(10, 3)).unwrap();

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], format!("25<{}", &data[..10]));
    assert_eq!(chunks[1], &data[10..20]);
    assert_eq!(chunks[2], &data[20..]);
    assert_eq!(chunks[2].len(), 5);
}

#[test]
fn invariant_exact_multiples_use_exactly_k_slots() {
    let max_slots = 4;
    for k in [1, 2, max_slots] {
        let chunks = chunk(&data_of_len(k * 10), &limits(10, max_slots)).unwrap();
        assert_eq!(chunks.len(), k, "k = {k}");
        assert_eq!(required_slots(k * 10, 10), k);
    }
}

#[test]
fn invariant_one_byte_past_capacity_is_refused() {
    let err = chunk(&data_of_len(4 * 10 + 1), &limits(10, 4)).unwrap_err();
    assert_eq!(
        err,
        ChunkError::CapacityExceeded {
            required: 5,
            max_slots: 4
        }
    );
}

#[test]
fn edge_empty_data_needs_no_slots() {
    assert!(chunk("", &limits(10, 4)).unwrap().is_empty());
}

#[test]
fn edge_non_ascii_data_is_refused() {
    assert_eq!(chunk("héllo", &limits(10, 4)), Err(ChunkError::NonAscii));
}

#[test]
fn invariant_reassemble_inverts_chunk() {
    for len in [1, 9, 10, 11, 25, 40] {
        let data = data_of_len(len);
        let l = limits(10, 4);
        let slots = store_chunks(&chunk(&data, &l).unwrap());
        assert_eq!(
            reassemble(&slots, &l).unwrap(),
            Reassembly::Complete(data),
            "len = {len}"
        );
    }
}

#[test]
fn reassemble_without_slot_one_is_absent() {
    let slots = MemorySlots::new("wset");
    assert_eq!(reassemble(&slots, &limits(10, 4)).unwrap(), Reassembly::Absent);
}

#[test]
fn reassemble_zero_length_header_is_absent() {
    let mut slots = MemorySlots::new("wset");
    slots.put(1, "0<");
    assert_eq!(reassemble(&slots, &limits(10, 4)).unwrap(), Reassembly::Absent);
}

#[test]
fn reassemble_reads_only_the_slots_the_header_implies() {
    let data = data_of_len(15);
    let l = limits(10, 4);
    let mut slots = store_chunks(&chunk(&data, &l).unwrap());
    // Leftover from an older, longer state that was never expired.
    slots.put(3, "stale");

    assert_eq!(reassemble(&slots, &l).unwrap(), Reassembly::Complete(data));
}

#[test]
fn corruption_malformed_header() {
    let l = limits(10, 4);
    for payload in ["no header here", "x1<abc", "-3<abc"] {
        let mut slots = MemorySlots::new("wset");
        slots.put(1, payload);
        assert!(
            matches!(reassemble(&slots, &l), Err(ReassemblyError::MalformedHeader(_))),
            "payload {payload:?}"
        );
    }
}

#[test]
fn corruption_declared_length_beyond_capacity() {
    let mut slots = MemorySlots::new("wset");
    slots.put(1, "999999<abc");
    assert!(matches!(
        reassemble(&slots, &limits(10, 4)),
        Err(ReassemblyError::MalformedHeader(_))
    ));
}

#[test]
fn corruption_missing_continuation_slot() {
    let data = data_of_len(25);
    let l = limits(10, 4);
    let mut slots = store_chunks(&chunk(&data, &l).unwrap());
    slots.expire_slot(3).unwrap();

    assert!(matches!(
        reassemble(&slots, &l),
        Err(ReassemblyError::MissingSlot(3))
    ));
}

#[test]
fn corruption_short_data_is_returned_with_mismatch() {
    let l = limits(10, 4);
    let mut slots = MemorySlots::new("wset");
    slots.put(1, "15<abcdefghij");
    slots.put(2, "klm");

    assert_eq!(
        reassemble(&slots, &l).unwrap(),
        Reassembly::LengthMismatch {
            data: "abcdefghijklm".to_string(),
            declared: 15,
            actual: 13,
        }
    );
}

#[test]
fn corruption_long_data_is_cut_to_declared_length() {
    let l = limits(10, 4);
    let mut slots = MemorySlots::new("wset");
    slots.put(1, "4<abcdefgh");

    assert_eq!(
        reassemble(&slots, &l).unwrap(),
        Reassembly::LengthMismatch {
            data: "abcd".to_string(),
            declared: 4,
            actual: 8,
        }
    );
}
