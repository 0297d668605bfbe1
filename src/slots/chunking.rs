//! Slot wire format.
//!
//! Slot 1 carries `<len><` followed by the first chunk; slots 2..N carry raw
//! continuation chunks. The header is a pure prefix and does not count
//! against `max_payload`, so data of exactly `k * max_payload` bytes uses
//! exactly `k` slots.

use thiserror::Error;

use crate::slots::config::SlotLimits;
use crate::slots::transport::{SlotTransport, TransportError};

pub const HEADER_DELIMITER: char = '<';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("State needs {required} slots but only {max_slots} are available")]
    CapacityExceeded { required: usize, max_slots: usize },
    #[error("Slot payloads must be ASCII")]
    NonAscii,
}

#[derive(Debug, Error)]
pub enum ReassemblyError {
    #[error("Malformed slot header: {0:?}")]
    MalformedHeader(String),
    #[error("Continuation slot {0} is missing")]
    MissingSlot(usize),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Outcome of reading the slots back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembly {
    /// No state stored (first use, or a zero-length header).
    Absent,
    Complete(String),
    /// Best-effort data whose length disagrees with the header. `data` has
    /// already been cut to `declared` when more was read.
    LengthMismatch {
        data: String,
        declared: usize,
        actual: usize,
    },
}

pub fn required_slots(len: usize, max_payload: usize) -> usize {
    len.div_ceil(max_payload)
}

/// Split `data` into slot payloads, header included in the first.
pub fn chunk(data: &str, limits: &SlotLimits) -> Result<Vec<String>, ChunkError> {
    if !data.is_ascii() {
        return Err(ChunkError::NonAscii);
    }

    let len = data.len();
    let required = required_slots(len, limits.max_payload);
    if required > limits.max_slots {
        return Err(ChunkError::CapacityExceeded {
            required,
            max_slots: limits.max_slots,
        });
    }

    let mut chunks = Vec::with_capacity(required);
    // ASCII was checked above, so every byte offset is a char boundary.
    for start in (0..len).step_by(limits.max_payload) {
        let piece = &data[start..(start + limits.max_payload).min(len)];
        if start == 0 {
            chunks.push(format!("{len}{HEADER_DELIMITER}{piece}"));
        } else {
            chunks.push(piece.to_string());
        }
    }

    debug_assert_eq!(chunks.len(), required);
    Ok(chunks)
}

/// Read slot 1, then exactly as many continuation slots as its header implies.
pub fn reassemble<T>(transport: &T, limits: &SlotLimits) -> Result<Reassembly, ReassemblyError>
where
    T: SlotTransport + ?Sized,
{
    let Some(first) = transport.read_slot(1)? else {
        return Ok(Reassembly::Absent);
    };

    let (header, first_chunk) = first
        .split_once(HEADER_DELIMITER)
        .ok_or_else(|| ReassemblyError::MalformedHeader(first.clone()))?;

    let declared: usize = header
        .parse()
        .map_err(|_| ReassemblyError::MalformedHeader(header.to_string()))?;
    if declared == 0 {
        return Ok(Reassembly::Absent);
    }

    let slots = required_slots(declared, limits.max_payload);
    if slots > limits.max_slots {
        return Err(ReassemblyError::MalformedHeader(header.to_string()));
    }

    let mut data = String::with_capacity(declared);
    data.push_str(first_chunk);
    for index in 2..=slots {
        let piece = transport
            .read_slot(index)?
            .ok_or(ReassemblyError::MissingSlot(index))?;
        data.push_str(&piece);
    }

    let actual = data.len();
    if actual == declared {
        return Ok(Reassembly::Complete(data));
    }

    if actual > declared {
        let mut cut = declared;
        while !data.is_char_boundary(cut) {
            cut -= 1;
        }
        data.truncate(cut);
    }

    Ok(Reassembly::LengthMismatch {
        data,
        declared,
        actual,
    })
}
