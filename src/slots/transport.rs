use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Slot indices start at 1, got {0}")]
    InvalidSlotIndex(usize),
    #[error("Slot TTL {0} overflows the clock")]
    TtlOutOfRange(Duration),
}

/// Bounded, individually addressable storage slots (1-based).
///
/// Reads return `None` for slots never written or already expired.
pub trait SlotTransport {
    fn read_slot(&self, index: usize) -> Result<Option<String>, TransportError>;

    fn write_slot(&mut self, index: usize, payload: &str, ttl: Duration)
        -> Result<(), TransportError>;

    fn expire_slot(&mut self, index: usize) -> Result<(), TransportError>;
}

impl<T: SlotTransport + ?Sized> SlotTransport for &mut T {
    fn read_slot(&self, index: usize) -> Result<Option<String>, TransportError> {
        (**self).read_slot(index)
    }

    fn write_slot(
        &mut self,
        index: usize,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TransportError> {
        (**self).write_slot(index, payload, ttl)
    }

    fn expire_slot(&mut self, index: usize) -> Result<(), TransportError> {
        (**self).expire_slot(index)
    }
}

pub(crate) fn check_index(index: usize) -> Result<(), TransportError> {
    if index == 0 {
        return Err(TransportError::InvalidSlotIndex(index));
    }
    Ok(())
}
