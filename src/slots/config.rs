use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Slot capacity {capacity} leaves no room for payload after {overhead} bytes of framing")]
    CapacityTooSmall { capacity: usize, overhead: usize },
    #[error("At least one slot is required")]
    NoSlots,
    #[error("Slot payload capacity must be positive")]
    ZeroPayload,
    #[error("{max_slots} slots of {capacity} bytes overflow the length header")]
    CapacityOverflow { capacity: usize, max_slots: usize },
    #[error("Slot TTL of {0} seconds is out of range")]
    TtlOutOfRange(i64),
}

/// Transport-imposed slot geometry. Serializable so hosts can ship it with
/// their own settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    /// Longest line the transport serves for one slot, framing included.
    pub slot_capacity: usize,
    pub max_slots: usize,
    pub slot_prefix: String,
    pub slot_ttl_secs: i64,
}

impl StoreConfig {
    pub fn v0() -> Self {
        Self {
            slot_capacity: 4096,
            max_slots: 15,
            slot_prefix: "wset".into(),
            slot_ttl_secs: 5 * 365 * 24 * 60 * 60,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Bytes of each slot consumed by anything other than payload:
    /// `<prefix>NN=`, the slot-1 length header, and one byte of slack.
    pub fn framing_overhead(&self) -> Result<usize, ConfigError> {
        let largest = self
            .slot_capacity
            .checked_mul(self.max_slots)
            .ok_or(ConfigError::CapacityOverflow {
                capacity: self.slot_capacity,
                max_slots: self.max_slots,
            })?;
        let name = self.slot_prefix.len() + decimal_digits(self.max_slots).max(2) + 1;
        let header = decimal_digits(largest) + 1;
        Ok(name + header + 1)
    }

    pub fn limits(&self) -> Result<SlotLimits, ConfigError> {
        let overhead = self.framing_overhead()?;
        if self.slot_capacity <= overhead {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.slot_capacity,
                overhead,
            });
        }
        let ttl = Duration::try_seconds(self.slot_ttl_secs)
            .ok_or(ConfigError::TtlOutOfRange(self.slot_ttl_secs))?;
        let limits = SlotLimits::new(self.slot_capacity - overhead, self.max_slots)?;
        Ok(limits.with_ttl(ttl))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Capacity constants handed to the store at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLimits {
    pub max_payload: usize,
    pub max_slots: usize,
    pub ttl: Duration,
}

impl SlotLimits {
    pub fn new(max_payload: usize, max_slots: usize) -> Result<Self, ConfigError> {
        if max_payload == 0 {
            return Err(ConfigError::ZeroPayload);
        }
        if max_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        Ok(Self {
            max_payload,
            max_slots,
            ttl: Duration::days(5 * 365),
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Largest serialized state that still fits.
    pub fn max_data_len(&self) -> usize {
        self.max_payload * self.max_slots
    }
}

fn decimal_digits(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
