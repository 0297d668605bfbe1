use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::slots::transport::{check_index, SlotTransport, TransportError};

#[derive(Debug, Clone)]
struct StoredSlot {
    payload: String,
    /// `None` for slots that arrived with a request and carry no expiry.
    expires_at: Option<DateTime<Utc>>,
}

impl StoredSlot {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// Cookie-jar transport: slots are named `<prefix><index>` and expire by TTL.
///
/// Every write and expiry is also rendered as a `Set-Cookie` header value so a
/// host can forward them on the response.
#[derive(Debug, Clone)]
pub struct MemorySlots {
    prefix: String,
    slots: BTreeMap<usize, StoredSlot>,
    set_cookie: Vec<String>,
}

impl MemorySlots {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            slots: BTreeMap::new(),
            set_cookie: Vec::new(),
        }
    }

    /// Load slots from an incoming `Cookie` request header. Cookies whose name
    /// is not `<prefix><index>` are ignored.
    pub fn from_cookie_header(prefix: impl Into<String>, header: &str) -> Self {
        let mut jar = Self::new(prefix);
        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let Some(index) = jar.parse_slot_name(name) else {
                continue;
            };
            jar.put(index, value);
        }
        jar
    }

    pub fn slot_name(&self, index: usize) -> String {
        format!("{}{index}", self.prefix)
    }

    fn parse_slot_name(&self, name: &str) -> Option<usize> {
        let index: usize = name.strip_prefix(self.prefix.as_str())?.parse().ok()?;
        (index > 0).then_some(index)
    }

    /// Store a payload with no expiry, as if it arrived with the request.
    pub fn put(&mut self, index: usize, payload: impl Into<String>) {
        self.slots.insert(
            index,
            StoredSlot {
                payload: payload.into(),
                expires_at: None,
            },
        );
    }

    /// Live payloads by slot index.
    pub fn payloads(&self) -> BTreeMap<usize, String> {
        let now = Utc::now();
        self.slots
            .iter()
            .filter(|(_, slot)| slot.is_live(now))
            .map(|(index, slot)| (*index, slot.payload.clone()))
            .collect()
    }

    /// Render live slots as a `Cookie` request header for the next request.
    pub fn cookie_header(&self) -> String {
        self.payloads()
            .into_iter()
            .map(|(index, payload)| format!("{}={payload}", self.slot_name(index)))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn take_set_cookie_headers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.set_cookie)
    }
}

impl SlotTransport for MemorySlots {
    fn read_slot(&self, index: usize) -> Result<Option<String>, TransportError> {
        check_index(index)?;
        let now = Utc::now();
        Ok(self
            .slots
            .get(&index)
            .filter(|slot| slot.is_live(now))
            .map(|slot| slot.payload.clone()))
    }

    fn write_slot(
        &mut self,
        index: usize,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), TransportError> {
        check_index(index)?;
        if ttl <= Duration::zero() {
            return self.expire_slot(index);
        }

        let Some(expires_at) = Utc::now().checked_add_signed(ttl) else {
            return Err(TransportError::TtlOutOfRange(ttl));
        };

        let name = self.slot_name(index);
        self.slots.insert(
            index,
            StoredSlot {
                payload: payload.to_string(),
                expires_at: Some(expires_at),
            },
        );
        self.set_cookie
            .push(format!("{name}={payload}; Max-Age={}", ttl.num_seconds()));
        Ok(())
    }

    fn expire_slot(&mut self, index: usize) -> Result<(), TransportError> {
        check_index(index)?;
        let name = self.slot_name(index);
        self.slots.remove(&index);
        self.set_cookie.push(format!("{name}=; Max-Age=0"));
        Ok(())
    }
}
