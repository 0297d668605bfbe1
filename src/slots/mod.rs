pub mod chunking;
pub mod config;
pub mod dir;
pub mod memory;
pub mod transport;

pub use chunking::{chunk, reassemble, required_slots, ChunkError, Reassembly, ReassemblyError};
pub use config::{ConfigError, SlotLimits, StoreConfig};
pub use dir::DirSlots;
pub use memory::MemorySlots;
pub use transport::{SlotTransport, TransportError};
