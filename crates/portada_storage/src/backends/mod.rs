pub mod json;
pub mod memory;

pub use json::JsonLedger;
pub use memory::MemoryLedger;
