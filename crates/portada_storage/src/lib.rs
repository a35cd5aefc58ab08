pub mod backends;

pub use backends::{JsonLedger, MemoryLedger};

pub mod prelude {
    pub use super::backends::*;
    pub use portada_core::{PublicationLedger, Result};
}
