pub mod pipeline;
pub mod scheduler;

pub use pipeline::{Pipeline, TickOutcome};
pub use scheduler::{LoopState, Scheduler};

pub mod prelude {
    pub use crate::{Pipeline, Scheduler, TickOutcome};
    pub use portada_core::{DestinationConfig, Error, Result};
}
