pub mod graph;
pub mod sequence;

pub use graph::GraphSink;
pub use sequence::publish_card;

pub mod prelude {
    pub use portada_core::{Error, PublishOutcome, Result, SocialSink};
}
