pub mod config;
pub mod error;
pub mod ledger;
pub mod publish;
pub mod render;
pub mod source;
pub mod types;

pub use config::{BrandingConfig, CardTemplate, DestinationConfig, Environment};
pub use error::Error;
pub use ledger::PublicationLedger;
pub use publish::{PublishOutcome, SocialSink};
pub use render::CardRenderer;
pub use source::ContentSource;
pub use types::{Article, RenderJob};

pub type Result<T> = std::result::Result<T, Error>;
