pub mod output;
pub mod renderer;
pub mod template;

pub use output::{remove_temp_image, write_temp_image};
pub use renderer::HttpRenderer;
pub use template::compose;

pub mod prelude {
    pub use portada_core::{CardRenderer, Error, RenderJob, Result};
}
