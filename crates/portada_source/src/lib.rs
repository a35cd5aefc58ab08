pub mod image;
pub mod wordpress;

pub use image::select_image_url;
pub use wordpress::WordPressSource;

pub mod prelude {
    pub use portada_core::{Article, ContentSource, Error, Result};
}
