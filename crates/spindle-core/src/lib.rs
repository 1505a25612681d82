pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod layout;
pub mod motion;
pub mod track;

pub use carousel::{Activation, Carousel};
pub use config::{AppConfig, CarouselConfig, EasingType, UiConfig};
pub use error::{Error, Result};
pub use layout::{Geometry, LayoutPrefs};
pub use track::{Item, ItemSet, Track};
