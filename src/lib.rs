//! Ken Burns image transitioner.
//!
//! [`KenBurnsView`] cycles through a list of images, a list of image paths or a
//! [`KenBurnsDatasource`], giving each one a slow pan/zoom and crossfading to
//! the next. It is tick driven: call [`KenBurnsView::update`] every frame and
//! draw [`KenBurnsView::layers`].

pub mod config;
pub mod constants;
pub mod delegate;
pub mod error;
pub mod motion;
pub mod slide;
pub mod source;
pub mod state;
pub mod texture_loader;
pub mod view;

pub use config::KenBurnsConfig;
pub use delegate::KenBurnsDelegate;
pub use error::{KenBurnsError, KenBurnsResult};
pub use motion::{Corner, Motion, Placement};
pub use slide::Slide;
pub use source::{FromPath, ImageSize, KenBurnsDatasource};
pub use state::KenBurnsState;
pub use view::KenBurnsView;
