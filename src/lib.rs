//! Storyscape renders the scenic backdrop of an interactive fiction app.
//!
//! Two pieces make up the crate:
//!
//! - The **prompt composer** turns story context (genre, mood, visual style) into a
//!   fetchable image-generation URL with a fresh random seed. It performs no IO.
//! - The **transition engine** owns a stack of at most two image layers. It asks the host to
//!   preload every new `src`, appends a layer only once the image decoded, cross-fades the new
//!   layer in, gives every layer its own camera motion keyed by shot size, and evicts the oldest
//!   layer when the cap is exceeded.
//!
//! # Event loop
//!
//! ```no_run
//! use std::sync::Arc;
//! use storyscape::{BackdropProps, BackdropSession, Canvas, FsLoader, TransitionConfig};
//!
//! let mut session = BackdropSession::new(Arc::new(FsLoader::new()), TransitionConfig::default());
//! session.update(BackdropProps::with_src("scenes/castle.png"));
//! loop {
//!     session.pump();
//!     session.advance(1.0 / 60.0);
//!     let _frame = session.render(Canvas::new(1280, 720)?)?;
//! #   break;
//! }
//! # Ok::<(), storyscape::StoryscapeError>(())
//! ```
//!
//! Failures never surface on screen: an unknown genre falls back to a default fragment, a
//! failed preload leaves the previous layer in place, and a preload that finishes after its
//! request was superseded (or the backdrop torn down) is ignored.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod foundation;
mod prompt;
mod render;
mod transition;

/// Runtime configuration (endpoint + transition tuning).
pub mod config;
/// Engine + preloader glue for a UI event loop.
pub mod session;

pub use animation::camera::{CameraMotion, ShotSize};
pub use animation::ease::Ease;
pub use animation::fade::FadeIn;
pub use assets::decode::{PreparedImage, decode_image};
#[cfg(feature = "http")]
pub use assets::loader::HttpLoader;
pub use assets::loader::{DefaultLoader, FsLoader, ImageLoader, MemoryLoader};
pub use assets::preloader::{CancellationToken, Finished, Preloader};
pub use config::{BackdropConfig, EndpointConfig, TransitionConfig};
pub use foundation::core::{Canvas, FrameRGBA};
pub use foundation::error::{StoryscapeError, StoryscapeResult};
pub use prompt::composer::{
    BackgroundDescriptor, GeneratedImageRequest, SEED_BOUND, compose_prompt_text,
    compose_request, compose_url, default_url, draw_seed, random_url,
};
pub use prompt::tables::{
    DEFAULT_GENRE, DEFAULT_MOOD, GENRE_SCENES, Genre, MOOD_ATMOSPHERES, Mood,
    SCENERY_ONLY_SUFFIX, Style,
};
pub use render::blur::{MAX_BLUR_RADIUS, blur_rgba8_premul};
pub use render::composite::{MAX_BRIGHTNESS, brightness_in_place, over, over_in_place};
pub use render::cpu::{layer_transform, render_frame};
pub use render::position::BackgroundPosition;
pub use session::BackdropSession;
pub use transition::deque::BoundedDeque;
pub use transition::engine::{
    BackdropProps, Completion, LAYER_CAP, PreloadRequest, TransitionEngine,
};
pub use transition::layer::{IdSource, Layer, LayerId, SequentialIds, UuidIds};
pub use transition::visual::{LayerFilter, LayerVisual, layer_visuals};
