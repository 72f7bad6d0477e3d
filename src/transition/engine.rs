//! Layer transition state machine.
//!
//! The engine is driven from a single UI thread:
//!
//! 1. [`TransitionEngine::set_props`] records the latest host props. When the `(src, shot)`
//!    trigger changes it starts a new request generation and, for a non-empty `src`, hands back a
//!    [`PreloadRequest`] for the host (or [`crate::Preloader`]) to fetch off-screen.
//! 2. [`TransitionEngine::complete`] applies a finished preload. Only the current generation of a
//!    mounted engine may mutate the layer stack; anything else is dropped as stale.
//! 3. A successful, non-redundant completion appends a layer; the stack keeps at most
//!    [`LAYER_CAP`] layers, evicting the oldest.
//!
//! Failed loads never change what is on screen.

use std::sync::Arc;

use crate::{
    animation::camera::ShotSize,
    assets::decode::PreparedImage,
    config::DEFAULT_BRIGHTNESS,
    foundation::error::StoryscapeResult,
    render::position::BackgroundPosition,
    transition::{
        deque::BoundedDeque,
        layer::{IdSource, Layer, LayerId, SequentialIds},
    },
};

/// Maximum number of simultaneously retained layers.
pub const LAYER_CAP: usize = 2;

/// Inputs supplied by the embedding screen.
#[derive(Clone, Debug, PartialEq)]
pub struct BackdropProps {
    /// Resolved image URL or path. Empty means "nothing to show yet".
    pub src: String,
    /// Blurred loading/transition look. Overrides camera motion.
    pub should_blur: bool,
    /// Brightness multiplier for unblurred layers.
    pub brightness: f32,
    pub position: BackgroundPosition,
    pub shot: Option<ShotSize>,
}

impl Default for BackdropProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            should_blur: false,
            brightness: DEFAULT_BRIGHTNESS,
            position: BackgroundPosition::CENTER,
            shot: None,
        }
    }
}

impl BackdropProps {
    pub fn with_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn shot(mut self, shot: Option<ShotSize>) -> Self {
        self.shot = shot;
        self
    }

    pub fn blurred(mut self, should_blur: bool) -> Self {
        self.should_blur = should_blur;
        self
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn position(mut self, position: BackgroundPosition) -> Self {
        self.position = position;
        self
    }
}

/// A preload the host must perform before the engine can show `src`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadRequest {
    pub generation: u64,
    pub src: String,
    pub shot: Option<ShotSize>,
}

/// What [`TransitionEngine::complete`] did with a finished preload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A new topmost layer was appended; `evicted` lists layers dropped by the cap.
    Appended { id: LayerId, evicted: Vec<LayerId> },
    /// The topmost layer already shows this `(src, shot)`.
    Unchanged,
    /// The request was superseded or the engine was torn down.
    Stale,
    /// The image failed to load or decode; the previous layer stays on screen.
    Failed,
}

#[derive(Debug)]
pub struct TransitionEngine<I: IdSource = SequentialIds> {
    layers: BoundedDeque<Layer>,
    props: BackdropProps,
    trigger: Option<(String, Option<ShotSize>)>,
    generation: u64,
    mounted: bool,
    clock: f64,
    ids: I,
}

impl TransitionEngine<SequentialIds> {
    pub fn new() -> Self {
        Self::with_ids(SequentialIds::default())
    }
}

impl Default for TransitionEngine<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> TransitionEngine<I> {
    pub fn with_ids(ids: I) -> Self {
        Self {
            layers: BoundedDeque::new(LAYER_CAP),
            props: BackdropProps::default(),
            trigger: None,
            generation: 0,
            mounted: true,
            clock: 0.0,
            ids,
        }
    }

    /// Record new host props. Returns a preload request when `src` or `shot` changed.
    #[tracing::instrument(level = "debug", skip(self, props), fields(src = %props.src, shot = ?props.shot))]
    pub fn set_props(&mut self, props: BackdropProps) -> Option<PreloadRequest> {
        let key = (props.src.clone(), props.shot);
        let changed = self.trigger.as_ref() != Some(&key);
        self.props = props;
        if !self.mounted || !changed {
            return None;
        }

        self.trigger = Some(key);
        self.generation += 1;
        if self.props.src.is_empty() {
            tracing::debug!("empty src, nothing to preload");
            return None;
        }
        Some(PreloadRequest {
            generation: self.generation,
            src: self.props.src.clone(),
            shot: self.props.shot,
        })
    }

    /// Apply the outcome of a preload started by [`Self::set_props`].
    #[tracing::instrument(level = "debug", skip(self, request, result), fields(src = %request.src, generation = request.generation))]
    pub fn complete(
        &mut self,
        request: &PreloadRequest,
        result: StoryscapeResult<Arc<PreparedImage>>,
    ) -> Completion {
        if !self.mounted || request.generation != self.generation {
            tracing::debug!(current = self.generation, "dropping stale preload");
            return Completion::Stale;
        }

        let image = match result {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(src = %request.src, error = %err, "preload failed, keeping current backdrop");
                return Completion::Failed;
            }
        };

        if self
            .layers
            .back()
            .is_some_and(|top| top.shows(&request.src, request.shot))
        {
            return Completion::Unchanged;
        }

        let id = self.ids.next_id();
        debug_assert!(
            self.layers.iter().all(|l| l.id() != &id),
            "IdSource repeated layer id {id}"
        );
        let layer = Layer::new(
            id.clone(),
            request.src.clone(),
            request.shot,
            self.clock,
            image,
        );
        let evicted: Vec<LayerId> = self
            .layers
            .push_back(layer)
            .into_iter()
            .map(|l| l.id().clone())
            .collect();
        tracing::debug!(%id, evicted = evicted.len(), layers = self.layers.len(), "appended layer");
        Completion::Appended { id, evicted }
    }

    /// Mark the engine torn down. Later completions are discarded.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advance the engine clock by `dt` seconds. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layers(&self) -> &BoundedDeque<Layer> {
        &self.layers
    }

    pub fn top(&self) -> Option<&Layer> {
        self.layers.back()
    }

    pub fn props(&self) -> &BackdropProps {
        &self.props
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/engine.rs"]
mod tests;
