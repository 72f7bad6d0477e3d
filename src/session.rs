//! UI-thread glue between the transition engine and the preloader.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    assets::{loader::ImageLoader, preloader::Preloader},
    config::TransitionConfig,
    foundation::{
        core::{Canvas, FrameRGBA},
        error::StoryscapeResult,
    },
    render::cpu::render_frame,
    transition::{
        deque::BoundedDeque,
        engine::{BackdropProps, Completion, TransitionEngine},
        layer::{IdSource, Layer, SequentialIds},
    },
};

/// A mounted backdrop: feed it props, pump it once per UI tick, render when needed.
///
/// Dropping the session tears the engine down and cancels the in-flight preload.
#[derive(Debug)]
pub struct BackdropSession<I: IdSource = SequentialIds> {
    engine: TransitionEngine<I>,
    preloader: Preloader,
    config: TransitionConfig,
}

impl BackdropSession<SequentialIds> {
    pub fn new(loader: Arc<dyn ImageLoader>, config: TransitionConfig) -> Self {
        Self::with_ids(loader, config, SequentialIds::default())
    }
}

impl<I: IdSource> BackdropSession<I> {
    pub fn with_ids(loader: Arc<dyn ImageLoader>, config: TransitionConfig, ids: I) -> Self {
        Self {
            engine: TransitionEngine::with_ids(ids),
            preloader: Preloader::new(loader),
            config,
        }
    }

    /// Push new host props, starting (or cancelling) a preload when the trigger changed.
    pub fn update(&mut self, props: BackdropProps) {
        let before = self.engine.generation();
        match self.engine.set_props(props) {
            Some(request) => self.preloader.spawn(request),
            None if self.engine.generation() != before => self.preloader.cancel_in_flight(),
            None => {}
        }
    }

    /// Apply every preload that finished since the last call.
    pub fn pump(&mut self) -> Vec<Completion> {
        self.preloader
            .drain()
            .into_iter()
            .map(|done| self.engine.complete(&done.request, done.result))
            .collect()
    }

    /// Block until every outstanding preload has reported back or `timeout` elapses.
    pub fn wait_pending(&mut self, timeout: Duration) -> Vec<Completion> {
        let deadline = Instant::now() + timeout;
        let mut out = Vec::new();
        while self.preloader.outstanding() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    outstanding = self.preloader.outstanding(),
                    "timed out waiting for preloads"
                );
                break;
            }
            let Some(done) = self.preloader.wait(remaining) else {
                continue;
            };
            out.push(self.engine.complete(&done.request, done.result));
        }
        out
    }

    pub fn advance(&mut self, dt: f64) {
        self.engine.advance(dt);
    }

    pub fn render(&self, canvas: Canvas) -> StoryscapeResult<FrameRGBA> {
        render_frame(&self.engine, canvas, &self.config)
    }

    pub fn layers(&self) -> &BoundedDeque<Layer> {
        self.engine.layers()
    }

    pub fn engine(&self) -> &TransitionEngine<I> {
        &self.engine
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn has_pending(&self) -> bool {
        self.preloader.outstanding() > 0
    }
}

impl<I: IdSource> Drop for BackdropSession<I> {
    fn drop(&mut self) {
        self.engine.teardown();
        self.preloader.cancel_in_flight();
    }
}
