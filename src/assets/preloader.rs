//! Off-thread preloading.
//!
//! Fetch and decode run on the rayon pool; results come back to the UI thread through a
//! channel and are applied there with [`crate::TransitionEngine::complete`]. Starting a new
//! preload cooperatively cancels the previous one, but the engine's generation check is what
//! guarantees stale results never touch the layer stack.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::{
    assets::{
        decode::{PreparedImage, decode_image},
        loader::ImageLoader,
    },
    foundation::error::{StoryscapeError, StoryscapeResult},
    transition::engine::PreloadRequest,
};

/// Shared flag checked by a preload between its fetch and decode steps.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A preload that ran to completion, was cancelled, or failed.
#[derive(Debug)]
pub struct Finished {
    pub request: PreloadRequest,
    pub result: StoryscapeResult<Arc<PreparedImage>>,
}

pub struct Preloader {
    loader: Arc<dyn ImageLoader>,
    tx: Sender<Finished>,
    rx: Receiver<Finished>,
    in_flight: Option<CancellationToken>,
    outstanding: usize,
}

impl std::fmt::Debug for Preloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preloader")
            .field("outstanding", &self.outstanding)
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl Preloader {
    pub fn new(loader: Arc<dyn ImageLoader>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            loader,
            tx,
            rx,
            in_flight: None,
            outstanding: 0,
        }
    }

    /// Start fetching `request.src`, cancelling whatever was in flight.
    pub fn spawn(&mut self, request: PreloadRequest) {
        self.cancel_in_flight();
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.outstanding += 1;

        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        tracing::debug!(src = %request.src, generation = request.generation, "spawning preload");
        rayon::spawn(move || {
            let result = load_and_decode(loader.as_ref(), &request.src, &token);
            // The receiver only disappears with the preloader itself.
            let _ = tx.send(Finished { request, result });
        });
    }

    pub fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    /// Collect every finished preload without blocking.
    pub fn drain(&mut self) -> Vec<Finished> {
        let done: Vec<Finished> = self.rx.try_iter().collect();
        self.outstanding = self.outstanding.saturating_sub(done.len());
        done
    }

    /// Block up to `timeout` for the next finished preload.
    pub fn wait(&mut self, timeout: Duration) -> Option<Finished> {
        if self.outstanding == 0 {
            return None;
        }
        let done = self.rx.recv_timeout(timeout).ok()?;
        self.outstanding -= 1;
        Some(done)
    }

    /// Number of spawned preloads whose result has not been collected yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

fn load_and_decode(
    loader: &dyn ImageLoader,
    src: &str,
    token: &CancellationToken,
) -> StoryscapeResult<Arc<PreparedImage>> {
    if token.is_cancelled() {
        return Err(StoryscapeError::load("preload cancelled"));
    }
    let bytes = loader.fetch(src)?;
    if token.is_cancelled() {
        return Err(StoryscapeError::load("preload cancelled"));
    }
    let image = decode_image(&bytes)?;
    Ok(Arc::new(image))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preloader.rs"]
mod tests;
