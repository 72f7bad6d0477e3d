use std::{fmt, sync::Arc};

use crate::{animation::camera::ShotSize, assets::decode::PreparedImage};

/// Identity token of a layer, unique for the lifetime of one engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of layer identifiers. Implementations must never repeat an id within a session.
pub trait IdSource {
    fn next_id(&mut self) -> LayerId;
}

/// Monotonic `layer-N` ids scoped to one engine.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> LayerId {
        let id = LayerId(format!("layer-{}", self.next));
        self.next += 1;
        id
    }
}

/// Random v4 UUID ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> LayerId {
        LayerId(uuid::Uuid::new_v4().to_string())
    }
}

impl<I: IdSource + ?Sized> IdSource for Box<I> {
    fn next_id(&mut self) -> LayerId {
        (**self).next_id()
    }
}

/// One image in the transition stack.
///
/// Immutable once created: its shot hint (and so its camera motion) and birth time are fixed
/// regardless of later prop changes.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerId,
    src: String,
    shot: Option<ShotSize>,
    born_at: f64,
    image: Arc<PreparedImage>,
}

impl Layer {
    pub(crate) fn new(
        id: LayerId,
        src: String,
        shot: Option<ShotSize>,
        born_at: f64,
        image: Arc<PreparedImage>,
    ) -> Self {
        Self {
            id,
            src,
            shot,
            born_at,
            image,
        }
    }

    pub fn id(&self) -> &LayerId {
        &self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn shot(&self) -> Option<ShotSize> {
        self.shot
    }

    /// Engine clock reading (seconds) when the layer was appended.
    pub fn born_at(&self) -> f64 {
        self.born_at
    }

    pub fn image(&self) -> &Arc<PreparedImage> {
        &self.image
    }

    /// Whether this layer already shows `src` with the same shot hint.
    pub fn shows(&self, src: &str, shot: Option<ShotSize>) -> bool {
        self.src == src && self.shot == shot
    }
}
