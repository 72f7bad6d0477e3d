use crate::animation::ease::Ease;

/// Entrance fade of a newly appended topmost layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeIn {
    pub duration_secs: f64,
    pub ease: Ease,
}

impl FadeIn {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            ease: Ease::EASE_OUT,
        }
    }

    pub fn opacity_at(&self, elapsed: f64) -> f32 {
        self.ease.progress(elapsed.max(0.0), self.duration_secs) as f32
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration_secs
    }
}
