//! Per-shot camera motion (slow push-ins and Ken Burns zooms).

use std::{fmt, str::FromStr};

use crate::{animation::ease::Ease, foundation::error::StoryscapeError};

/// Cinematographic shot size, from most to least intimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotSize {
    ExtremeCloseUp,
    CloseUp,
    Medium,
    Long,
    ExtremeLong,
}

/// Zoom toward `target_scale` over `duration_secs`, then hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraMotion {
    pub target_scale: f64,
    pub duration_secs: f64,
    pub ease: Ease,
}

impl CameraMotion {
    /// Idle "breathing" used for medium shots and when no hint is given.
    pub const IDLE: CameraMotion = CameraMotion {
        target_scale: 1.02,
        duration_secs: 10.0,
        ease: Ease::EASE_IN_OUT,
    };

    pub fn for_shot(shot: Option<ShotSize>) -> Self {
        match shot {
            Some(ShotSize::ExtremeCloseUp) => Self {
                target_scale: 1.25,
                duration_secs: 20.0,
                ease: Ease::EASE_OUT,
            },
            Some(ShotSize::CloseUp) => Self {
                target_scale: 1.15,
                duration_secs: 15.0,
                ease: Ease::EASE_OUT,
            },
            Some(ShotSize::Long) => Self {
                target_scale: 1.05,
                duration_secs: 20.0,
                ease: Ease::EASE_IN_OUT,
            },
            Some(ShotSize::ExtremeLong) => Self {
                target_scale: 1.1,
                duration_secs: 30.0,
                ease: Ease::Linear,
            },
            Some(ShotSize::Medium) | None => Self::IDLE,
        }
    }

    /// Scale factor `elapsed` seconds after the layer appeared.
    pub fn scale_at(&self, elapsed: f64) -> f64 {
        let t = self.ease.progress(elapsed.max(0.0), self.duration_secs);
        1.0 + (self.target_scale - 1.0) * t
    }
}

impl ShotSize {
    pub const ALL: [ShotSize; 5] = [
        ShotSize::ExtremeCloseUp,
        ShotSize::CloseUp,
        ShotSize::Medium,
        ShotSize::Long,
        ShotSize::ExtremeLong,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ShotSize::ExtremeCloseUp => "extreme_close_up",
            ShotSize::CloseUp => "close_up",
            ShotSize::Medium => "medium",
            ShotSize::Long => "long",
            ShotSize::ExtremeLong => "extreme_long",
        }
    }
}

impl fmt::Display for ShotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ShotSize {
    type Err = StoryscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = crate::prompt::tables::normalize_key(s);
        let key = key.strip_suffix("_shot").unwrap_or(key.as_str());
        match key {
            "extreme_close_up" | "ecu" => Ok(ShotSize::ExtremeCloseUp),
            "close_up" | "cu" => Ok(ShotSize::CloseUp),
            "medium" | "ms" => Ok(ShotSize::Medium),
            "long" | "ls" => Ok(ShotSize::Long),
            "extreme_long" | "els" => Ok(ShotSize::ExtremeLong),
            other => Err(StoryscapeError::validation(format!(
                "unknown shot size '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/camera.rs"]
mod tests;
