use crate::{
    animation::{camera::CameraMotion, fade::FadeIn},
    config::TransitionConfig,
    render::composite::MAX_BRIGHTNESS,
    transition::{engine::TransitionEngine, layer::IdSource, layer::Layer},
};

/// Per-layer filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerFilter {
    Blur { radius: u32, sigma: f32 },
    Brightness(f32),
}

/// How one layer should look at the engine's current time.
#[derive(Clone, Copy, Debug)]
pub struct LayerVisual<'a> {
    pub layer: &'a Layer,
    pub opacity: f32,
    /// Zoom around the canvas centre.
    pub scale: f64,
    pub filter: LayerFilter,
}

/// Resolve the visual state of every retained layer, back to front.
///
/// - Only the topmost layer fades in, and only when it covers an older layer.
/// - Camera motion comes from the layer's own shot hint, timed from its birth.
/// - Blur replaces both the camera motion and the brightness filter.
pub fn layer_visuals<'a, I: IdSource>(
    engine: &'a TransitionEngine<I>,
    cfg: &TransitionConfig,
) -> Vec<LayerVisual<'a>> {
    let props = engine.props();
    let layers = engine.layers();
    let fade = FadeIn::new(cfg.fade_secs);
    let top_index = layers.len().saturating_sub(1);
    let brightness = sanitize_brightness(props.brightness, cfg.default_brightness);

    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let elapsed = engine.now() - layer.born_at();
            let opacity = if i == top_index && layers.len() > 1 {
                fade.opacity_at(elapsed)
            } else {
                1.0
            };
            let (scale, filter) = if props.should_blur {
                (
                    cfg.blur_scale,
                    LayerFilter::Blur {
                        radius: cfg.blur_radius,
                        sigma: cfg.blur_sigma,
                    },
                )
            } else {
                (
                    CameraMotion::for_shot(layer.shot()).scale_at(elapsed),
                    LayerFilter::Brightness(brightness),
                )
            };
            LayerVisual {
                layer,
                opacity,
                scale,
                filter,
            }
        })
        .collect()
}

fn sanitize_brightness(brightness: f32, fallback: f32) -> f32 {
    if brightness.is_finite() {
        brightness.clamp(0.0, MAX_BRIGHTNESS)
    } else {
        fallback
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/visual.rs"]
mod tests;
