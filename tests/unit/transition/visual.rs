use std::sync::Arc;

use super::*;
use crate::{
    animation::camera::ShotSize,
    assets::decode::PreparedImage,
    transition::engine::{BackdropProps, TransitionEngine},
};

fn show(engine: &mut TransitionEngine, props: BackdropProps) {
    let request = engine.set_props(props).unwrap();
    let image = Arc::new(PreparedImage::solid(2, 2, [0, 0, 0, 255]));
    engine.complete(&request, Ok(image));
}

#[test]
fn first_layer_is_fully_opaque_immediately() {
    let mut engine = TransitionEngine::new();
    show(&mut engine, BackdropProps::with_src("a"));
    let visuals = layer_visuals(&engine, &TransitionConfig::default());
    assert_eq!(visuals.len(), 1);
    assert_eq!(visuals[0].opacity, 1.0);
}

#[test]
fn only_topmost_layer_fades_in() {
    let cfg = TransitionConfig::default();
    let mut engine = TransitionEngine::new();
    show(&mut engine, BackdropProps::with_src("a"));
    engine.advance(5.0);
    show(&mut engine, BackdropProps::with_src("b"));

    let visuals = layer_visuals(&engine, &cfg);
    assert_eq!(visuals[0].opacity, 1.0);
    assert_eq!(visuals[1].opacity, 0.0);

    engine.advance(cfg.fade_secs * 0.5);
    let mid = layer_visuals(&engine, &cfg)[1].opacity;
    assert!(mid > 0.5 && mid < 1.0);

    engine.advance(cfg.fade_secs);
    assert_eq!(layer_visuals(&engine, &cfg)[1].opacity, 1.0);
}

#[test]
fn camera_scale_follows_each_layers_own_shot() {
    let cfg = TransitionConfig::default();
    let mut engine = TransitionEngine::new();
    show(
        &mut engine,
        BackdropProps::with_src("a").shot(Some(ShotSize::ExtremeCloseUp)),
    );
    show(
        &mut engine,
        BackdropProps::with_src("b").shot(Some(ShotSize::ExtremeLong)),
    );
    engine.advance(60.0);
    let visuals = layer_visuals(&engine, &cfg);
    assert!((visuals[0].scale - 1.25).abs() < 1e-9);
    assert!((visuals[1].scale - 1.1).abs() < 1e-9);
    assert_eq!(visuals[0].filter, LayerFilter::Brightness(0.6));
}

#[test]
fn blur_overrides_camera_and_brightness() {
    let cfg = TransitionConfig::default();
    let mut engine = TransitionEngine::new();
    show(
        &mut engine,
        BackdropProps::with_src("a").shot(Some(ShotSize::CloseUp)),
    );
    engine.set_props(
        BackdropProps::with_src("a")
            .shot(Some(ShotSize::CloseUp))
            .blurred(true),
    );
    engine.advance(10.0);
    let visuals = layer_visuals(&engine, &cfg);
    assert_eq!(visuals[0].scale, cfg.blur_scale);
    assert_eq!(
        visuals[0].filter,
        LayerFilter::Blur {
            radius: cfg.blur_radius,
            sigma: cfg.blur_sigma
        }
    );
}

#[test]
fn brightness_is_sanitized() {
    let cfg = TransitionConfig::default();
    let mut engine = TransitionEngine::new();
    show(&mut engine, BackdropProps::with_src("a").brightness(f32::NAN));
    assert_eq!(
        layer_visuals(&engine, &cfg)[0].filter,
        LayerFilter::Brightness(cfg.default_brightness)
    );
    engine.set_props(BackdropProps::with_src("a").brightness(12.0));
    assert_eq!(
        layer_visuals(&engine, &cfg)[0].filter,
        LayerFilter::Brightness(MAX_BRIGHTNESS)
    );
}
