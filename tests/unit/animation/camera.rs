use super::*;

#[test]
fn mapping_matches_shot_scale() {
    let cases = [
        (Some(ShotSize::ExtremeCloseUp), 1.25, 20.0, Ease::OutQuad),
        (Some(ShotSize::CloseUp), 1.15, 15.0, Ease::OutQuad),
        (Some(ShotSize::Long), 1.05, 20.0, Ease::InOutQuad),
        (Some(ShotSize::ExtremeLong), 1.1, 30.0, Ease::Linear),
        (Some(ShotSize::Medium), 1.02, 10.0, Ease::InOutQuad),
        (None, 1.02, 10.0, Ease::InOutQuad),
    ];
    for (shot, scale, secs, ease) in cases {
        let m = CameraMotion::for_shot(shot);
        assert_eq!(m.target_scale, scale, "{shot:?}");
        assert_eq!(m.duration_secs, secs, "{shot:?}");
        assert_eq!(m.ease, ease, "{shot:?}");
    }
}

#[test]
fn scale_starts_at_one_and_holds_target() {
    for shot in ShotSize::ALL {
        let m = CameraMotion::for_shot(Some(shot));
        assert_eq!(m.scale_at(0.0), 1.0);
        assert_eq!(m.scale_at(-1.0), 1.0);
        assert!((m.scale_at(m.duration_secs) - m.target_scale).abs() < 1e-12);
        assert!((m.scale_at(m.duration_secs * 4.0) - m.target_scale).abs() < 1e-12);
    }
}

#[test]
fn extreme_long_is_linear_zoom() {
    let m = CameraMotion::for_shot(Some(ShotSize::ExtremeLong));
    assert!((m.scale_at(15.0) - 1.05).abs() < 1e-12);
}

#[test]
fn shot_names_parse() {
    assert_eq!("extreme-close-up".parse::<ShotSize>().unwrap(), ShotSize::ExtremeCloseUp);
    assert_eq!("Close Up".parse::<ShotSize>().unwrap(), ShotSize::CloseUp);
    assert_eq!("medium_shot".parse::<ShotSize>().unwrap(), ShotSize::Medium);
    assert_eq!("ELS".parse::<ShotSize>().unwrap(), ShotSize::ExtremeLong);
    for shot in ShotSize::ALL {
        assert_eq!(shot.to_string().parse::<ShotSize>().unwrap(), shot);
    }
    assert!("dutch_angle".parse::<ShotSize>().is_err());
}
