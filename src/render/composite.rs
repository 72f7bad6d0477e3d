use rayon::prelude::*;

use crate::foundation::{
    error::{StoryscapeError, StoryscapeResult},
    math::{mul_div255_u8, unit_to_u8_weight},
};

pub type PremulRgba8 = [u8; 4];

/// Maximum accepted brightness multiplier. Larger factors are clamped.
pub const MAX_BRIGHTNESS: f32 = 4.0;

/// Source-over with an extra layer opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = unit_to_u8_weight(opacity);
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> StoryscapeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StoryscapeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    if opacity <= 0.0 {
        return Ok(());
    }
    dst.par_chunks_exact_mut(4)
        .zip(src.par_chunks_exact(4))
        .for_each(|(d, s)| {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        });
    Ok(())
}

/// Multiply color channels by `factor` (CSS `brightness()`), leaving alpha untouched.
///
/// Premultiplied color is clamped to alpha so the result stays a valid premultiplied pixel.
pub fn brightness_in_place(buf: &mut [u8], factor: f32) -> StoryscapeResult<()> {
    if !buf.len().is_multiple_of(4) {
        return Err(StoryscapeError::render(
            "brightness_in_place expects rgba8 buffer",
        ));
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(StoryscapeError::validation(
            "brightness factor must be finite and >= 0",
        ));
    }
    let factor = factor.min(MAX_BRIGHTNESS);
    if factor == 1.0 {
        return Ok(());
    }
    // Q8 fixed point keeps the per-pixel loop integer-only.
    let q = (factor * 256.0).round() as u32;
    buf.par_chunks_exact_mut(4).for_each(|px| {
        let a = u32::from(px[3]);
        for c in px.iter_mut().take(3) {
            let v = (u32::from(*c) * q + 128) >> 8;
            *c = v.min(a) as u8;
        }
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
