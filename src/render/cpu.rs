//! CPU compositor for the layer stack.
//!
//! Each layer is drawn like a CSS `background-size: cover` image anchored at the host's
//! background position, zoomed around the canvas centre by its camera scale, filtered, and then
//! composited source-over onto an opaque black canvas in stacking order.

use kurbo::{Affine, Point, Vec2};
use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    config::TransitionConfig,
    foundation::{
        core::{Canvas, FrameRGBA},
        error::{StoryscapeError, StoryscapeResult},
    },
    render::{
        blur::blur_rgba8_premul,
        composite::{brightness_in_place, over_in_place},
        position::BackgroundPosition,
    },
    transition::{
        engine::TransitionEngine,
        layer::IdSource,
        visual::{LayerFilter, LayerVisual, layer_visuals},
    },
};

const BACKDROP_BASE: [u8; 4] = [0, 0, 0, 255];

/// Render the engine's current layer stack at its current clock.
#[tracing::instrument(level = "debug", skip(engine, cfg), fields(layers = engine.layers().len()))]
pub fn render_frame<I: IdSource>(
    engine: &TransitionEngine<I>,
    canvas: Canvas,
    cfg: &TransitionConfig,
) -> StoryscapeResult<FrameRGBA> {
    let len = canvas.byte_len()?;
    let mut data = BACKDROP_BASE.repeat(len / 4);
    let position = engine.props().position;

    for visual in layer_visuals(engine, cfg) {
        if visual.opacity <= 0.0 {
            continue;
        }
        let surface = draw_layer(&visual, canvas, position)?;
        over_in_place(&mut data, &surface, visual.opacity)?;
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data,
        premultiplied: true,
    })
}

fn draw_layer(
    visual: &LayerVisual<'_>,
    canvas: Canvas,
    position: BackgroundPosition,
) -> StoryscapeResult<Vec<u8>> {
    let image = visual.layer.image();
    let transform = layer_transform(image, canvas, position, visual.scale)?;
    let mut surface = resample(image, canvas, transform)?;
    match visual.filter {
        LayerFilter::Blur { radius, sigma } => {
            surface = blur_rgba8_premul(&surface, canvas.width, canvas.height, radius, sigma)?;
        }
        LayerFilter::Brightness(factor) => brightness_in_place(&mut surface, factor)?,
    }
    Ok(surface)
}

/// Image-space to canvas-space transform: cover fit, anchor offset, then zoom about the centre.
pub fn layer_transform(
    image: &PreparedImage,
    canvas: Canvas,
    position: BackgroundPosition,
    zoom: f64,
) -> StoryscapeResult<Affine> {
    if image.width == 0 || image.height == 0 {
        return Err(StoryscapeError::render("layer image has zero area"));
    }
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(StoryscapeError::render("layer zoom must be > 0"));
    }
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
    let cover = (cw / iw).max(ch / ih);
    let offset = Vec2::new((cw - iw * cover) * position.x, (ch - ih * cover) * position.y);
    let center = canvas.center().to_vec2();

    Ok(Affine::translate(center)
        * Affine::scale(zoom)
        * Affine::translate(-center)
        * Affine::translate(offset)
        * Affine::scale(cover))
}

fn resample(image: &PreparedImage, canvas: Canvas, transform: Affine) -> StoryscapeResult<Vec<u8>> {
    let len = canvas.byte_len()?;
    let expected = (image.width as usize) * (image.height as usize) * 4;
    if image.rgba8_premul.len() != expected {
        return Err(StoryscapeError::render(
            "layer image buffer does not match its dimensions",
        ));
    }
    let inverse = transform.inverse();
    let row_len = (canvas.width as usize) * 4;
    let mut out = vec![0u8; len];
    out.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let p = inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            px.copy_from_slice(&sample_bilinear(image, p.x - 0.5, p.y - 0.5));
        }
    });
    Ok(out)
}

fn sample_bilinear(image: &PreparedImage, u: f64, v: f64) -> [u8; 4] {
    let max_x = f64::from(image.width - 1);
    let max_y = f64::from(image.height - 1);
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let x0 = u.floor() as usize;
    let y0 = v.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);
    let fx = u - x0 as f64;
    let fy = v - y0 as f64;

    let w = image.width as usize;
    let px = |x: usize, y: usize| {
        let i = (y * w + x) * 4;
        &image.rgba8_premul[i..i + 4]
    };
    let (p00, p10, p01, p11) = (px(x0, y0), px(x1, y0), px(x0, y1), px(x1, y1));

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
