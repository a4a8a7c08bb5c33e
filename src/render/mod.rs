//! QR symbol rendering for encoded payloads
//!
//! PNG output goes through `image`; terminal output uses unicode half
//! blocks so a payload can be scanned straight from a shell.

use crate::encoder::Payload;
use crate::error::RenderError;
use image::{GrayImage, Luma};
use qrcode::render::unicode;
use qrcode::{Color, EcLevel, QrCode};
use std::path::Path;
use tracing::info;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Raster output settings
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Pixels per module
    pub scale: u32,
    /// Light border width in modules
    pub quiet_zone: u32,
    /// Error correction level of the symbol
    pub ec_level: EcLevel,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 8,
            quiet_zone: 4,
            ec_level: EcLevel::M,
        }
    }
}

fn build_symbol(payload: &Payload, ec_level: EcLevel) -> Result<QrCode, RenderError> {
    Ok(QrCode::with_error_correction_level(
        payload.as_str().as_bytes(),
        ec_level,
    )?)
}

/// Rasterize a payload into a grayscale image
pub fn render_image(payload: &Payload, options: &RenderOptions) -> Result<GrayImage, RenderError> {
    let code = build_symbol(payload, options.ec_level)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let scale = options.scale.max(1);
    let quiet = options.quiet_zone;
    let side = (modules + 2 * quiet) * scale;

    Ok(GrayImage::from_fn(side, side, |x, y| {
        let mx = x / scale;
        let my = y / scale;
        if mx < quiet || my < quiet || mx >= quiet + modules || my >= quiet + modules {
            return LIGHT;
        }
        let idx = ((my - quiet) * modules + (mx - quiet)) as usize;
        match colors.get(idx) {
            Some(Color::Dark) => DARK,
            _ => LIGHT,
        }
    }))
}

/// Write a payload's QR symbol to a PNG file
pub fn render_png<P: AsRef<Path>>(
    payload: &Payload,
    path: P,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let image = render_image(payload, options)?;
    image.save(path)?;
    info!(path = %path.display(), side = image.width(), "wrote QR image");
    Ok(())
}

/// Render a payload's QR symbol as text for a terminal
pub fn render_terminal(payload: &Payload) -> Result<String, RenderError> {
    let code = build_symbol(payload, EcLevel::M)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Dark)
        .light_color(unicode::Dense1x2::Light)
        .build())
}
