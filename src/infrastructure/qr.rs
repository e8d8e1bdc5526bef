//! QR code rendering for short URLs.

use base64::Engine as _;
use qrcode::QrCode;
use qrcode::render::svg;
use thiserror::Error;

/// The payload could not be encoded as a QR code.
#[derive(Debug, Error)]
#[error("failed to encode QR code: {0}")]
pub struct QrError(#[from] qrcode::types::QrError);

/// Renders `data` as a black-on-white SVG QR code.
///
/// # Errors
///
/// Returns [`QrError`] if `data` is too long to fit in a QR code.
pub fn render_svg(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes())?;

    Ok(code
        .render()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Renders `data` as an SVG QR code embedded in a `data:` URI, ready for an
/// `<img src>` attribute.
///
/// # Errors
///
/// See [`render_svg`].
pub fn render_data_uri(data: &str) -> Result<String, QrError> {
    let svg = render_svg(data)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());

    Ok(format!("data:image/svg+xml;base64,{encoded}"))
}
