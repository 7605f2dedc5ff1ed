use crate::foundation::{
    core::FrameIndex,
    error::{LottieSeqError, LottieSeqResult},
};

/// Declared size of one frame, in SVG user units (pixels).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Declared `width`.
    pub width: f64,
    /// Declared `height`.
    pub height: f64,
}

impl Dimensions {
    /// Build from explicit values.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Read the first `width` and `height` attributes of a rendered frame.
///
/// Values are a plain integer or decimal with an optional `px` suffix. Anything else is
/// [`LottieSeqError::InvalidDimensions`]; an absent attribute is
/// [`LottieSeqError::MissingDimensions`]. No rounding is applied.
pub fn parse_dimensions(frame: FrameIndex, svg: &str) -> LottieSeqResult<Dimensions> {
    let width = read_length(frame, svg, "width")?;
    let height = read_length(frame, svg, "height")?;
    Ok(Dimensions { width, height })
}

fn read_length(frame: FrameIndex, svg: &str, attribute: &'static str) -> LottieSeqResult<f64> {
    let Some(raw) = find_attribute(svg, attribute) else {
        return Err(LottieSeqError::MissingDimensions { frame, attribute });
    };
    parse_length(raw).ok_or_else(|| LottieSeqError::InvalidDimensions {
        frame,
        attribute,
        value: raw.to_owned(),
    })
}

/// Return the raw value of the first `name="..."` (or `name='...'`) attribute in `svg`.
///
/// This is a single forward scan, not a markup parser. The name must start after whitespace so
/// that `stroke-width` never matches `width`. An unterminated value ends the scan.
pub fn find_attribute<'a>(svg: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    let bytes = svg.as_bytes();
    let mut from = 0usize;
    while let Some(pos) = svg[from..].find(name) {
        let start = from + pos;
        from = start + name.len();

        if start == 0 || !bytes[start - 1].is_ascii_whitespace() {
            continue;
        }
        let Some(rest) = svg[from..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => continue,
        };
        let value = &rest[1..];
        let end = value.find(quote)?;
        return Some(&value[..end]);
    }
    None
}

fn parse_length(raw: &str) -> Option<f64> {
    let token = raw.trim();
    let token = token.strip_suffix("px").unwrap_or(token);
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/dimensions.rs"]
mod tests;
