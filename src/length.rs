//! Evaluation of CSS-style length and number strings.
//!
//! Configuration values are stored exactly as the caller wrote them. Only the
//! style engine evaluates them, and only through the helpers in this module.
//! Anything outside the small supported grammar evaluates to `None`, which the
//! engine treats as an invalid declaration.

/// A parsed length before percentage resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthValue {
    /// An absolute length in CSS pixels.
    Px(f32),
    /// A percentage of some reference length.
    Percent(f32),
}

impl LengthValue {
    /// Resolves to CSS pixels.
    ///
    /// Percentages need a `basis`; without one they do not resolve.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(pct) => basis.map(|b| b * pct / 100.0),
        }
    }
}

/// Parses a finite number such as `0.5`, `.5` or `1e-1`.
pub fn parse_number(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Parses `<number>px`, `<number>%` or a unitless `0`.
pub fn parse_length(value: &str) -> Option<LengthValue> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(number) = value.strip_suffix("px") {
        return parse_unit_number(number).map(LengthValue::Px);
    }
    if let Some(number) = value.strip_suffix('%') {
        return parse_unit_number(number).map(LengthValue::Percent);
    }

    // Unitless lengths are only valid for zero.
    match parse_number(&value) {
        Some(n) if n == 0.0 => Some(LengthValue::Px(0.0)),
        _ => None,
    }
}

/// The number in front of a unit; no space may separate the two.
fn parse_unit_number(number: &str) -> Option<f32> {
    if number.ends_with(char::is_whitespace) {
        return None;
    }
    parse_number(number)
}

/// Parses and resolves a length in one step.
pub fn resolve_length(value: &str, basis: Option<f32>) -> Option<f32> {
    parse_length(value)?.resolve(basis)
}

/// Formats a pixel measurement the way it is published, e.g. `24px`.
pub fn format_px(value: f32) -> String {
    format!("{value}px")
}
