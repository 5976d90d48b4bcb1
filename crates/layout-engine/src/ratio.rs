//! Aspect-ratio target parsing.
//!
//! Two grammars are accepted: `W:H` pads the source to a ratio without
//! rescaling its pixels, `WxH` scales the source to fit an exact pixel size.
//! The whole input must match one grammar; there is no partial parse.

use std::sync::LazyLock;

use regex::Regex;

static RE_RATIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*:\s*(\d+(?:\.\d+)?)\s*$").unwrap());
static RE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*[xX]\s*(\d+)\s*$").unwrap());

/// Errors that can occur while parsing an aspect-ratio target.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid ratio format (expected W:H): {0:?}")]
    BadRatioFormat(String),

    #[error("Invalid size format (expected WxH): {0:?}")]
    BadSizeFormat(String),

    #[error("Degenerate ratio (zero component): {0:?}")]
    DegenerateRatio(String),
}

/// A parsed aspect-ratio target.
///
/// The two forms are mutually exclusive by construction; downstream code
/// matches on the variant to pick the padding or scaling path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioSpec {
    /// Pad the source to `width:height` without touching its pixels.
    Ratio { width: f64, height: f64 },
    /// Scale the source to fit inside an exact pixel size.
    ExplicitSize { width: u32, height: u32 },
}

impl RatioSpec {
    /// Parse a target string such as `"16:9"` or `"800x600"`.
    ///
    /// Ratio components may be decimal; size components are whole pixels.
    /// A zero component in either form is rejected as degenerate.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if let Some(caps) = RE_RATIO.captures(input) {
            let width: f64 = caps[1]
                .parse()
                .map_err(|_| ParseError::BadRatioFormat(input.to_string()))?;
            let height: f64 = caps[2]
                .parse()
                .map_err(|_| ParseError::BadRatioFormat(input.to_string()))?;
            if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
                return Err(ParseError::DegenerateRatio(input.to_string()));
            }
            return Ok(Self::Ratio { width, height });
        }

        if let Some(caps) = RE_SIZE.captures(input) {
            let width: u32 = caps[1]
                .parse()
                .map_err(|_| ParseError::BadSizeFormat(input.to_string()))?;
            let height: u32 = caps[2]
                .parse()
                .map_err(|_| ParseError::BadSizeFormat(input.to_string()))?;
            if width == 0 || height == 0 {
                return Err(ParseError::DegenerateRatio(input.to_string()));
            }
            return Ok(Self::ExplicitSize { width, height });
        }

        if input.contains(':') {
            Err(ParseError::BadRatioFormat(input.to_string()))
        } else {
            Err(ParseError::BadSizeFormat(input.to_string()))
        }
    }
}
