//! Builder limits
//!
//! Bounds enforced on user-supplied newsletter settings.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::DomainError;

/// Allowed number of content layers
pub const LAYERS: RangeInclusive<usize> = 1..=10;

/// Allowed newsletter width in pixels
pub const MAX_WIDTH: RangeInclusive<u32> = 300..=1200;

/// Allowed header image width in pixels
pub const HEADER_IMAGE_WIDTH: RangeInclusive<u32> = 50..=1200;

/// Allowed header title font size in pixels
pub const TITLE_FONT_SIZE: RangeInclusive<u32> = 10..=72;

/// Allowed header text font size in pixels
pub const TEXT_FONT_SIZE: RangeInclusive<u32> = 10..=48;

/// Reject values outside `range` with a message naming the field
pub fn check_range<T>(field: &str, value: T, range: &RangeInclusive<T>) -> Result<T, DomainError>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::Validation(format!(
            "{} must be between {} and {} (got {})",
            field,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// Serializable `min`/`max` pair for the options endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy> From<&RangeInclusive<T>> for Bounds<T> {
    fn from(range: &RangeInclusive<T>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Limits {
    pub layers: Bounds<usize>,
    pub max_width: Bounds<u32>,
    pub header_image_width: Bounds<u32>,
    pub title_font_size: Bounds<u32>,
    pub text_font_size: Bounds<u32>,
}

impl Limits {
    pub fn current() -> Self {
        Self {
            layers: (&LAYERS).into(),
            max_width: (&MAX_WIDTH).into(),
            header_image_width: (&HEADER_IMAGE_WIDTH).into(),
            title_font_size: (&TITLE_FONT_SIZE).into(),
            text_font_size: (&TEXT_FONT_SIZE).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::newsletter::{
        DEFAULT_HEADER_IMAGE_WIDTH, DEFAULT_MAX_WIDTH, DEFAULT_TEXT_FONT_SIZE,
        DEFAULT_TITLE_FONT_SIZE,
    };

    #[test]
    fn defaults_are_within_limits() {
        assert!(MAX_WIDTH.contains(&DEFAULT_MAX_WIDTH));
        assert!(HEADER_IMAGE_WIDTH.contains(&DEFAULT_HEADER_IMAGE_WIDTH));
        assert!(TITLE_FONT_SIZE.contains(&DEFAULT_TITLE_FONT_SIZE));
        assert!(TEXT_FONT_SIZE.contains(&DEFAULT_TEXT_FONT_SIZE));
    }

    #[test]
    fn check_range_accepts_bounds() {
        assert_eq!(check_range("width", 300u32, &MAX_WIDTH).unwrap(), 300);
        assert_eq!(check_range("width", 1200u32, &MAX_WIDTH).unwrap(), 1200);
    }

    #[test]
    fn check_range_rejects_outside() {
        let err = check_range("max_width", 299u32, &MAX_WIDTH).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: max_width must be between 300 and 1200 (got 299)"
        );
        assert!(check_range("layers", 11usize, &LAYERS).is_err());
        assert!(check_range("layers", 0usize, &LAYERS).is_err());
    }

    #[test]
    fn limits_snapshot() {
        let limits = Limits::current();
        assert_eq!(limits.layers.min, 1);
        assert_eq!(limits.layers.max, 10);
        assert_eq!(limits.title_font_size.max, 72);
        assert_eq!(limits.text_font_size.max, 48);
    }
}
