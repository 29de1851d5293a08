//! Styling value types
//!
//! Colours, font stacks and image alignment shared by the newsletter sections.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::DomainError;

fn hex_color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex colour regex")
    })
}

/// CSS hex colour (`#RGB` or `#RRGGBB`), kept exactly as entered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        if hex_color_pattern().is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::Validation(format!(
                "Invalid colour '{}': expected #RGB or #RRGGBB",
                value
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Colour for constants known to be valid
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email-safe font stacks offered by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Arial,
    Helvetica,
    Georgia,
    TimesNewRoman,
    Verdana,
    CourierNew,
    TrebuchetMs,
    ComicSansMs,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Arial,
        FontFamily::Helvetica,
        FontFamily::Georgia,
        FontFamily::TimesNewRoman,
        FontFamily::Verdana,
        FontFamily::CourierNew,
        FontFamily::TrebuchetMs,
        FontFamily::ComicSansMs,
    ];

    /// The CSS `font-family` value
    pub fn css(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial, sans-serif",
            FontFamily::Helvetica => "Helvetica, sans-serif",
            FontFamily::Georgia => "Georgia, serif",
            FontFamily::TimesNewRoman => "Times New Roman, serif",
            FontFamily::Verdana => "Verdana, sans-serif",
            FontFamily::CourierNew => "Courier New, monospace",
            FontFamily::TrebuchetMs => "Trebuchet MS, sans-serif",
            FontFamily::ComicSansMs => "Comic Sans MS, cursive",
        }
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css())
    }
}

impl std::str::FromStr for FontFamily {
    type Err = DomainError;

    /// Accepts either the full CSS stack or just the leading family name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FontFamily::ALL
            .iter()
            .copied()
            .find(|font| {
                let css = font.css().to_lowercase();
                css == wanted || css.split(',').next() == Some(wanted.as_str())
            })
            .ok_or_else(|| DomainError::Validation(format!("Unknown font family: {}", s)))
    }
}

/// Horizontal placement of a layer image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl ImageAlignment {
    pub const ALL: [ImageAlignment; 3] = [
        ImageAlignment::Left,
        ImageAlignment::Center,
        ImageAlignment::Right,
    ];

    /// Lenient parse: case-insensitive, anything unrecognised is centred
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "left" => ImageAlignment::Left,
            "right" => ImageAlignment::Right,
            _ => ImageAlignment::Center,
        }
    }

    pub fn text_align(&self) -> &'static str {
        match self {
            ImageAlignment::Left => "text-align: left;",
            ImageAlignment::Center => "text-align: center;",
            ImageAlignment::Right => "text-align: right;",
        }
    }
}

impl std::fmt::Display for ImageAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageAlignment::Left => write!(f, "left"),
            ImageAlignment::Center => write!(f, "center"),
            ImageAlignment::Right => write!(f, "right"),
        }
    }
}
