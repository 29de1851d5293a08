//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture returns a valid value that tests customise field by field.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::app::{FooterInput, HeaderInput, LayerInput, NewsletterInput};
use crate::domain::entities::{
    FooterConfig, HeaderConfig, HexColor, ImageUpload, Layer, Newsletter,
};

/// Header with a title and text, no image and no pre-header
pub fn test_header() -> HeaderConfig {
    HeaderConfig {
        pre_header_text: String::new(),
        title: "Dear reader".to_string(),
        text: "Here is what happened this month.".to_string(),
        image: None,
        background_color: HexColor::from_static("#ffffff"),
        image_width: 600,
        title_font_size: 28,
        text_font_size: 16,
    }
}

pub fn test_layer() -> Layer {
    Layer {
        title: "Coaching".to_string(),
        subtitle: "Perspective. Integration. Work.".to_string(),
        content: "One-to-one coaching for job seekers.".to_string(),
        image: None,
        ..Layer::default()
    }
}

pub fn test_footer() -> FooterConfig {
    FooterConfig {
        company_name: "Test Company".to_string(),
        address: "1 Test Street, Testville".to_string(),
        copyright_text: "© 2025 {company}. All rights reserved.".to_string(),
        disclaimer_text: "You are receiving this because you subscribed.".to_string(),
        unsubscribe_link: "#UNSUBSCRIBE_LINK".to_string(),
        view_online_link: "#VIEW_ONLINE_LINK".to_string(),
        footer_color: HexColor::from_static("#999999"),
    }
}

pub fn test_newsletter() -> Newsletter {
    Newsletter {
        subject: "Test Newsletter".to_string(),
        header: test_header(),
        layers: vec![test_layer()],
        footer: test_footer(),
        ..Newsletter::default()
    }
}

/// Builder input with one layer and every value in range
pub fn test_input() -> NewsletterInput {
    NewsletterInput {
        subject: Some("Test Newsletter".to_string()),
        max_width: Some(800),
        font_family: Some("Verdana, sans-serif".to_string()),
        background_color: Some("#FFFFFF".to_string()),
        text_color: Some("#333333".to_string()),
        header: HeaderInput {
            title: Some("Dear reader".to_string()),
            text: Some("Welcome\nto the update".to_string()),
            background_color: Some("#ffffff".to_string()),
            image_width: Some(600),
            title_font_size: Some(28),
            text_font_size: Some(16),
            ..HeaderInput::default()
        },
        layers: vec![LayerInput {
            title: "Coaching".to_string(),
            subtitle: "Perspective".to_string(),
            content: "One-to-one coaching.".to_string(),
            image: None,
            alignment: Some("Center".to_string()),
        }],
        footer: FooterInput {
            company_name: Some("Test Company".to_string()),
            ..FooterInput::default()
        },
    }
}

/// Opaque RGB PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 20 % 256) as u8, (y * 20 % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}

/// Half-transparent RGBA PNG of the given size
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}

/// Small valid PNG upload
pub fn png_upload() -> ImageUpload {
    ImageUpload::new(
        Some("image/png".to_string()),
        Some("logo.png".to_string()),
        png_bytes(4, 4),
    )
}
