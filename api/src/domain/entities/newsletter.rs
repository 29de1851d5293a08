//! Newsletter domain entity
//!
//! A fully resolved newsletter: every image is already an embeddable source
//! and every value has passed validation. Rendering works only from this.

use chrono::{Datelike, Utc};

use super::style::{FontFamily, HexColor, ImageAlignment};

pub const DEFAULT_SUBJECT: &str = "Newsletter";
pub const DEFAULT_MAX_WIDTH: u32 = 1000;
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TEXT_COLOR: &str = "#333333";

pub const DEFAULT_HEADER_BG_COLOR: &str = "#ffffff";
pub const DEFAULT_HEADER_IMAGE_WIDTH: u32 = 600;
pub const DEFAULT_TITLE_FONT_SIZE: u32 = 28;
pub const DEFAULT_TEXT_FONT_SIZE: u32 = 16;

pub const DEFAULT_COMPANY_NAME: &str = "Your Company Name";
pub const DEFAULT_ADDRESS: &str = "123 Main Street, Suite 400, City, State 12345";
pub const DEFAULT_DISCLAIMER: &str =
    "This email was sent to you because you subscribed to our newsletter.";
pub const DEFAULT_UNSUBSCRIBE_LINK: &str = "#UNSUBSCRIBE_LINK";
pub const DEFAULT_VIEW_ONLINE_LINK: &str = "#VIEW_ONLINE_LINK";
pub const DEFAULT_FOOTER_COLOR: &str = "#999999";

/// Placeholder replaced by the company name in the copyright line
pub const COMPANY_PLACEHOLDER: &str = "{company}";

/// Default copyright line for the current year, with the company placeholder
pub fn default_copyright_text() -> String {
    format!(
        "© {} {}. All rights reserved.",
        Utc::now().year(),
        COMPANY_PLACEHOLDER
    )
}

/// Where the header image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderImage {
    /// Uploaded and inlined as a `data:` URI
    Embedded(String),
    /// Hot-linked from an external server
    External(String),
}

impl HeaderImage {
    pub fn src(&self) -> &str {
        match self {
            HeaderImage::Embedded(src) | HeaderImage::External(src) => src,
        }
    }

    /// Pick the image source, preferring an upload over a URL.
    /// Blank URLs count as absent.
    pub fn resolve(embedded: Option<String>, url: Option<String>) -> Option<Self> {
        if let Some(data_uri) = embedded {
            return Some(HeaderImage::Embedded(data_uri));
        }
        url.map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .map(HeaderImage::External)
    }
}

#[derive(Debug, Clone)]
pub struct HeaderConfig {
    /// Hidden inbox-preview text
    pub pre_header_text: String,
    pub title: String,
    pub text: String,
    pub image: Option<HeaderImage>,
    pub background_color: HexColor,
    pub image_width: u32,
    pub title_font_size: u32,
    pub text_font_size: u32,
}

impl HeaderConfig {
    /// Title shown in the header; the subject stands in when none is set
    pub fn display_title<'a>(&'a self, subject: &'a str) -> &'a str {
        let title = self.title.trim();
        if title.is_empty() {
            subject
        } else {
            title
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            pre_header_text: String::new(),
            title: String::new(),
            text: String::new(),
            image: None,
            background_color: HexColor::from_static(DEFAULT_HEADER_BG_COLOR),
            image_width: DEFAULT_HEADER_IMAGE_WIDTH,
            title_font_size: DEFAULT_TITLE_FONT_SIZE,
            text_font_size: DEFAULT_TEXT_FONT_SIZE,
        }
    }
}

/// One content section of the newsletter
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    /// Embedded image as a `data:` URI
    pub image: Option<String>,
    pub image_alignment: ImageAlignment,
}

#[derive(Debug, Clone)]
pub struct FooterConfig {
    pub company_name: String,
    pub address: String,
    pub copyright_text: String,
    pub disclaimer_text: String,
    pub unsubscribe_link: String,
    pub view_online_link: String,
    pub footer_color: HexColor,
}

impl FooterConfig {
    /// Copyright line with the company placeholder filled in
    pub fn copyright_line(&self) -> String {
        self.copyright_text
            .replace(COMPANY_PLACEHOLDER, &self.company_name)
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            copyright_text: default_copyright_text(),
            disclaimer_text: DEFAULT_DISCLAIMER.to_string(),
            unsubscribe_link: DEFAULT_UNSUBSCRIBE_LINK.to_string(),
            view_online_link: DEFAULT_VIEW_ONLINE_LINK.to_string(),
            footer_color: HexColor::from_static(DEFAULT_FOOTER_COLOR),
        }
    }
}

/// A complete newsletter ready to render
#[derive(Debug, Clone)]
pub struct Newsletter {
    pub subject: String,
    pub background_color: HexColor,
    pub text_color: HexColor,
    pub max_width: u32,
    pub font_family: FontFamily,
    pub header: HeaderConfig,
    pub layers: Vec<Layer>,
    pub footer: FooterConfig,
}

impl Default for Newsletter {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            background_color: HexColor::from_static(DEFAULT_BACKGROUND_COLOR),
            text_color: HexColor::from_static(DEFAULT_TEXT_COLOR),
            max_width: DEFAULT_MAX_WIDTH,
            font_family: FontFamily::default(),
            header: HeaderConfig::default(),
            layers: vec![Layer::default()],
            footer: FooterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_image_prefers_upload() {
        let image = HeaderImage::resolve(
            Some("data:image/jpeg;base64,AAAA".to_string()),
            Some("https://example.com/logo.png".to_string()),
        );
        assert_eq!(
            image,
            Some(HeaderImage::Embedded(
                "data:image/jpeg;base64,AAAA".to_string()
            ))
        );
    }

    #[test]
    fn header_image_falls_back_to_url() {
        let image = HeaderImage::resolve(None, Some(" https://example.com/a.png ".to_string()));
        assert_eq!(
            image,
            Some(HeaderImage::External("https://example.com/a.png".to_string()))
        );
    }

    #[test]
    fn header_image_blank_url_is_none() {
        assert_eq!(HeaderImage::resolve(None, Some("   ".to_string())), None);
        assert_eq!(HeaderImage::resolve(None, None), None);
    }

    #[test]
    fn display_title_falls_back_to_subject() {
        let mut header = HeaderConfig::default();
        assert_eq!(header.display_title("Weekly"), "Weekly");

        header.title = "  Hello  ".to_string();
        assert_eq!(header.display_title("Weekly"), "Hello");
    }

    #[test]
    fn copyright_line_replaces_every_placeholder() {
        let footer = FooterConfig {
            company_name: "Acme".to_string(),
            copyright_text: "© {company} / {company}".to_string(),
            ..FooterConfig::default()
        };
        assert_eq!(footer.copyright_line(), "© Acme / Acme");
    }

    #[test]
    fn default_copyright_mentions_current_year() {
        let text = default_copyright_text();
        assert!(text.contains(&Utc::now().year().to_string()));
        assert!(text.contains(COMPANY_PLACEHOLDER));
    }

    #[test]
    fn default_newsletter_has_one_layer() {
        let newsletter = Newsletter::default();
        assert_eq!(newsletter.layers.len(), 1);
        assert_eq!(newsletter.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(newsletter.font_family, FontFamily::Arial);
    }
}
