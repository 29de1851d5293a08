//! Unvalidated newsletter input
//!
//! What the form and the JSON API hand to the service. `None` means "not
//! supplied" and picks the default; an empty string is an explicit blank.

use crate::domain::entities::ImageUpload;

#[derive(Debug, Clone, Default)]
pub struct NewsletterInput {
    pub subject: Option<String>,
    pub max_width: Option<u32>,
    pub font_family: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub header: HeaderInput,
    pub layers: Vec<LayerInput>,
    pub footer: FooterInput,
}

impl NewsletterInput {
    /// Number of images that need encoding
    pub fn upload_count(&self) -> usize {
        usize::from(self.header.image.is_some())
            + self.layers.iter().filter(|l| l.image.is_some()).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeaderInput {
    pub pre_header_text: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<ImageUpload>,
    pub background_color: Option<String>,
    pub image_width: Option<u32>,
    pub title_font_size: Option<u32>,
    pub text_font_size: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct LayerInput {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub image: Option<ImageUpload>,
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FooterInput {
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub copyright_text: Option<String>,
    pub disclaimer_text: Option<String>,
    pub unsubscribe_link: Option<String>,
    pub view_online_link: Option<String>,
    pub footer_color: Option<String>,
}
