//! Newsletter service
//!
//! Validates builder input, inlines uploaded images, renders the document and
//! manages stored drafts.

use std::sync::Arc;

use serde::Serialize;

use crate::app::input::{FooterInput, HeaderInput, LayerInput, NewsletterInput};
use crate::app::limits::{self, check_range, Limits};
use crate::domain::entities::newsletter::{
    default_copyright_text, DEFAULT_ADDRESS, DEFAULT_BACKGROUND_COLOR, DEFAULT_COMPANY_NAME,
    DEFAULT_DISCLAIMER, DEFAULT_FOOTER_COLOR, DEFAULT_HEADER_BG_COLOR,
    DEFAULT_HEADER_IMAGE_WIDTH, DEFAULT_MAX_WIDTH, DEFAULT_SUBJECT, DEFAULT_TEXT_COLOR,
    DEFAULT_TEXT_FONT_SIZE, DEFAULT_TITLE_FONT_SIZE, DEFAULT_UNSUBSCRIBE_LINK,
    DEFAULT_VIEW_ONLINE_LINK,
};
use crate::domain::entities::{
    Draft, DraftId, FontFamily, FooterConfig, HeaderConfig, HeaderImage, HexColor,
    ImageAlignment, ImageUpload, Layer, NewDraft, Newsletter,
};
use crate::domain::ports::{DraftRepository, ImageEncoder};
use crate::error::{AppError, DomainError, ImageError};
use crate::render::generate_html;

/// Everything a client needs to build a form
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterOptions {
    pub fonts: Vec<&'static str>,
    pub alignments: Vec<ImageAlignment>,
    pub limits: Limits,
    pub defaults: NewsletterDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsletterDefaults {
    pub subject: &'static str,
    pub max_width: u32,
    pub font_family: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub header_bg_color: &'static str,
    pub header_image_width: u32,
    pub title_font_size: u32,
    pub text_font_size: u32,
    pub company_name: &'static str,
    pub address: &'static str,
    pub copyright_text: String,
    pub disclaimer_text: &'static str,
    pub unsubscribe_link: &'static str,
    pub view_online_link: &'static str,
    pub footer_color: &'static str,
}

/// Service for composing and storing newsletters
pub struct NewsletterService<DR, IE>
where
    DR: DraftRepository,
    IE: ImageEncoder,
{
    drafts: Arc<DR>,
    images: Arc<IE>,
}

impl<DR, IE> NewsletterService<DR, IE>
where
    DR: DraftRepository,
    IE: ImageEncoder,
{
    pub fn new(drafts: Arc<DR>, images: Arc<IE>) -> Self {
        Self { drafts, images }
    }

    pub fn options(&self) -> NewsletterOptions {
        NewsletterOptions {
            fonts: FontFamily::ALL.iter().map(FontFamily::css).collect(),
            alignments: ImageAlignment::ALL.to_vec(),
            limits: Limits::current(),
            defaults: NewsletterDefaults {
                subject: DEFAULT_SUBJECT,
                max_width: DEFAULT_MAX_WIDTH,
                font_family: FontFamily::default().css(),
                background_color: DEFAULT_BACKGROUND_COLOR,
                text_color: DEFAULT_TEXT_COLOR,
                header_bg_color: DEFAULT_HEADER_BG_COLOR,
                header_image_width: DEFAULT_HEADER_IMAGE_WIDTH,
                title_font_size: DEFAULT_TITLE_FONT_SIZE,
                text_font_size: DEFAULT_TEXT_FONT_SIZE,
                company_name: DEFAULT_COMPANY_NAME,
                address: DEFAULT_ADDRESS,
                copyright_text: default_copyright_text(),
                disclaimer_text: DEFAULT_DISCLAIMER,
                unsubscribe_link: DEFAULT_UNSUBSCRIBE_LINK,
                view_online_link: DEFAULT_VIEW_ONLINE_LINK,
                footer_color: DEFAULT_FOOTER_COLOR,
            },
        }
    }

    /// Validate input and inline every uploaded image
    ///
    /// Scalar settings are checked first so that a bad colour or width fails
    /// before any image work is done.
    pub async fn compose(&self, input: NewsletterInput) -> Result<Newsletter, AppError> {
        tracing::debug!(
            layers = input.layers.len(),
            uploads = input.upload_count(),
            "Composing newsletter"
        );

        let NewsletterInput {
            subject,
            max_width,
            font_family,
            background_color,
            text_color,
            mut header,
            mut layers,
            footer,
        } = input;

        check_range("layers", layers.len(), &limits::LAYERS)?;

        let subject = subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        let max_width = check_range(
            "max_width",
            max_width.unwrap_or(DEFAULT_MAX_WIDTH),
            &limits::MAX_WIDTH,
        )?;
        let font_family = match font_family {
            Some(font) => font.parse::<FontFamily>()?,
            None => FontFamily::default(),
        };
        let background_color =
            color_or("background_color", background_color, DEFAULT_BACKGROUND_COLOR)?;
        let text_color = color_or("text_color", text_color, DEFAULT_TEXT_COLOR)?;
        let footer = build_footer(footer)?;

        let mut uploads = Vec::with_capacity(layers.len() + 1);
        uploads.push(header.image.take());
        uploads.extend(layers.iter_mut().map(|layer| layer.image.take()));
        let header = validate_header(header)?;

        let mut encoded = self.encode_uploads(uploads).await?.into_iter();
        let header_image = encoded.next().flatten();

        let header = HeaderConfig {
            image: HeaderImage::resolve(header_image, header.image_url),
            ..header.config
        };

        let layers = layers
            .into_iter()
            .zip(encoded)
            .map(|(layer, image)| build_layer(layer, image))
            .collect();

        Ok(Newsletter {
            subject,
            background_color,
            text_color,
            max_width,
            font_family,
            header,
            layers,
            footer,
        })
    }

    /// Render without storing anything
    pub async fn preview(&self, input: NewsletterInput) -> Result<String, AppError> {
        let newsletter = self.compose(input).await?;
        Ok(generate_html(&newsletter))
    }

    /// Render and store as a new draft
    pub async fn create(&self, input: NewsletterInput) -> Result<Draft, AppError> {
        let newsletter = self.compose(input).await?;
        let html = generate_html(&newsletter);

        let draft = self
            .drafts
            .create(NewDraft {
                subject: newsletter.subject.clone(),
                html,
                layer_count: newsletter.layers.len(),
            })
            .await?;
        let stored = self.drafts.count().await?;

        tracing::info!(
            draft_id = %draft.id,
            subject = %draft.subject,
            layers = draft.layer_count,
            bytes = draft.size_bytes(),
            stored,
            "Newsletter generated"
        );

        Ok(draft)
    }

    pub async fn get(&self, id: &DraftId) -> Result<Draft, AppError> {
        self.drafts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Newsletter {} not found", id)))
    }

    /// Most recent drafts first
    pub async fn list(&self, limit: usize) -> Result<Vec<Draft>, AppError> {
        Ok(self.drafts.list_recent(limit).await?)
    }

    pub async fn delete(&self, id: &DraftId) -> Result<(), AppError> {
        if self.drafts.delete(id).await? {
            tracing::info!(draft_id = %id, "Newsletter deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Newsletter {} not found", id)))
        }
    }

    /// Encode uploads on a blocking thread, preserving positions
    async fn encode_uploads(
        &self,
        uploads: Vec<Option<ImageUpload>>,
    ) -> Result<Vec<Option<String>>, AppError> {
        if uploads.iter().all(Option::is_none) {
            return Ok(vec![None; uploads.len()]);
        }

        let images = self.images.clone();
        let encoded = tokio::task::spawn_blocking(move || {
            uploads
                .iter()
                .map(|upload| {
                    upload
                        .as_ref()
                        .map(|upload| images.to_data_uri(upload))
                        .transpose()
                })
                .collect::<Result<Vec<_>, ImageError>>()
        })
        .await
        .map_err(|e| AppError::Internal(format!("Image task failed: {}", e)))??;

        Ok(encoded)
    }
}

/// Header settings validated, image not yet resolved
struct ValidatedHeader {
    config: HeaderConfig,
    image_url: Option<String>,
}

fn validate_header(header: HeaderInput) -> Result<ValidatedHeader, DomainError> {
    let config = HeaderConfig {
        pre_header_text: header.pre_header_text.unwrap_or_default(),
        title: header.title.unwrap_or_default(),
        text: header.text.unwrap_or_default(),
        image: None,
        background_color: color_or(
            "header_bg_color",
            header.background_color,
            DEFAULT_HEADER_BG_COLOR,
        )?,
        image_width: check_range(
            "image_width",
            header.image_width.unwrap_or(DEFAULT_HEADER_IMAGE_WIDTH),
            &limits::HEADER_IMAGE_WIDTH,
        )?,
        title_font_size: check_range(
            "title_font_size",
            header.title_font_size.unwrap_or(DEFAULT_TITLE_FONT_SIZE),
            &limits::TITLE_FONT_SIZE,
        )?,
        text_font_size: check_range(
            "text_font_size",
            header.text_font_size.unwrap_or(DEFAULT_TEXT_FONT_SIZE),
            &limits::TEXT_FONT_SIZE,
        )?,
    };

    Ok(ValidatedHeader {
        config,
        image_url: header.image_url,
    })
}

fn build_layer(layer: LayerInput, image: Option<String>) -> Layer {
    Layer {
        title: layer.title,
        subtitle: layer.subtitle,
        content: layer.content,
        image,
        image_alignment: layer
            .alignment
            .as_deref()
            .map(ImageAlignment::parse_lenient)
            .unwrap_or_default(),
    }
}

fn build_footer(footer: FooterInput) -> Result<FooterConfig, DomainError> {
    Ok(FooterConfig {
        company_name: footer
            .company_name
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
        address: footer.address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        copyright_text: footer
            .copyright_text
            .unwrap_or_else(default_copyright_text),
        disclaimer_text: footer
            .disclaimer_text
            .unwrap_or_else(|| DEFAULT_DISCLAIMER.to_string()),
        unsubscribe_link: footer
            .unsubscribe_link
            .unwrap_or_else(|| DEFAULT_UNSUBSCRIBE_LINK.to_string()),
        view_online_link: footer
            .view_online_link
            .unwrap_or_else(|| DEFAULT_VIEW_ONLINE_LINK.to_string()),
        footer_color: color_or("footer_color", footer.footer_color, DEFAULT_FOOTER_COLOR)?,
    })
}

fn color_or(
    field: &str,
    value: Option<String>,
    default: &'static str,
) -> Result<HexColor, DomainError> {
    match value {
        Some(value) => HexColor::parse(&value).map_err(|_| {
            DomainError::Validation(format!(
                "{} must be a hex colour like #333333 (got '{}')",
                field, value
            ))
        }),
        None => Ok(HexColor::from_static(default)),
    }
}
