//! Builder form handler
//!
//! Accepts the `multipart/form-data` submission from the builder page,
//! stores the generated newsletter and redirects to its preview.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    response::Redirect,
};

use crate::app::limits::{self, check_range};
use crate::app::{FooterInput, HeaderInput, LayerInput, NewsletterInput};
use crate::domain::entities::ImageUpload;
use crate::error::AppError;
use crate::AppState;

/// Text fields and non-empty file parts of a submitted form
#[derive(Debug, Default)]
pub struct FormFields {
    text: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
}

impl FormFields {
    /// Drain a multipart stream. Empty file parts (no file chosen) are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = FormFields::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    fields.insert_file(
                        &name,
                        ImageUpload::new(content_type, Some(filename), bytes.to_vec()),
                    );
                }
            } else {
                let value = field.text().await?;
                fields.insert_text(&name, &value);
            }
        }

        Ok(fields)
    }

    pub fn insert_text(&mut self, name: &str, value: &str) {
        self.text.insert(name.to_string(), value.to_string());
    }

    pub fn insert_file(&mut self, name: &str, upload: ImageUpload) {
        self.files.insert(name.to_string(), upload);
    }

    fn take_text(&mut self, name: &str) -> Option<String> {
        self.text.remove(name)
    }

    fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        self.files.remove(name)
    }

    /// Blank means "use the default"; anything else must be a whole number
    fn take_number<T: std::str::FromStr>(&mut self, name: &str) -> Result<Option<T>, AppError> {
        match self.take_text(name) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("{} must be a whole number", name))),
            _ => Ok(None),
        }
    }

    /// Map form field names onto newsletter input
    pub fn into_input(mut self) -> Result<NewsletterInput, AppError> {
        let layer_count = self.take_number::<usize>("num_layers")?.unwrap_or(1);
        let layer_count = check_range("num_layers", layer_count, &limits::LAYERS)?;

        let mut image_url = self.take_text("header_image_url");
        let mut image = self.take_file("header_image");
        match self.take_text("header_image_source").as_deref() {
            Some("url") => image = None,
            Some("upload") => image_url = None,
            _ => {}
        }

        let header = HeaderInput {
            pre_header_text: self.take_text("pre_header_text"),
            title: self.take_text("header_title"),
            text: self.take_text("header_text"),
            image_url,
            image,
            background_color: self.take_text("header_bg_color"),
            image_width: self.take_number("image_width")?,
            title_font_size: self.take_number("title_font_size")?,
            text_font_size: self.take_number("text_font_size")?,
        };

        let layers = (1..=layer_count)
            .map(|n| LayerInput {
                title: self
                    .take_text(&format!("layer_{}_title", n))
                    .unwrap_or_default(),
                subtitle: self
                    .take_text(&format!("layer_{}_subtitle", n))
                    .unwrap_or_default(),
                content: self
                    .take_text(&format!("layer_{}_content", n))
                    .unwrap_or_default(),
                image: self.take_file(&format!("layer_{}_image", n)),
                alignment: self.take_text(&format!("layer_{}_alignment", n)),
            })
            .collect();

        let footer = FooterInput {
            company_name: self.take_text("company_name"),
            address: self.take_text("address"),
            copyright_text: self.take_text("copyright_text"),
            disclaimer_text: self.take_text("disclaimer_text"),
            unsubscribe_link: self.take_text("unsubscribe_link"),
            view_online_link: self.take_text("view_online_link"),
            footer_color: self.take_text("footer_color"),
        };

        Ok(NewsletterInput {
            subject: self.take_text("subject"),
            max_width: self.take_number("max_width")?,
            font_family: self.take_text("font_family"),
            background_color: self.take_text("background_color"),
            text_color: self.take_text("text_color"),
            header,
            layers,
            footer,
        })
    }
}

/// POST /build
///
/// Generate a newsletter from the builder form and redirect (303) to its
/// preview page.
pub async fn build_from_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let input = FormFields::from_multipart(multipart).await?.into_input()?;
    let draft = state.newsletter_service.create(input).await?;

    Ok(Redirect::to(&format!("/newsletters/{}", draft.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_upload;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        let mut fields = FormFields::default();
        for (name, value) in pairs {
            fields.insert_text(name, value);
        }
        fields
    }

    #[test]
    fn empty_form_gives_one_default_layer() {
        let input = FormFields::default().into_input().unwrap();

        assert_eq!(input.layers.len(), 1);
        assert!(input.subject.is_none());
        assert!(input.max_width.is_none());
        assert!(input.footer.company_name.is_none());
    }

    #[test]
    fn maps_sidebar_and_footer_fields() {
        let input = fields(&[
            ("subject", "Weekly News"),
            ("max_width", "800"),
            ("font_family", "Verdana, sans-serif"),
            ("background_color", "#FFFFFF"),
            ("text_color", "#111111"),
            ("company_name", "Acme"),
            ("address", ""),
            ("footer_color", "#999999"),
        ])
        .into_input()
        .unwrap();

        assert_eq!(input.subject.as_deref(), Some("Weekly News"));
        assert_eq!(input.max_width, Some(800));
        assert_eq!(input.font_family.as_deref(), Some("Verdana, sans-serif"));
        assert_eq!(input.text_color.as_deref(), Some("#111111"));
        assert_eq!(input.footer.company_name.as_deref(), Some("Acme"));
        assert_eq!(input.footer.address.as_deref(), Some(""));
        assert!(input.footer.unsubscribe_link.is_none());
    }

    #[test]
    fn maps_layers_up_to_num_layers() {
        let mut form = fields(&[
            ("num_layers", "2"),
            ("layer_1_title", "First"),
            ("layer_1_alignment", "Left"),
            ("layer_2_content", "Body\ntext"),
            ("layer_3_title", "Ignored"),
        ]);
        form.insert_file("layer_2_image", png_upload());

        let input = form.into_input().unwrap();

        assert_eq!(input.layers.len(), 2);
        assert_eq!(input.layers[0].title, "First");
        assert_eq!(input.layers[0].alignment.as_deref(), Some("Left"));
        assert!(input.layers[0].image.is_none());
        assert_eq!(input.layers[1].content, "Body\ntext");
        assert!(input.layers[1].image.is_some());
    }

    #[test]
    fn header_fields_and_numbers() {
        let input = fields(&[
            ("header_title", "Dear reader"),
            ("header_text", "Welcome"),
            ("pre_header_text", ""),
            ("header_bg_color", "#eeeeee"),
            ("image_width", "1000"),
            ("title_font_size", "30"),
            ("text_font_size", " "),
        ])
        .into_input()
        .unwrap();

        assert_eq!(input.header.title.as_deref(), Some("Dear reader"));
        assert_eq!(input.header.pre_header_text.as_deref(), Some(""));
        assert_eq!(input.header.image_width, Some(1000));
        assert_eq!(input.header.title_font_size, Some(30));
        assert_eq!(input.header.text_font_size, None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = fields(&[("max_width", "wide")]).into_input().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("max_width")));
    }

    #[test]
    fn rejects_layer_count_out_of_range() {
        assert!(fields(&[("num_layers", "0")]).into_input().is_err());
        assert!(fields(&[("num_layers", "11")]).into_input().is_err());
        assert!(fields(&[("num_layers", "10")]).into_input().is_ok());
    }

    #[test]
    fn image_source_selects_url_or_upload() {
        let mut form = fields(&[
            ("header_image_source", "url"),
            ("header_image_url", "https://example.com/logo.png"),
        ]);
        form.insert_file("header_image", png_upload());
        let input = form.into_input().unwrap();
        assert!(input.header.image.is_none());
        assert_eq!(
            input.header.image_url.as_deref(),
            Some("https://example.com/logo.png")
        );

        let mut form = fields(&[
            ("header_image_source", "upload"),
            ("header_image_url", "https://example.com/logo.png"),
        ]);
        form.insert_file("header_image", png_upload());
        let input = form.into_input().unwrap();
        assert!(input.header.image.is_some());
        assert!(input.header.image_url.is_none());
    }
}
