//! Builder page handlers

use axum::{extract::State, response::Html, Json};

use crate::app::NewsletterOptions;
use crate::AppState;

const BUILDER_PAGE: &str = include_str!("../../static/builder.html");

/// GET /
///
/// The interactive newsletter builder.
pub async fn builder_page() -> Html<&'static str> {
    Html(BUILDER_PAGE)
}

/// GET /api/options
///
/// Fonts, alignments, limits and defaults for building a client form.
pub async fn get_options(State(state): State<AppState>) -> Json<NewsletterOptions> {
    Json(state.newsletter_service.options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_page_posts_multipart_to_build() {
        assert!(BUILDER_PAGE.contains("action=\"/build\""));
        assert!(BUILDER_PAGE.contains("enctype=\"multipart/form-data\""));
    }

    #[test]
    fn builder_page_uses_form_field_names() {
        for name in [
            "subject",
            "num_layers",
            "max_width",
            "font_family",
            "background_color",
            "text_color",
            "header_image_source",
            "header_image_url",
            "header_image",
            "header_title",
            "header_text",
            "pre_header_text",
            "header_bg_color",
            "image_width",
            "title_font_size",
            "text_font_size",
            "company_name",
            "address",
            "copyright_text",
            "disclaimer_text",
            "unsubscribe_link",
            "view_online_link",
            "footer_color",
        ] {
            assert!(
                BUILDER_PAGE.contains(&format!("name=\"{}\"", name)),
                "missing field {}",
                name
            );
        }
    }
}
