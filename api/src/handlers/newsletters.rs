//! Newsletter handlers
//!
//! JSON API for composing and managing newsletters, plus the browser-facing
//! preview and download endpoints for stored drafts.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::app::{FooterInput, HeaderInput, LayerInput, NewsletterInput};
use crate::domain::entities::{Draft, DraftId, ImageUpload};
use crate::error::{AppError, ImageError};
use crate::AppState;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

// --- Request types ---

/// Image supplied inline as base64 (a full `data:` URI is also accepted)
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    pub data: String,
}

impl ImagePayload {
    pub fn into_upload(self) -> Result<ImageUpload, ImageError> {
        let ImagePayload {
            content_type,
            filename,
            data,
        } = self;

        let data_uri = data
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"));
        let (content_type, encoded) = match data_uri {
            Some((mime, payload)) => (content_type.or_else(|| Some(mime.to_string())), payload),
            None => (content_type, data.as_str()),
        };

        let bytes = STANDARD.decode(encoded.trim())?;
        Ok(ImageUpload::new(content_type, filename, bytes))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeaderRequest {
    pub pre_header_text: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<ImagePayload>,
    pub background_color: Option<String>,
    pub image_width: Option<u32>,
    pub title_font_size: Option<u32>,
    pub text_font_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LayerRequest {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub image: Option<ImagePayload>,
    pub image_alignment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterRequest {
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub copyright_text: Option<String>,
    pub disclaimer_text: Option<String>,
    pub unsubscribe_link: Option<String>,
    pub view_online_link: Option<String>,
    pub footer_color: Option<String>,
}

/// Request body for POST /api/preview and POST /api/newsletters
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsletterRequest {
    pub subject: Option<String>,
    pub max_width: Option<u32>,
    pub font_family: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub header: HeaderRequest,
    pub layers: Vec<LayerRequest>,
    pub footer: FooterRequest,
}

impl NewsletterRequest {
    pub fn into_input(self) -> Result<NewsletterInput, AppError> {
        let header = HeaderInput {
            pre_header_text: self.header.pre_header_text,
            title: self.header.title,
            text: self.header.text,
            image_url: self.header.image_url,
            image: self
                .header
                .image
                .map(ImagePayload::into_upload)
                .transpose()?,
            background_color: self.header.background_color,
            image_width: self.header.image_width,
            title_font_size: self.header.title_font_size,
            text_font_size: self.header.text_font_size,
        };

        let layers = self
            .layers
            .into_iter()
            .map(|layer| {
                Ok(LayerInput {
                    title: layer.title,
                    subtitle: layer.subtitle,
                    content: layer.content,
                    image: layer.image.map(ImagePayload::into_upload).transpose()?,
                    alignment: layer.image_alignment,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let footer = FooterInput {
            company_name: self.footer.company_name,
            address: self.footer.address,
            copyright_text: self.footer.copyright_text,
            disclaimer_text: self.footer.disclaimer_text,
            unsubscribe_link: self.footer.unsubscribe_link,
            view_online_link: self.footer.view_online_link,
            footer_color: self.footer.footer_color,
        };

        Ok(NewsletterInput {
            subject: self.subject,
            max_width: self.max_width,
            font_family: self.font_family,
            background_color: self.background_color,
            text_color: self.text_color,
            header,
            layers,
            footer,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

const MAX_LIST_LIMIT: usize = 100;

// --- Response types ---

#[derive(Debug, Serialize)]
pub struct DraftSummary {
    pub id: String,
    pub subject: String,
    pub layer_count: usize,
    pub size_bytes: usize,
    pub content_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub filename: String,
    pub preview_url: String,
    pub download_url: String,
}

impl From<&Draft> for DraftSummary {
    fn from(draft: &Draft) -> Self {
        Self {
            id: draft.id.to_string(),
            subject: draft.subject.clone(),
            layer_count: draft.layer_count,
            size_bytes: draft.size_bytes(),
            content_hash: draft.content_hash.clone(),
            created_at: draft.created_at,
            filename: draft.filename(),
            preview_url: format!("/newsletters/{}", draft.id),
            download_url: format!("/newsletters/{}/download", draft.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DraftDetail {
    #[serde(flatten)]
    pub summary: DraftSummary,
    pub html: String,
}

fn parse_draft_id(raw: &str) -> Result<DraftId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid newsletter id: {}", raw)))
}

// --- JSON API ---

/// POST /api/preview
///
/// Render a newsletter without storing it. Returns the HTML document.
pub async fn preview_newsletter(
    State(state): State<AppState>,
    Json(request): Json<NewsletterRequest>,
) -> Result<Response, AppError> {
    let html = state
        .newsletter_service
        .preview(request.into_input()?)
        .await?;

    Ok(([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], html).into_response())
}

/// POST /api/newsletters
///
/// Render and store a newsletter. Returns its summary with preview and
/// download links.
pub async fn create_newsletter(
    State(state): State<AppState>,
    Json(request): Json<NewsletterRequest>,
) -> Result<(StatusCode, Json<DraftSummary>), AppError> {
    let draft = state
        .newsletter_service
        .create(request.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(DraftSummary::from(&draft))))
}

/// GET /api/newsletters?limit=N
pub async fn list_newsletters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DraftSummary>>, AppError> {
    let limit = query.limit.clamp(1, MAX_LIST_LIMIT);
    let drafts = state.newsletter_service.list(limit).await?;

    Ok(Json(drafts.iter().map(DraftSummary::from).collect()))
}

/// GET /api/newsletters/:id
pub async fn get_newsletter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DraftDetail>, AppError> {
    let draft = state.newsletter_service.get(&parse_draft_id(&id)?).await?;

    Ok(Json(DraftDetail {
        summary: DraftSummary::from(&draft),
        html: draft.html.to_string(),
    }))
}

/// DELETE /api/newsletters/:id
pub async fn delete_newsletter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .newsletter_service
        .delete(&parse_draft_id(&id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// --- Browser endpoints ---

/// GET /newsletters/:id
///
/// Live preview: the stored document itself. Honours `If-None-Match`.
pub async fn view_newsletter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let draft = state.newsletter_service.get(&parse_draft_id(&id)?).await?;
    let etag = draft.etag();

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag_matches(v, &etag));

    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE.to_string()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        draft.html.to_string(),
    )
        .into_response())
}

/// Weak comparison of an `If-None-Match` list against our ETag (RFC 9110 13.1.2)
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag.strip_prefix("W/").unwrap_or(tag) == etag)
}

/// GET /newsletters/:id/download
pub async fn download_newsletter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let draft = state.newsletter_service.get(&parse_draft_id(&id)?).await?;
    let disposition = HeaderValue::from_str(&content_disposition(&draft.filename()))
        .map_err(|e| AppError::Internal(format!("Invalid Content-Disposition: {}", e)))?;

    tracing::debug!(draft_id = %draft.id, filename = %draft.filename(), "Newsletter downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        draft.html.to_string(),
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}
