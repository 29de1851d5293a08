//! HTTP client for the Newsletter Builder API

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

const DEFAULT_API_URL: &str = "http://localhost:8501";

/// HTTP client for communicating with the newsletter JSON API
#[derive(Clone)]
pub struct NewsletterClient {
    client: reqwest::Client,
    base_url: String,
}

impl NewsletterClient {
    /// Create a new client from environment variables
    ///
    /// - NEWSLETTER_API_URL: Base URL of the API (default http://localhost:8501)
    /// - NEWSLETTER_API_KEY: Bearer key, only needed when the API sets API_KEY
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("NEWSLETTER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("NEWSLETTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        Self::new(&base_url, api_key.as_deref())
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .context("Invalid API key format")?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fonts, alignments, limits and defaults
    pub async fn options(&self) -> Result<String> {
        self.get_text("/api/options").await
    }

    /// Render a newsletter without storing it; returns the HTML
    pub async fn preview<T: Serialize>(&self, newsletter: &T) -> Result<String> {
        self.post_text("/api/preview", newsletter).await
    }

    /// Render and store a newsletter; returns its summary JSON
    pub async fn create<T: Serialize>(&self, newsletter: &T) -> Result<String> {
        self.post_text("/api/newsletters", newsletter).await
    }

    pub async fn list(&self, limit: Option<u32>) -> Result<String> {
        match limit {
            Some(limit) => {
                self.get_text(&format!("/api/newsletters?limit={}", limit))
                    .await
            }
            None => self.get_text("/api/newsletters").await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<String> {
        self.get_text(&newsletter_path(id)).await
    }

    pub async fn delete(&self, id: &str) -> Result<String> {
        let path = newsletter_path(id);
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", path))?;

        handle_text_response(response).await?;
        Ok(format!("Deleted newsletter {}", id.trim()))
    }

    // --- Internal helpers ---

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_text_response(response).await
    }

    async fn post_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_text_response(response).await
    }
}

fn newsletter_path(id: &str) -> String {
    format!("/api/newsletters/{}", id.trim())
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(body)
}
