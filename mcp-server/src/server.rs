//! Newsletter MCP Server implementation
//!
//! Exposes the newsletter builder's JSON API as MCP tools so agents can
//! compose, preview and manage newsletters.

use crate::client::NewsletterClient;
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Newsletter MCP Server
#[derive(Clone)]
pub struct NewsletterServer {
    client: NewsletterClient,
    tool_router: ToolRouter<Self>,
}

impl NewsletterServer {
    pub fn from_env() -> Result<Self> {
        let client = NewsletterClient::from_env()?;
        Ok(Self::new(client))
    }

    pub fn new(client: NewsletterClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    pub fn api_url(&self) -> &str {
        self.client.base_url()
    }
}

fn to_result(result: Result<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(content) => Ok(CallToolResult::success(vec![Content::text(content)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

// --- Tool Parameter Types ---
//
// These mirror the API request body. Omitted fields take the server defaults.

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImageParams {
    /// MIME type: "image/jpeg" or "image/png"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Original file name, used to infer the type when no MIME type is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Base64 image bytes, or a full data: URI
    pub data: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct HeaderParams {
    /// Hidden text shown in the inbox preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_header_text: Option<String>,
    /// Header title (H1); the subject is used when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Header paragraph; newlines become line breaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// External header image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Uploaded header image; takes precedence over image_url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageParams>,
    /// Hex colour, e.g. "#ffffff"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Header image width in px (50-1200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    /// Title font size in px (10-72)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<u32>,
    /// Text font size in px (10-48)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_font_size: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct LayerParams {
    /// Section title (H2)
    #[serde(default)]
    pub title: String,
    /// Section subtitle (H3)
    #[serde(default)]
    pub subtitle: String,
    /// Section body; newlines become line breaks
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageParams>,
    /// "left", "center" or "right"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alignment: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct FooterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Copyright line; "{company}" is replaced by the company name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribe_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_online_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_color: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct NewsletterParams {
    /// Email subject, also used as the document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Newsletter width in px (300-1200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// One of the fonts listed by the options tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default)]
    pub header: HeaderParams,
    /// Content sections, 1 to 10
    #[serde(default)]
    pub layers: Vec<LayerParams>,
    #[serde(default)]
    pub footer: FooterParams,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Maximum number of newsletters to return (default 20, max 100)
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct IdParams {
    /// Newsletter ID (UUID)
    pub id: String,
}

#[tool_router]
impl NewsletterServer {
    #[tool(
        description = "List available fonts, image alignments, value limits and defaults. Call this first."
    )]
    async fn options(&self) -> Result<CallToolResult, McpError> {
        to_result(self.client.options().await)
    }

    #[tool(description = "Render a newsletter and return its HTML without saving it.")]
    async fn preview_newsletter(
        &self,
        params: Parameters<NewsletterParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.preview(&params.0).await)
    }

    #[tool(
        description = "Render and save a newsletter. Returns its ID plus preview and download URLs."
    )]
    async fn create_newsletter(
        &self,
        params: Parameters<NewsletterParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.create(&params.0).await)
    }

    #[tool(description = "List saved newsletters, newest first.")]
    async fn list_newsletters(
        &self,
        params: Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.list(params.0.limit).await)
    }

    #[tool(description = "Get a saved newsletter including its HTML.")]
    async fn get_newsletter(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        to_result(self.client.get(&params.0.id).await)
    }

    #[tool(description = "Delete a saved newsletter.")]
    async fn delete_newsletter(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.delete(&params.0.id).await)
    }
}

#[tool_handler]
impl ServerHandler for NewsletterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "newsletter-builder".into(),
                title: Some("Newsletter Builder MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Newsletter Builder - responsive HTML email newsletters

WORKFLOW:
1. 'options' - See fonts, alignments, limits and defaults
2. 'preview_newsletter' - Render HTML to check the result
3. 'create_newsletter' - Save it; open preview_url in a browser
4. 'list_newsletters' / 'get_newsletter' / 'delete_newsletter' - Manage saved ones

TIPS:
- Every newsletter needs 1 to 10 layers
- Images are base64 JPEG or PNG and are inlined as JPEG
- Use {company} in copyright_text to insert the company name"#
                    .into(),
            ),
        }
    }
}
