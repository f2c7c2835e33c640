//! MCP Server implementation for Openverse image search
//!
//! This module defines the main MCP server that exposes the Openverse
//! API endpoints as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::client::{ImageApi, OpenverseClient, OpenverseError};
use crate::config::Config;
use crate::essay::{collect_essay_images, ImageStyle};

/// The main Openverse MCP Server
#[derive(Clone)]
pub struct OpenverseMcpServer {
    api: Arc<dyn ImageApi>,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchImagesParams {
    #[schemars(description = "Search terms (required)")]
    pub query: String,
    #[schemars(description = "Page number (default: 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Results per page (default: 20, max: 500)")]
    pub page_size: Option<u32>,
    #[schemars(description = "License filter (e.g., by, by-sa, cc0)")]
    pub license: Option<String>,
    #[schemars(description = "License type (commercial or modification)")]
    pub license_type: Option<String>,
    #[schemars(description = "Filter by creator name")]
    pub creator: Option<String>,
    #[schemars(description = "Filter by source (e.g., flickr, wikimedia)")]
    pub source: Option<String>,
    #[schemars(description = "File type (jpg, png, gif, svg)")]
    pub extension: Option<String>,
    #[schemars(description = "Image shape (tall, wide, square)")]
    pub aspect_ratio: Option<String>,
    #[schemars(description = "Image size (small, medium, large)")]
    pub size: Option<String>,
    #[schemars(description = "Include mature content (default: false)")]
    pub mature: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImageDetailsParams {
    #[schemars(description = "Openverse image ID (UUID format)")]
    pub image_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RelatedImagesParams {
    #[schemars(description = "Openverse image ID")]
    pub image_id: String,
    #[schemars(description = "Page number (default: 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Results per page (default: 10)")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EssayImagesParams {
    #[schemars(description = "Main topic/title of the essay")]
    pub essay_topic: String,
    #[schemars(description = "List of key concepts to find images for")]
    pub concepts: Vec<String>,
    #[schemars(description = "Preferred image style (default: any)")]
    pub style: Option<ImageStyle>,
    #[schemars(description = "Maximum images to return (default: 10)")]
    pub max_images: Option<u32>,
}

// ============================================================================
// Result helpers
// ============================================================================

/// Pretty-print a JSON body as the tool's text content
fn json_result(body: &Value) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(body)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Convert an adapter failure into a normal `{"error": ...}` result so the
/// caller always receives a parsable payload, never a protocol fault.
fn error_result(context: &str, err: &OpenverseError) -> Result<CallToolResult, McpError> {
    let message = match err {
        OpenverseError::Upstream { .. } => format!("{context}: {err}"),
        OpenverseError::Transport(e) => e.to_string(),
    };
    json_result(&json!({ "error": message }))
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl OpenverseMcpServer {
    pub fn new(config: Config) -> Self {
        let api: Arc<dyn ImageApi> = Arc::new(OpenverseClient::new(&config.api));
        Self::with_api(api, config)
    }

    /// Construct the server over an arbitrary adapter (embedding, tests)
    pub fn with_api(api: Arc<dyn ImageApi>, config: Config) -> Self {
        Self {
            api,
            config,
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Single-resource tools
    // ========================================================================

    #[tool(description = "Search for openly-licensed images on Openverse")]
    async fn search_images(
        &self,
        Parameters(params): Parameters<SearchImagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let page_size = params
            .page_size
            .unwrap_or(self.config.search.default_page_size)
            .min(self.config.search.max_page_size);

        let mut query = vec![
            ("q", params.query.clone()),
            ("page", params.page.unwrap_or(1).to_string()),
            ("page_size", page_size.to_string()),
            ("mature", params.mature.unwrap_or(false).to_string()),
        ];

        // Absent optional filters are omitted, not sent as empty strings
        let filters = [
            ("license", &params.license),
            ("license_type", &params.license_type),
            ("creator", &params.creator),
            ("source", &params.source),
            ("extension", &params.extension),
            ("aspect_ratio", &params.aspect_ratio),
            ("size", &params.size),
        ];
        for (name, value) in filters {
            if let Some(v) = value {
                query.push((name, v.clone()));
            }
        }

        tracing::info!(query = %params.query, page_size, "search_images");

        match self.api.get_json("/images/", &query).await {
            Ok(body) => json_result(&body),
            Err(e) => error_result("API request failed", &e),
        }
    }

    #[tool(description = "Get detailed information about a specific image")]
    async fn get_image_details(
        &self,
        Parameters(params): Parameters<ImageDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(image_id = %params.image_id, "get_image_details");

        let path = format!("/images/{}/", params.image_id);
        match self.api.get_json(&path, &[]).await {
            Ok(body) => json_result(&body),
            Err(e) => error_result("Failed to fetch image details", &e),
        }
    }

    #[tool(description = "Get images related to a specific image")]
    async fn get_related_images(
        &self,
        Parameters(params): Parameters<RelatedImagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = vec![
            ("page", params.page.unwrap_or(1).to_string()),
            (
                "page_size",
                params
                    .page_size
                    .unwrap_or(self.config.search.related_page_size)
                    .to_string(),
            ),
        ];

        tracing::info!(image_id = %params.image_id, "get_related_images");

        let path = format!("/images/{}/related/", params.image_id);
        match self.api.get_json(&path, &query).await {
            Ok(body) => json_result(&body),
            Err(e) => error_result("Failed to fetch related images", &e),
        }
    }

    #[tool(description = "Get statistics about image providers and counts")]
    async fn get_image_stats(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("get_image_stats");

        match self.api.get_json("/images/stats/", &[]).await {
            Ok(body) => json_result(&body),
            Err(e) => error_result("Failed to fetch stats", &e),
        }
    }

    // ========================================================================
    // Essay aggregation tool
    // ========================================================================

    #[tool(description = "Search for images suitable for illustrating an essay")]
    async fn search_images_for_essay(
        &self,
        Parameters(params): Parameters<EssayImagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let style = params.style.unwrap_or_default();
        let max_images = params.max_images.unwrap_or(10) as usize;

        tracing::info!(
            topic = %params.essay_topic,
            concepts = params.concepts.len(),
            max_images,
            "search_images_for_essay"
        );

        let set = collect_essay_images(
            self.api.as_ref(),
            &params.essay_topic,
            &params.concepts,
            style,
            max_images,
        )
        .await;

        match serde_json::to_string_pretty(&set) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => json_result(&json!({
                "error": e.to_string(),
                "topic": params.essay_topic,
            })),
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for OpenverseMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Openverse MCP Server - provides tools for searching openly-licensed \
                 images via the Openverse API. Supports image search with license and \
                 style filters, image details, related images, provider statistics, \
                 and bundled image collection for illustrating essays. No API keys \
                 required."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
