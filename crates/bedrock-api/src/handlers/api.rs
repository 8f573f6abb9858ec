//! JSON and download endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bedrock_content::{Package, ToolRecord};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::SharedState;

/// `?ferramenta=` query.
#[derive(Debug, Default, Deserialize)]
pub struct ToolQuery {
    /// Tool identifier.
    pub ferramenta: Option<String>,
}

/// `?tag=` query for the catalog listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only tools carrying this tag.
    pub tag: Option<String>,
}

/// Body of a successful documentation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentationResponse {
    /// Raw markdown; rendering happens in the page layer.
    pub content: String,
}

/// Body of `/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Project name.
    pub project: String,
    /// Number of catalog entries.
    pub tools: usize,
}

fn required_tool_id(state: &SharedState, query: ToolQuery) -> Result<String, ApiError> {
    match query.ferramenta {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::missing_tool_param(
            state.options().legacy_status_codes,
        )),
    }
}

/// GET /api/documentacao?ferramenta={id}
///
/// Returns the raw markdown for a tool. The identifier does not have to be
/// in the catalog.
pub async fn documentation(
    State(state): State<SharedState>,
    Query(query): Query<ToolQuery>,
) -> Result<Json<DocumentationResponse>, ApiError> {
    let id = required_tool_id(&state, query)?;
    let content = state
        .docs()
        .load_markdown(&id)
        .await
        .map_err(ApiError::from_documentation_error)?;
    Ok(Json(DocumentationResponse { content }))
}

/// GET /api/download?ferramenta={id}
pub async fn download_by_query(
    State(state): State<SharedState>,
    Query(query): Query<ToolQuery>,
) -> Result<Response, ApiError> {
    let id = required_tool_id(&state, query)?;
    download(&state, &id).await
}

/// GET /api/ferramentas/{id}/download
pub async fn download_by_path(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    download(&state, &id).await
}

async fn download(state: &SharedState, id: &str) -> Result<Response, ApiError> {
    let package = state
        .packages()
        .download(id)
        .await
        .map_err(ApiError::from_download_error)?;
    package_response(package)
}

fn package_response(package: Package) -> Result<Response, ApiError> {
    let disposition = format!("attachment; filename=\"{}\"", package.file_name);
    let disposition =
        HeaderValue::from_str(&disposition).map_err(|e| ApiError::Internal {
            message: "Erro ao baixar o pacote.",
            source: bedrock_core::Error::invalid_data(e.to_string()),
        })?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (header::CONTENT_DISPOSITION, disposition),
        (header::CONTENT_LENGTH, HeaderValue::from(package.len())),
    ];
    Ok((headers, package.bytes).into_response())
}

/// GET /api/ferramentas[?tag=…]
pub async fn list_tools(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<ToolRecord>> {
    let tools = match query.tag.as_deref() {
        Some(tag) => state.catalog().with_tag(tag).cloned().collect(),
        None => state.catalog().tools().to_vec(),
    };
    Json(tools)
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        project: state.project_name().to_string(),
        tools: state.catalog().len(),
    })
}
