//! HTML page handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use bedrock_content::{MISSING_DOCUMENTATION, render_html};

use crate::state::SharedState;
use crate::templates::{self, PageMeta};

/// GET /
pub async fn home() -> Html<String> {
    Html(templates::layout(&PageMeta::default(), &templates::home()))
}

/// GET /ferramentas
pub async fn tools_index(State(state): State<SharedState>) -> Html<String> {
    let meta = PageMeta {
        title: "Ferramentas - Bedrock",
        ..PageMeta::default()
    };
    Html(templates::layout(
        &meta,
        &templates::tools_index(state.catalog()),
    ))
}

/// GET /ferramentas/documentacao/{id}
///
/// Unknown tools get a 404 page. A known tool without a documentation file
/// still renders, with a placeholder heading in place of the docs.
pub async fn tool_detail(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let Some(tool) = state.catalog().find(&id) else {
        let meta = PageMeta {
            title: "Ferramenta não encontrada",
            description: "Não conseguimos encontrar a ferramenta que você procura.",
            ..PageMeta::default()
        };
        return (
            StatusCode::NOT_FOUND,
            Html(templates::layout(&meta, &templates::tool_not_found())),
        )
            .into_response();
    };

    let documentation = match state.docs().load_documentation(&tool.id).await {
        Ok(html) => html,
        Err(err) => {
            if !err.is_not_found() {
                tracing::warn!(tool = %tool.id, error = %err, "Failed to load documentation");
            }
            render_html(MISSING_DOCUMENTATION)
        }
    };

    let title = format!("{} - Documentação", tool.name);
    let description = format!("A documentação oficial da ferramenta {}.", tool.name);
    let meta = PageMeta {
        title: &title,
        description: &description,
        image: Some(tool.image.as_str()),
        highlight: true,
    };
    Html(templates::layout(
        &meta,
        &templates::tool_detail(tool, &documentation),
    ))
    .into_response()
}
