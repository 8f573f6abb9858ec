//! Route table and server entry points.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use bedrock_core::{Error, Result};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{api, pages};
use crate::state::SharedState;

/// Build the application router.
///
/// Unmatched paths fall through to the public directory so icon paths such
/// as `/ferramentas/math.png` resolve to files.
pub fn router(state: SharedState) -> Router {
    let public = ServeDir::new(state.public_root());

    Router::new()
        .route("/", get(pages::home))
        .route("/ferramentas", get(pages::tools_index))
        .route("/ferramentas/documentacao/{ferramenta}", get(pages::tool_detail))
        .route("/api/documentacao", get(api::documentation))
        .route("/api/download", get(api::download_by_query))
        .route("/api/ferramentas", get(api::list_tools))
        .route(
            "/api/ferramentas/{ferramenta}/download",
            get(api::download_by_path),
        )
        .route("/health", get(api::health))
        .fallback_service(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().map_err(Error::io)?;
    tracing::info!(%addr, tools = state.catalog().len(), "Bedrock listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(Error::io)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: SharedState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("cannot bind {addr}: {e}")))?;
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use crate::handlers::api::{DocumentationResponse, HealthResponse};
    use crate::state::{ApiOptions, ApiState};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use bedrock_content::{Catalog, ToolRecord};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct Site {
        _temp: TempDir,
        app: Router,
    }

    fn site_with(options: ApiOptions) -> Site {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs");
        let packages = temp.path().join("packages");
        let public = temp.path().join("public");
        for dir in [&docs, &packages, &public.join("ferramentas")] {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(docs.join("discord-rpc.md"), "# Hello").unwrap();
        std::fs::write(docs.join("temporizer.md"), "# Temporizer\n\n<script>x()</script>\n")
            .unwrap();
        std::fs::write(docs.join("rascunho.md"), "fora do catálogo").unwrap();
        std::fs::write(packages.join("Temporizer.bas"), b"Sub Wait()\r\nEnd Sub\r\n\x00\xff")
            .unwrap();
        std::fs::write(public.join("ferramentas/math.png"), b"\x89PNG").unwrap();

        let state = ApiState::new(Catalog::builtin(), docs, packages, public)
            .with_options(options)
            .shared();
        Site {
            _temp: temp,
            app: router(state),
        }
    }

    fn site() -> Site {
        site_with(ApiOptions::default())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    fn error_body(bytes: &[u8]) -> ErrorBody {
        serde_json::from_slice(bytes).unwrap()
    }

    // ------------------------------------------------------------------------
    // /api/documentacao
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_documentation_returns_raw_markdown() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/documentacao?ferramenta=discord-rpc").await;
        assert_eq!(status, StatusCode::OK);
        let doc: DocumentationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc.content, "# Hello");
    }

    #[tokio::test]
    async fn test_documentation_outside_catalog() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/documentacao?ferramenta=rascunho").await;
        assert_eq!(status, StatusCode::OK);
        let doc: DocumentationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc.content, "fora do catálogo");
    }

    #[tokio::test]
    async fn test_documentation_missing_param() {
        let site = site();
        for uri in ["/api/documentacao", "/api/documentacao?ferramenta="] {
            let (status, _, body) = get(&site.app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                error_body(&body),
                ErrorBody {
                    message: "Missing required field (ferramenta).".into(),
                    error: "missing field".into(),
                }
            );
        }
    }

    #[tokio::test]
    async fn test_documentation_missing_param_legacy_status() {
        let site = site_with(ApiOptions {
            legacy_status_codes: true,
        });
        let (status, _, body) = get(&site.app, "/api/documentacao").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body = error_body(&body);
        assert_eq!(body.message, "Missing required field (ferramenta).");
        assert_eq!(body.error, "missing field");
    }

    #[tokio::test]
    async fn test_documentation_not_found() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/documentacao?ferramenta=math").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_body(&body).message, "File not found.");
    }

    #[tokio::test]
    async fn test_documentation_traversal_rejected() {
        let site = site();
        let (status, _, body) =
            get(&site.app, "/api/documentacao?ferramenta=..%2F..%2Fetc%2Fpasswd").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_body(&body).error, "invalid field");
    }

    // ------------------------------------------------------------------------
    // /api/download
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_download_by_query() {
        let site = site();
        let (status, headers, body) = get(&site.app, "/api/download?ferramenta=temporizer").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Temporizer.bas\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH], body.len().to_string().as_str());
        assert_eq!(body, b"Sub Wait()\r\nEnd Sub\r\n\x00\xff".to_vec());
    }

    #[tokio::test]
    async fn test_download_by_path() {
        let site = site();
        let (status, headers, body) = get(&site.app, "/api/ferramentas/temporizer/download").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Temporizer.bas\""
        );
        assert_eq!(body, b"Sub Wait()\r\nEnd Sub\r\n\x00\xff".to_vec());
    }

    #[tokio::test]
    async fn test_download_unknown_tool() {
        let site = site();
        for uri in [
            "/api/download?ferramenta=inexistente",
            "/api/ferramentas/inexistente/download",
        ] {
            let (status, _, body) = get(&site.app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            let body = error_body(&body);
            assert_eq!(body.message, "Ferramenta não encontrada.");
            assert_eq!(body.error, "not found");
        }
    }

    #[tokio::test]
    async fn test_download_missing_param() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/download").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_body(&body).error, "missing field");
    }

    #[tokio::test]
    async fn test_download_tool_without_package() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/download?ferramenta=relay").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body = error_body(&body);
        assert_eq!(body.error, "no package");
        assert_eq!(body.message, "Pacote não disponível para esta ferramenta.");

        // The server keeps answering afterwards.
        let (status, _, _) = get(&site.app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_download_missing_file_is_redacted_500() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/download?ferramenta=math").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let raw = String::from_utf8(body.clone()).unwrap();
        assert!(!raw.contains("Math.bas"));
        let body = error_body(&body);
        assert_eq!(body.message, "Erro ao baixar o pacote.");
        assert_eq!(body.error, "internal error");
    }

    // ------------------------------------------------------------------------
    // /api/ferramentas and /health
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_tools() {
        let site = site();
        let (status, _, body) = get(&site.app, "/api/ferramentas").await;
        assert_eq!(status, StatusCode::OK);
        let tools: Vec<ToolRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tools, Catalog::builtin().tools().to_vec());
    }

    #[tokio::test]
    async fn test_list_tools_by_tag() {
        let site = site();
        let (_, _, body) = get(&site.app, "/api/ferramentas?tag=Jogos").await;
        let tools: Vec<ToolRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, "temporizer");
    }

    #[tokio::test]
    async fn test_health() {
        let site = site();
        let (status, _, body) = get(&site.app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.tools, 5);
    }

    // ------------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_home_page() {
        let site = site();
        let (status, headers, body) = get(&site.app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(String::from_utf8(body).unwrap().contains("Ver Ferramentas"));
    }

    #[tokio::test]
    async fn test_tools_page() {
        let site = site();
        let (status, _, body) = get(&site.app, "/ferramentas").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Discord RPC"));
        assert!(html.contains("/ferramentas/documentacao/betterdll"));
    }

    #[tokio::test]
    async fn test_detail_page_renders_sanitized_docs() {
        let site = site();
        let (status, _, body) = get(&site.app, "/ferramentas/documentacao/temporizer").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("<h1>Temporizer</h1>"));
        assert!(html.contains("&lt;script&gt;x()&lt;/script&gt;"));
        assert!(!html.contains("<script>x()</script>"));
        assert!(html.contains("Baixar Pacote"));
        assert!(html.contains("<title>Temporizer - Documentação</title>"));
    }

    #[tokio::test]
    async fn test_detail_page_missing_docs_placeholder() {
        let site = site();
        let (status, _, body) = get(&site.app, "/ferramentas/documentacao/math").await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            String::from_utf8(body)
                .unwrap()
                .contains("<h1>Documentação não encontrada</h1>")
        );
    }

    #[tokio::test]
    async fn test_detail_page_without_package_has_no_download() {
        let site = site();
        let (_, _, body) = get(&site.app, "/ferramentas/documentacao/relay").await;
        assert!(!String::from_utf8(body).unwrap().contains("Baixar Pacote"));
    }

    #[tokio::test]
    async fn test_detail_page_unknown_tool() {
        let site = site();
        let (status, _, body) = get(&site.app, "/ferramentas/documentacao/inexistente").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(
            String::from_utf8(body)
                .unwrap()
                .contains("Ferramenta não encontrada")
        );
    }

    #[tokio::test]
    async fn test_public_assets_fallback() {
        let site = site();
        let (status, _, body) = get(&site.app, "/ferramentas/math.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"\x89PNG".to_vec());

        let (status, _, _) = get(&site.app, "/ferramentas/nada.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
