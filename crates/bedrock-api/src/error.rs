//! HTTP error mapping.
//!
//! Every failure leaves a handler as an [`ApiError`] and is rendered as:
//!
//! ```json
//! { "message": "<human readable>", "error": "<short code>" }
//! ```
//!
//! Internal failures are logged with their source; the client only sees the
//! fixed message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bedrock_core::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
    /// Short machine-oriented code.
    pub error: String,
}

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required query parameter absent or empty.
    #[error("Missing required field ({field}).")]
    MissingField {
        /// Parameter name.
        field: &'static str,
        /// Answer 401 instead of 400, as earlier versions of the site did.
        legacy_status: bool,
    },

    /// Parameter present but unusable as an identifier.
    #[error("Invalid field ({field}).")]
    InvalidField {
        /// Parameter name.
        field: &'static str,
    },

    /// No documentation file for the identifier.
    #[error("File not found.")]
    DocumentNotFound,

    /// No catalog entry for the identifier.
    #[error("Ferramenta não encontrada.")]
    ToolNotFound,

    /// Catalog entry without a package.
    #[error("Pacote não disponível para esta ferramenta.")]
    NoPackage,

    /// Unexpected failure; `message` is what the client sees.
    #[error("{message}")]
    Internal {
        /// Client-facing message.
        message: &'static str,
        /// Logged, never sent.
        #[source]
        source: Error,
    },
}

/// Query parameter naming the tool.
pub const TOOL_PARAM: &str = "ferramenta";

impl ApiError {
    /// Missing `ferramenta` parameter.
    pub fn missing_tool_param(legacy_status: bool) -> Self {
        Self::MissingField {
            field: TOOL_PARAM,
            legacy_status,
        }
    }

    /// Map a documentation load failure.
    pub fn from_documentation_error(err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::DocumentNotFound,
            Error::InvalidId(_) => Self::InvalidField { field: TOOL_PARAM },
            source => Self::Internal {
                message: "Erro ao ler a documentação.",
                source,
            },
        }
    }

    /// Map a package download failure.
    pub fn from_download_error(err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::ToolNotFound,
            Error::NoPackage(_) => Self::NoPackage,
            Error::InvalidId(_) => Self::InvalidField { field: TOOL_PARAM },
            source => Self::Internal {
                message: "Erro ao baixar o pacote.",
                source,
            },
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField {
                legacy_status: true,
                ..
            } => StatusCode::UNAUTHORIZED,
            Self::MissingField { .. } | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::DocumentNotFound | Self::ToolNotFound | Self::NoPackage => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short code placed in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing field",
            Self::InvalidField { .. } => "invalid field",
            Self::DocumentNotFound | Self::ToolNotFound => "not found",
            Self::NoPackage => "no package",
            Self::Internal { .. } => "internal error",
        }
    }

    /// The JSON body sent to the client.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            error: self.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
