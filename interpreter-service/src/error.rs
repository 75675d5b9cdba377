use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every way an interpretation request can fail.
///
/// The `Display` text is the message the caller sees, so it must never carry
/// the API key or upstream diagnostics.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Método no permitido")]
    MethodNotAllowed,

    #[error("La clave de API de Gemini no está configurada en el servidor.")]
    MissingConfiguration,

    #[error("Faltan el número o el texto del artículo.")]
    InvalidInput,

    #[error("La API de Gemini respondió con un error: {0}")]
    Upstream(u16),

    #[error("No se recibió una interpretación válida de la API de Gemini.")]
    MalformedUpstreamResponse,

    #[error("{0}")]
    Unknown(String),
}

impl InterpretError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InterpretError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            InterpretError::InvalidInput => StatusCode::BAD_REQUEST,
            InterpretError::MissingConfiguration
            | InterpretError::Upstream(_)
            | InterpretError::MalformedUpstreamResponse
            | InterpretError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for the outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            InterpretError::MethodNotAllowed => "method_not_allowed",
            InterpretError::MissingConfiguration => "missing_configuration",
            InterpretError::InvalidInput => "invalid_input",
            InterpretError::Upstream(_) => "upstream_error",
            InterpretError::MalformedUpstreamResponse => "malformed_upstream_response",
            InterpretError::Unknown(_) => "unknown",
        }
    }
}

impl From<serde_json::Error> for InterpretError {
    fn from(err: serde_json::Error) -> Self {
        InterpretError::Unknown(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for InterpretError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
