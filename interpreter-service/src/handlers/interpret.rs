//! The article interpretation endpoint.
//!
//! Flow: method gate, credential check, payload validation, prompt
//! construction, one Gemini call, response mapping. Every outcome is a JSON
//! body carrying either `interpretation` or `error`.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::InterpretError,
    models::{Article, InterpretResponse},
    services::{metrics::record_interpretation, prompt},
    startup::AppState,
};

/// Upper bound on an inbound body; articles are short.
/// Larger bodies fail as an unknown error before any parsing.
const MAX_BODY_BYTES: usize = 256 * 1024;

pub async fn interpret(State(state): State<AppState>, request: Request) -> Response {
    match interpret_article(&state, request).await {
        Ok(interpretation) => {
            record_interpretation("success");
            (StatusCode::OK, Json(InterpretResponse { interpretation })).into_response()
        }
        Err(err) => {
            if err.status_code().is_server_error() {
                tracing::error!(kind = err.kind(), error = %err, "Interpretation failed");
            } else {
                tracing::warn!(kind = err.kind(), "Interpretation request rejected");
            }
            record_interpretation(err.kind());
            err.into_response()
        }
    }
}

async fn interpret_article(state: &AppState, request: Request) -> Result<String, InterpretError> {
    if request.method() != Method::POST {
        return Err(InterpretError::MethodNotAllowed);
    }

    // Checked before the body so a missing key always wins over bad input.
    if !state.text_provider.is_configured() {
        return Err(InterpretError::MissingConfiguration);
    }

    let body = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| InterpretError::Unknown(e.to_string()))?;
    let article = Article::from_body(&body)?;

    tracing::info!(
        numero = %article.numero,
        texto_len = article.texto.len(),
        "Requesting interpretation"
    );

    let interpretation = state
        .text_provider
        .generate(prompt::SYSTEM_PROMPT, &prompt::user_query(&article))
        .await?;

    Ok(interpretation)
}
