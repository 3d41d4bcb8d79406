//! Root view: the single-page-application shell. Returns the built
//! `index.html` verbatim; no parameters, no computed context.

use axum::{extract::State, http::StatusCode, response::Html};

use crate::bootstrap::app_context::AppContext;

pub async fn index(State(ctx): State<AppContext>) -> Result<Html<String>, StatusCode> {
    match tokio::fs::read_to_string(&ctx.cfg.index_file).await {
        Ok(body) => Ok(Html(body)),
        Err(e) => {
            tracing::error!(error = ?e, file = %ctx.cfg.index_file, "failed to read SPA shell");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
