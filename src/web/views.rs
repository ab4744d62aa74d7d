use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error, warn};

use super::AppState;
use super::page::Page;
use super::serializers::{FormError, Submission};
use crate::consts::{AI_ERROR_MESSAGE, FORM_ERROR_MESSAGE};
use crate::generator::Generator;
use crate::prompts::{Task, build_prompt};

// ---------- handlers ----------
pub async fn show(State(state): State<AppState>) -> Response {
    render(&state.page, None)
}

pub async fn submit(
    State(state): State<AppState>,
    submission: Result<Submission, FormError>,
) -> Response {
    let response = respond(state.generator.as_ref(), submission).await;
    render(&state.page, Some(&response))
}

/// Turn one submission into the text shown on the page. Never fails: form
/// and model errors are logged and replaced by fixed messages.
pub async fn respond(
    generator: &dyn Generator,
    submission: Result<Submission, FormError>,
) -> String {
    let (task, user_input) = match submission.and_then(Submission::into_parts) {
        Ok(parts) => parts,
        Err(e) => {
            warn!(error = %e, "could not process form");
            return FORM_ERROR_MESSAGE.to_string();
        }
    };

    let prompt = build_prompt(&task, &user_input);
    debug!(
        task = Task::parse(&task).map_or("raw", |t| t.as_str()),
        prompt_chars = prompt.chars().count(),
        "sending prompt"
    );

    match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "model API call failed");
            AI_ERROR_MESSAGE.to_string()
        }
    }
}

// ---------- small helpers ----------
fn render(page: &Page, response: Option<&str>) -> Response {
    match page.render(response) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
