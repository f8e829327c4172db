use super::super::ApiState;
use crate::dashboard::{render_page, DashboardState, DashboardView};
use crate::database::load_metrics_payload;
use axum::{extract::State, http::StatusCode, response::Html};

/// `GET /` renders the dashboard from the same payload `/api/metrics` serves.
pub async fn dashboard_page(State(state): State<ApiState>) -> (StatusCode, Html<String>) {
    match load_metrics_payload(state.store.as_ref()).await {
        Ok(payload) => {
            let view = DashboardView::from_payload(&payload);
            (StatusCode::OK, Html(render_page(&DashboardState::loaded(view))))
        }
        Err(e) => {
            tracing::error!("Failed to render dashboard: {:#}", e);
            let state = DashboardState::Error(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_page(&state)))
        }
    }
}
