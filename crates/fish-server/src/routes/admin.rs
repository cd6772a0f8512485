//! Admin portal endpoint.

use axum::{Router, response::Html, routing::get};

use crate::admin::Admin;
use crate::state::AppState;

const PORTAL_PAGE: &str = "<html><h1>Fish catalog admin portal</h1></html>";

/// GET /admin - Static page, only served to the `admin` user.
async fn admin_portal(_admin: Admin) -> Html<&'static str> {
    tracing::info!("Admin portal accessed");
    Html(PORTAL_PAGE)
}

/// Build admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin", get(admin_portal))
}
