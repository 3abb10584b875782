use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(admin_routes(config))
        .routes(routes!(handlers::course::list_courses))
        .route("/uploads/{*path}", get(handlers::uploads::serve_upload))
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::course::create_course))
        .routes(routes!(handlers::course::delete_course))
        .layer(handlers::course::course_upload_body_limit(
            config.server.body_limit,
        ))
}
