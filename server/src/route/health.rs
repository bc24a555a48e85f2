use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::handler::AppModule;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

pub trait HealthRouter {
    fn route_health(self) -> Self;
}

impl HealthRouter for Router<AppModule> {
    fn route_health(self) -> Self {
        self.route(
            "/health",
            get(|| async {
                Json(HealthResponse {
                    status: "ok",
                    message: "Server is running",
                })
            }),
        )
    }
}
