mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CancelOrderService, CreateOrderService, FindOrdersByPhoneService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::order::request::{
    CancelOrderRequest, CreateOrderRequest, FindOrdersRequest, Transformer,
};
use crate::route::order::response::Presenter;

pub trait OrderRouter {
    fn route_order(self) -> Self;
}

impl OrderRouter for Router<AppModule> {
    fn route_order(self) -> Self {
        self.route(
            "/public/orders",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateOrderRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.create_order(dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/public/orders/query",
            get(
                |State(module): State<AppModule>, Query(req): Query<FindOrdersRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.find_orders_by_phone(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/public/orders/:id/cancel",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<CancelOrderRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.cancel_order(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
