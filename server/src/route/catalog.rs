mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{
    GetCatalogMetaService, GetHotelBannersService, GetPublishedHotelService, SearchHotelsService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::catalog::request::{BannerRequest, DetailRequest, SearchRequest, Transformer};
use crate::route::catalog::response::Presenter;

pub trait CatalogRouter {
    fn route_catalog(self) -> Self;
}

impl CatalogRouter for Router<AppModule> {
    fn route_catalog(self) -> Self {
        self.route(
            "/public/hotels/meta",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_catalog_meta().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/public/hotels/banners",
            get(
                |State(module): State<AppModule>, Query(req): Query<BannerRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|limit| async move { module.get_hotel_banners(limit).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/public/hotels",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.search_hotels(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/public/hotels/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DetailRequest::new(id))
                        .handle(|id| async move { module.get_published_hotel(id).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
