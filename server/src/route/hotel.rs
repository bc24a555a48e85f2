mod request;
mod response;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    AddRoomTypeService, ChangeHotelStatusService, CreateHotelService, DeleteHotelService,
    DeleteRoomTypeService, GetHotelService, ListHotelsService, UpdateHotelService,
    UpdateRoomTypeService,
};

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::hotel::request::{
    CreateHotelRequest, DeleteHotelRequest, GetHotelRequest, RoomTypeLocator,
    RoomTypePatchRequest, RoomTypeRequest, StatusRequest, Transformer, UpdateHotelRequest,
};
use crate::route::hotel::response::{MessageResponse, Presenter};

pub(crate) use self::response::HotelResponse;

pub trait HotelRouter {
    fn route_hotel(self) -> Self;
}

impl HotelRouter for Router<AppModule> {
    fn route_hotel(self) -> Self {
        self.route(
            "/hotels",
            get(
                |State(module): State<AppModule>, Authenticated(identity): Authenticated| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.list_hotels(&identity).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Json(req): Json<CreateHotelRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.create_hotel(&identity, dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/hotels/:id",
            get(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetHotelRequest::new(id))
                        .handle(|dto| async move { module.get_hotel(&identity, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateHotelRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.update_hotel(&identity, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteHotelRequest::new(id))
                        .handle(|dto| async move { module.delete_hotel(&identity, dto).await })
                        .await
                        .map(|()| Json(MessageResponse::new("Hotel deleted successfully")))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/hotels/:id/status",
            put(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path(id): Path<Uuid>,
                 Json(req): Json<StatusRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move {
                            module.change_hotel_status(&identity, dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/hotels/:id/room-types",
            post(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path(id): Path<Uuid>,
                 Json(req): Json<RoomTypeRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((id, req))?
                        .handle(|dto| async move { module.add_room_type(&identity, dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/hotels/:id/room-types/:room_type_id",
            put(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path((id, room_type_id)): Path<(Uuid, Uuid)>,
                 Json(req): Json<RoomTypePatchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake((RoomTypeLocator::new(id, room_type_id), req))?
                        .handle(|dto| async move {
                            module.update_room_type(&identity, dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Authenticated(identity): Authenticated,
                 Path((id, room_type_id)): Path<(Uuid, Uuid)>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(RoomTypeLocator::new(id, room_type_id))
                        .handle(|dto| async move {
                            module.delete_room_type(&identity, dto).await
                        })
                        .await
                        .map(|()| Json(MessageResponse::new("Room type deleted successfully")))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
