use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CancelOrderDto, CreateOrderDto, FindOrdersByPhoneDto};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;
use crate::route::number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    hotel_id: Option<Uuid>,
    room_type_id: Option<Uuid>,
    #[serde(default)]
    check_in_date: String,
    #[serde(default)]
    check_out_date: String,
    room_count: Option<i32>,
    #[serde(default)]
    guest_name: String,
    #[serde(default)]
    phone: String,
    remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FindOrdersRequest {
    #[serde(default)]
    phone: String,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    #[serde(default)]
    phone: String,
    reason: Option<String>,
}

pub struct Transformer;

impl TryIntake<CreateOrderRequest> for Transformer {
    type To = CreateOrderDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateOrderRequest) -> Result<Self::To, Self::Error> {
        let hotel_id = input
            .hotel_id
            .ok_or_else(|| KernelError::Validation.with_message("hotelId is required"))?;
        let room_type_id = input
            .room_type_id
            .ok_or_else(|| KernelError::Validation.with_message("roomTypeId is required"))?;
        Ok(CreateOrderDto {
            hotel_id,
            room_type_id,
            check_in_date: input.check_in_date,
            check_out_date: input.check_out_date,
            room_count: input.room_count,
            guest_name: input.guest_name,
            phone: input.phone,
            remarks: input.remarks,
        })
    }
}

impl Intake<FindOrdersRequest> for Transformer {
    type To = FindOrdersByPhoneDto;
    fn emit(&self, input: FindOrdersRequest) -> Self::To {
        FindOrdersByPhoneDto {
            phone: input.phone,
            limit: number(input.limit),
        }
    }
}

impl Intake<(Uuid, CancelOrderRequest)> for Transformer {
    type To = CancelOrderDto;
    fn emit(&self, (id, input): (Uuid, CancelOrderRequest)) -> Self::To {
        CancelOrderDto {
            id,
            phone: input.phone,
            reason: input.reason,
        }
    }
}
