#![allow(dead_code)]

use error_stack::Report;
use time::macros::date;
use uuid::Uuid;

use application::service::{
    ChangeHotelStatusService, CreateHotelService, CreateOrderService, GetHotelService,
};
use application::transfer::{
    ChangeHotelStatusDto, CreateHotelDto, CreateOrderDto, GetHotelDto, HotelDto, OrderDto,
    RoomTypeInputDto,
};
use driver::database::{InMemoryDatabase, InMemoryHotelRepository, InMemoryOrderRepository};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnHotelQuery, DependOnOrderQuery, OrderQuery};
use kernel::interface::update::{
    DependOnHotelModifier, DependOnInventoryModifier, DependOnOrderModifier, OrderModifier,
};
use kernel::prelude::entity::{Identity, OrderId, OrderStatus, Role, UserId};
use kernel::KernelError;

pub const PHONE: &str = "13800000000";

pub struct Module {
    db: InMemoryDatabase,
    hotels: InMemoryHotelRepository,
    orders: InMemoryOrderRepository,
}

impl Module {
    pub fn new() -> Self {
        Self {
            db: InMemoryDatabase::new(),
            hotels: InMemoryHotelRepository,
            orders: InMemoryOrderRepository,
        }
    }
}

impl DependOnDatabaseConnection for Module {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.db
    }
}

impl DependOnHotelQuery for Module {
    type HotelQuery = InMemoryHotelRepository;
    fn hotel_query(&self) -> &Self::HotelQuery {
        &self.hotels
    }
}

impl DependOnHotelModifier for Module {
    type HotelModifier = InMemoryHotelRepository;
    fn hotel_modifier(&self) -> &Self::HotelModifier {
        &self.hotels
    }
}

impl DependOnInventoryModifier for Module {
    type InventoryModifier = InMemoryHotelRepository;
    fn inventory_modifier(&self) -> &Self::InventoryModifier {
        &self.hotels
    }
}

impl DependOnOrderQuery for Module {
    type OrderQuery = InMemoryOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &self.orders
    }
}

impl DependOnOrderModifier for Module {
    type OrderModifier = InMemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &self.orders
    }
}

pub fn merchant() -> Identity {
    Identity::new(UserId::new(Uuid::new_v4()), Role::Merchant)
}

pub fn admin() -> Identity {
    Identity::new(UserId::new(Uuid::new_v4()), Role::Admin)
}

pub fn room(name: &str, price: i64, cancel_policy: &str, inventory: i32) -> RoomTypeInputDto {
    RoomTypeInputDto {
        id: None,
        name: name.to_string(),
        price,
        bed_type: Some("king".to_string()),
        breakfast: Some(true),
        cancel_policy: Some(cancel_policy.to_string()),
        max_guests: Some(2),
        inventory: Some(inventory),
    }
}

pub fn hotel(name: &str, city: &str, star_rating: i32, room_types: Vec<RoomTypeInputDto>) -> CreateHotelDto {
    CreateHotelDto {
        name: name.to_string(),
        name_en: format!("{name} Hotel"),
        address: format!("{name} Street 1"),
        city: Some(city.to_string()),
        star_rating,
        opening_date: date!(2019 - 06 - 01),
        tags: vec!["wifi".to_string()],
        amenities: vec!["gym".to_string()],
        banner_image: Some(format!("https://img.example.com/{name}.jpg")),
        images: vec![],
        geo: None,
        featured: Some(false),
        room_types,
    }
}

/// Creates the hotel as `owner` and has an admin approve it.
pub async fn publish(
    module: &Module,
    owner: &Identity,
    dto: CreateHotelDto,
) -> error_stack::Result<HotelDto, KernelError> {
    let hotel = module.create_hotel(owner, dto).await?;
    module
        .change_hotel_status(
            &admin(),
            ChangeHotelStatusDto {
                id: hotel.id,
                status: "approved".to_string(),
                reason: None,
            },
        )
        .await
}

pub async fn set_status(
    module: &Module,
    hotel_id: Uuid,
    status: &str,
    reason: Option<&str>,
) -> error_stack::Result<HotelDto, KernelError> {
    module
        .change_hotel_status(
            &admin(),
            ChangeHotelStatusDto {
                id: hotel_id,
                status: status.to_string(),
                reason: reason.map(str::to_string),
            },
        )
        .await
}

/// Marks a stored order as completed, the way a stay wraps up.
pub async fn complete(module: &Module, order_id: Uuid) -> error_stack::Result<(), KernelError> {
    let mut con = module.db.transact().await?;
    let order = module
        .orders
        .find_by_id(&mut con, &OrderId::new(order_id))
        .await?
        .ok_or_else(|| KernelError::NotFound.with_message("Order not found"))?;
    let order = order.reconstruct(|o| o.status = OrderStatus::Completed);
    module.orders.update(&mut con, &order).await?;
    con.commit().await
}

pub fn booking(hotel: &HotelDto, room_count: i32) -> CreateOrderDto {
    CreateOrderDto {
        hotel_id: hotel.id,
        room_type_id: hotel.room_types[0].id,
        check_in_date: "2024-05-01".to_string(),
        check_out_date: "2024-05-03".to_string(),
        room_count: Some(room_count),
        guest_name: "Li Lei".to_string(),
        phone: PHONE.to_string(),
        remarks: None,
    }
}

pub async fn book(
    module: &Module,
    hotel: &HotelDto,
    room_count: i32,
) -> error_stack::Result<OrderDto, KernelError> {
    module.create_order(booking(hotel, room_count)).await
}

pub fn assert_error(report: &Report<KernelError>, context: KernelError, message: &str) {
    assert_eq!(report.current_context(), &context);
    assert_eq!(kernel::error_message(report), Some(message));
}

/// Remaining rooms of the hotel's first room type.
pub async fn inventory(
    module: &Module,
    owner: &Identity,
    hotel_id: Uuid,
) -> error_stack::Result<i32, KernelError> {
    let hotel = module.get_hotel(owner, GetHotelDto { id: hotel_id }).await?;
    Ok(hotel.room_types[0].inventory)
}
