use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnOrderQuery, OrderQuery, DEFAULT_PHONE_LOOKUP_LIMIT};
use kernel::interface::update::{
    DependOnInventoryModifier, DependOnOrderModifier, InventoryModifier, OrderModifier,
};
use kernel::prelude::entity::{OrderId, Phone};
use kernel::KernelError;

use crate::service::local_now;
use crate::transfer::{CancelOrderDto, FindOrdersByPhoneDto, OrderDto};

#[async_trait::async_trait]
pub trait FindOrdersByPhoneService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnOrderQuery
{
    async fn find_orders_by_phone(
        &self,
        dto: FindOrdersByPhoneDto,
    ) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let phone = Phone::new(dto.phone);
        if phone.is_blank() {
            return Err(KernelError::Validation.with_message("phone is required"));
        }
        let limit = dto
            .limit
            .unwrap_or(DEFAULT_PHONE_LOOKUP_LIMIT)
            .clamp(1, DEFAULT_PHONE_LOOKUP_LIMIT);

        let mut connection = self.database_connection().transact().await?;
        let orders = self
            .order_query()
            .find_by_phone(&mut connection, &phone, limit)
            .await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }
}

impl<T> FindOrdersByPhoneService for T where T: DependOnDatabaseConnection + DependOnOrderQuery {}

#[async_trait::async_trait]
pub trait CancelOrderService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnOrderQuery
    + DependOnOrderModifier
    + DependOnInventoryModifier
{
    async fn cancel_order(&self, dto: CancelOrderDto) -> error_stack::Result<OrderDto, KernelError> {
        let phone = Phone::new(dto.phone);
        if phone.is_blank() {
            return Err(KernelError::Validation.with_message("phone is required"));
        }

        let mut connection = self.database_connection().transact().await?;
        let mut order = self
            .order_query()
            .find_by_id(&mut connection, &OrderId::new(dto.id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Order not found"))?;

        order.cancel(&phone, dto.reason, local_now())?;
        self.order_modifier()
            .update(&mut connection, &order)
            .await?;
        self.inventory_modifier()
            .release(
                &mut connection,
                order.hotel_id(),
                order.room_type_id(),
                order.room_count(),
            )
            .await?;
        connection.commit().await?;

        tracing::info!("order {} cancelled", order.number().as_ref());
        Ok(order.into())
    }
}

impl<T> CancelOrderService for T where
    T: DependOnDatabaseConnection
        + DependOnOrderQuery
        + DependOnOrderModifier
        + DependOnInventoryModifier
{
}
