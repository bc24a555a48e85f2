use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{HotelId, RoomCount, RoomTypeId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait InventoryModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Atomically takes `count` rooms if at least that many remain. Returns whether it did.
    async fn try_reserve(
        &self,
        con: &mut Self::Transaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<bool, KernelError>;
    /// Gives `count` rooms back. A room type deleted in the meantime is skipped.
    async fn release(
        &self,
        con: &mut Self::Transaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnInventoryModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type InventoryModifier: InventoryModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn inventory_modifier(&self) -> &Self::InventoryModifier;
}
