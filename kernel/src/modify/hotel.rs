use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Hotel, HotelId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait HotelModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError>;
    /// Writes the hotel together with its full room-type list.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        hotel_id: &HotelId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnHotelModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type HotelModifier: HotelModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn hotel_modifier(&self) -> &Self::HotelModifier;
}
