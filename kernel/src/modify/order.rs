use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Order;
use crate::KernelError;

#[async_trait::async_trait]
pub trait OrderModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Fails with [`KernelError::Concurrency`] when the order number is already taken.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError>;
    /// Writes a status change. Fails with [`KernelError::Conflict`] when the stored
    /// order already reached a terminal status, including one committed concurrently.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnOrderModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderModifier: OrderModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_modifier(&self) -> &Self::OrderModifier;
}
