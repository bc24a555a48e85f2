use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Order, OrderId, OrderNumber, Phone};
use crate::KernelError;

pub const DEFAULT_PHONE_LOOKUP_LIMIT: i64 = 50;

#[async_trait::async_trait]
pub trait OrderQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError>;
    /// Newest first.
    async fn find_by_phone(
        &self,
        con: &mut Self::Transaction,
        phone: &Phone,
        limit: i64,
    ) -> error_stack::Result<Vec<Order>, KernelError>;
    async fn exists_number(
        &self,
        con: &mut Self::Transaction,
        number: &OrderNumber,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnOrderQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderQuery: OrderQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_query(&self) -> &Self::OrderQuery;
}
