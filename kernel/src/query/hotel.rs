use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BannerLimit, Hotel, HotelFilter, HotelId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait HotelQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError>;
    /// [`HotelQuery::find_by_id`] for a read-modify-write. The hotel and its room types
    /// stay locked against other writers, inventory changes included, until the
    /// transaction ends.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Hotel>, KernelError>;
    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner: &UserId,
    ) -> error_stack::Result<Vec<Hotel>, KernelError>;
    /// Approved hotels satisfying `filter`, in no particular order.
    async fn find_approved(
        &self,
        con: &mut Self::Transaction,
        filter: &HotelFilter,
    ) -> error_stack::Result<Vec<Hotel>, KernelError>;
    /// Approved featured hotels, most recently updated first.
    async fn find_featured(
        &self,
        con: &mut Self::Transaction,
        limit: &BannerLimit,
    ) -> error_stack::Result<Vec<Hotel>, KernelError>;
}

pub trait DependOnHotelQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type HotelQuery: HotelQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn hotel_query(&self) -> &Self::HotelQuery;
}
