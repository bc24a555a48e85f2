use std::ops::Deref;
use std::sync::Arc;

use driver::database::{PostgresDatabase, PostgresHotelRepository, PostgresOrderRepository};
use driver::identity::JwtIdentityRepository;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnHotelQuery, DependOnIdentityQuery, DependOnOrderQuery};
use kernel::interface::update::{
    DependOnHotelModifier, DependOnInventoryModifier, DependOnOrderModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    hotels: PostgresHotelRepository,
    orders: PostgresOrderRepository,
    identities: JwtIdentityRepository,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let identities = JwtIdentityRepository::new()?;

        Ok(Self {
            pgpool,
            hotels: PostgresHotelRepository,
            orders: PostgresOrderRepository,
            identities,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnHotelQuery for Handler {
    type HotelQuery = PostgresHotelRepository;
    fn hotel_query(&self) -> &Self::HotelQuery {
        &self.hotels
    }
}

impl DependOnHotelModifier for Handler {
    type HotelModifier = PostgresHotelRepository;
    fn hotel_modifier(&self) -> &Self::HotelModifier {
        &self.hotels
    }
}

impl DependOnInventoryModifier for Handler {
    type InventoryModifier = PostgresHotelRepository;
    fn inventory_modifier(&self) -> &Self::InventoryModifier {
        &self.hotels
    }
}

impl DependOnOrderQuery for Handler {
    type OrderQuery = PostgresOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &self.orders
    }
}

impl DependOnOrderModifier for Handler {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &self.orders
    }
}

impl DependOnIdentityQuery for Handler {
    type IdentityQuery = JwtIdentityRepository;
    fn identity_query(&self) -> &Self::IdentityQuery {
        &self.identities
    }
}
