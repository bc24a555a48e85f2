use std::ops::{Deref, DerefMut};
use std::time::Duration;

use error_stack::{Report, ResultExt};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{hotel::*, order::*};

mod hotel;
mod order;

const POSTGRES_URL: &str = "POSTGRES_URL";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL` and applies pending migrations.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect(&url)
            .await
            .convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to apply migrations")?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: 'static> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
