//! Storage backends behind one explicitly constructed [`Database`] handle.
//!
//! The entry point builds the handle once, calls [`Database::init`] before
//! serving and [`Database::close`] after shutdown; everything else receives a
//! clone of it.

mod error;
mod memory;
mod postgres;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::datamodel::{
    Assignment, Customer, NewAssignment, NewCustomer, NewPerson, Person,
};

#[derive(Debug, Clone)]
pub enum Database {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl Database {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        PgStore::connect(config).await.map(Self::Postgres)
    }

    pub async fn init(&self) -> StoreResult<()> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Postgres(store) => store.init().await,
        }
    }

    pub async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }

    pub async fn assignments(&self) -> StoreResult<Vec<Assignment>> {
        match self {
            Self::Memory(store) => Ok(store.assignments().await),
            Self::Postgres(store) => store.assignments().await,
        }
    }

    pub async fn create_assignment(&self, input: NewAssignment) -> StoreResult<Assignment> {
        match self {
            Self::Memory(store) => Ok(store.create_assignment(input).await),
            Self::Postgres(store) => store.create_assignment(input).await,
        }
    }

    pub async fn customers(&self) -> StoreResult<Vec<Customer>> {
        match self {
            Self::Memory(store) => Ok(store.customers().await),
            Self::Postgres(store) => store.customers().await,
        }
    }

    /// Fetches every customer whose id is in `ids`. Unknown ids are skipped.
    pub async fn customers_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Customer>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::Memory(store) => Ok(store.customers_by_ids(ids).await),
            Self::Postgres(store) => store.customers_by_ids(ids).await,
        }
    }

    pub async fn create_customer(&self, input: NewCustomer) -> StoreResult<Customer> {
        match self {
            Self::Memory(store) => Ok(store.create_customer(input).await),
            Self::Postgres(store) => store.create_customer(input).await,
        }
    }

    pub async fn persons(&self) -> StoreResult<Vec<Person>> {
        match self {
            Self::Memory(store) => Ok(store.persons().await),
            Self::Postgres(store) => store.persons().await,
        }
    }

    /// Fetches every person whose id is in `ids`. Unknown ids are skipped.
    pub async fn persons_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Person>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        match self {
            Self::Memory(store) => Ok(store.persons_by_ids(ids).await),
            Self::Postgres(store) => store.persons_by_ids(ids).await,
        }
    }

    pub async fn create_person(&self, input: NewPerson) -> StoreResult<Person> {
        match self {
            Self::Memory(store) => Ok(store.create_person(input).await),
            Self::Postgres(store) => store.create_person(input).await,
        }
    }
}
