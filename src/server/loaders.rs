use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Result};
use uuid::Uuid;

use crate::datamodel::{Customer, Person};
use crate::error::ServiceError;
use crate::store::{Database, StoreError};

use super::dataloader::{BatchLoader, DataLoader};

/// Batched lookups available to resolvers for the current request.
///
/// A missing id resolves to `None` without touching the loader.
pub trait Loaders {
    async fn load_customer(&self, id: Option<Uuid>) -> Result<Option<Customer>>;
    async fn load_person(&self, id: Option<Uuid>) -> Result<Option<Person>>;
}

impl Loaders for Context<'_> {
    async fn load_customer(&self, id: Option<Uuid>) -> Result<Option<Customer>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.data::<DataLoader<CustomerBatch>>()?
            .load(id)
            .await
            .map_err(|err| ServiceError::from(err).extend())
    }

    async fn load_person(&self, id: Option<Uuid>) -> Result<Option<Person>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.data::<DataLoader<PersonBatch>>()?
            .load(id)
            .await
            .map_err(|err| ServiceError::from(err).extend())
    }
}

pub struct CustomerBatch {
    db: Database,
}

impl CustomerBatch {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl BatchLoader for CustomerBatch {
    type K = Uuid;
    type V = Customer;
    type Error = Arc<StoreError>;

    async fn load_batch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Customer>, Self::Error> {
        tracing::debug!(count = keys.len(), ?keys, "resolving customers");

        let customers = self.db.customers_by_ids(keys).await.map_err(Arc::new)?;

        tracing::debug!(found = customers.len(), "finished resolving customers");
        Ok(customers.into_iter().map(|c| (c.id, c)).collect())
    }
}

pub struct PersonBatch {
    db: Database,
}

impl PersonBatch {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl BatchLoader for PersonBatch {
    type K = Uuid;
    type V = Person;
    type Error = Arc<StoreError>;

    async fn load_batch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Person>, Self::Error> {
        tracing::debug!(count = keys.len(), ?keys, "resolving persons");

        let persons = self.db.persons_by_ids(keys).await.map_err(Arc::new)?;

        tracing::debug!(found = persons.len(), "finished resolving persons");
        Ok(persons.into_iter().map(|p| (p.id, p)).collect())
    }
}
