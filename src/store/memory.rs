//! In-process tables, used when no database URL is configured and by the tests.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::datamodel::{
    Assignment, Customer, NewAssignment, NewCustomer, NewPerson, Person,
};

#[derive(Debug, Default)]
struct Tables {
    assignments: Vec<Assignment>,
    customers: Vec<Customer>,
    persons: Vec<Person>,
}

/// Rows are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    /// Every bulk lookup answered so far, as `(table, ids)`.
    #[cfg(test)]
    lookups: Arc<std::sync::Mutex<Vec<(&'static str, Vec<Uuid>)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn assignments(&self) -> Vec<Assignment> {
        self.tables.read().await.assignments.clone()
    }

    pub async fn create_assignment(&self, input: NewAssignment) -> Assignment {
        let record = input.into_record();
        self.tables.write().await.assignments.push(record.clone());
        record
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.tables.read().await.customers.clone()
    }

    pub async fn customers_by_ids(&self, ids: &[Uuid]) -> Vec<Customer> {
        #[cfg(test)]
        self.record_lookup("customers", ids);
        self.tables
            .read()
            .await
            .customers
            .iter()
            .filter(|customer| ids.contains(&customer.id))
            .cloned()
            .collect()
    }

    pub async fn create_customer(&self, input: NewCustomer) -> Customer {
        let record = input.into_record();
        self.tables.write().await.customers.push(record.clone());
        record
    }

    pub async fn persons(&self) -> Vec<Person> {
        self.tables.read().await.persons.clone()
    }

    pub async fn persons_by_ids(&self, ids: &[Uuid]) -> Vec<Person> {
        #[cfg(test)]
        self.record_lookup("persons", ids);
        self.tables
            .read()
            .await
            .persons
            .iter()
            .filter(|person| ids.contains(&person.id))
            .cloned()
            .collect()
    }

    pub async fn create_person(&self, input: NewPerson) -> Person {
        let record = input.into_record();
        self.tables.write().await.persons.push(record.clone());
        record
    }

    #[cfg(test)]
    fn record_lookup(&self, table: &'static str, ids: &[Uuid]) {
        self.lookups.lock().unwrap().push((table, ids.to_vec()));
    }

    /// Drains the bulk lookups recorded since the last call.
    #[cfg(test)]
    pub fn take_lookups(&self) -> Vec<(&'static str, Vec<Uuid>)> {
        std::mem::take(&mut *self.lookups.lock().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn customers_by_ids_returns_only_existing_rows() {
        let store = MemoryStore::new();
        let acme = store
            .create_customer(NewCustomer {
                name: "Acme".into(),
            })
            .await;
        store
            .create_customer(NewCustomer {
                name: "Globex".into(),
            })
            .await;

        let missing = Uuid::new_v4();
        let found = store.customers_by_ids(&[acme.id, missing]).await;
        assert_eq!(found, vec![acme.clone()]);
        assert!(store.customers_by_ids(&[]).await.is_empty());
        assert_eq!(
            store.take_lookups(),
            vec![("customers", vec![acme.id, missing]), ("customers", vec![])]
        );
        assert!(store.take_lookups().is_empty());
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Zed", "Ada", "Mia"] {
            store.create_person(NewPerson { name: name.into() }).await;
        }

        let names: Vec<_> = store.persons().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Zed", "Ada", "Mia"]);
    }
}
