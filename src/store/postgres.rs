//! PostgreSQL backend.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::datamodel::{
    Assignment, Customer, NewAssignment, NewCustomer, NewPerson, Person,
};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS customers (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS persons (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS assignments (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        starts TIMESTAMPTZ NOT NULL,
        ends TIMESTAMPTZ NOT NULL,
        recipient_id UUID REFERENCES customers (id),
        assignee_id UUID REFERENCES persons (id)
    )"#,
];

const ASSIGNMENT_COLUMNS: &str = "id, name, description, starts, ends, recipient_id, assignee_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(StoreError::Connection)?;
        Ok(Self { pool })
    }

    /// Builds the pool without opening a connection; the first query connects.
    #[cfg(test)]
    pub fn connect_lazy(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy(&config.url)
            .map_err(StoreError::Connection)?;
        Ok(Self { pool })
    }

    /// Creates missing tables; existing tables are left untouched.
    pub async fn init(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn assignments(&self) -> StoreResult<Vec<Assignment>> {
        let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments ORDER BY starts, name");
        Ok(sqlx::query_as::<_, Assignment>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn create_assignment(&self, input: NewAssignment) -> StoreResult<Assignment> {
        let record = input.into_record();
        let sql = format!(
            "INSERT INTO assignments ({ASSIGNMENT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ASSIGNMENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Assignment>(&sql)
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.description)
            .bind(record.starts)
            .bind(record.ends)
            .bind(record.recipient_id)
            .bind(record.assignee_id)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn customers(&self) -> StoreResult<Vec<Customer>> {
        Ok(
            sqlx::query_as::<_, Customer>("SELECT id, name FROM customers ORDER BY name")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn customers_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Customer>> {
        Ok(
            sqlx::query_as::<_, Customer>("SELECT id, name FROM customers WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn create_customer(&self, input: NewCustomer) -> StoreResult<Customer> {
        let record = input.into_record();
        Ok(sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(record.id)
        .bind(&record.name)
        .fetch_one(&self.pool)
        .await?)
    }

    pub async fn persons(&self) -> StoreResult<Vec<Person>> {
        Ok(
            sqlx::query_as::<_, Person>("SELECT id, name FROM persons ORDER BY name")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn persons_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Person>> {
        Ok(
            sqlx::query_as::<_, Person>("SELECT id, name FROM persons WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    pub async fn create_person(&self, input: NewPerson) -> StoreResult<Person> {
        let record = input.into_record();
        Ok(sqlx::query_as::<_, Person>(
            "INSERT INTO persons (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(record.id)
        .bind(&record.name)
        .fetch_one(&self.pool)
        .await?)
    }
}
