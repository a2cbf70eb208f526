use async_graphql::{Context, ErrorExtensions, ID, InputObject, Object, Result};

use super::validation;
use crate::datamodel::{Customer, NewCustomer};
use crate::error::{ServiceError, ServiceResult};
use crate::store::Database;

#[Object]
impl Customer {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, InputObject)]
pub struct CustomerInput {
    pub name: String,
}

#[derive(Default)]
pub struct CustomerQuery;

#[Object]
impl CustomerQuery {
    async fn customers(&self, ctx: &Context<'_>) -> Result<Vec<Customer>> {
        let db = ctx.data::<Database>()?;
        db.customers().await.map_err(|err| ServiceError::from(err).extend())
    }
}

#[derive(Default)]
pub struct CustomerMutation;

#[Object]
impl CustomerMutation {
    async fn create_customer(&self, ctx: &Context<'_>, input: CustomerInput) -> Result<Customer> {
        let db = ctx.data::<Database>()?;
        create(db, input).await.map_err(|err| err.extend())
    }
}

async fn create(db: &Database, input: CustomerInput) -> ServiceResult<Customer> {
    let customer = db
        .create_customer(NewCustomer {
            name: validation::name(&input.name)?,
        })
        .await?;
    tracing::info!(id = %customer.id, "customer created");
    Ok(customer)
}
