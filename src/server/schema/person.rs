use async_graphql::{Context, ErrorExtensions, ID, InputObject, Object, Result};

use super::validation;
use crate::datamodel::{NewPerson, Person};
use crate::error::{ServiceError, ServiceResult};
use crate::store::Database;

#[Object]
impl Person {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, InputObject)]
pub struct PersonInput {
    pub name: String,
}

#[derive(Default)]
pub struct PersonQuery;

#[Object]
impl PersonQuery {
    async fn persons(&self, ctx: &Context<'_>) -> Result<Vec<Person>> {
        let db = ctx.data::<Database>()?;
        db.persons().await.map_err(|err| ServiceError::from(err).extend())
    }
}

#[derive(Default)]
pub struct PersonMutation;

#[Object]
impl PersonMutation {
    async fn create_person(&self, ctx: &Context<'_>, input: PersonInput) -> Result<Person> {
        let db = ctx.data::<Database>()?;
        create(db, input).await.map_err(|err| err.extend())
    }
}

async fn create(db: &Database, input: PersonInput) -> ServiceResult<Person> {
    let person = db
        .create_person(NewPerson {
            name: validation::name(&input.name)?,
        })
        .await?;
    tracing::info!(id = %person.id, "person created");
    Ok(person)
}
