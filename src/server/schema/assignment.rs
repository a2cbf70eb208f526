use async_graphql::{Context, ErrorExtensions, ID, InputObject, Object, Result};
use chrono::{DateTime, Utc};

use super::validation;
use crate::datamodel::{Assignment, Customer, NewAssignment, Person};
use crate::error::{ServiceError, ServiceResult};
use crate::server::loaders::Loaders;
use crate::store::Database;

/// A scheduled piece of work. The recipient is the customer the work is
/// delivered to; the assignee is the person carrying it out.
#[Object]
impl Assignment {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn starts(&self) -> DateTime<Utc> {
        self.starts
    }

    async fn ends(&self) -> DateTime<Utc> {
        self.ends
    }

    async fn recipient_id(&self) -> Option<ID> {
        self.recipient_id.map(|id| ID(id.to_string()))
    }

    async fn recipient(&self, ctx: &Context<'_>) -> Result<Option<Customer>> {
        ctx.load_customer(self.recipient_id).await
    }

    async fn assignee_id(&self) -> Option<ID> {
        self.assignee_id.map(|id| ID(id.to_string()))
    }

    async fn assignee(&self, ctx: &Context<'_>) -> Result<Option<Person>> {
        ctx.load_person(self.assignee_id).await
    }
}

#[derive(Debug, InputObject)]
pub struct AssignmentInput {
    pub name: String,
    pub description: Option<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub recipient_id: Option<ID>,
    pub assignee_id: Option<ID>,
}

#[derive(Default)]
pub struct AssignmentQuery;

#[Object]
impl AssignmentQuery {
    async fn assignments(&self, ctx: &Context<'_>) -> Result<Vec<Assignment>> {
        let db = ctx.data::<Database>()?;
        db.assignments()
            .await
            .map_err(|err| ServiceError::from(err).extend())
    }
}

#[derive(Default)]
pub struct AssignmentMutation;

#[Object]
impl AssignmentMutation {
    async fn create_assignment(
        &self,
        ctx: &Context<'_>,
        input: AssignmentInput,
    ) -> Result<Assignment> {
        let db = ctx.data::<Database>()?;
        create(db, input).await.map_err(|err| err.extend())
    }
}

async fn create(db: &Database, input: AssignmentInput) -> ServiceResult<Assignment> {
    let name = validation::name(&input.name)?;
    let description = validation::description(input.description.as_deref())?;
    validation::schedule(input.starts, input.ends)?;
    let recipient_id = validation::reference("recipientId", input.recipient_id.as_ref())?;
    let assignee_id = validation::reference("assigneeId", input.assignee_id.as_ref())?;

    if let Some(id) = recipient_id {
        if db.customers_by_ids(&[id]).await?.is_empty() {
            return Err(ServiceError::validation(
                "recipientId does not reference an existing customer",
            ));
        }
    }
    if let Some(id) = assignee_id {
        if db.persons_by_ids(&[id]).await?.is_empty() {
            return Err(ServiceError::validation(
                "assigneeId does not reference an existing person",
            ));
        }
    }

    let assignment = db
        .create_assignment(NewAssignment {
            name,
            description,
            starts: input.starts,
            ends: input.ends,
            recipient_id,
            assignee_id,
        })
        .await?;
    tracing::info!(id = %assignment.id, "assignment created");
    Ok(assignment)
}
