//! The GraphQL schema, assembled once at startup from the per-entity
//! resolver tables.

use async_graphql::{EmptySubscription, MergedObject, Schema};

mod assignment;
mod customer;
mod person;
mod validation;

use assignment::{AssignmentMutation, AssignmentQuery};
use customer::{CustomerMutation, CustomerQuery};
use person::{PersonMutation, PersonQuery};

use crate::store::Database;

#[derive(MergedObject, Default)]
pub struct Query(AssignmentQuery, CustomerQuery, PersonQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(AssignmentMutation, CustomerMutation, PersonMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(db: Database) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(db)
        .finish()
}
