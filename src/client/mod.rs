use chrono::{DateTime, Utc};
use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn run<Op, Vars>(
        &self,
        op: cynic::Operation<Op, Vars>,
    ) -> Result<cynic::GraphQlResponse<Op>, CynicReqwestError>
    where
        Vars: serde::Serialize,
        Op: serde::de::DeserializeOwned + 'static,
    {
        self.client.post(self.url.clone()).run_graphql(op).await
    }
}

#[cynic::schema("assignments")]
mod schema {}

cynic::impl_scalar!(DateTime<Utc>, schema::DateTime);

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Assignments {
    pub assignments: Vec<Assignment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Customers {
    pub customers: Vec<Customer>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Assignment {
    pub id: cynic::Id,
    pub name: String,
    pub description: Option<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub recipient: Option<Customer>,
    pub assignee: Option<Person>,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: cynic::Id,
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
pub struct Person {
    pub id: cynic::Id,
    pub name: String,
}

#[derive(cynic::InputObject, Debug)]
pub struct CustomerInput {
    pub name: String,
}

#[derive(cynic::InputObject, Debug)]
pub struct PersonInput {
    pub name: String,
}

#[derive(cynic::InputObject, Debug)]
pub struct AssignmentInput {
    pub name: String,
    pub description: Option<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub recipient_id: Option<cynic::Id>,
    pub assignee_id: Option<cynic::Id>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct CreateCustomerVariables {
    pub input: CustomerInput,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct CreatePersonVariables {
    pub input: PersonInput,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct CreateAssignmentVariables {
    pub input: AssignmentInput,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreateCustomerVariables")]
pub struct CreateCustomer {
    #[arguments(input: $input)]
    pub create_customer: Customer,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreatePersonVariables")]
pub struct CreatePerson {
    #[arguments(input: $input)]
    pub create_person: Person,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreateAssignmentVariables")]
pub struct CreateAssignment {
    #[arguments(input: $input)]
    pub create_assignment: Assignment,
}
