use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower_http::trace::TraceLayer;

pub mod dataloader;
pub mod loaders;
pub mod schema;

use dataloader::DataLoader;
use loaders::{CustomerBatch, PersonBatch};
use schema::{AppSchema, build_schema};

use crate::store::Database;

#[derive(Clone)]
pub struct AppState {
    schema: AppSchema,
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            schema: build_schema(db.clone()),
            db,
        }
    }

    /// Executes one GraphQL request with its own set of loaders, so nothing
    /// batched for this request outlives it.
    pub async fn execute(&self, req: async_graphql::Request) -> async_graphql::Response {
        let customers = DataLoader::new(CustomerBatch::new(self.db.clone()));
        let persons = DataLoader::new(PersonBatch::new(self.db.clone()));
        self.execute_with(req, customers, persons).await
    }

    pub(crate) async fn execute_with(
        &self,
        req: async_graphql::Request,
        customers: DataLoader<CustomerBatch>,
        persons: DataLoader<PersonBatch>,
    ) -> async_graphql::Response {
        let req = req.data(customers.clone()).data(persons.clone());

        let execute = self.schema.execute(req);
        persons.wrap(customers.wrap(execute)).await
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

#[axum::debug_handler]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.execute(req.into_inner()).await.into()
}

pub fn make_app(db: Database) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(db))
}
