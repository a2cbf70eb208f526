use chrono::{TimeZone, Utc};
use cynic::{MutationBuilder as _, QueryBuilder as _};

use crate::client::{
    AssignmentInput, Assignments, Client, CreateAssignment, CreateAssignmentVariables,
    CreateCustomer, CreateCustomerVariables, CreatePerson, CreatePersonVariables, Customer,
    CustomerInput, Customers, Person, PersonInput,
};
use crate::store::Database;


async fn create_customer(client: &Client, name: &str) -> Customer {
    let op = CreateCustomer::build(CreateCustomerVariables {
        input: CustomerInput { name: name.into() },
    });
    client.run(op).await.unwrap().data.unwrap().create_customer
}

async fn create_person(client: &Client, name: &str) -> Person {
    let op = CreatePerson::build(CreatePersonVariables {
        input: PersonInput { name: name.into() },
    });
    client.run(op).await.unwrap().data.unwrap().create_person
}

#[tokio::test]
async fn test_request() {
    let server = testserver::TestServer::start(Database::memory());
    let client = Client::new(server.url());

    let acme = create_customer(&client, "Acme").await;
    let globex = create_customer(&client, " Globex ").await;
    let ada = create_person(&client, "Ada").await;
    assert_eq!(globex.name, "Globex");

    let starts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let ends = Utc.with_ymd_and_hms(2024, 3, 1, 17, 0, 0).unwrap();
    for (name, recipient, assignee) in [
        ("Audit", Some(&acme), Some(&ada)),
        ("Inventory", Some(&globex), None),
        ("Payroll", Some(&acme), Some(&ada)),
    ] {
        let op = CreateAssignment::build(CreateAssignmentVariables {
            input: AssignmentInput {
                name: name.into(),
                description: None,
                starts,
                ends,
                recipient_id: recipient.map(|c| c.id.clone()),
                assignee_id: assignee.map(|p| p.id.clone()),
            },
        });
        let created = client.run(op).await.unwrap();
        assert!(created.errors.is_none(), "{:?}", created.errors);
    }

    let res = client.run(Assignments::build(())).await.unwrap();
    assert!(res.errors.is_none(), "{:?}", res.errors);
    let assignments = res.data.unwrap().assignments;

    let resolved: Vec<_> = assignments
        .iter()
        .map(|a| {
            (
                a.name.as_str(),
                a.recipient.as_ref().map(|c| c.name.as_str()),
                a.assignee.as_ref().map(|p| p.name.as_str()),
            )
        })
        .collect();
    assert_eq!(
        resolved,
        [
            ("Audit", Some("Acme"), Some("Ada")),
            ("Inventory", Some("Globex"), None),
            ("Payroll", Some("Acme"), Some("Ada")),
        ]
    );
    assert!(assignments.iter().all(|a| a.starts == starts && a.ends == ends));

    let customers = client
        .run(Customers::build(()))
        .await
        .unwrap()
        .data
        .unwrap()
        .customers;
    assert_eq!(customers, [acme, globex]);
}

#[tokio::test]
async fn invalid_input_is_reported_as_graphql_error() {
    let server = testserver::TestServer::start(Database::memory());
    let client = Client::new(server.url());

    let op = CreateCustomer::build(CreateCustomerVariables {
        input: CustomerInput { name: "".into() },
    });
    let res = client.run(op).await.unwrap();

    assert!(res.data.is_none());
    let errors = res.errors.unwrap();
    assert_eq!(errors[0].message, "name must not be empty");
}
