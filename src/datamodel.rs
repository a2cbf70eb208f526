use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

/// A scheduled piece of work, optionally delivered to a [`Customer`] and
/// carried out by a [`Person`].
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub recipient_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub name: String,
    pub description: Option<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub recipient_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
}

impl NewCustomer {
    pub fn into_record(self) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: self.name,
        }
    }
}

impl NewPerson {
    pub fn into_record(self) -> Person {
        Person {
            id: Uuid::new_v4(),
            name: self.name,
        }
    }
}

impl NewAssignment {
    pub fn into_record(self) -> Assignment {
        Assignment {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            starts: self.starts,
            ends: self.ends,
            recipient_id: self.recipient_id,
            assignee_id: self.assignee_id,
        }
    }
}
