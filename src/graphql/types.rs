use async_graphql::{ID, InputObject, Object, SimpleObject};

use crate::error::Result;
use crate::model::{self, NewEvent, Registration};

#[derive(SimpleObject)]
pub struct Event {
    #[graphql(name = "_id")]
    pub id: ID,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

impl From<model::Event> for Event {
    fn from(e: model::Event) -> Self {
        Self {
            id: ID(e.id),
            title: e.title,
            description: e.description,
            price: e.price,
            date: e.date.format("%Y-%m-%d").to_string(),
        }
    }
}

pub struct User {
    id: ID,
    email: String,
}

#[Object]
impl User {
    #[graphql(name = "_id")]
    async fn id(&self) -> &ID {
        &self.id
    }

    async fn email(&self) -> &str {
        &self.email
    }

    /// Always null. Password hashes never leave the server.
    #[graphql(deprecation = "Password hashes are never exposed")]
    async fn password(&self) -> Option<String> {
        None
    }
}

impl From<model::User> for User {
    fn from(u: model::User) -> Self {
        Self {
            id: ID(u.id),
            email: u.email,
        }
    }
}

#[derive(InputObject)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
}

impl EventInput {
    pub fn into_new_event(self) -> Result<NewEvent> {
        NewEvent::parse(self.title, self.description, self.price, &self.date)
    }
}

#[derive(InputObject)]
pub struct UserInput {
    pub email: String,
    pub password: String,
}

impl UserInput {
    pub fn into_registration(self) -> Result<Registration> {
        Registration::parse(self.email, self.password)
    }
}
