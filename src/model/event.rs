use chrono::NaiveDate;

use crate::error::Result;
use crate::validation;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date: NaiveDate,
}

/// An event that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub date: NaiveDate,
}

impl NewEvent {
    /// Validates raw field values, parsing `date` into a calendar date.
    pub fn parse(title: String, description: String, price: f64, date: &str) -> Result<Self> {
        validation::validate_title(&title)?;
        validation::validate_description(&description)?;
        validation::validate_price(price)?;
        let date = validation::parse_event_date(date)?;

        Ok(Self {
            title,
            description,
            price,
            date,
        })
    }

    pub fn with_id(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            date: self.date,
        }
    }
}
