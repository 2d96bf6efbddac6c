use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub id: String,
    pub origin_location_id: String,
    pub destination_location_id: String,
    pub operator_id: String,
    /// ISO 8601 timestamp as sent by the server
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: i64,
    pub prices: Prices,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    /// Minor units (cents)
    pub total: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Links {
    #[serde(default)]
    pub deeplink: String,
}

/// Body of both `/api/departures` and `/api/departures/poll`.
///
/// Missing arrays decode as empty and a missing `complete` decodes as `false`,
/// so a partial body keeps the poll loop going instead of ending it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchPage {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub departures: Vec<Departure>,
    #[serde(default)]
    pub operators: Vec<Operator>,
    #[serde(default)]
    pub complete: bool,
}

/// Error body returned with a non-200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

impl SearchQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
        }
    }
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
