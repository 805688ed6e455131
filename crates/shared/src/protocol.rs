use serde::{Deserialize, Serialize};

use crate::domain::CityId;

/// A city record as returned by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub population: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body of the create request. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub population: i64,
}

impl NewCity {
    pub fn new(name: impl Into<String>, population: i64) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }
}
