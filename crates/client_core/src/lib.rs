//! Keeps a rendered city list in sync with the remote cities collection.
//!
//! The controller talks to the outside world only through the port traits
//! below; the HTTP implementation lives in [`http_api`], terminal ones live in
//! the CLI app.

use async_trait::async_trait;
use shared::{
    domain::CityId,
    protocol::{City, NewCity},
};

pub mod controller;
pub mod endpoint;
pub mod error;
pub mod http_api;

pub use controller::{CityListController, DeleteOutcome};
pub use endpoint::{CitiesEndpoint, DEFAULT_CITIES_URL};
pub use error::{CityApiError, ControllerError, ValidationError};
pub use http_api::HttpCityApi;

#[async_trait]
pub trait CityApi: Send + Sync {
    async fn list(&self) -> Result<Vec<City>, CityApiError>;
    async fn create(&self, city: &NewCity) -> Result<(), CityApiError>;
    async fn delete(&self, id: &CityId) -> Result<(), CityApiError>;
}

/// Rendered list surface. Each call replaces everything shown before.
pub trait CityView: Send + Sync {
    fn replace_items(&self, items: Vec<CityListItem>);
}

/// Synchronous confirmation and notification surface.
pub trait UserPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, message: &str);
}

pub trait CityForm: Send + Sync {
    fn read(&self) -> FormInput;
    fn reset(&self);
}

/// Raw field values as typed by the user, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub population: String,
    pub country: String,
}

/// One rendered entry; `id` is what its delete action is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityListItem {
    pub id: CityId,
    pub name: String,
    pub population: i64,
}

impl CityListItem {
    pub fn label(&self) -> String {
        format!("{}, population: {}", self.name, self.population)
    }
}

impl From<&City> for CityListItem {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            population: city.population,
        }
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
