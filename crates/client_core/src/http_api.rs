use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::CityId,
    protocol::{City, NewCity},
};
use tracing::debug;

use crate::{endpoint::CitiesEndpoint, error::CityApiError, CityApi};

/// [`CityApi`] backed by the remote REST collection.
#[derive(Debug, Clone)]
pub struct HttpCityApi {
    http: Client,
    endpoint: CitiesEndpoint,
}

impl HttpCityApi {
    pub fn new(endpoint: CitiesEndpoint) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: CitiesEndpoint) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &CitiesEndpoint {
        &self.endpoint
    }
}

fn ensure_success(response: &Response) -> Result<(), CityApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(CityApiError::http(response.status(), None))
    }
}

#[async_trait]
impl CityApi for HttpCityApi {
    async fn list(&self) -> Result<Vec<City>, CityApiError> {
        let url = self.endpoint.collection().clone();
        debug!(method = "GET", %url, "requesting city list");
        let response = self.http.get(url).send().await?;
        ensure_success(&response)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn create(&self, city: &NewCity) -> Result<(), CityApiError> {
        let url = self.endpoint.collection().clone();
        debug!(method = "POST", %url, name = %city.name, "creating city");
        let response = self.http.post(url).json(city).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CityApiError::http(status, Some(body)));
        }
        Ok(())
    }

    async fn delete(&self, id: &CityId) -> Result<(), CityApiError> {
        let url = self.endpoint.item(id)?;
        debug!(method = "DELETE", %url, "deleting city");
        let response = self.http.delete(url).send().await?;
        ensure_success(&response)
    }
}

#[cfg(test)]
#[path = "tests/http_api_tests.rs"]
mod tests;
