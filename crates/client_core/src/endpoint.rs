use shared::domain::CityId;
use url::Url;

use crate::error::CityApiError;

pub const DEFAULT_CITIES_URL: &str = "https://avancera.app/cities/";

/// Collection URL of the cities resource, always ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitiesEndpoint {
    collection: Url,
}

impl CitiesEndpoint {
    pub fn parse(raw: &str) -> Result<Self, CityApiError> {
        let mut collection =
            Url::parse(raw.trim()).map_err(|_| CityApiError::InvalidEndpoint(raw.to_string()))?;
        if collection.cannot_be_a_base() {
            return Err(CityApiError::InvalidEndpoint(raw.to_string()));
        }
        if !collection.path().ends_with('/') {
            let path = format!("{}/", collection.path());
            collection.set_path(&path);
        }
        Ok(Self { collection })
    }

    pub fn collection(&self) -> &Url {
        &self.collection
    }

    /// Rejects an empty id, which would otherwise resolve to the collection.
    pub fn item(&self, id: &CityId) -> Result<Url, CityApiError> {
        if id.as_str().is_empty() {
            return Err(CityApiError::EmptyCityId);
        }
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| CityApiError::InvalidEndpoint(self.collection.to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

impl Default for CitiesEndpoint {
    fn default() -> Self {
        Self {
            collection: Url::parse(DEFAULT_CITIES_URL).expect("default cities url is valid"),
        }
    }
}
