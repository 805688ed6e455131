use std::sync::Arc;

use shared::{domain::CityId, protocol::NewCity};
use tracing::{error, info};

use crate::{
    error::{ControllerError, ValidationError},
    CityApi, CityForm, CityListItem, CityView, FormInput, UserPrompt,
};

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this city?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Fetch,
    Add,
    Delete,
    Submit,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Self::Fetch => "fetch_cities",
            Self::Add => "add_city",
            Self::Delete => "delete_city",
            Self::Submit => "submit_form",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Fetch => "Could not fetch cities",
            Self::Add | Self::Submit => "Could not add the city",
            Self::Delete => "Could not delete the city",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Mirrors the remote cities collection into a [`CityView`].
///
/// Every mutation is followed by a full refetch; nothing is patched locally.
/// Each operation reports its own failure (log + notification) before
/// returning it, so callers are free to ignore the returned error.
///
/// Overlapping calls are not coordinated: when two refetches race, whichever
/// response resolves last is what stays rendered.
pub struct CityListController {
    api: Arc<dyn CityApi>,
    view: Arc<dyn CityView>,
    prompt: Arc<dyn UserPrompt>,
    form: Arc<dyn CityForm>,
}

impl CityListController {
    pub fn new(
        api: Arc<dyn CityApi>,
        view: Arc<dyn CityView>,
        prompt: Arc<dyn UserPrompt>,
        form: Arc<dyn CityForm>,
    ) -> Self {
        Self {
            api,
            view,
            prompt,
            form,
        }
    }

    /// Replaces the view with the current collection. Returns the number of
    /// rendered items. On failure the view keeps whatever it showed before.
    pub async fn fetch_and_render(&self) -> Result<usize, ControllerError> {
        let cities = match self.api.list().await {
            Ok(cities) => cities,
            Err(err) => return Err(self.report(Operation::Fetch, err.into())),
        };

        let items: Vec<CityListItem> = cities.iter().map(CityListItem::from).collect();
        let count = items.len();
        self.view.replace_items(items);
        info!(count, "rendered city list");
        Ok(count)
    }

    /// Creates a city, then refetches and resets the form. `name` must already
    /// be trimmed and non-empty; see [`Self::submit_form`].
    pub async fn add_city(&self, name: &str, population: i64) -> Result<(), ControllerError> {
        let city = NewCity::new(name, population);
        if let Err(err) = self.api.create(&city).await {
            return Err(self.report(Operation::Add, err.into()));
        }
        info!(name, population, "city created");

        // A failed refetch is reported by fetch_and_render itself.
        let _ = self.fetch_and_render().await;
        self.form.reset();
        Ok(())
    }

    /// Asks for confirmation, then deletes and refetches.
    pub async fn delete_city(&self, id: &CityId) -> Result<DeleteOutcome, ControllerError> {
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = self.api.delete(id).await {
            return Err(self.report(Operation::Delete, err.into()));
        }
        info!(%id, "city deleted");

        let _ = self.fetch_and_render().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Validates the form and hands it to [`Self::add_city`]. Invalid input
    /// never reaches the network.
    pub async fn submit_form(&self) -> Result<(), ControllerError> {
        let city = match parse_submission(&self.form.read()) {
            Ok(city) => city,
            Err(err) => return Err(self.report(Operation::Submit, err.into())),
        };
        self.add_city(&city.name, city.population).await
    }

    fn report(&self, operation: Operation, err: ControllerError) -> ControllerError {
        error!(operation = operation.name(), error = %err, "city list operation failed");
        let message = match &err {
            ControllerError::Validation(validation) => validation.to_string(),
            ControllerError::Api(api) => format!("{}: {api}", operation.failure_prefix()),
        };
        self.prompt.notify(&message);
        err
    }
}

/// Trims the submitted fields and turns them into a create request. The
/// country field is collected by the form but never sent.
pub fn parse_submission(input: &FormInput) -> Result<NewCity, ValidationError> {
    let name = input.name.trim();
    let population = input.population.trim();
    if name.is_empty() || population.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let population = population
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPopulation(population.to_string()))?;
    Ok(NewCity::new(name, population))
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
