//! UI actions and their dispatch onto the controller.

use client_core::{CityListController, ControllerError};
use shared::domain::CityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Refresh,
    Submit,
    Delete { id: CityId },
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Submit => "submit",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Runs one action. Failures have already been shown to the user by the
/// controller; the result only tells the caller whether it succeeded.
pub async fn dispatch(
    controller: &CityListController,
    cmd: UiCommand,
) -> Result<(), ControllerError> {
    tracing::debug!(command = cmd.name(), "dispatching ui command");
    match cmd {
        UiCommand::Refresh => controller.fetch_and_render().await.map(|_| ()),
        UiCommand::Submit => controller.submit_form().await,
        UiCommand::Delete { id } => controller.delete_city(&id).await.map(|_| ()),
    }
}
