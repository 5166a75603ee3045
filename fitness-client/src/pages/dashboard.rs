use crate::FitnessClient;
use crate::models::DashboardData;

use super::failure_text;

const LOAD_FAILED: &str = "Error al cargar datos";

#[derive(Debug, Clone, Default, PartialEq)]
/// What the dashboard currently shows.
pub enum DashboardState {
    /// Request not finished yet.
    #[default]
    Loading,
    /// Summary received.
    Ready(Box<DashboardData>),
    /// Request failed; text for the user.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
/// Summary page; re-fetched on every load.
pub struct DashboardPage {
    /// Current state.
    pub state: DashboardState,
}

impl DashboardPage {
    /// Page in the loading state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the summary computed by the backend.
    pub async fn load(&mut self, client: &FitnessClient) -> &DashboardState {
        self.state = match client.weight().get_dashboard().await {
            Ok(data) => DashboardState::Ready(Box::new(data)),
            Err(err) => DashboardState::Failed(failure_text(&err, LOAD_FAILED)),
        };
        &self.state
    }

    /// Summary, if loaded.
    pub fn data(&self) -> Option<&DashboardData> {
        match &self.state {
            DashboardState::Ready(data) => Some(data),
            _ => None,
        }
    }
}
