use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::api::ApiClient;
use crate::models::{OrchestrationRun, RunStatus};
use crate::pages::{PageAlerts, TableView};
use crate::polling::Poller;
use crate::services::OrchestratorService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipColor {
    Info,
    Success,
    Error,
    Warning,
    Default,
}

impl From<RunStatus> for ChipColor {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Running => ChipColor::Info,
            RunStatus::Completed => ChipColor::Success,
            RunStatus::Failed => ChipColor::Error,
            RunStatus::Cancelled => ChipColor::Default,
            RunStatus::Preview => ChipColor::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRow {
    pub status: RunStatus,
    pub chip: ChipColor,
    pub team: String,
    pub shifts: String,
    pub started_at: DateTime<Utc>,
    pub duration: String,
    pub initiated_by: String,
    pub error: Option<String>,
}

impl From<&OrchestrationRun> for RunRow {
    fn from(run: &OrchestrationRun) -> Self {
        let duration = match run.duration() {
            Some(d) if d.num_minutes() > 0 => {
                format!("{}m {}s", d.num_minutes(), d.num_seconds() % 60)
            }
            Some(d) => format!("{}s", d.num_seconds()),
            None => "-".to_string(),
        };

        RunRow {
            status: run.status,
            chip: run.status.into(),
            team: run.team_name.clone().unwrap_or_else(|| "All teams".to_string()),
            shifts: format!("{}/{}", run.assigned_shifts, run.total_shifts),
            started_at: run.started_at,
            duration,
            initiated_by: run.initiated_by.clone(),
            error: run.error_message.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct HistoryState {
    pub runs: Vec<OrchestrationRun>,
    pub loading: bool,
    pub loaded_once: bool,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub alerts: PageAlerts,
}

/// Orchestration run history with periodic refresh.
///
/// State sits behind a mutex so the poller and manual refreshes can share it;
/// the lock is never held across a request.
pub struct OrchestratorHistoryPage {
    service: OrchestratorService,
    state: Arc<Mutex<HistoryState>>,
    poll_interval: Duration,
    poller: Option<Poller>,
}

impl OrchestratorHistoryPage {
    pub fn new(client: ApiClient) -> Self {
        let poll_interval = client.config().history_poll_interval();
        Self {
            service: OrchestratorService::new(client),
            state: Arc::new(Mutex::new(HistoryState::default())),
            poll_interval,
            poller: None,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, HistoryState> {
        lock(&self.state)
    }

    /// Fetch the history now. Skipped while another refresh is in flight.
    pub async fn refresh(&self) {
        refresh_into(&self.service, &self.state).await;
    }

    /// Start refreshing at the configured history interval
    pub fn start_polling(&mut self) {
        self.start_polling_every(self.poll_interval);
    }

    /// Start refreshing every `period`; an earlier poller is replaced
    pub fn start_polling_every(&mut self, period: Duration) {
        let service = self.service.clone();
        let state = self.state.clone();

        self.poller = Some(Poller::spawn(period, move || {
            let service = service.clone();
            let state = state.clone();
            async move { refresh_into(&service, &state).await }
        }));
    }

    pub async fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(Poller::is_running)
    }

    pub fn polling_period(&self) -> Option<Duration> {
        self.poller.as_ref().map(Poller::period)
    }

    pub fn rows(&self) -> TableView<RunRow> {
        let state = self.state();
        let rows = state.runs.iter().map(RunRow::from).collect();
        // Background refreshes keep showing the previous rows
        let loading = state.loading && !state.loaded_once;
        TableView::from_rows(loading, rows, "No orchestration runs yet")
    }
}

fn lock(state: &Mutex<HistoryState>) -> MutexGuard<'_, HistoryState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the `loading` flag up for one refresh and lowers it on drop, so a
/// refresh cancelled mid-request by the poller never leaves it raised
struct LoadingFlag<'a>(&'a Mutex<HistoryState>);

impl<'a> LoadingFlag<'a> {
    fn raise(state: &'a Mutex<HistoryState>) -> Option<Self> {
        let mut guard = lock(state);
        if guard.loading {
            return None;
        }
        guard.loading = true;
        Some(Self(state))
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        lock(self.0).loading = false;
    }
}

async fn refresh_into(service: &OrchestratorService, state: &Mutex<HistoryState>) {
    let Some(_loading) = LoadingFlag::raise(state) else {
        log::debug!("orchestration history refresh already in flight");
        return;
    };
    let result = service.status().await;

    let mut state = lock(state);
    match result {
        Ok(runs) => {
            state.runs = runs;
            state.loaded_once = true;
            state.last_refreshed = Some(Utc::now());
            state.alerts.dismiss_error();
        }
        Err(err) => state.alerts.fail("Failed to load orchestration history", &err),
    }
}
