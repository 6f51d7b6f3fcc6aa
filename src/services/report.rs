use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{ReportData, ReportFilters, ReportKind};

#[derive(Clone, Debug)]
pub struct ReportService {
    client: ApiClient,
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate one report; each kind has its own endpoint and schema
    pub async fn generate(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
    ) -> ClientResult<ReportData> {
        let data = match kind {
            ReportKind::Schedule => ReportData::Schedule(self.fetch(kind, filters).await?),
            ReportKind::Fairness => ReportData::Fairness(self.fetch(kind, filters).await?),
            ReportKind::LeaveBalance => ReportData::LeaveBalance(self.fetch(kind, filters).await?),
            ReportKind::SwapHistory => ReportData::SwapHistory(self.fetch(kind, filters).await?),
            ReportKind::EmployeeHours => {
                ReportData::EmployeeHours(self.fetch(kind, filters).await?)
            }
            ReportKind::WeekendHoliday => {
                ReportData::WeekendHoliday(self.fetch(kind, filters).await?)
            }
        };

        Ok(data)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
    ) -> ClientResult<T> {
        self.client.get_query(kind.endpoint(), filters).await
    }
}
