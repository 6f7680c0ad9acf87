//! Inspect logs use case
//!
//! Administrative queries over stored communication logs: a filtered,
//! paginated listing of summaries, and a single log with its children.

use crate::config::{MAX_PAGE_LIMIT, QueryParams};
use crate::ports::log_repository::{CommunicationLogRepository, RepositoryError};
use commlog_domain::{CommunicationLogDetail, CommunicationLogFilter, CommunicationLogSummary};
use futures::future::try_join;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InspectLogsError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Communication log {0} not found")]
    NotFound(i64),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Input for a filtered listing.
#[derive(Debug, Clone, Default)]
pub struct InspectLogsInput {
    pub filter: CommunicationLogFilter,
    pub offset: usize,
    /// Page size; [`QueryParams::default_limit`] when not given
    pub limit: Option<usize>,
}

impl InspectLogsInput {
    pub fn new(filter: CommunicationLogFilter) -> Self {
        Self {
            filter,
            offset: 0,
            limit: None,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One page of summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectLogsOutput {
    pub summaries: Vec<CommunicationLogSummary>,
    /// Number of matching logs across all pages
    pub total_results: usize,
    pub offset: usize,
    pub limit: usize,
}

/// A single log together with the logs it spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDetailView {
    pub detail: CommunicationLogDetail,
    /// Children ordered by start processing time
    pub children: Vec<CommunicationLogSummary>,
}

pub struct InspectLogsUseCase {
    repository: Arc<dyn CommunicationLogRepository>,
    params: QueryParams,
}

impl InspectLogsUseCase {
    pub fn new(repository: Arc<dyn CommunicationLogRepository>) -> Self {
        Self {
            repository,
            params: QueryParams::default(),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub async fn find_by_filter(
        &self,
        input: InspectLogsInput,
    ) -> Result<InspectLogsOutput, InspectLogsError> {
        let limit = input.limit.unwrap_or(self.params.default_limit);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(InspectLogsError::InvalidPage(format!(
                "limit must be between 1 and {}, got {}",
                MAX_PAGE_LIMIT, limit
            )));
        }

        let (page, total_results) = try_join(
            self.repository
                .find_by_filter(&input.filter, input.offset, limit),
            self.repository.count_by_filter(&input.filter),
        )
        .await?;
        debug!(
            offset = input.offset,
            limit,
            returned = page.len(),
            total_results,
            "Listed communication logs"
        );

        Ok(InspectLogsOutput {
            summaries: page.iter().map(CommunicationLogSummary::from).collect(),
            total_results,
            offset: input.offset,
            limit,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<LogDetailView, InspectLogsError> {
        let (detail, mut children) = try_join(
            self.repository.find_by_id(id),
            self.repository.find_children(id),
        )
        .await?;
        let detail = detail.ok_or(InspectLogsError::NotFound(id))?;

        children.sort_by_key(|c| (c.base().start_processing_date_time, c.id()));
        Ok(LogDetailView {
            detail,
            children: children.iter().map(CommunicationLogSummary::from).collect(),
        })
    }
}
