//! Communication log repository port
//!
//! Storage of decoded logs, queried by the inspection use case.

use async_trait::async_trait;
use commlog_domain::{CommunicationLogDetail, CommunicationLogFilter};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("A communication log with id {0} is already stored")]
    DuplicateId(i64),
}

/// Repository of communication logs.
///
/// Listings are ordered by start processing time, ties broken by id.
#[async_trait]
pub trait CommunicationLogRepository: Send + Sync {
    /// Store a log; ids are unique.
    async fn save(&self, detail: CommunicationLogDetail) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CommunicationLogDetail>, RepositoryError>;

    /// One page of the logs matching `filter`.
    async fn find_by_filter(
        &self,
        filter: &CommunicationLogFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CommunicationLogDetail>, RepositoryError>;

    /// Number of logs matching `filter`, ignoring pagination.
    async fn count_by_filter(&self, filter: &CommunicationLogFilter)
    -> Result<usize, RepositoryError>;

    /// Logs whose `parentCommunicationId` is `parent_id`.
    async fn find_children(
        &self,
        parent_id: i64,
    ) -> Result<Vec<CommunicationLogDetail>, RepositoryError>;
}
