//! In-memory communication log repository.

use async_trait::async_trait;
use commlog_application::{CommunicationLogRepository, RepositoryError};
use commlog_domain::{CommunicationLogDetail, CommunicationLogFilter};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Repository keeping every log in a map keyed by id.
#[derive(Default)]
pub struct InMemoryCommunicationLogRepository {
    logs: RwLock<HashMap<i64, CommunicationLogDetail>>,
}

impl InMemoryCommunicationLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }

    /// Matching logs ordered by start processing time, then id.
    async fn matching(&self, filter: &CommunicationLogFilter) -> Vec<CommunicationLogDetail> {
        let logs = self.logs.read().await;
        let mut matching: Vec<_> = logs.values().filter(|d| filter.matches(d)).cloned().collect();
        matching.sort_by_key(|d| (d.base().start_processing_date_time, d.id()));
        matching
    }
}

#[async_trait]
impl CommunicationLogRepository for InMemoryCommunicationLogRepository {
    async fn save(&self, detail: CommunicationLogDetail) -> Result<(), RepositoryError> {
        let mut logs = self.logs.write().await;
        let id = detail.id();
        if logs.contains_key(&id) {
            return Err(RepositoryError::DuplicateId(id));
        }
        logs.insert(id, detail);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CommunicationLogDetail>, RepositoryError> {
        Ok(self.logs.read().await.get(&id).cloned())
    }

    async fn find_by_filter(
        &self,
        filter: &CommunicationLogFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CommunicationLogDetail>, RepositoryError> {
        Ok(self
            .matching(filter)
            .await
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count_by_filter(
        &self,
        filter: &CommunicationLogFilter,
    ) -> Result<usize, RepositoryError> {
        let logs = self.logs.read().await;
        Ok(logs.values().filter(|d| filter.matches(d)).count())
    }

    async fn find_children(
        &self,
        parent_id: i64,
    ) -> Result<Vec<CommunicationLogDetail>, RepositoryError> {
        let logs = self.logs.read().await;
        Ok(logs
            .values()
            .filter(|d| d.base().parent_communication_id == Some(parent_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use commlog_domain::{
        CommunicationKind, CommunicationLogBase, HostHttpCommunicationLogDetail, HttpDirection,
        HttpRequestLog,
    };

    fn host(id: i64, second: u32, direction: HttpDirection) -> CommunicationLogDetail {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, second).unwrap();
        HostHttpCommunicationLogDetail::new(
            CommunicationLogBase::new(id, start),
            direction,
            "ulisboa",
            HttpRequestLog::new("GET", "https://node.ulisboa.pt/api/forward"),
        )
        .into()
    }

    async fn repository() -> InMemoryCommunicationLogRepository {
        let repository = InMemoryCommunicationLogRepository::new();
        repository.save(host(3, 2, HttpDirection::Out)).await.unwrap();
        repository.save(host(1, 2, HttpDirection::In)).await.unwrap();
        repository.save(host(2, 1, HttpDirection::In)).await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repository = repository().await;
        assert_eq!(
            repository.save(host(1, 9, HttpDirection::Out)).await,
            Err(RepositoryError::DuplicateId(1))
        );
        assert_eq!(repository.len().await, 3);
    }

    #[tokio::test]
    async fn test_find_by_filter_orders_and_pages() {
        let repository = repository().await;
        let all = CommunicationLogFilter::match_all();
        let ids: Vec<i64> = repository
            .find_by_filter(&all, 0, 10)
            .await
            .unwrap()
            .iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let page = repository.find_by_filter(&all, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id(), 1);
    }

    #[tokio::test]
    async fn test_count_by_filter() {
        let repository = repository().await;
        let inbound = CommunicationLogFilter::of_kinds([CommunicationKind::HostIn]);
        assert_eq!(repository.count_by_filter(&inbound).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_keeps_direction() {
        let repository = repository().await;
        let found = repository.find_by_id(3).await.unwrap().unwrap();
        assert_eq!(found.kind(), CommunicationKind::HostOut);
        assert!(repository.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_children() {
        let repository = repository().await;
        let mut child = host(10, 5, HttpDirection::Out);
        child.base_mut().parent_communication_id = Some(1);
        repository.save(child).await.unwrap();

        let children = repository.find_children(1).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), 10);
        assert!(repository.find_children(2).await.unwrap().is_empty());
    }
}
