use crate::adapters::inventory::load_inventory;
use crate::core::fanout::{build_sessions, run_queries};
use crate::core::query::build_query;
use crate::domain::model::{Credentials, SearchReport, Target};
use crate::domain::ports::FabricApi;
use crate::domain::search::SearchMode;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Drives one search: sessions for every target, then one query per session.
pub struct SearchEngine {
    api: Arc<dyn FabricApi>,
    credentials: Credentials,
}

impl SearchEngine {
    pub fn new(api: Arc<dyn FabricApi>, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// Loads the inventory at `inventory` and searches it. Timing includes the load.
    pub async fn search(&self, inventory: &Path, mode: SearchMode) -> SearchReport {
        let start = Instant::now();
        let targets = load_inventory(inventory);
        self.run_since(start, &targets, mode).await
    }

    pub async fn run(&self, targets: &[Target], mode: SearchMode) -> SearchReport {
        self.run_since(Instant::now(), targets, mode).await
    }

    async fn run_since(&self, start: Instant, targets: &[Target], mode: SearchMode) -> SearchReport {
        let sessions = build_sessions(Arc::clone(&self.api), targets, &self.credentials).await;

        let query = Arc::new(build_query(&mode));
        tracing::debug!("Query: {}", query);

        let results = run_queries(Arc::clone(&self.api), targets, &sessions, query).await;
        tracing::debug!("APIC Responses:");
        tracing::debug!("{:?}", results);

        let elapsed = start.elapsed();
        tracing::debug!("Time taken: {:.2} seconds.", elapsed.as_secs_f64());

        SearchReport {
            mode,
            results,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{QuerySpec, Session};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Accepts every login after a short delay and answers queries with an empty imdata.
    struct SlowApi;

    #[async_trait]
    impl FabricApi for SlowApi {
        async fn login(&self, target: &Target, _credentials: &Credentials) -> Result<Session> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(Session::new(format!("token-{}", target.name)))
        }

        async fn query(
            &self,
            _target: &Target,
            _session: &Session,
            _query: &QuerySpec,
        ) -> Result<serde_json::Value> {
            Ok(serde_json::json!({"imdata": []}))
        }
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(SlowApi), Credentials::new("u", "p"))
    }

    #[tokio::test]
    async fn test_search_loads_inventory_and_times_whole_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventory.yml");
        std::fs::write(
            &path,
            "- name: dc1\n  host: https://apic-1.example.com\n- name: dc2\n  host: https://apic-2.example.com\n",
        )
        .unwrap();

        let report = engine()
            .search(&path, SearchMode::Node { id: "101".to_string() })
            .await;

        assert_eq!(report.results.len(), 2);
        assert!(report.skipped_hosts().is_empty());
        assert!(report.elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_search_missing_inventory_reports_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let report = engine()
            .search(
                &temp_dir.path().join("missing.yml"),
                SearchMode::Node { id: "101".to_string() },
            )
            .await;

        assert!(report.results.is_empty());
        assert_eq!(report.mode.name(), "node");
    }
}
