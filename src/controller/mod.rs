use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::datasets::Snapshot;
use crate::error::{AppError, DataError, Result};
use crate::models::{ReportId, ReportResult};
use crate::services::{DataSources, LoaderService, ReportParams, run_catalog, run_report};

/// Owns the live snapshot and the loader that produces it.
///
/// Readers clone the `Arc<Snapshot>` and drop the lock before running any
/// report, so a reload never blocks on report computation.
pub struct Controller {
    config: Arc<Config>,
    sources: DataSources,
    loader: Arc<LoaderService>,
    snapshot: RwLock<Arc<Snapshot>>,
    // held across load and swap so reloads apply in the order they read
    reload_lock: Mutex<()>,
}

/// What a reload did to the live snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReloadOutcome {
    Unchanged { fingerprint: String },
    Replaced { previous: String, current: String },
}

impl Controller {
    /// Load the initial snapshot. Any loader error aborts startup.
    pub fn start(config: Config) -> std::result::Result<Self, DataError> {
        let sources = DataSources::from_config(&config);
        let loader = Arc::new(LoaderService::new());
        let snapshot = loader.load(&sources)?;

        tracing::info!(
            "Snapshot {} ready: {} providers, {} receivers, {} listings, {} claims",
            snapshot.fingerprint,
            snapshot.providers.len(),
            snapshot.receivers.len(),
            snapshot.listings.len(),
            snapshot.claims.len()
        );

        Ok(Self {
            config: Arc::new(config),
            sources,
            loader,
            snapshot: RwLock::new(snapshot),
            reload_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Re-read the sources and swap the snapshot if their content changed
    pub async fn reload(&self) -> Result<ReloadOutcome> {
        let _reloading = self.reload_lock.lock().await;

        let loader = self.loader.clone();
        let sources = self.sources.clone();
        let fresh = tokio::task::spawn_blocking(move || loader.load(&sources))
            .await
            .map_err(|e| AppError::Internal(format!("Reload task failed: {}", e)))??;

        let mut current = self.snapshot.write().await;
        if Arc::ptr_eq(&current, &fresh) {
            tracing::info!("Reload found no changes ({})", fresh.fingerprint);
            return Ok(ReloadOutcome::Unchanged {
                fingerprint: fresh.fingerprint.clone(),
            });
        }

        let previous = std::mem::replace(&mut *current, fresh.clone());
        tracing::info!(
            "Snapshot replaced: {} -> {}",
            previous.fingerprint,
            fresh.fingerprint
        );

        Ok(ReloadOutcome::Replaced {
            previous: previous.fingerprint.clone(),
            current: fresh.fingerprint.clone(),
        })
    }

    pub async fn run_report(&self, id: ReportId, params: &ReportParams) -> ReportResult {
        let snapshot = self.snapshot().await;
        run_report(id, &snapshot, params)
    }

    pub async fn run_catalog(&self, params: &ReportParams) -> Vec<ReportResult> {
        let snapshot = self.snapshot().await;
        run_catalog(&snapshot, params)
    }

    /// Values the city selector offers
    pub async fn cities(&self) -> Vec<String> {
        self.snapshot().await.cities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{fixture_config, write_fixture_dir};
    use std::fs;

    #[test]
    fn test_start_fails_on_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = Controller::start(fixture_config(dir.path())).err().unwrap();
        assert!(matches!(err, DataError::DataSource { .. }));
        assert_eq!(err.source_name(), "providers");
    }

    #[tokio::test]
    async fn test_reload_is_a_noop_without_changes() {
        let dir = write_fixture_dir();
        let controller = Controller::start(fixture_config(dir.path())).unwrap();
        let before = controller.snapshot().await;

        let outcome = controller.reload().await.unwrap();
        assert_eq!(
            outcome,
            ReloadOutcome::Unchanged {
                fingerprint: before.fingerprint.clone()
            }
        );
        assert!(Arc::ptr_eq(&before, &controller.snapshot().await));
    }

    #[tokio::test]
    async fn test_concurrent_reloads_keep_the_newest_snapshot() {
        let dir = write_fixture_dir();
        let controller = Controller::start(fixture_config(dir.path())).unwrap();
        let before = controller.snapshot().await;

        let claims = dir.path().join("claims_data.csv");
        let mut content = fs::read_to_string(&claims).unwrap();
        content.push_str("6,1,2,Completed,3/10/2025 8:00\n");
        fs::write(&claims, content).unwrap();

        let (first, second) = tokio::join!(controller.reload(), controller.reload());
        let mut outcomes = vec![first.unwrap(), second.unwrap()];
        outcomes.sort_by_key(|o| matches!(o, ReloadOutcome::Unchanged { .. }));

        let after = controller.snapshot().await;
        assert_eq!(
            outcomes[0],
            ReloadOutcome::Replaced {
                previous: before.fingerprint.clone(),
                current: after.fingerprint.clone(),
            }
        );
        assert_eq!(
            outcomes[1],
            ReloadOutcome::Unchanged {
                fingerprint: after.fingerprint.clone()
            }
        );
        assert_eq!(after.claims.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_old_snapshot() {
        let dir = write_fixture_dir();
        let controller = Controller::start(fixture_config(dir.path())).unwrap();
        let before = controller.snapshot().await;

        fs::write(dir.path().join("claims_data.csv"), "Claim_ID,Food_ID\n1,1\n").unwrap();
        let err = controller.reload().await.err().unwrap();
        assert!(matches!(err, AppError::Data(DataError::Schema { .. })));
        assert!(Arc::ptr_eq(&before, &controller.snapshot().await));
    }

    #[tokio::test]
    async fn test_reports_follow_the_live_snapshot() {
        let dir = write_fixture_dir();
        let controller = Controller::start(fixture_config(dir.path())).unwrap();

        let result = controller
            .run_report(ReportId::TotalQuantity, &ReportParams::default())
            .await;
        assert_eq!(result.as_scalar().unwrap().value, 1515.0);
        assert_eq!(controller.cities().await, vec!["Shelbyville", "Springfield"]);
        assert_eq!(controller.run_catalog(&ReportParams::default()).await.len(), 13);
    }
}
