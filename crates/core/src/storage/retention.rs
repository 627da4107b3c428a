//! Background removal of expired converted artifacts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::layout::StorageLayout;
use crate::config::RetentionConfig;
use crate::metrics::ARTIFACTS_EXPIRED;

/// Periodically sweeps the converted directory.
pub struct RetentionSweeper {
    storage: StorageLayout,
    max_age: Duration,
    interval: Duration,

    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RetentionSweeper {
    pub fn new(storage: StorageLayout, config: &RetentionConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            storage,
            max_age: Duration::from_secs(config.max_age_secs),
            interval: Duration::from_secs(config.sweep_interval_secs),
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Runs one sweep immediately. Returns the number of files removed.
    pub async fn sweep_once(&self) -> usize {
        Self::sweep(&self.storage, self.max_age).await
    }

    /// Spawns the sweep loop. The first sweep happens one interval after start.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Retention sweeper already running");
            return;
        }

        let storage = self.storage.clone();
        let max_age = self.max_age;
        let interval = self.interval;
        let running = Arc::clone(&self.running);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            info!(
                max_age_secs = max_age.as_secs(),
                interval_secs = interval.as_secs(),
                "Retention sweeper started"
            );
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(interval) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        Self::sweep(&storage, max_age).await;
                    }
                }
            }
            info!("Retention sweeper stopped");
        });

        *self.handle.lock().await = Some(handle);
    }

    /// Signals the loop to stop and waits for it to finish.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Retention sweeper task failed");
            }
        }
    }

    async fn sweep(storage: &StorageLayout, max_age: Duration) -> usize {
        match storage.sweep_expired(max_age).await {
            Ok(0) => {
                debug!("Retention sweep found nothing to remove");
                0
            }
            Ok(removed) => {
                ARTIFACTS_EXPIRED.inc_by(removed as u64);
                info!(removed, "Removed expired converted files");
                removed
            }
            Err(e) => {
                warn!(error = %e, "Retention sweep failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use tempfile::TempDir;

    fn layout(dir: &TempDir) -> StorageLayout {
        StorageLayout::new(&StorageConfig {
            upload_dir: dir.path().join("uploads"),
            converted_dir: dir.path().join("converted"),
        })
    }

    fn retention(max_age_secs: u64, sweep_interval_secs: u64) -> RetentionConfig {
        RetentionConfig {
            enabled: true,
            max_age_secs,
            sweep_interval_secs,
        }
    }

    #[tokio::test]
    async fn test_sweep_once_removes_expired_files() {
        let dir = TempDir::new().unwrap();
        let storage = layout(&dir);
        storage.ensure_dirs().await.unwrap();
        std::fs::write(storage.converted_path("old_converted.mp3"), b"x").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // max_age of zero expires anything older than "now"
        let sweeper = RetentionSweeper::new(storage.clone(), &retention(0, 600));
        assert_eq!(sweeper.sweep_once().await, 1);
        assert!(!storage.converted_path("old_converted.mp3").exists());
    }

    #[tokio::test]
    async fn test_sweep_once_keeps_fresh_files() {
        let dir = TempDir::new().unwrap();
        let storage = layout(&dir);
        storage.ensure_dirs().await.unwrap();
        std::fs::write(storage.converted_path("new_converted.mp3"), b"x").unwrap();

        let sweeper = RetentionSweeper::new(storage.clone(), &retention(3600, 600));
        assert_eq!(sweeper.sweep_once().await, 0);
        assert!(storage.converted_path("new_converted.mp3").exists());
    }

    #[tokio::test]
    async fn test_sweep_with_missing_directory_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let sweeper = RetentionSweeper::new(layout(&dir), &retention(0, 600));
        assert_eq!(sweeper.sweep_once().await, 0);
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let dir = TempDir::new().unwrap();
        let sweeper = RetentionSweeper::new(layout(&dir), &retention(86400, 3600));

        sweeper.start().await;
        assert!(sweeper.is_running());

        tokio::time::timeout(Duration::from_secs(5), sweeper.stop())
            .await
            .expect("sweeper stops promptly");
        assert!(!sweeper.is_running());
    }
}
