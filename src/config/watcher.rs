//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RoutesConfig;

/// A watcher that monitors the routes file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RoutesConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutesConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Load the file now and send it if it is valid.
    pub fn reload_now(&self) -> bool {
        reload(&self.path, &self.update_tx)
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Routes file change detected, reloading...");
                        reload(&path, &tx);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Routes watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, tx: &mpsc::UnboundedSender<RoutesConfig>) -> bool {
    match load_config(path) {
        Ok(config) => tx.send(config).is_ok(),
        Err(e) => {
            tracing::error!(
                "Failed to reload routes: {}. Keeping current configuration.",
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "route-matcher-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reload_sends_valid_config() {
        let path = temp_file("valid", "[[routes]]\nid = \"home\"\nurl = \"/\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(watcher.reload_now());
        let config = rx.recv().await.unwrap();
        assert_eq!(config.routes[0].id, "home");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_reload_skips_invalid_config() {
        let path = temp_file("invalid", "[[routes]]\nid = \"empty\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(!watcher.reload_now());
        drop(watcher);
        assert!(rx.recv().await.is_none());

        std::fs::remove_file(&path).unwrap();
    }
}
