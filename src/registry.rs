use std::{
    collections::HashMap,
    sync::Arc,
    thread::{self, ThreadId},
};

use futures::lock::Mutex;
use tracing::{info, warn};

use crate::{
    config::Settings,
    driver::{BrowserKind, DriverLauncher},
    error::{AutomationError, Result},
    session::Session,
};

/// Holds at most one live session per calling thread, so scenarios
/// running under a multi-threaded harness never share a browser.
/// The registry is an explicit value owned by the harness, not a
/// process-wide global.
///
/// Keying is by OS thread id, which suits `#[tokio::test]` and other
/// block_on-style callers where one scenario owns its thread. A task
/// spawned onto a multi-threaded runtime can migrate threads between
/// awaits, so `start` and `stop` may key differently there and `stop`
/// degrades to a no-op; give each scenario its own thread or
/// current-thread runtime instead of running it as a spawned task.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<ThreadId, Session>>>,
    launcher: DriverLauncher,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session of the requested kind, maximizes its viewport
    /// and registers it for the calling thread. A session already
    /// registered for this thread is closed and replaced.
    pub async fn start(&self, kind: BrowserKind, settings: &Settings) -> Result<Session> {
        let endpoint = match settings.webdriver_endpoint() {
            Some(endpoint) => endpoint,
            None => self.launcher.ensure_running(kind).await?,
        };

        let session = Session::connect(kind, &endpoint, settings.headless()).await?;
        session.maximize().await?;
        info!("started {} session at {endpoint}", kind.browser_name());

        let replaced = {
            let mut sessions = self.sessions.lock().await;
            sessions.insert(thread::current().id(), session.clone())
        };
        if let Some(previous) = replaced {
            warn!("replacing a live session on this thread");
            if let Err(e) = previous.close().await {
                warn!("failed to close replaced session: {e}");
            }
        }

        Ok(session)
    }

    /// The calling thread's session.
    pub async fn current(&self) -> Result<Session> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&thread::current().id())
            .cloned()
            .ok_or(AutomationError::NotInitialized)
    }

    /// Closes and forgets the calling thread's session. A no-op when
    /// none exists, so teardown can run unconditionally.
    pub async fn stop(&self) -> Result<()> {
        let removed = {
            let mut sessions = self.sessions.lock().await;
            sessions.remove(&thread::current().id())
        };

        match removed {
            Some(session) => session.close().await,
            None => Ok(()),
        }
    }

    /// Tears down any driver processes the registry had to spawn.
    pub async fn shutdown_drivers(&self) {
        self.launcher.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_without_start_is_not_initialized() {
        let registry = SessionRegistry::new();
        match registry.current().await {
            Err(AutomationError::NotInitialized) => {}
            Err(other) => panic!("expected NotInitialized, got {other}"),
            Ok(_) => panic!("expected NotInitialized, got a session"),
        }
    }

    #[tokio::test]
    async fn stop_without_session_is_a_no_op() {
        let registry = SessionRegistry::new();
        registry.stop().await.expect("first stop");
        registry.stop().await.expect("second stop");
    }
}
