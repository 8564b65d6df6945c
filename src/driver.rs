use std::{
    path::PathBuf,
    process::{Command, Stdio},
    sync::{Arc, Mutex},
    time::Duration,
};

use serde_json::json;
use tokio::{process::Child, time::sleep};
use tracing::{debug, info, warn};

use crate::error::{AutomationError, Result};

const SERVICE_READY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl BrowserKind {
    /// Case-insensitive lookup; anything unrecognized falls back to Chrome.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "chrome" | "chromium" => BrowserKind::Chrome,
            "firefox" | "gecko" => BrowserKind::Firefox,
            other => {
                warn!("unrecognized browser kind '{other}', defaulting to chrome");
                BrowserKind::Chrome
            }
        }
    }

    pub fn executable_name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => {
                if cfg!(windows) {
                    "chromedriver.exe"
                } else {
                    "chromedriver"
                }
            }
            BrowserKind::Firefox => {
                if cfg!(windows) {
                    "geckodriver.exe"
                } else {
                    "geckodriver"
                }
            }
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            BrowserKind::Chrome => 9515,
            BrowserKind::Firefox => 4444,
        }
    }

    pub fn browser_name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Firefox => "Firefox",
        }
    }

    /// W3C capabilities for a new session of this kind.
    pub fn capabilities(&self, headless: bool) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserKind::Firefox => {
                caps.insert("browserName".to_string(), json!("firefox"));
                if headless {
                    let mut firefox_options = serde_json::Map::new();
                    firefox_options.insert("args".to_string(), json!(["--headless"]));
                    caps.insert("moz:firefoxOptions".to_string(), json!(firefox_options));
                }
            }
            BrowserKind::Chrome => {
                caps.insert("browserName".to_string(), json!("chrome"));
                if headless {
                    let mut chrome_options = serde_json::Map::new();
                    chrome_options.insert(
                        "args".to_string(),
                        json!([
                            "--headless",
                            "--no-sandbox",
                            "--disable-dev-shm-usage",
                            "--disable-gpu"
                        ]),
                    );
                    caps.insert("goog:chromeOptions".to_string(), json!(chrome_options));
                }
            }
        }

        caps
    }
}

/// Starts driver executables on demand and keeps handles to the
/// processes it spawned so they can be torn down at exit.
#[derive(Clone, Default)]
pub struct DriverLauncher {
    spawned: Arc<Mutex<Vec<Child>>>,
}

impl DriverLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the endpoint of a running driver service for `kind`,
    /// spawning one on its default port if nothing is serving it yet.
    pub async fn ensure_running(&self, kind: BrowserKind) -> Result<String> {
        let port = kind.default_port();
        let endpoint = format!("http://localhost:{port}");

        if service_running(port).await {
            debug!(
                "{} already serving port {port}",
                kind.executable_name()
            );
            return Ok(endpoint);
        }

        let driver_path = find_executable(kind).ok_or_else(|| {
            AutomationError::Session(format!(
                "{} not found; install it or set WEBDRIVER_ENDPOINT to a running service",
                kind.executable_name()
            ))
        })?;

        info!(
            "starting {} from {driver_path:?} on port {port}",
            kind.executable_name()
        );

        let mut command = tokio::process::Command::new(&driver_path);
        match kind {
            BrowserKind::Chrome => {
                command
                    .arg(format!("--port={port}"))
                    .arg("--whitelisted-ips=127.0.0.1");
            }
            BrowserKind::Firefox => {
                command
                    .arg("--port")
                    .arg(port.to_string())
                    .arg("--host")
                    .arg("127.0.0.1");
            }
        }

        let child = command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                AutomationError::Session(format!(
                    "failed to start {}: {e}",
                    kind.executable_name()
                ))
            })?;

        {
            let mut spawned = self.spawned.lock().unwrap();
            spawned.push(child);
        }

        wait_until_ready(&endpoint, SERVICE_READY_TIMEOUT).await?;
        Ok(endpoint)
    }

    /// Kills every driver process this launcher spawned. Safe to call twice.
    pub async fn shutdown(&self) {
        let children = {
            let mut spawned = self.spawned.lock().unwrap();
            std::mem::take(&mut *spawned)
        };

        for mut child in children {
            if let Err(e) = child.kill().await {
                warn!("failed to kill driver process: {e}");
            }
        }
    }
}

fn find_executable(kind: BrowserKind) -> Option<PathBuf> {
    let exe_name = kind.executable_name();

    let which_cmd = if cfg!(windows) { "where" } else { "which" };
    if let Ok(output) = Command::new(which_cmd).arg(exe_name).output() {
        if output.status.success() {
            let output_str = String::from_utf8_lossy(&output.stdout);
            if let Some(first_path) = output_str.lines().next().map(str::trim) {
                if !first_path.is_empty() {
                    return Some(PathBuf::from(first_path));
                }
            }
        }
    }

    let common_paths = if cfg!(target_os = "macos") {
        vec![
            PathBuf::from("/usr/local/bin").join(exe_name),
            PathBuf::from("/opt/homebrew/bin").join(exe_name),
        ]
    } else if cfg!(windows) {
        vec![PathBuf::from("C:\\WebDrivers").join(exe_name)]
    } else {
        vec![
            PathBuf::from("/usr/bin").join(exe_name),
            PathBuf::from("/usr/local/bin").join(exe_name),
            PathBuf::from("/snap/bin").join(exe_name),
        ]
    };

    common_paths.into_iter().find(|path| path.exists())
}

async fn service_running(port: u16) -> bool {
    let status_endpoint = format!("http://localhost:{port}/status");

    match reqwest::Client::new()
        .get(&status_endpoint)
        .timeout(Duration::from_secs(2))
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

async fn wait_until_ready(endpoint: &str, timeout: Duration) -> Result<()> {
    let status_endpoint = format!("{endpoint}/status");
    let client = reqwest::Client::new();
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        match client
            .get(&status_endpoint)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!("webdriver service ready at {endpoint}");
                return Ok(());
            }
            _ => {
                debug!("waiting for webdriver service...");
                sleep(Duration::from_millis(250)).await;
            }
        }
    }

    Err(AutomationError::Session(format!(
        "webdriver service at {endpoint} did not become ready within {timeout:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BrowserKind::parse("chrome"), BrowserKind::Chrome);
        assert_eq!(BrowserKind::parse("CHROME"), BrowserKind::Chrome);
        assert_eq!(BrowserKind::parse("Chromium"), BrowserKind::Chrome);
        assert_eq!(BrowserKind::parse("firefox"), BrowserKind::Firefox);
        assert_eq!(BrowserKind::parse("FireFox"), BrowserKind::Firefox);
        assert_eq!(BrowserKind::parse("gecko"), BrowserKind::Firefox);
    }

    #[test]
    fn parse_defaults_to_chrome_for_unknown_names() {
        assert_eq!(BrowserKind::parse("safari"), BrowserKind::Chrome);
        assert_eq!(BrowserKind::parse(""), BrowserKind::Chrome);
    }

    #[test]
    fn capabilities_carry_headless_options() {
        let caps = BrowserKind::Chrome.capabilities(true);
        assert_eq!(caps["browserName"], "chrome");
        assert!(caps.contains_key("goog:chromeOptions"));

        let caps = BrowserKind::Firefox.capabilities(true);
        assert_eq!(caps["browserName"], "firefox");
        assert!(caps.contains_key("moz:firefoxOptions"));

        let caps = BrowserKind::Firefox.capabilities(false);
        assert!(!caps.contains_key("moz:firefoxOptions"));
    }
}
