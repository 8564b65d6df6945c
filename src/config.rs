use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use url::Url;

use crate::error::{AutomationError, Result};

/// The key=value properties store holding the application URL and
/// credentials, plus environment overrides for the WebDriver plumbing.
#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Loads the store from disk. The suite cannot run without it, so a
    /// missing or unreadable file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path)?;

        let mut values = BTreeMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            AutomationError::Generic(anyhow::anyhow!(
                "missing configuration key `{key}` in {}",
                self.path.display()
            ))
        })
    }

    /// Updates a key and persists the whole store back to its file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());

        let mut contents = String::new();
        for (k, v) in &self.values {
            contents.push_str(k);
            contents.push('=');
            contents.push_str(v);
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        let raw = self.require("main.url")?;
        Url::parse(raw).map_err(|e| {
            AutomationError::Generic(anyhow::anyhow!("invalid main.url `{raw}`: {e}"))
        })
    }

    pub fn email(&self) -> Result<&str> {
        self.require("email")
    }

    pub fn password(&self) -> Result<&str> {
        self.require("password")
    }

    /// Explicit endpoint of an already-running WebDriver service. When
    /// unset, a driver is auto-started on the kind's default port.
    pub fn webdriver_endpoint(&self) -> Option<String> {
        env::var("WEBDRIVER_ENDPOINT").ok()
    }

    pub fn headless(&self) -> bool {
        env::var("WEBDRIVER_HEADLESS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn store_with(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.properties");
        let mut file = fs::File::create(&path).expect("create store");
        file.write_all(contents.as_bytes()).expect("write store");
        (dir, path)
    }

    #[test]
    fn parses_keys_and_skips_comments() {
        let (_dir, path) = store_with(
            "# application under test\nmain.url=https://app.example.com\nemail = qa@example.com\n\npassword=secret\n",
        );
        let settings = Settings::load(&path).expect("load");

        assert_eq!(settings.get("main.url"), Some("https://app.example.com"));
        assert_eq!(settings.email().expect("email"), "qa@example.com");
        assert_eq!(settings.password().expect("password"), "secret");
        assert_eq!(
            settings.base_url().expect("url").as_str(),
            "https://app.example.com/"
        );
    }

    #[test]
    fn missing_key_error_names_the_key() {
        let (_dir, path) = store_with("main.url=https://app.example.com\n");
        let settings = Settings::load(&path).expect("load");

        let err = settings.require("email").expect_err("should be missing");
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn set_persists_back_to_the_same_store() {
        let (_dir, path) = store_with("main.url=https://app.example.com\n");
        let mut settings = Settings::load(&path).expect("load");

        settings.set("email", "updated@example.com").expect("set");

        let reloaded = Settings::load(&path).expect("reload");
        assert_eq!(reloaded.get("email"), Some("updated@example.com"));
        assert_eq!(reloaded.get("main.url"), Some("https://app.example.com"));
    }

    #[test]
    fn missing_store_is_an_error() {
        assert!(Settings::load("/nonexistent/config.properties").is_err());
    }
}
