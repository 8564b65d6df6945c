use fantoccini::{Client, ClientBuilder};
use url::Url;

use crate::{driver::BrowserKind, error::Result};

/// One live browser connection. Cloning shares the underlying
/// handle; the session itself is owned by exactly one scenario.
#[derive(Clone)]
pub struct Session {
    client: Client,
    kind: BrowserKind,
}

impl Session {
    pub async fn connect(kind: BrowserKind, endpoint: &str, headless: bool) -> Result<Self> {
        let client = ClientBuilder::native()
            .capabilities(kind.capabilities(headless))
            .connect(endpoint)
            .await?;

        Ok(Self { client, kind })
    }

    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    pub async fn current_url(&self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }

    pub async fn back(&self) -> Result<()> {
        self.client.back().await?;
        Ok(())
    }

    pub async fn refresh(&self) -> Result<()> {
        self.client.refresh().await?;
        Ok(())
    }

    pub async fn maximize(&self) -> Result<()> {
        self.client.maximize_window().await?;
        Ok(())
    }

    pub async fn execute(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Ends the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
