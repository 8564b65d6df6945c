use fantoccini::Locator;

use crate::{config::Settings, error::Result, session::Session};

const SIGN_IN_BUTTON: &str = "//button[text()='Sign In']";
const WELCOME_HEADER: &str = "//h1[text()='Welcome Back!']";
const LOGIN_BUTTON: &str = "//span[text()='Login']";

/// Landing page and login form.
pub struct LoginPage<'a> {
    session: &'a Session,
    settings: &'a Settings,
}

impl<'a> LoginPage<'a> {
    pub fn new(session: &'a Session, settings: &'a Settings) -> Self {
        Self { session, settings }
    }

    /// Navigates to the configured application URL and waits for the
    /// page to finish loading.
    pub async fn open(&self) -> Result<()> {
        let url = self.settings.base_url()?;
        self.session.goto(url.as_str()).await?;
        self.session.wait_for_page_ready().await
    }

    pub async fn click_sign_in(&self) -> Result<()> {
        self.session.click(Locator::XPath(SIGN_IN_BUTTON)).await?;
        self.session.wait_for_page_ready().await
    }

    pub async fn welcome_header_displayed(&self) -> Result<bool> {
        self.session.is_displayed(Locator::XPath(WELCOME_HEADER)).await
    }

    pub async fn enter_email(&self, email: &str) -> Result<()> {
        self.session.send_keys(Locator::Id("email"), email).await
    }

    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.session.send_keys(Locator::Id("password"), password).await
    }

    /// The login button sits under an overlay, so the click is injected.
    pub async fn click_login(&self) -> Result<()> {
        self.session.js_click(LOGIN_BUTTON).await?;
        self.session.wait_for_page_ready().await
    }

    /// Full login with the credentials from the properties store.
    pub async fn log_in(&self) -> Result<()> {
        self.enter_email(self.settings.email()?).await?;
        self.enter_password(self.settings.password()?).await?;
        self.click_login().await
    }
}
