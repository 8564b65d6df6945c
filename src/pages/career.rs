use fantoccini::Locator;
use tracing::info;

use crate::{
    carousel::{self, Carousel},
    error::{AutomationError, Result},
    session::Session,
};

const NAV_MENU_ITEMS: &str = "//div[@class='navListEl']";
const CAREER_BUTTON: &str = "//button[text()='Career']";
const CAREER_BUTTON_ACTIVE: &str = "//button[text()='Career' and @aria-current='page']";
const USER_NAMES: &str =
    "//div[@class='ant-card job-card-item selected ']//div[@class='user-main']//span";
const NEXT_BUTTON: &str =
    "//div[@class='ant-card job-card-item selected ']//*[contains(@data-src,'cheveron-right')]";
const JOB_ROLES: &str = "//div[@class='ant-card-body']//div[@class='job-role']";
const MESSAGE_BUTTON: &str = "//button[text()='Message']";
const MESSAGE_TEXT_AREA: &str = "//div[@class='froala-editor']//div[@contenteditable='true']";
const SEND_BUTTON: &str = "//button[contains(@class,'msg-btn-send')]";
const GO_TO_INBOX_BUTTON: &str = "//button[text()='Go to Inbox']";
const LAST_MESSAGE: &str = "(//div[@class='collapse-overflow-content'])[last()]//p";
const INSPIRATION_SECTION: &str = "//p[contains(text(),'Inspiration for')]";
const OCCUPATION_LINKS: &str =
    "//div[@aria-label='Inspiration for ']//div[contains(@class,'careerCardV2Wrapper')]//a";
const RECOMMENDED_SECTION: &str =
    "//p[contains(text(),'Recommended Careers based on your')]";
const RECOMMENDED_CAREER_LINKS: &str = "//p[contains(text(),'Recommended Careers based on your')]/../../../../../..//div[@class='career-path-block career-container-row']//a";
const LOADER: &str = "//*[@class='loader-animation']";

fn user_name_at(index: usize) -> String {
    format!("({USER_NAMES})[{index}]")
}

fn job_role_at(index: usize) -> String {
    format!("({JOB_ROLES})[{index}]")
}

fn career_menu_option(item: &str) -> String {
    format!("//p[text()='{item}']")
}

fn occupation_link_named(name: &str) -> String {
    format!(
        "//div[@aria-label='Inspiration for ']//div[contains(@class,'careerCardV2Wrapper')]//a[text()='{name}']"
    )
}

/// The job-card widget: one selected card's user name at a time plus a
/// "next" chevron.
pub struct UserCarousel<'a> {
    session: &'a Session,
}

impl Carousel for UserCarousel<'_> {
    async fn total(&self) -> Result<usize> {
        Ok(self.session.count(Locator::XPath(USER_NAMES)).await)
    }

    async fn current_name(&self) -> Result<String> {
        self.session.text(Locator::XPath(USER_NAMES)).await
    }

    async fn has_next(&self) -> Result<bool> {
        Ok(self.session.is_present(Locator::XPath(NEXT_BUTTON)).await)
    }

    async fn advance(&self) -> Result<()> {
        self.session.click(Locator::XPath(NEXT_BUTTON)).await
    }

    async fn select_current(&self) -> Result<()> {
        self.session.click(Locator::XPath(USER_NAMES)).await
    }

    async fn name_at(&self, index: usize) -> Result<String> {
        let locator = user_name_at(index);
        self.session.text(Locator::XPath(&locator)).await
    }
}

/// Career area: navigation menu, job roles, user carousel, messaging
/// and career-path recommendations.
pub struct CareerPage<'a> {
    session: &'a Session,
}

impl<'a> CareerPage<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn nav_menu_items(&self) -> Result<Vec<String>> {
        self.session.texts_of_all(Locator::XPath(NAV_MENU_ITEMS)).await
    }

    pub async fn select_career_menu_item(&self, item: &str) -> Result<()> {
        self.session.hover(Locator::XPath(CAREER_BUTTON)).await?;
        let option = career_menu_option(item);
        self.session.click(Locator::XPath(&option)).await
    }

    pub async fn career_menu_selected(&self) -> bool {
        self.session
            .is_present(Locator::XPath(CAREER_BUTTON_ACTIVE))
            .await
    }

    pub async fn all_job_roles(&self) -> Result<Vec<String>> {
        self.session.texts_of_all(Locator::XPath(JOB_ROLES)).await
    }

    /// Clicks the job role with the given name, or reports every role
    /// that was on offer.
    pub async fn select_job_role(&self, name: &str) -> Result<()> {
        let available = self.all_job_roles().await?;

        match available.iter().position(|role| role == name) {
            Some(index) => {
                let locator = job_role_at(index + 1);
                self.session.click(Locator::XPath(&locator)).await
            }
            None => Err(AutomationError::RoleNotFound {
                name: name.to_string(),
                available,
            }),
        }
    }

    pub fn user_carousel(&self) -> UserCarousel<'a> {
        UserCarousel {
            session: self.session,
        }
    }

    /// Cycles the carousel until the named user is selected, then
    /// clicks them.
    pub async fn select_user(&self, name: &str) -> Result<()> {
        carousel::find_and_select(&self.user_carousel(), name).await
    }

    /// Every user name in the carousel, in on-screen order.
    pub async fn all_user_names(&self) -> Result<Vec<String>> {
        let names = carousel::collect_names(&self.user_carousel()).await?;
        info!("total users found: {} - {names:?}", names.len());
        Ok(names)
    }

    /// Logs one "role -- user, user" line per job role and returns the
    /// pairing.
    pub async fn user_roster(&self) -> Result<Vec<(String, Vec<String>)>> {
        let mut roster = Vec::new();

        for role in self.all_job_roles().await? {
            self.select_job_role(&role).await?;
            let users = carousel::collect_names(&self.user_carousel()).await?;
            info!("{role} -- {}", users.join(", "));
            roster.push((role, users));
        }

        Ok(roster)
    }

    pub async fn click_message_button(&self) -> Result<()> {
        self.session.click(Locator::XPath(MESSAGE_BUTTON)).await
    }

    pub async fn send_message(&self, text: &str) -> Result<()> {
        self.session
            .send_keys(Locator::XPath(MESSAGE_TEXT_AREA), text)
            .await?;
        self.session.click(Locator::XPath(SEND_BUTTON)).await
    }

    pub async fn click_go_to_inbox(&self) -> Result<()> {
        self.session.click(Locator::XPath(GO_TO_INBOX_BUTTON)).await
    }

    pub async fn last_message(&self) -> Result<String> {
        self.session.text(Locator::XPath(LAST_MESSAGE)).await
    }

    pub async fn verify_last_message(&self, expected: &str) -> Result<bool> {
        Ok(self.last_message().await? == expected)
    }

    pub async fn scroll_to_inspiration(&self) -> Result<()> {
        self.session
            .is_displayed(Locator::XPath(INSPIRATION_SECTION))
            .await?;
        self.session.scroll_into_view(INSPIRATION_SECTION).await
    }

    /// Clicks the first `n` occupation links in order, waiting out the
    /// loader and the subsequent page load before navigating back each
    /// time. Returns the clicked names in click order.
    pub async fn click_first_occupations(&self, n: usize) -> Result<Vec<String>> {
        let all = self
            .session
            .texts_of_all(Locator::XPath(OCCUPATION_LINKS))
            .await?;

        let mut clicked = Vec::new();
        for name in all.into_iter().take(n) {
            let locator = occupation_link_named(&name);
            self.session.click(Locator::XPath(&locator)).await?;
            self.session.wait_for_gone(Locator::XPath(LOADER)).await?;
            self.session.wait_for_page_ready().await?;
            self.session.back().await?;
            clicked.push(name);
        }

        info!("clicked occupations in order: {clicked:?}");
        Ok(clicked)
    }

    pub async fn scroll_to_recommended(&self) -> Result<()> {
        self.session
            .is_displayed(Locator::XPath(RECOMMENDED_SECTION))
            .await?;
        self.session.scroll_into_view(RECOMMENDED_SECTION).await
    }

    /// First `n` recommended career names. The carousel keeps some
    /// links hidden, so only the visible subset counts; an empty
    /// section yields an empty list.
    pub async fn first_recommended_careers(&self, n: usize) -> Result<Vec<String>> {
        let mut careers = self
            .session
            .texts_of_visible(Locator::XPath(RECOMMENDED_CAREER_LINKS))
            .await?;
        careers.truncate(n);

        info!("first {n} recommended careers: {careers:?}");
        Ok(careers)
    }
}
