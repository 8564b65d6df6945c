//! End-to-end user journeys: ordered page-object calls with
//! assertions. Any timeout or failed assertion aborts the journey; no
//! step is retried beyond the interaction layer's own bounded waits.

use anyhow::ensure;
use chrono::Utc;
use tracing::info;

use crate::{
    config::Settings,
    pages::{CareerPage, LoginPage, reversed},
    session::Session,
};

const EXPECTED_NAV_MENU: [&str; 4] = ["Home", "Community", "Career", "Inbox"];

/// Shared opening: land on the app, sign in and verify the shell.
async fn sign_in(session: &Session, settings: &Settings) -> anyhow::Result<()> {
    let login = LoginPage::new(session, settings);

    login.open().await?;
    login.click_sign_in().await?;
    ensure!(
        login.welcome_header_displayed().await?,
        "welcome header not displayed"
    );
    login.log_in().await?;

    let career = CareerPage::new(session);
    let menu = career.nav_menu_items().await?;
    ensure!(
        menu == EXPECTED_NAV_MENU,
        "navigation menu items {menu:?} don't match {EXPECTED_NAV_MENU:?}"
    );

    Ok(())
}

/// Jobs & messaging journey: pick a job role, message through the
/// inbox, verify the message landed, then log the user roster.
pub async fn jobs_and_messaging(session: &Session, settings: &Settings) -> anyhow::Result<()> {
    sign_in(session, settings).await?;
    let career = CareerPage::new(session);

    career.select_career_menu_item("Jobs").await?;
    ensure!(career.career_menu_selected().await, "career menu is not selected");

    let roles = career.all_job_roles().await?;
    info!("available job roles: {roles:?}");
    career.select_job_role("Software Developer").await?;

    career.click_go_to_inbox().await?;
    let message = format!(
        "Hello! I'm interested in this Software Developer position. Time: {}",
        Utc::now().to_rfc3339()
    );
    career.send_message(&message).await?;
    ensure!(
        career.verify_last_message(&message).await?,
        "last message doesn't match the sent message"
    );

    session.back().await?;
    career.user_roster().await?;

    Ok(())
}

/// Career-paths journey: click the first three inspiration
/// occupations, then check the recommended careers mirror them in
/// reverse order.
pub async fn career_paths(session: &Session, settings: &Settings) -> anyhow::Result<()> {
    sign_in(session, settings).await?;
    let career = CareerPage::new(session);

    career.select_career_menu_item("Career Paths").await?;
    ensure!(career.career_menu_selected().await, "career menu is not selected");

    career.scroll_to_inspiration().await?;
    let clicked = career.click_first_occupations(3).await?;

    session.refresh().await?;
    career.scroll_to_recommended().await?;
    let recommended = career.first_recommended_careers(3).await?;

    let expected = reversed(&clicked);
    ensure!(
        recommended == expected,
        "recommended careers {recommended:?} should be the clicked occupations in reverse order {expected:?}"
    );

    Ok(())
}
