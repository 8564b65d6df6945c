//! Live end-to-end journeys.
//!
//! These drive a real browser against the application configured in
//! config.properties, so they need a chromedriver (or geckodriver) on
//! the machine and reachable credentials.
//!
//! Run with: cargo test --test user_journeys -- --ignored

use careerhub_e2e::{BrowserKind, SessionRegistry, Settings, scenarios};

#[tokio::test]
#[ignore = "requires a running webdriver and the application under test"]
async fn jobs_and_messaging_journey() -> anyhow::Result<()> {
    let settings = Settings::load("config.properties")?;
    let registry = SessionRegistry::new();

    let session = registry.start(BrowserKind::Chrome, &settings).await?;
    let outcome = scenarios::jobs_and_messaging(&session, &settings).await;

    // Spawned drivers are reaped even when closing the session fails.
    let stopped = registry.stop().await;
    registry.shutdown_drivers().await;
    stopped?;

    outcome
}

#[tokio::test]
#[ignore = "requires a running webdriver and the application under test"]
async fn career_paths_journey() -> anyhow::Result<()> {
    let settings = Settings::load("config.properties")?;
    let registry = SessionRegistry::new();

    let session = registry.start(BrowserKind::Chrome, &settings).await?;
    let outcome = scenarios::career_paths(&session, &settings).await;

    let stopped = registry.stop().await;
    registry.shutdown_drivers().await;
    stopped?;

    outcome
}

#[tokio::test]
#[ignore = "requires a running webdriver and the application under test"]
async fn start_yields_session_of_requested_kind() -> anyhow::Result<()> {
    let settings = Settings::load("config.properties")?;
    let registry = SessionRegistry::new();

    let session = registry
        .start(BrowserKind::parse("CHROME"), &settings)
        .await?;
    assert_eq!(session.kind(), BrowserKind::Chrome);
    assert_eq!(registry.current().await?.kind(), BrowserKind::Chrome);

    // Teardown twice: the second stop must be a no-op.
    let first = registry.stop().await;
    let second = registry.stop().await;
    registry.shutdown_drivers().await;
    first?;
    second?;

    Ok(())
}
