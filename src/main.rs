use anyhow::Result;
use careerhub_e2e::{BrowserKind, SessionRegistry, Settings, scenarios};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "careerhub-e2e")]
#[command(about = "End-to-end journeys for the CareerHub web application")]
#[command(version)]
struct Cli {
    /// Browser to run against (unrecognized values fall back to chrome)
    #[arg(short, long, default_value = "chrome")]
    browser: String,

    /// Properties store with main.url, email and password
    #[arg(short, long, default_value = "config.properties")]
    config: std::path::PathBuf,

    /// Journey to run; omit to run all of them
    #[arg(short, long)]
    scenario: Option<Journey>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Journey {
    /// Job role selection and inbox messaging
    JobsMessaging,
    /// Career-path inspiration and recommendations
    CareerPaths,
}

impl Journey {
    fn name(&self) -> &'static str {
        match self {
            Journey::JobsMessaging => "jobs-messaging",
            Journey::CareerPaths => "career-paths",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let settings = Settings::load(&cli.config)?;
    let kind = BrowserKind::parse(&cli.browser);
    let registry = SessionRegistry::new();

    let journeys = match cli.scenario {
        Some(journey) => vec![journey],
        None => vec![Journey::JobsMessaging, Journey::CareerPaths],
    };

    let mut outcome = Ok(());
    for journey in journeys {
        tracing::info!("running {} on {}", journey.name(), kind.browser_name());

        // Each journey gets a fresh browser session.
        let session = registry.start(kind, &settings).await?;
        let result = match journey {
            Journey::JobsMessaging => scenarios::jobs_and_messaging(&session, &settings).await,
            Journey::CareerPaths => scenarios::career_paths(&session, &settings).await,
        };
        if let Err(e) = registry.stop().await {
            tracing::warn!("failed to close session: {e}");
        }

        match result {
            Ok(()) => tracing::info!("{} passed", journey.name()),
            Err(e) => {
                tracing::error!("{} failed: {e:#}", journey.name());
                outcome = Err(e);
                break;
            }
        }
    }

    registry.shutdown_drivers().await;
    outcome
}
