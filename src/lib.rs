mod actions;
pub mod carousel;
mod config;
mod driver;
mod error;
pub mod fixtures;
pub mod pages;
mod registry;
pub mod scenarios;
mod session;

pub use config::Settings;
pub use driver::{BrowserKind, DriverLauncher};
pub use error::{AutomationError, Result};
pub use registry::SessionRegistry;
pub use session::Session;
