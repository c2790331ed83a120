pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ServerArgs;

pub use app::server::{app as stand_in_app, AppState};
pub use config::commerce::{assemble, CommerceConfig};
pub use config::EnvSnapshot;
pub use utils::error::{GlueError, Result};
