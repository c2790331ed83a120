use crate::config::EnvSnapshot;
use crate::core::prefetch::DataSource;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "flowdose")]
#[command(about = "Stand-in commerce API used until the Medusa backend is reachable")]
pub struct ServerArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Overrides PORT from the environment
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    /// Store API to read `/admin/products` from; stub data when omitted
    #[arg(long)]
    pub storefront_url: Option<String>,
}

impl ServerArgs {
    pub fn bind_address(&self, env_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(env_port))
    }

    /// Only an explicit `--storefront-url` goes live. BACKEND_URL usually
    /// points at this server, which would then query itself.
    pub fn data_source(&self, env: &EnvSnapshot) -> DataSource {
        match &self.storefront_url {
            Some(url) => DataSource::Live {
                base_url: url.clone(),
                publishable_key: env.publishable_key.clone(),
            },
            None => DataSource::Stub,
        }
    }
}
