use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory collections seeded with demo data.
    Mock,
    /// Remote record store reached with a project id + public key.
    Remote,
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    pub store_backend: StoreBackend,
    pub project_id: Option<String>,
    pub public_key: Option<String>,
    pub seed_demo_data: bool,

    /// Default window for the rolling attendance trend report.
    pub trend_days: u32,

    // Rate limiting
    pub rate_api_per_min: u32,
    pub rate_clock_per_min: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "mock".to_string())
            .to_lowercase()
            .as_str()
        {
            "mock" => StoreBackend::Mock,
            "remote" => StoreBackend::Remote,
            other => anyhow::bail!("unknown STORE_BACKEND '{}', expected mock|remote", other),
        };

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            store_backend,
            project_id: env::var("PROJECT_ID").ok(),
            public_key: env::var("PUBLIC_KEY").ok(),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),

            trend_days: env::var("TREND_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,

            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            rate_clock_per_min: env::var("RATE_CLOCK_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
        })
    }
}
