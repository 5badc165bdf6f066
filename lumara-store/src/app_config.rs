use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub stripe: StripeConfig,
    pub planner: PlannerConfig,
    /// Out-of-band admin provisioning, applied once at startup. Leaving it
    /// unset means no admin is seeded; there is no in-band escalation path.
    #[serde(default)]
    pub seed_admin: Option<SeedAdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    #[serde(default = "default_stripe_base")]
    pub api_base: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_stripe_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    pub api_key: String,
    #[serde(default = "default_planner_base")]
    pub api_base: String,
    #[serde(default = "default_planner_model")]
    pub model: String,
}

fn default_planner_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_planner_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedAdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub full_name: String,
}

fn default_admin_name() -> String {
    "Lumara Admin".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Environment overrides, e.g. LUMARA_DATABASE__URL
            .add_source(config::Environment::with_prefix("LUMARA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
