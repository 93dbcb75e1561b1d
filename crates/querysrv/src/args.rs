use std::path::PathBuf;

use clap::Parser;
use llm::client::{LlmConfig, OPENAI_API_ROOT};
use mysqlexec::config::StoreConfig;

#[derive(Parser, Debug)]
#[clap(name = "nlquery")]
pub struct Arguments {
    /// Address to bind the HTTP server to.
    #[clap(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5050")]
    pub listen_addr: String,

    /// Path to the schema description handed to the model.
    #[clap(long, env = "SCHEMA_PATH", default_value = "schema.sql")]
    pub schema_file: PathBuf,

    /// API key for the completions backend.
    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model identifier used for translation.
    #[clap(long, env = "LLM_MODEL", default_value = "gpt-4")]
    pub model: String,

    /// Root URL of the completions API.
    #[clap(long, env = "LLM_API_ROOT", default_value = OPENAI_API_ROOT)]
    pub api_root: String,

    /// Completion token budget for generated SQL.
    #[clap(long, env = "LLM_MAX_TOKENS", default_value_t = 1024)]
    pub max_tokens: u32,

    /// Database host.
    #[clap(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port.
    #[clap(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// Database user.
    #[clap(long, env = "DB_USER", default_value = "espocrm")]
    pub db_user: String,

    /// Database password; empty means passwordless auth.
    #[clap(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name.
    #[clap(long, env = "DB_NAME", default_value = "espocrm")]
    pub db_name: String,

    /// Increase log verbosity; may be repeated.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Arguments {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: (!self.db_password.is_empty()).then(|| self.db_password.clone()),
            database: self.db_name.clone(),
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_root: self.api_root.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
