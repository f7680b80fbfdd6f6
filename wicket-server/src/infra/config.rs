use chrono::Duration;
use clap::Parser;

/// CLI arguments, with environment-variable fallbacks for container use.
#[derive(Parser, Debug, Clone)]
#[command(name = "wicket-server")]
#[command(about = "Session-based user-account service")]
pub struct ServeArgs {
    /// Server host
    #[arg(long, env = "SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Server-side pepper mixed into every password digest
    #[arg(long, env = "WICKET_PASSWORD_PEPPER")]
    pub password_pepper: String,

    /// Session handle lifetime in seconds
    #[arg(long, env = "WICKET_SESSION_TTL_SECS", default_value_t = 86_400)]
    pub session_ttl_secs: i64,

    /// Comma-separated list of allowed CORS origins
    #[arg(long, env = "WICKET_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub password_pepper: String,
    pub session_ttl: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            password_pepper: args.password_pepper,
            session_ttl: Duration::seconds(args.session_ttl_secs),
            cors_allowed_origins: args.cors_allowed_origins,
        }
    }
}
