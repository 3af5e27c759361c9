use clap::{Args, Parser, ValueEnum};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    #[command(flatten)]
    pub health: HealthConfig,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Full database connection URL. Takes precedence over the discrete connection settings below.
    #[arg(long = "database-url", env = "USER_ADMIN_DATABASE_URL")]
    pub url: Option<String>,

    /// Database host
    #[arg(id = "db_host", long = "db-host", env = "USER_ADMIN_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(id = "db_port", long = "db-port", env = "USER_ADMIN_DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Database name
    #[arg(long = "db-name", env = "USER_ADMIN_DB_NAME", default_value = "user_management")]
    pub name: String,

    /// Database user
    #[arg(long = "db-user", env = "USER_ADMIN_DB_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(long = "db-password", env = "USER_ADMIN_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "USER_ADMIN_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "USER_ADMIN_DB_MIN_CONNECTIONS", default_value_t = 0)]
    pub min_connections: u32,

    /// How long a request waits for a free connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "USER_ADMIN_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// How long an idle connection is kept before being closed
    #[arg(long = "db-idle-timeout-secs", env = "USER_ADMIN_DB_IDLE_TIMEOUT_SECS", default_value_t = 300)]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Builds the Postgres connect options, preferring `url` when it is set.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if `url` is present but cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "USER_ADMIN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the admin pages
    #[arg(long, env = "USER_ADMIN_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Port for the health endpoints
    #[arg(long, env = "USER_ADMIN_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work after a shutdown signal
    #[arg(long, env = "USER_ADMIN_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "USER_ADMIN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for traces and metrics. Export is disabled when unset.
    #[arg(long, env = "USER_ADMIN_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness database check in milliseconds
    #[arg(long = "health-db-timeout-ms", env = "USER_ADMIN_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn server_and_database_hosts_are_separate() {
        let config =
            Config::try_parse_from(["user-admin", "--host", "127.0.0.1", "--port", "3000", "--db-port", "6543"]).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 6543);
    }

    #[test]
    fn defaults_apply_without_arguments() {
        let config = Config::try_parse_from(["user-admin"]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.mgmt_port, 9090);
        assert_eq!(config.database.name, "user_management");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.database.password.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "user-admin",
            "--port",
            "3000",
            "--db-host",
            "db.internal",
            "--db-password",
            "hunter2",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.password.as_deref(), Some("hunter2"));
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn url_takes_precedence_over_discrete_fields() {
        let config = Config::try_parse_from([
            "user-admin",
            "--database-url",
            "postgres://alice@db.example:6543/crm",
            "--db-host",
            "ignored.example",
        ])
        .unwrap();

        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.example");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("crm"));
        assert_eq!(options.get_username(), "alice");
    }

    #[test]
    fn discrete_fields_build_connect_options() {
        let config = Config::try_parse_from(["user-admin", "--db-host", "db.internal", "--db-user", "admin"]).unwrap();

        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_database(), Some("user_management"));
        assert_eq!(options.get_username(), "admin");
    }

    #[test]
    fn malformed_url_is_rejected() {
        let config = Config::try_parse_from(["user-admin", "--database-url", "not a url"]).unwrap();

        assert!(config.database.connect_options().is_err());
    }
}
