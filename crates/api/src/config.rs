/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5058`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection URL (default: `sqlite://db/pantry.db`).
    pub database_url: String,
    /// Load the demo catalog into an empty database at startup (default: `true`).
    pub seed_demo_data: bool,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5058`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | `sqlite://db/pantry.db`    |
    /// | `SEED_DEMO_DATA`       | `true`                     |
    /// | `LOG_FORMAT`           | `pretty` (`json` to switch)|
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5058".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db/pantry.db".into());

        let seed_demo_data = std::env::var("SEED_DEMO_DATA")
            .map(|v| parse_flag(&v).expect("SEED_DEMO_DATA must be true or false"))
            .unwrap_or(true);

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            seed_demo_data,
            log_json,
        }
    }
}

/// Split a comma-separated value, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
