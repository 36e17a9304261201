use std::path::PathBuf;

use ontdek_core::platform::Platform;
use ontdek_core::ranking::RankBounds;

use crate::auth::jwt::JwtConfig;

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// `production` hides internal error details from responses.
    pub app_env: String,
    /// Root of the public images tree (default: `public/images`).
    pub images_dir: PathBuf,
    /// Maximum request body size, which bounds uploads.
    pub max_upload_bytes: usize,
    /// How out-of-range ranking requests are treated.
    pub ranking_bounds: RankBounds,
    /// Detected hosting platform.
    pub platform: Platform,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_ENV`              | `development`              |
    /// | `IMAGES_DIR`           | `public/images`            |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `RANKING_BOUNDS`       | `free`                     |
    ///
    /// The platform is detected from its marker variables (`VERCEL`,
    /// `NETLIFY`, `DYNO`, ...).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let images_dir =
            PathBuf::from(std::env::var("IMAGES_DIR").unwrap_or_else(|_| "public/images".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let ranking_bounds: RankBounds = std::env::var("RANKING_BOUNDS")
            .unwrap_or_else(|_| "free".into())
            .parse()
            .expect("RANKING_BOUNDS must be 'free' or 'clamp'");

        let platform = Platform::detect(|name| std::env::var(name).ok());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            images_dir,
            max_upload_bytes,
            ranking_bounds,
            platform,
            jwt,
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Uploads and file deletions need a writable filesystem.
    pub fn uploads_enabled(&self) -> bool {
        !self.platform.read_only_filesystem()
    }
}
