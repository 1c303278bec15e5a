//! config/app_config.rs
//! Configuración del servicio, leída de variables de entorno (o .env).

use std::env;
use std::path::PathBuf;

/// URL por defecto del gateway de WhatsApp (Evolution API).
pub const DEFAULT_GATEWAY_URL: &str = "https://api.evolution-api.com";

/// sqlx loguea cada query en info.
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

/// Directivas del logger: `RUST_LOG` si viene con algo, si no el default.
/// Se lee aparte de `AppConfig` porque el logger se instala antes.
pub fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub gateway_base_url: String,
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            database_path: PathBuf::from("data").join("campaigns.db"),
            gateway_base_url: DEFAULT_GATEWAY_URL.to_string(),
            workers: 1,
        }
    }
}

impl AppConfig {
    /// Construye la configuración a partir del entorno. Las variables
    /// ausentes o inválidas caen en el valor por defecto.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("APP_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("APP_PORT inválido ({}), usando {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        let workers = lookup("HTTP_WORKERS")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(defaults.workers);

        AppConfig {
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            gateway_base_url: lookup("EVOLUTION_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.gateway_base_url),
            workers,
        }
    }

    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path.to_string_lossy())
    }
}
