use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_ZENQUOTES_BASE_URL: &str = "https://zenquotes.io/api";
pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const MAX_RANDOM_ATTEMPTS: usize = 50;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// `None` means the weather feed serves its fallback snapshot.
    pub openweather_api_key: Option<String>,
    pub upstream_timeout: Duration,
    pub default_city: String,
    pub recipe_random_attempts: usize,
    pub recipe_detail_lookup: bool,
    pub zenquotes_base_url: String,
    pub mealdb_base_url: String,
    pub openweather_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            openweather_api_key: None,
            upstream_timeout: Duration::from_secs(8),
            default_city: "New York".to_string(),
            recipe_random_attempts: 12,
            recipe_detail_lookup: true,
            zenquotes_base_url: DEFAULT_ZENQUOTES_BASE_URL.to_string(),
            mealdb_base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for anything unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Config::default();

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = get("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("Invalid UPSTREAM_TIMEOUT_SECS: {}", e)))?;
                if secs == 0 {
                    return Err(AppError::Config("UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string()));
                }
                Duration::from_secs(secs)
            }
            None => defaults.upstream_timeout,
        };

        let recipe_random_attempts = match get("RECIPE_RANDOM_ATTEMPTS") {
            Some(raw) => {
                let attempts = raw
                    .parse::<usize>()
                    .map_err(|e| AppError::Config(format!("Invalid RECIPE_RANDOM_ATTEMPTS: {}", e)))?;
                if !(1..=MAX_RANDOM_ATTEMPTS).contains(&attempts) {
                    return Err(AppError::Config(format!(
                        "RECIPE_RANDOM_ATTEMPTS must be between 1 and {}",
                        MAX_RANDOM_ATTEMPTS
                    )));
                }
                attempts
            }
            None => defaults.recipe_random_attempts,
        };

        let recipe_detail_lookup = match get("RECIPE_DETAIL_LOOKUP") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AppError::Config(format!("Invalid RECIPE_DETAIL_LOOKUP: {}", raw)))?,
            None => defaults.recipe_detail_lookup,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            upstream_timeout,
            default_city: get("DEFAULT_CITY").unwrap_or(defaults.default_city),
            recipe_random_attempts,
            recipe_detail_lookup,
            zenquotes_base_url: get("ZENQUOTES_BASE_URL").unwrap_or(defaults.zenquotes_base_url),
            mealdb_base_url: get("MEALDB_BASE_URL").unwrap_or(defaults.mealdb_base_url),
            openweather_base_url: get("OPENWEATHER_BASE_URL").unwrap_or(defaults.openweather_base_url),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
