use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{ApodError, ApodResult};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/v1/apod/";
pub const DEFAULT_MAX_CHUNK_DAYS: u32 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "DATA/APOD_DATA/apod_data.json";
pub const DEFAULT_IMAGE_DIR: &str = "DATA/APOD_DATA/IMAGES";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub max_chunk_days: u32,
    pub output_path: PathBuf,
    pub image_dir: PathBuf,
    pub timeout: Duration,
    pub prefer_hd: bool,
    pub verify_images: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            max_chunk_days: DEFAULT_MAX_CHUNK_DAYS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            prefer_hd: false,
            verify_images: false,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ApodResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> ApodResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = get("APOD_API_URL").unwrap_or(defaults.api_url);
        url::Url::parse(&api_url).map_err(|_| ApodError::InvalidEnvVar {
            name: "APOD_API_URL".to_string(),
            value: api_url.clone(),
        })?;

        let max_chunk_days = match get("APOD_MAX_CHUNK_DAYS") {
            Some(v) => parse_number("APOD_MAX_CHUNK_DAYS", &v)?,
            None => defaults.max_chunk_days,
        };

        let timeout = match get("APOD_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("APOD_TIMEOUT_SECS", &v)?),
            None => defaults.timeout,
        };
        if timeout.is_zero() {
            return Err(ApodError::Config("APOD_TIMEOUT_SECS must be positive".to_string()));
        }

        let prefer_hd = match get("APOD_PREFER_HD") {
            Some(v) => parse_bool("APOD_PREFER_HD", &v)?,
            None => defaults.prefer_hd,
        };

        let verify_images = match get("APOD_VERIFY_IMAGES") {
            Some(v) => parse_bool("APOD_VERIFY_IMAGES", &v)?,
            None => defaults.verify_images,
        };

        Ok(Self {
            api_url,
            api_key: get("APOD_API_KEY"),
            max_chunk_days,
            output_path: get("APOD_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            image_dir: get("APOD_IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
            timeout,
            prefer_hd,
            verify_images,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> ApodResult<T> {
    value.trim().parse().map_err(|_| ApodError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(name: &str, value: &str) -> ApodResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ApodError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ApodResult<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.max_chunk_days, 30);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.image_dir, PathBuf::from(DEFAULT_IMAGE_DIR));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.prefer_hd);
        assert!(!config.verify_images);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("APOD_API_URL", "http://192.168.1.10:8000/v1/apod/"),
            ("APOD_API_KEY", "DEMO_KEY"),
            ("APOD_MAX_CHUNK_DAYS", "7"),
            ("APOD_OUTPUT_PATH", "out/apod.json"),
            ("APOD_IMAGE_DIR", "out/images"),
            ("APOD_TIMEOUT_SECS", "30"),
            ("APOD_PREFER_HD", "yes"),
            ("APOD_VERIFY_IMAGES", "1"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://192.168.1.10:8000/v1/apod/");
        assert_eq!(config.api_key.as_deref(), Some("DEMO_KEY"));
        assert_eq!(config.max_chunk_days, 7);
        assert_eq!(config.output_path, PathBuf::from("out/apod.json"));
        assert_eq!(config.image_dir, PathBuf::from("out/images"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.prefer_hd);
        assert!(config.verify_images);
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = config_from(&[("APOD_API_KEY", "  ")]).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_number() {
        let err = config_from(&[("APOD_MAX_CHUNK_DAYS", "a month")]).unwrap_err();
        assert!(matches!(err, ApodError::InvalidEnvVar { ref name, .. } if name == "APOD_MAX_CHUNK_DAYS"));
    }

    #[test]
    fn test_invalid_bool() {
        let err = config_from(&[("APOD_PREFER_HD", "maybe")]).unwrap_err();
        assert!(matches!(err, ApodError::InvalidEnvVar { .. }));
    }

    #[test]
    fn test_invalid_url() {
        let err = config_from(&[("APOD_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ApodError::InvalidEnvVar { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = config_from(&[("APOD_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ApodError::Config(_)));
    }
}
