use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7860";
pub const DEFAULT_ENDPOINT: &str = "/predict";
pub const DEFAULT_FORM_ID: &str = "predictionForm";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    /// Defaults, then the rc file at `path` (if any), then the environment.
    pub fn load_from(path: &Path) -> Self {
        let mut map = default_map();

        if path.exists() {
            if let Ok(file) = fs::File::open(path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    if let Some((k, v)) = parse_line(&line) {
                        map.insert(k, v);
                    }
                }
            }
        }

        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path: path.to_path_buf() }
    }

    /// Configuration built from defaults and the given pairs only; the
    /// environment is not consulted. Used by embedders and tests.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = default_map();
        for (k, v) in pairs {
            map.insert(k.into(), v.into());
        }
        Self { inner: map, config_path: PathBuf::new() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    /// Command-line overrides land here and win over file and env values.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(false),
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" | "" => Ok(false),
                _ => Err(ConfigError::Invalid { key: key.to_string(), value: v }),
            },
        }
    }

    pub fn base_url(&self) -> Result<String, ConfigError> {
        let raw = self.get("PREDICT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid { key: "PREDICT_BASE_URL".into(), value: raw });
        }
        Ok(trimmed.to_string())
    }

    pub fn endpoint(&self) -> String {
        let raw = self.get("PREDICT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        let raw = raw.trim();
        if raw.starts_with('/') { raw.to_string() } else { format!("/{}", raw) }
    }

    pub fn endpoint_url(&self) -> Result<String, ConfigError> {
        Ok(format!("{}{}", self.base_url()?, self.endpoint()))
    }

    pub fn form_id(&self) -> String {
        self.get("PREDICT_FORM_ID").unwrap_or_else(|| DEFAULT_FORM_ID.into())
    }

    /// `None` means no timeout: a hung request waits indefinitely.
    pub fn request_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        let Some(v) = self.get("PREDICT_REQUEST_TIMEOUT") else { return Ok(None) };
        let secs = v
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { key: "PREDICT_REQUEST_TIMEOUT".into(), value: v.clone() })?;
        Ok((secs > 0).then(|| Duration::from_secs(secs)))
    }

    pub fn allow_concurrent_submissions(&self) -> Result<bool, ConfigError> {
        self.get_bool("PREDICT_ALLOW_CONCURRENT_SUBMISSIONS")
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    line.split_once('=').map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
}

/// Only `PREDICT_*` names are taken from the environment; bare names like
/// `REQUEST_TIMEOUT` belong to other tools.
fn is_config_key(k: &str) -> bool {
    k.starts_with("PREDICT_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("predict_form").join(".predictrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("PREDICT_BASE_URL".into(), DEFAULT_BASE_URL.into());
    m.insert("PREDICT_ENDPOINT".into(), DEFAULT_ENDPOINT.into());
    m.insert("PREDICT_FORM_ID".into(), DEFAULT_FORM_ID.into());
    m.insert("PREDICT_REQUEST_TIMEOUT".into(), "0".into());
    m.insert("PREDICT_ALLOW_CONCURRENT_SUBMISSIONS".into(), "false".into());
    m
}
