use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.escuelajs.co/api/v1/products";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  /// Custom title for header (defaults to the endpoint host if not set)
  pub title: Option<String>,
  /// Rows per page on startup
  pub page_size: usize,
  /// Page sizes cycled through with +/-
  pub page_size_choices: Vec<usize>,
  /// Quiet period after the last search keystroke before filtering
  pub search_debounce_ms: u64,
  pub cache: CacheConfig,
  pub connectivity: ConnectivityConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api: ApiConfig::default(),
      title: None,
      page_size: 10,
      page_size_choices: vec![5, 10, 20, 50],
      search_debounce_ms: 300,
      cache: CacheConfig::default(),
      connectivity: ConnectivityConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: DEFAULT_ENDPOINT.to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  pub enabled: bool,
  /// Cached products older than this are not served
  pub max_age_secs: u64,
  /// SQLite file (defaults to $XDG_DATA_HOME/shopdash/cache.db)
  pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      max_age_secs: 300,
      path: None,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
  /// Seconds between reachability probes; 0 disables the monitor
  pub probe_interval_secs: u64,
}

impl Default for ConnectivityConfig {
  fn default() -> Self {
    Self {
      probe_interval_secs: 5,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./shopdash.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/shopdash/config.yaml
  ///
  /// Without a config file the built-in defaults are used. The result is
  /// not validated; call [`Config::validated`] once overrides are applied.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("shopdash.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("shopdash").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> Result<Self> {
    // An empty file deserializes to null
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))
  }

  /// Check invariants and normalise the page size choices.
  pub fn validated(mut self) -> Result<Self> {
    self.endpoint()?;

    if self.page_size == 0 {
      return Err(eyre!("page_size must be greater than zero"));
    }
    if self.page_size_choices.iter().any(|&c| c == 0) {
      return Err(eyre!("page_size_choices must all be greater than zero"));
    }

    if !self.page_size_choices.contains(&self.page_size) {
      self.page_size_choices.push(self.page_size);
    }
    self.page_size_choices.sort_unstable();
    self.page_size_choices.dedup();

    Ok(self)
  }

  /// The product endpoint as a parsed URL
  pub fn endpoint(&self) -> Result<Url> {
    let url = Url::parse(&self.api.url)
      .map_err(|e| eyre!("Invalid api.url '{}': {}", self.api.url, e))?;

    match url.scheme() {
      "http" | "https" => Ok(url),
      other => Err(eyre!("Unsupported api.url scheme '{}'", other)),
    }
  }

  pub fn search_debounce(&self) -> Duration {
    Duration::from_millis(self.search_debounce_ms)
  }

  pub fn cache_max_age(&self) -> chrono::Duration {
    chrono::Duration::seconds(self.cache.max_age_secs.min(i64::MAX as u64) as i64)
  }

  /// Probe interval, or `None` when probing is disabled
  pub fn probe_interval(&self) -> Option<Duration> {
    match self.connectivity.probe_interval_secs {
      0 => None,
      secs => Some(Duration::from_secs(secs)),
    }
  }
}

/// Directory for the cache database and log file.
pub fn data_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("shopdash"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default().validated().unwrap();
    assert_eq!(config.api.url, DEFAULT_ENDPOINT);
    assert_eq!(config.page_size, 10);
    assert_eq!(config.page_size_choices, vec![5, 10, 20, 50]);
    assert_eq!(config.search_debounce(), Duration::from_millis(300));
    assert_eq!(config.cache_max_age(), chrono::Duration::minutes(5));
    assert_eq!(config.probe_interval(), Some(Duration::from_secs(5)));
    assert!(config.cache.enabled);
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = Config::from_yaml("  \n").unwrap();
    assert_eq!(config.page_size, 10);
  }

  #[test]
  fn test_partial_yaml_keeps_other_defaults() {
    let yaml = r#"
api:
  url: http://localhost:8080/products
page_size: 25
cache:
  max_age_secs: 60
connectivity:
  probe_interval_secs: 0
"#;
    let config = Config::from_yaml(yaml).unwrap().validated().unwrap();

    assert_eq!(config.endpoint().unwrap().port(), Some(8080));
    assert_eq!(config.page_size, 25);
    assert_eq!(config.page_size_choices, vec![5, 10, 20, 25, 50]);
    assert_eq!(config.cache_max_age(), chrono::Duration::seconds(60));
    assert!(config.cache.enabled);
    assert_eq!(config.probe_interval(), None);
    assert_eq!(config.search_debounce_ms, 300);
  }

  #[test]
  fn test_zero_page_size_is_rejected() {
    let config = Config {
      page_size: 0,
      ..Config::default()
    };
    assert!(config.validated().is_err());

    let config = Config {
      page_size_choices: vec![10, 0],
      ..Config::default()
    };
    assert!(config.validated().is_err());
  }

  #[test]
  fn test_bad_endpoint_is_rejected() {
    let mut config = Config::default();
    config.api.url = "not a url".to_string();
    assert!(config.validated().is_err());

    let mut config = Config::default();
    config.api.url = "ftp://example.com/products".to_string();
    assert!(config.validated().is_err());
  }

  #[test]
  fn test_example_config_parses() {
    let config = Config::from_yaml(include_str!("../config.example.yaml"))
      .unwrap()
      .validated()
      .unwrap();
    assert_eq!(config.api.url, DEFAULT_ENDPOINT);
    assert_eq!(config.title, None);
  }

  #[test]
  fn test_missing_explicit_path_is_an_error() {
    let path = Path::new("/definitely/not/here/shopdash.yaml");
    assert!(Config::load(Some(path)).is_err());
  }

  #[test]
  fn test_load_from_explicit_path() {
    let dir = std::env::temp_dir().join(format!("shopdash-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.yaml");
    std::fs::write(&path, "title: Store\npage_size: 5\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.title.as_deref(), Some("Store"));
    assert_eq!(config.page_size, 5);

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_invalid_file_values_can_be_overridden() {
    let dir = std::env::temp_dir().join(format!("shopdash-override-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.yaml");
    std::fs::write(&path, "page_size: 0
api:
  url: not a url
").unwrap();

    let mut config = Config::load(Some(&path)).unwrap();
    assert!(config.clone().validated().is_err());

    config.page_size = 20;
    config.api.url = DEFAULT_ENDPOINT.to_string();
    let config = config.validated().unwrap();
    assert_eq!(config.page_size, 20);
    assert!(config.page_size_choices.contains(&20));

    let _ = std::fs::remove_dir_all(&dir);
  }
}
