use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
    }
}

/// Which document store backend to open at startup.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON file per collection under `data_dir`.
    #[default]
    File,
    /// Process-local, lost on restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            database_name: default_database_name(),
        }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_database_name() -> String { "home_services".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like `load_and_validate`, but a missing config file falls back to
    /// defaults overridden by environment variables.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_else(|_| Self::from_env());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Defaults plus `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 store（支持从环境变量覆盖目录与库名）
        self.store.normalize_from_env();
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StoreConfig {
    /// `DATA_DIR` and `DATABASE_NAME` take precedence over the file values.
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if let Ok(name) = std::env::var("DATABASE_NAME") {
            if !name.trim().is_empty() {
                self.database_name = name;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_name.trim().is_empty() {
            return Err(anyhow!("store.database_name is empty"));
        }
        if self.backend == StoreBackend::File && self.data_dir.trim().is_empty() {
            return Err(anyhow!("store.data_dir is required for the file backend; set it in config.toml or DATA_DIR"));
        }
        Ok(())
    }

    /// Human-readable location of the store, reported by the connectivity probe.
    pub fn location(&self) -> String {
        match self.backend {
            StoreBackend::File => format!("file://{}", self.data_dir),
            StoreBackend::Memory => "memory://".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() -> Result<()> {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [store]
            backend = "memory"
            database_name = "marketplace"
            "#,
        )?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.data_dir, "data");
        assert_eq!(cfg.store.database_name, "marketplace");
        assert_eq!(cfg.store.location(), "memory://");
        Ok(())
    }

    #[test]
    fn missing_sections_use_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.store.backend, StoreBackend::File);
        assert_eq!(cfg.store.location(), "file://data");
        Ok(())
    }

    #[test]
    fn zero_workers_normalize_to_default() -> Result<()> {
        let mut server = ServerConfig { host: " ".into(), port: 8080, worker_threads: Some(0) };
        server.normalize()?;
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut server = ServerConfig { host: "127.0.0.1".into(), port: 0, worker_threads: None };
        assert!(server.normalize().is_err());
    }

    #[test]
    fn file_backend_requires_data_dir() {
        let store = StoreConfig { backend: StoreBackend::File, data_dir: "  ".into(), database_name: "db".into() };
        assert!(store.validate().is_err());

        let memory = StoreConfig { backend: StoreBackend::Memory, data_dir: String::new(), database_name: "db".into() };
        assert!(memory.validate().is_ok());
    }
}
