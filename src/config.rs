use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Served root directory; falls back to the process cwd at startup.
    #[serde(default)]
    pub root_dir: Option<String>,
    pub reuse_address: bool,
    pub index_files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            // `__` separates nested keys, e.g. SERVER_SERVER__PORT=8080
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            // Empty host means wildcard bind
            .set_default("server.host", "")?
            .set_default("server.port", 1989)?
            .set_default("server.reuse_address", true)?
            .set_default(
                "server.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let host = if self.server.host.is_empty() {
            "0.0.0.0"
        } else {
            &self.server.host
        };
        format!("{host}:{}", self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn root_dir(&self) -> std::io::Result<PathBuf> {
        match &self.server.root_dir {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => std::env::current_dir(),
        }
    }
}

/// Immutable per-process state shared with the request handler.
///
/// Set once at startup and read-only thereafter; torn down when the process
/// exits.
pub struct AppState {
    pub config: Config,
    /// Canonicalized served root. All resolved request paths must stay
    /// underneath it.
    pub root: PathBuf,
}

impl AppState {
    #[must_use]
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(host: &str, port: u16) -> Config {
        Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
                root_dir: None,
                reuse_address: true,
                index_files: vec!["index.html".to_string()],
            },
            logging: LoggingConfig { access_log: false },
        }
    }

    #[test]
    fn empty_host_is_wildcard_bind() {
        let addr = test_config("", 1989).socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:1989");
    }

    #[test]
    fn explicit_host_is_kept() {
        let addr = test_config("127.0.0.1", 8080).socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn missing_root_dir_falls_back_to_cwd() {
        let cfg = test_config("", 1989);
        assert_eq!(cfg.root_dir().unwrap(), std::env::current_dir().unwrap());
    }

    // Single test for load(): it reads the process environment, which is
    // global, so defaults and the env override are checked back to back
    #[test]
    fn load_defaults_and_env_override() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.server.port, 1989);
        assert_eq!(cfg.server.host, "");
        assert!(cfg.server.reuse_address);
        assert_eq!(
            cfg.server.index_files,
            vec!["index.html".to_string(), "index.htm".to_string()]
        );
        assert!(cfg.logging.access_log);

        std::env::set_var("SERVER_SERVER__PORT", "4321");
        let loaded = Config::load();
        std::env::remove_var("SERVER_SERVER__PORT");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.port, 4321);
        // Untouched keys keep their defaults
        assert!(cfg.server.reuse_address);
    }
}
