use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub crm: CrmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Подключение к CRM (contacts API)
#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    pub base_url: String,
    /// Bearer token; may also come from `CRM_ACCESS_TOKEN`
    #[serde(default)]
    pub access_token: Option<String>,
    /// No explicit timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CrmConfig {
    /// Токен, если он задан и не пустой
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

pub const ENV_CRM_BASE_URL: &str = "CRM_BASE_URL";
pub const ENV_CRM_ACCESS_TOKEN: &str = "CRM_ACCESS_TOKEN";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[crm]
base_url = "https://api.intercom.io"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `CRM_BASE_URL` / `CRM_ACCESS_TOKEN` override the file in both cases.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Переопределение настроек CRM из переменных окружения
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_CRM_BASE_URL).filter(|v| !v.trim().is_empty()) {
        tracing::info!("CRM base URL taken from {}", ENV_CRM_BASE_URL);
        config.crm.base_url = base_url.trim().to_string();
    }
    if let Some(token) = lookup(ENV_CRM_ACCESS_TOKEN).filter(|v| !v.trim().is_empty()) {
        config.crm.access_token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.crm.base_url, "https://api.intercom.io");
        assert_eq!(config.crm.access_token(), None);
        assert_eq!(config.crm.timeout_secs, None);
    }

    #[test]
    fn test_server_section_is_optional() {
        let config = parse_config(
            r#"
[crm]
base_url = "http://localhost:9000"
access_token = "secret"
timeout_secs = 15
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.crm.access_token(), Some("secret"));
        assert_eq!(config.crm.timeout_secs, Some(15));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.crm.access_token = Some("   ".to_string());
        assert_eq!(config.crm.access_token(), None);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        apply_env_overrides(&mut config, |key| match key {
            ENV_CRM_BASE_URL => Some("http://crm.local ".to_string()),
            ENV_CRM_ACCESS_TOKEN => Some("tok".to_string()),
            _ => None,
        });
        assert_eq!(config.crm.base_url, "http://crm.local");
        assert_eq!(config.crm.access_token(), Some("tok"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.crm.base_url, "https://api.intercom.io");
        assert_eq!(config.crm.access_token(), None);
    }
}
