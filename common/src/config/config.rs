use config::{Config, ConfigError};
use serde::Deserialize;

/// 进程级配置，来自 TOML 文件 + `APP_` 前缀环境变量
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
    pub sys: Option<SysConfig>,
    pub session: Option<SessionConfig>,
}

impl AppConfig {
    /// 读取配置文件，环境变量覆盖同名项（如 `APP_SERVER__PORT=9000`）
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("APP").prefix_separator("_").separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize::<AppConfig>()
    }

    pub fn get_database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }
    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
    pub fn get_session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }
}

pub const MEMORY_URL: &str = "memory://";

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// `mongodb://...`，或 `memory://` 使用进程内存储
    pub url: String,
    pub db_name: String,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: MEMORY_URL.to_string(), db_name: "contact_book".to_string() }
    }
}
impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_URL)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    //全局日志级别
    pub log_level: String,
}
impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    //登录会话空闲过期（秒）
    pub ttl_secs: u64,
    pub max_sessions: u64,
    //删除链接签名密钥，未配置时启动时随机生成
    pub url_secret: Option<String>,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 7200, max_sessions: 10_000, url_secret: None }
    }
}
