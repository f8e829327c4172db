use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// base URL of the API service the renderer fetches from
    pub api_url: String,
    pub output_path: String,
    pub table_rows: usize,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://defi.db";
pub const DEFAULT_TABLE_ROWS: usize = 10;

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv().ok();

        let log_level = env_var_or_default("LOG_LEVEL", "info".to_string())?;
        if log_level.parse::<Level>().is_err() {
            Self::print_config_help();
            return Err(anyhow::anyhow!("配置 LOG_LEVEL 解析失败: {}", log_level));
        }

        Ok(Config {
            database: DatabaseConfig {
                url: env_var_or_default("DATABASE_URL", DEFAULT_DATABASE_URL.to_string())?,
            },
            server: ServerConfig {
                host: env_var_or_default("SERVER_HOST", "0.0.0.0".to_string())?,
                port: env_var_or_default("SERVER_PORT", 3000)?,
            },
            dashboard: DashboardConfig {
                api_url: env_var_or_default(
                    "DASHBOARD_API_URL",
                    "http://127.0.0.1:3000".to_string(),
                )?,
                output_path: env_var_or_default("DASHBOARD_OUTPUT", "dashboard.html".to_string())?,
                table_rows: env_var_or_default("DASHBOARD_TABLE_ROWS", DEFAULT_TABLE_ROWS)?,
            },
            log_level,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn print_config_help() {
        println!("\n🔧 配置指南");
        println!("{}", "=".repeat(50));
        println!("所有配置项均可选，可写入 .env 文件:\n");

        println!("[存储]");
        println!("DATABASE_URL={}\n", DEFAULT_DATABASE_URL);

        println!("[API服务]");
        println!("SERVER_HOST=0.0.0.0");
        println!("SERVER_PORT=3000\n");

        println!("[仪表盘渲染]");
        println!("DASHBOARD_API_URL=http://127.0.0.1:3000");
        println!("DASHBOARD_OUTPUT=dashboard.html");
        println!("DASHBOARD_TABLE_ROWS={}\n", DEFAULT_TABLE_ROWS);

        println!("[日志]");
        println!("LOG_LEVEL=info  (trace, debug, info, warn, error)\n");

        println!("{}", "=".repeat(50));
    }
}

fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val.parse().map_err(|e| anyhow::anyhow!("配置 {} 解析失败: {}", key, e)),
        Err(_) => Ok(default),
    }
}

pub fn required_env_var(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("缺少必需配置: {}", key))
}
