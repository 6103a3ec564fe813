use secrecy::Secret;
use serde::Deserialize;

use crate::client::{API_HOST, OPEN_HOST};
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app_id: String,
    pub app_secret: Secret<String>,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_open_host")]
    pub open_host: String,
}

fn default_api_host() -> String {
    API_HOST.to_string()
}

fn default_open_host() -> String {
    OPEN_HOST.to_string()
}

impl Config {
    /// Reads `file_name`, then lets `WEIXIN_*` environment variables override it.
    pub fn from_file(file_name: &str) -> Result<Self> {
        let conf = config::Config::builder()
            .add_source(config::File::with_name(file_name))
            .add_source(config::Environment::with_prefix("WEIXIN"))
            .build()?;
        Ok(conf.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use secrecy::ExposeSecret;

    #[test]
    fn de_config_with_default_hosts() {
        let conf: Config =
            serde_json::from_str("{\"app_id\":\"wx123\",\"app_secret\":\"s3cr3t\"}").unwrap();

        assert_eq!(conf.app_id, "wx123");
        assert_eq!(conf.app_secret.expose_secret(), "s3cr3t");
        assert_eq!(conf.api_host, "https://api.weixin.qq.com");
        assert_eq!(conf.open_host, "https://open.weixin.qq.com");
    }

    #[test]
    fn debug_hides_secret() {
        let conf: Config =
            serde_json::from_str("{\"app_id\":\"wx123\",\"app_secret\":\"s3cr3t\"}").unwrap();

        assert!(!format!("{:?}", conf).contains("s3cr3t"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Config::from_file("does/not/exist.toml").unwrap_err();

        assert!(matches!(err, crate::Error::Config(_)));
    }
}
