mod api;
mod deserializer;
mod signature;
mod transport;

use secrecy::Secret;

pub use api::{AccessToken, Reply, Status, Ticket, UserInfo, WebAccessToken};
pub use signature::{compute_signature, JsApiConfig};
pub use transport::Transport;

use crate::config::Config;
use crate::error::Result;

pub(crate) static API_HOST: &str = "https://api.weixin.qq.com";
pub(crate) static OPEN_HOST: &str = "https://open.weixin.qq.com";

/// Silent authorization, yields only the openid.
pub const SCOPE_BASE: &str = "snsapi_base";
/// Prompts the user and allows `fetch_user_info`.
pub const SCOPE_USERINFO: &str = "snsapi_userinfo";

/// Client for a single WeChat application.
///
/// Credentials are fixed at construction, so a client can be shared across
/// threads behind an `Arc`.
#[derive(Debug)]
pub struct Client<T = reqwest::blocking::Client> {
    app_id: String,
    app_secret: Secret<String>,
    api_host: String,
    open_host: String,
    transport: T,
}

fn default_transport() -> Result<reqwest::blocking::Client> {
    // no request timeout, the caller decides how long to wait
    Ok(reqwest::blocking::Client::builder()
        .timeout(None::<std::time::Duration>)
        .build()?)
}

impl Client {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Result<Self> {
        Ok(Self::with_transport(app_id, app_secret, default_transport()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: Secret::new(app_secret.into()),
            api_host: API_HOST.to_string(),
            open_host: OPEN_HOST.to_string(),
            transport,
        }
    }

    /// Points the client at other hosts, e.g. a forwarding proxy.
    pub fn with_hosts(mut self, api_host: impl Into<String>, open_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self.open_host = open_host.into();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl TryFrom<Config> for Client {
    type Error = crate::Error;

    fn try_from(item: Config) -> Result<Self> {
        Ok(Self {
            app_id: item.app_id,
            app_secret: item.app_secret,
            api_host: item.api_host,
            open_host: item.open_host,
            transport: default_transport()?,
        })
    }
}
