use log::{debug, error};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

use super::deserializer::int_from_val;
use super::{Client, Transport};
use crate::error::{Error, Result};

/// Reply of `cgi-bin/token`.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(deserialize_with = "int_from_val")]
    pub expires_in: i64,
    #[serde(deserialize_with = "int_from_val")]
    pub errcode: i64,
    pub errmsg: String,
}

/// Reply of the `sns/oauth2` code exchange and refresh endpoints.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WebAccessToken {
    pub access_token: String,
    #[serde(deserialize_with = "int_from_val")]
    pub expires_in: i64,
    pub refresh_token: String,
    pub openid: String,
    pub scope: String,
    pub unionid: String,
    #[serde(deserialize_with = "int_from_val")]
    pub errcode: i64,
    pub errmsg: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UserInfo {
    pub openid: String,
    pub nickname: String,
    /// 1 male, 2 female, 0 unknown
    #[serde(deserialize_with = "int_from_val")]
    pub sex: i64,
    pub province: String,
    pub city: String,
    pub country: String,
    pub headimgurl: String,
    pub privilege: Vec<String>,
    pub unionid: String,
    #[serde(deserialize_with = "int_from_val")]
    pub errcode: i64,
    pub errmsg: String,
}

/// JS-SDK ticket from `cgi-bin/ticket/getticket`.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Ticket {
    pub ticket: String,
    #[serde(deserialize_with = "int_from_val")]
    pub expires_in: i64,
    #[serde(deserialize_with = "int_from_val")]
    pub errcode: i64,
    pub errmsg: String,
}

/// Bare `errcode`/`errmsg` reply, as returned by `sns/auth`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Status {
    #[serde(deserialize_with = "int_from_val")]
    pub errcode: i64,
    pub errmsg: String,
}

/// The `errcode`/`errmsg` envelope every reply carries.
pub trait Reply {
    fn errcode(&self) -> i64;
    fn errmsg(&self) -> &str;

    /// `false` when the platform answered with a non-zero `errcode`.
    fn is_ok(&self) -> bool {
        self.errcode() == 0
    }
}

macro_rules! impl_reply {
    ($($t:ty),*) => {
        $(
            impl Reply for $t {
                fn errcode(&self) -> i64 {
                    self.errcode
                }

                fn errmsg(&self) -> &str {
                    &self.errmsg
                }
            }
        )*
    };
}

impl_reply!(AccessToken, WebAccessToken, UserInfo, Ticket, Status);

static REDACTED: &str = "[REDACTED]";

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &REDACTED)
            .field("expires_in", &self.expires_in)
            .field("errcode", &self.errcode)
            .field("errmsg", &self.errmsg)
            .finish()
    }
}

impl fmt::Debug for WebAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebAccessToken")
            .field("access_token", &REDACTED)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &REDACTED)
            .field("openid", &self.openid)
            .field("scope", &self.scope)
            .field("unionid", &self.unionid)
            .field("errcode", &self.errcode)
            .field("errmsg", &self.errmsg)
            .finish()
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("ticket", &REDACTED)
            .field("expires_in", &self.expires_in)
            .field("errcode", &self.errcode)
            .field("errmsg", &self.errmsg)
            .finish()
    }
}

/// Drops the query string, which carries the secret and tokens.
pub(super) fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl<T: Transport> Client<T> {
    /// Builds the URL the user is redirected to for OAuth consent.
    ///
    /// Only `redirect_uri` is percent-encoded; `scope` and `state` are
    /// inserted as given.
    pub fn build_authorization_url(&self, redirect_uri: &str, scope: &str, state: &str) -> String {
        format!(
            "{}/connect/oauth2/authorize?appid={}&redirect_uri={}&response_type=code&scope={}&state={}#wechat_redirect",
            self.open_host,
            self.app_id,
            urlencoding::encode(redirect_uri),
            scope,
            state,
        )
    }

    /// Application-level token for server APIs.
    pub fn fetch_access_token(&self) -> Result<AccessToken> {
        self.get(&format!(
            "{}/cgi-bin/token?grant_type=client_credential&appid={}&secret={}",
            self.api_host,
            self.app_id,
            self.app_secret.expose_secret(),
        ))
    }

    /// Exchanges an authorization `code` for a user-scoped token.
    pub fn fetch_web_access_token(&self, code: &str) -> Result<WebAccessToken> {
        self.get(&format!(
            "{}/sns/oauth2/access_token?appid={}&secret={}&code={}&grant_type=authorization_code",
            self.api_host,
            self.app_id,
            self.app_secret.expose_secret(),
            code,
        ))
    }

    /// Trades a `refresh_token` for a new user-scoped token.
    pub fn refresh_web_access_token(&self, refresh_token: &str) -> Result<WebAccessToken> {
        self.get(&format!(
            "{}/sns/oauth2/refresh_token?appid={}&grant_type=refresh_token&refresh_token={}",
            self.api_host, self.app_id, refresh_token,
        ))
    }

    /// Asks the platform whether a user-scoped token is still valid.
    pub fn check_web_access_token(&self, access_token: &str, openid: &str) -> Result<Status> {
        self.get(&format!(
            "{}/sns/auth?access_token={}&openid={}",
            self.api_host, access_token, openid,
        ))
    }

    /// Profile of `openid`; needs a token granted with `SCOPE_USERINFO`.
    pub fn fetch_user_info(&self, access_token: &str, openid: &str) -> Result<UserInfo> {
        self.get(&format!(
            "{}/sns/userinfo?access_token={}&openid={}&lang=zh_CN",
            self.api_host, access_token, openid,
        ))
    }

    /// JS-SDK ticket used by `compute_signature`.
    pub fn fetch_ticket(&self, access_token: &str) -> Result<Ticket> {
        self.get(&format!(
            "{}/cgi-bin/ticket/getticket?access_token={}&type=jsapi",
            self.api_host, access_token,
        ))
    }

    fn get<D>(&self, url: &str) -> Result<D>
    where
        D: DeserializeOwned + Reply,
    {
        let path = strip_query(url);
        debug!("GET {}", path);

        let body = self.transport.fetch(url).map_err(|e| {
            error!("{} => {}", path, e);
            e
        })?;

        self.response_body(path, body)
    }

    fn response_body<D>(&self, path: &str, body: String) -> Result<D>
    where
        D: DeserializeOwned + Reply,
    {
        match serde_json::from_str::<D>(body.as_str()) {
            Ok(d) => {
                debug!("{} => errcode {} errmsg {:?}", path, d.errcode(), d.errmsg());
                Ok(d)
            }
            Err(source) => {
                // the body may hold tokens, keep it out of the log
                error!("{} => reason => {} ({} bytes)", path, source, body.len());
                Err(Error::Decode { source, body })
            }
        }
    }
}
