pub mod client;
pub mod config;
pub mod error;

pub use client::{
    compute_signature, AccessToken, Client, JsApiConfig, Reply, Status, Ticket, Transport, UserInfo,
    WebAccessToken, SCOPE_BASE, SCOPE_USERINFO,
};
pub use error::{Error, Result};
