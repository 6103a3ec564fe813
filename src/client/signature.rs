use chrono::Utc;
use hex::encode;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use uuid::Uuid;

use super::{Client, Transport};

/// Parameters passed to the front-end `wx.config` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JsApiConfig {
    pub app_id: String,
    pub timestamp: i64,
    pub nonce_str: String,
    pub signature: String,
}

/// JS-SDK signature: SHA-1 over the canonical parameter string, lowercase hex.
///
/// `url` must be the page URL without its fragment, exactly as the browser
/// sees it; it is not escaped here.
pub fn compute_signature(ticket: &str, nonce: &str, timestamp: i64, url: &str) -> String {
    let plain = format!(
        "jsapi_ticket={}&noncestr={}&timestamp={}&url={}",
        ticket, nonce, timestamp, url
    );
    encode(Sha1::digest(plain.as_bytes()))
}

impl<T: Transport> Client<T> {
    pub fn compute_signature(&self, ticket: &str, nonce: &str, timestamp: i64, url: &str) -> String {
        compute_signature(ticket, nonce, timestamp, url)
    }

    /// Signs `url` with a fresh nonce and the current time.
    pub fn jsapi_config(&self, ticket: &str, url: &str) -> JsApiConfig {
        let nonce = Uuid::new_v4().simple().to_string();
        self.jsapi_config_with(ticket, &nonce, Utc::now().timestamp(), url)
    }

    pub fn jsapi_config_with(
        &self,
        ticket: &str,
        nonce: &str,
        timestamp: i64,
        url: &str,
    ) -> JsApiConfig {
        JsApiConfig {
            app_id: self.app_id.clone(),
            timestamp,
            nonce_str: nonce.to_string(),
            signature: compute_signature(ticket, nonce, timestamp, url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::transport::mock::MockTransport;
    use super::*;

    // sample values from the JS-SDK documentation
    const TICKET: &str =
        "sM4AOVdWfPE4DxkXGEs8VMCPGGVi4C3VM0P37wVUCFvkVAy_90u5h9nbSlYy3-Sl-HhTdfl2fzFy1AOcHKP7qg";
    const NONCE: &str = "Wm3WZYTPz0wzccnW";
    const TIMESTAMP: i64 = 1414587457;
    const URL: &str = "http://mp.weixin.qq.com?params=value";

    #[test]
    fn signature_matches_documented_sample() {
        assert_eq!(
            compute_signature(TICKET, NONCE, TIMESTAMP, URL),
            "0f9de62fce790f9a083d5c99e95740ceb90c27ed"
        );
    }

    #[test]
    fn signature_is_deterministic_lowercase_hex() {
        let inputs = [
            ("", "", 0, ""),
            ("ticket", "nonce", -1, "https://example.com/a?b=c"),
            ("票", "随机", i64::MAX, "https://例子.测试/"),
        ];
        for (ticket, nonce, timestamp, url) in inputs {
            let s1 = compute_signature(ticket, nonce, timestamp, url);
            let s2 = compute_signature(ticket, nonce, timestamp, url);

            assert_eq!(s1, s2);
            assert_eq!(s1.len(), 40);
            assert!(s1.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn signature_depends_on_every_field() {
        let base = compute_signature(TICKET, NONCE, TIMESTAMP, URL);

        assert_ne!(base, compute_signature("other", NONCE, TIMESTAMP, URL));
        assert_ne!(base, compute_signature(TICKET, "other", TIMESTAMP, URL));
        assert_ne!(base, compute_signature(TICKET, NONCE, TIMESTAMP + 1, URL));
        assert_ne!(base, compute_signature(TICKET, NONCE, TIMESTAMP, "http://other"));
    }

    #[test]
    fn jsapi_config_serializes_camel_case() {
        let client = Client::with_transport("wx123", "s3cr3t", MockTransport::unreachable());
        let conf = client.jsapi_config_with(TICKET, NONCE, TIMESTAMP, URL);
        let json = serde_json::to_value(&conf).unwrap();

        assert_eq!(json["appId"], "wx123");
        assert_eq!(json["timestamp"], TIMESTAMP);
        assert_eq!(json["nonceStr"], NONCE);
        assert_eq!(json["signature"], "0f9de62fce790f9a083d5c99e95740ceb90c27ed");
    }

    #[test]
    fn jsapi_config_fresh_nonce() {
        let client = Client::with_transport("wx123", "s3cr3t", MockTransport::unreachable());
        let c1 = client.jsapi_config(TICKET, URL);
        let c2 = client.jsapi_config(TICKET, URL);

        assert_ne!(c1.nonce_str, c2.nonce_str);
        assert_eq!(c1.nonce_str.len(), 32);
        assert_eq!(
            c1.signature,
            compute_signature(TICKET, &c1.nonce_str, c1.timestamp, URL)
        );
        assert!(client.transport.last_url().is_none());
    }
}
