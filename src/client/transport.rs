use log::warn;

use crate::error::Result;

/// Performs a blocking GET and returns the whole response body.
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl Transport for reqwest::blocking::Client {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = reqwest::blocking::Client::get(self, url).send()?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} => {:?}", super::api::strip_query(url), status);
        }

        // consumes the response, releasing its connection
        Ok(response.text()?)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::Transport;
    use crate::error::{Error, Result};

    /// Answers every request with a canned body, or refuses to connect.
    #[derive(Debug, Default)]
    pub(crate) struct MockTransport {
        body: Option<String>,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub(crate) fn replying(body: &str) -> Self {
            Self {
                body: Some(body.to_string()),
                ..Default::default()
            }
        }

        pub(crate) fn unreachable() -> Self {
            Self::default()
        }

        pub(crate) fn last_url(&self) -> Option<String> {
            self.requested.lock().unwrap().last().cloned()
        }
    }

    impl Transport for MockTransport {
        fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            match &self.body {
                Some(body) => Ok(body.clone()),
                None => Err(Error::Transport("connection refused".into())),
            }
        }
    }
}
