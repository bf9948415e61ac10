use std::io::{BufRead, BufReader};
use std::time::Duration;

use spdlog::debug;
use thiserror::Error;
use ureq::Agent;

use crate::config::FetchConfig;

#[derive(Debug, Error)]
#[error("error while trying to get the content of page {url}: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: ureq::Error,
}

/// Opens pages as streams. Non-2xx answers are errors.
pub struct Fetcher {
    agent: Agent,
    user_agent: String,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let cfg = Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Fetcher {
            agent: Agent::new_with_config(cfg),
            user_agent: config.user_agent.clone(),
        }
    }

    /// The body is read lazily, whatever is not consumed is dropped with the reader.
    pub fn open(&self, url: &str) -> Result<impl BufRead, FetchError> {
        let response = self.agent.get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|source| FetchError {
                url: url.to_string(),
                source,
            })?;

        debug!("GET {} - status={}", url, response.status());
        Ok(BufReader::new(response.into_body().into_reader()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_a_fetch_error() {
        let fetcher = Fetcher::new(&FetchConfig::default());
        let err = fetcher.open("not a url").err().unwrap();
        assert_eq!(err.url, "not a url");
        assert!(err.to_string().starts_with("error while trying to get the content of page not a url: "));
    }
}
