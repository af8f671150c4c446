//! HTTP transport seam. The pipeline only needs "GET this URL with these query
//! parameters"; the reqwest implementation lives here, fakes live in tests.

use crate::errors::AppResult;
use std::time::Duration;

/// Status code and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `Send` so the context can move into the scheduler's blocking pool.
pub trait Transport: Send {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> AppResult<HttpResponse>;
}

/// Blocking reqwest client with an explicit per-request timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("fuellog/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&'static str, String)]) -> AppResult<HttpResponse> {
        let resp = self.client.get(url).query(query).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_is_success() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let teapot = HttpResponse {
            status: 418,
            ..ok.clone()
        };
        let moved = HttpResponse {
            status: 301,
            ..ok.clone()
        };

        assert!(ok.is_success());
        assert!(!teapot.is_success());
        assert!(!moved.is_success());
    }
}
