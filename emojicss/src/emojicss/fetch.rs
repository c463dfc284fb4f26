use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::{Client, StatusCode};

/// Answers whether an image URL currently resolves.
pub trait UrlProbe {
    fn is_reachable(&self, url: &str) -> impl Future<Output = bool>;
}

/// Supplies the body of a reference file.
pub trait TextSource {
    fn text(&self, url: &str) -> impl Future<Output = Result<String>>;
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("building http client")?;
        Ok(Self { client })
    }

    /// GET `url` and return its body. Anything other than `200 OK` is an error.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching {url}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("fetching {url}: unexpected status {status}");
        }

        response
            .text()
            .await
            .with_context(|| format!("reading body of {url}"))
    }

    /// GET `url`; only `200 OK` counts as valid. Transport errors are treated as missing.
    pub async fn check_url_validity(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                debug!("{url} -> {}", response.status());
                response.status() == StatusCode::OK
            }
            Err(err) => {
                debug!("{url} -> {err}");
                false
            }
        }
    }
}

impl UrlProbe for HttpClient {
    fn is_reachable(&self, url: &str) -> impl Future<Output = bool> {
        self.check_url_validity(url)
    }
}

impl TextSource for HttpClient {
    fn text(&self, url: &str) -> impl Future<Output = Result<String>> {
        self.fetch_text(url)
    }
}
