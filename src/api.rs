use crate::error::{Error, Result};
use crate::structs::*;

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, USER_AGENT},
    StatusCode,
};

pub const SEARCH_PATH: &str = "/api/departures";
pub const POLL_PATH: &str = "/api/departures/poll";

const CLIENT_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The two endpoints the board is built from.
#[async_trait]
pub trait DeparturesApi: Send + Sync {
    /// Starts a search and returns the first page.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;

    /// Fetches the next page of an already started search.
    async fn poll(&self, query: &SearchQuery) -> Result<SearchPage>;
}

//////////////////////////////////////////////////////////
// API calls
//////////////////////////////////////////////////////////
pub struct HttpDeparturesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeparturesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn fetch(&self, path: &str, query: &SearchQuery) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!(
            "GET {} origin={} destination={} date={}",
            url,
            query.origin,
            query.destination,
            query.date
        );

        let resp = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        log::debug!("{} answered {} ({} bytes)", path, status, body.len());

        Ok((status, body))
    }
}

#[async_trait]
impl DeparturesApi for HttpDeparturesApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let (status, body) = self.fetch(SEARCH_PATH, query).await?;
        decode_page(status, &body, |status, message| Error::Search { status, message })
    }

    async fn poll(&self, query: &SearchQuery) -> Result<SearchPage> {
        let (status, body) = self.fetch(POLL_PATH, query).await?;
        decode_page(status, &body, |status, message| Error::Poll { status, message })
    }
}

/// Turns a raw response into a page. Anything but 200 is a rejection carrying
/// the server's `message`, or the status text when the body has none.
pub fn decode_page(
    status: StatusCode,
    body: &str,
    reject: fn(u16, String) -> Error,
) -> Result<SearchPage> {
    if status != StatusCode::OK {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => err.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        };
        return Err(reject(status.as_u16(), message));
    }

    Ok(serde_json::from_str(body)?)
}
