use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use tracing::debug;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const PLACEHOLDER_POSTER: &str = "https://placehold.co/500x750/1a1a1a/404040?text=No+Poster";

/// One search result as returned by TMDB. Passed through verbatim; no
/// client-side filtering or sorting.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieRecord>>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    read_token: String,
}

impl TmdbClient {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let read_token = env::var("TMDB_READ_TOKEN").context("TMDB_READ_TOKEN not set")?;
        Ok(Self::new(api_key, read_token))
    }

    pub fn new(api_key: impl Into<String>, read_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            read_token: read_token.into(),
        }
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieRecord>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            results: Vec<MovieRecord>,
        }

        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{TMDB_BASE}/search/movie?api_key={}&query={}&language=en-US&page=1",
            self.api_key,
            urlencoding::encode(query)
        );
        debug!("Searching TMDB for '{}'", query);

        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.read_token)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!(error_message(&text)));
        }
        let data: SearchResponse = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(data.results)
    }
}

/// TMDB error bodies carry a human-readable `status_message`; surface it
/// verbatim when present, otherwise fall back to a generic message.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        status_message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
        .unwrap_or_else(|| "Failed to fetch movies".to_string())
}

/// Maps an optional poster path to a displayable URL. The URL is only
/// constructed here; fetching is left to whatever renders it.
pub fn poster_url(path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE}{p}"),
        _ => PLACEHOLDER_POSTER.to_string(),
    }
}

pub fn release_year(date: Option<&str>) -> Option<&str> {
    let date = date?;
    if date.is_empty() {
        return None;
    }
    date.split('-').next()
}
