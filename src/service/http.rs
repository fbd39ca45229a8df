use std::time::Duration;

use reqwest::blocking::Client;

use crate::foundation::error::{MazeError, MazeResult};
use crate::model::algorithm::Algorithm;
use crate::model::config::MazeConfig;
use crate::model::maze::Maze;
use crate::model::step::Step;
use crate::service::MazeService;

/// Options for [`HttpMazeService`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpServiceOpts {
    /// Service root, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for HttpServiceOpts {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(serde::Serialize)]
struct SolveRequest<'a> {
    maze: &'a Maze,
    algorithm: Algorithm,
}

/// Blocking client for `POST /api/generate` and `POST /api/solve`.
///
/// Each call is a single attempt; transport errors, non-2xx statuses and undecodable bodies all
/// surface as [`MazeError::Request`].
#[derive(Debug)]
pub struct HttpMazeService {
    client: Client,
    base_url: String,
}

impl HttpMazeService {
    /// Client for the service at `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> MazeResult<Self> {
        Self::with_opts(HttpServiceOpts {
            base_url: base_url.into(),
            ..HttpServiceOpts::default()
        })
    }

    /// Client with explicit options.
    pub fn with_opts(opts: HttpServiceOpts) -> MazeResult<Self> {
        let client = Client::builder()
            .connect_timeout(opts.connect_timeout)
            .timeout(opts.timeout)
            .build()
            .map_err(|e| MazeError::request(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: opts.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Service root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<B, R>(&self, path: &str, body: &B) -> MazeResult<R>
    where
        B: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| {
                tracing::warn!(%url, "maze service request failed: {e}");
                MazeError::request(format!("POST {url}: {e}"))
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| MazeError::request(format!("POST {url}: read body: {e}")))?;
        if !status.is_success() {
            tracing::warn!(%url, %status, "maze service returned an error status");
            return Err(MazeError::request(format!("POST {url}: HTTP {status}: {text}")));
        }

        serde_json::from_str(&text)
            .map_err(|e| MazeError::request(format!("POST {url}: invalid response body: {e}")))
    }
}

impl MazeService for HttpMazeService {
    fn generate(&mut self, config: &MazeConfig) -> MazeResult<Maze> {
        self.post("/api/generate", config)
    }

    fn solve(&mut self, maze: &Maze, algorithm: Algorithm) -> MazeResult<Vec<Step>> {
        self.post("/api/solve", &SolveRequest { maze, algorithm })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/http.rs"]
mod tests;
