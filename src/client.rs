use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::config::ApiVersion;
use crate::config::RenderConfig;
use crate::grid::GridMatrix;
use crate::render;
use crate::render::DrawOutcome;
use crate::surface::Surface;

/// Path of the grid endpoint, relative to the server root
pub const GRID_PATH: &str = "/getGrid";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid endpoint \"{endpoint}\": {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed grid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Talks to a Life server over HTTP.
///
/// Every method takes `&self`, so nothing stops callers from running several refreshes at once.
/// When they do, whichever response is drawn last wins.
#[derive(Debug, Clone)]
pub struct GridClient {
    http: reqwest::Client,
    base: Url,
    api: ApiVersion,
}

impl GridClient {
    pub fn new(base: Url) -> Result<Self, ClientError> {
        Self::with_options(base, ApiVersion::default(), None)
    }

    /// Requests never time out unless `timeout` is given.
    pub fn with_options(
        base: Url,
        api: ApiVersion,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base,
            api,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn api(&self) -> ApiVersion {
        self.api
    }

    /// Resolve `endpoint` against the server's base URL
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ClientError> {
        self.base
            .join(endpoint)
            .map_err(|e| ClientError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }

    /// URL of the grid endpoint for the given configuration
    pub fn grid_url(&self, config: &RenderConfig) -> Result<Url, ClientError> {
        let mut url = self.endpoint_url(GRID_PATH)?;

        if self.api == ApiVersion::V2 {
            url.query_pairs_mut()
                .append_pair("size", &config.cell_size().to_string())
                .append_pair("frametime", &config.frametime_ms().to_string());
        }

        Ok(url)
    }

    /// Fetch the current grid.
    ///
    /// A non-2xx response is not an error: it means the server has no data, and the empty matrix
    /// is returned. The same goes for a JSON body that is not a matrix of booleans. Only a body
    /// that is not JSON at all is a [`ClientError::Decode`].
    pub async fn fetch_grid(&self, config: &RenderConfig) -> Result<GridMatrix, ClientError> {
        let url = self.grid_url(config)?;
        debug!(%url, "fetching grid");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(%status, "grid unavailable, using an empty grid");
            return Ok(GridMatrix::empty());
        }

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        let grid = GridMatrix::from(value);
        debug!(
            rows = grid.row_count(),
            cols = grid.column_count(),
            "received grid"
        );

        Ok(grid)
    }

    /// Fetch the grid and draw it on `surface`.
    ///
    /// Transport failures and bodies that are not JSON are logged and leave `surface` untouched,
    /// in which case `None` is returned.
    pub async fn refresh_grid<S>(
        &self,
        surface: &mut S,
        config: &RenderConfig,
    ) -> Option<DrawOutcome>
    where
        S: Surface + ?Sized,
    {
        match self.fetch_grid(config).await {
            Ok(grid) => Some(render::draw_grid(surface, &grid, config)),
            Err(e) => {
                warn!("Grid refresh failed: {e}");
                None
            }
        }
    }

    /// Hit a control endpoint such as `/clear` or `/step`. The response is ignored; only a
    /// failure to get one is reported.
    pub async fn trigger(&self, endpoint: &str) -> Result<(), ClientError> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "triggering control endpoint");

        let response = self.http.get(url).send().await?;
        debug!(status = %response.status(), endpoint, "control endpoint answered");

        Ok(())
    }

    /// Hit a control endpoint, wait for the server to answer, then refresh the grid.
    ///
    /// The refresh happens even if the control request fails.
    pub async fn fetch_and_refresh<S>(
        &self,
        endpoint: &str,
        surface: &mut S,
        config: &RenderConfig,
    ) -> Option<DrawOutcome>
    where
        S: Surface + ?Sized,
    {
        if let Err(e) = self.trigger(endpoint).await {
            warn!(endpoint, "Control request failed: {e}");
        }

        self.refresh_grid(surface, config).await
    }
}
