use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use reqwest::Url;
use thiserror::Error;

/// Width of the simulated world, in cells, when `size = 1`
pub const X_RESOLUTION: u32 = 128;

/// Height of the simulated world, in cells, when `size = 1`
pub const Y_RESOLUTION: u32 = 64;

/// Pixel multiplier applied on top of the cell size when rendering
pub const CANVAS_SCALE: u32 = 2;

pub const DEFAULT_CELL_SIZE: u32 = 1;
pub const DEFAULT_FRAMETIME_MS: u32 = 16;

/// Largest cell size that still leaves at least one row of cells
pub const MAX_CELL_SIZE: u32 = Y_RESOLUTION;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be a positive integer")]
    ZeroCellSize,

    #[error("Canvas scale must be a positive integer")]
    ZeroCanvasScale,

    #[error("Frametime must be a positive number of milliseconds")]
    ZeroFrametime,

    #[error("Invalid server URL \"{url}\": {reason}")]
    InvalidServer { url: String, reason: String },
}

/// Which form of the grid endpoint the server speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiVersion {
    /// `GET /getGrid`, with no parameters
    V1,

    /// `GET /getGrid?size=<size>&frametime=<frametime>`
    #[default]
    V2,
}

/// Everything the renderer needs to know about one fetch-render cycle.
///
/// All three values are guaranteed to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    cell_size: u32,
    canvas_scale: u32,
    frametime_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            canvas_scale: CANVAS_SCALE,
            frametime_ms: DEFAULT_FRAMETIME_MS,
        }
    }
}

impl RenderConfig {
    pub fn new(cell_size: u32, frametime_ms: u32) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.set_cell_size(cell_size)?;
        config.set_frametime(frametime_ms)?;

        Ok(config)
    }

    pub fn with_canvas_scale(mut self, canvas_scale: u32) -> Result<Self, ConfigError> {
        if canvas_scale == 0 {
            return Err(ConfigError::ZeroCanvasScale);
        }

        self.canvas_scale = canvas_scale;
        Ok(self)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn canvas_scale(&self) -> u32 {
        self.canvas_scale
    }

    pub fn frametime_ms(&self) -> u32 {
        self.frametime_ms
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        self.cell_size = cell_size;
        Ok(())
    }

    pub fn set_frametime(&mut self, frametime_ms: u32) -> Result<(), ConfigError> {
        if frametime_ms == 0 {
            return Err(ConfigError::ZeroFrametime);
        }

        self.frametime_ms = frametime_ms;
        Ok(())
    }

    /// The `(rows, columns)` a grid must have to be drawn at the current cell size.
    ///
    /// A cell size that does not evenly divide both resolutions has no integral shape, so no
    /// payload can ever match it and `None` is returned.
    pub fn expected_shape(&self) -> Option<(usize, usize)> {
        let size = self.cell_size;

        if X_RESOLUTION % size != 0 || Y_RESOLUTION % size != 0 {
            return None;
        }

        Some(((Y_RESOLUTION / size) as usize, (X_RESOLUTION / size) as usize))
    }

    /// Surface dimensions in pixels. These do not depend on the cell size.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            X_RESOLUTION.saturating_mul(self.canvas_scale),
            Y_RESOLUTION.saturating_mul(self.canvas_scale),
        )
    }

    /// Side length of a single drawn cell, in pixels
    pub fn cell_pixels(&self) -> u32 {
        self.canvas_scale.saturating_mul(self.cell_size)
    }

    /// Double the cell size, stopping at [`MAX_CELL_SIZE`]. A cell size that is already larger is
    /// left alone.
    pub fn grow_cells(&mut self) {
        let grown = self.cell_size.saturating_mul(2).min(MAX_CELL_SIZE);
        self.cell_size = self.cell_size.max(grown);
    }

    /// Halve the cell size, stopping at 1
    pub fn shrink_cells(&mut self) {
        self.cell_size = (self.cell_size / 2).max(1);
    }

    pub fn slow_down(&mut self) {
        self.frametime_ms = self.frametime_ms.saturating_mul(2);
    }

    pub fn speed_up(&mut self) {
        self.frametime_ms = (self.frametime_ms / 2).max(1);
    }
}

/// Command line arguments for the terminal viewer
#[derive(Parser, Debug, Clone)]
#[command(name = "lifeview")]
#[command(version)]
#[command(about = "Watch a remote Game of Life server from the terminal", long_about = None)]
pub struct Args {
    /// Base URL of the Life server
    #[arg(long, env = "LIFEVIEW_SERVER", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Downsampling factor: the grid has (resolution / size) cells on each axis
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub size: u32,

    /// Simulation step interval requested from the server, in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAMETIME_MS)]
    pub frametime: u32,

    /// Grid endpoint flavour spoken by the server
    #[arg(long, value_enum, default_value_t = ApiVersion::V2)]
    pub api: ApiVersion,

    /// Re-fetch the grid every this many milliseconds. 0 disables periodic refreshes
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub refresh_ms: u64,

    /// Give up on a request after this many milliseconds. No timeout when unset
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Write logs to this file. Logging is disabled when unset
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        RenderConfig::new(self.size, self.frametime)
    }

    pub fn server_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.server).map_err(|e| ConfigError::InvalidServer {
            url: self.server.clone(),
            reason: e.to_string(),
        })
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_ms > 0).then(|| Duration::from_millis(self.refresh_ms))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();

        assert_eq!(config.cell_size(), 1);
        assert_eq!(config.canvas_scale(), 2);
        assert_eq!(config.frametime_ms(), 16);
        assert_eq!(config.canvas_size(), (256, 128));
        assert_eq!(config.expected_shape(), Some((64, 128)));
    }

    #[test]
    fn rejects_zero_values() {
        assert_eq!(RenderConfig::new(0, 16), Err(ConfigError::ZeroCellSize));
        assert_eq!(RenderConfig::new(1, 0), Err(ConfigError::ZeroFrametime));
        assert_eq!(
            RenderConfig::default().with_canvas_scale(0),
            Err(ConfigError::ZeroCanvasScale)
        );
    }

    #[test]
    fn shape_follows_cell_size() {
        let config = RenderConfig::new(2, 16).unwrap();

        assert_eq!(config.expected_shape(), Some((32, 64)));
        assert_eq!(config.cell_pixels(), 4);
        assert_eq!(config.canvas_size(), (256, 128));
    }

    #[test]
    fn non_dividing_size_has_no_shape() {
        let config = RenderConfig::new(3, 16).unwrap();
        assert_eq!(config.expected_shape(), None);

        let config = RenderConfig::new(128, 16).unwrap();
        assert_eq!(config.expected_shape(), None);
    }

    #[test]
    fn cell_size_stays_in_range() {
        let mut config = RenderConfig::default();

        config.shrink_cells();
        assert_eq!(config.cell_size(), 1);

        for _ in 0..10 {
            config.grow_cells();
        }
        assert_eq!(config.cell_size(), MAX_CELL_SIZE);
        assert_eq!(config.expected_shape(), Some((1, 2)));
    }

    #[test]
    fn growing_huge_cells_does_not_overflow() {
        let mut config = RenderConfig::new(u32::MAX, 16).unwrap();

        config.grow_cells();
        assert_eq!(config.cell_size(), u32::MAX);

        let mut config = RenderConfig::new(100, 16).unwrap();
        config.grow_cells();
        assert_eq!(config.cell_size(), 100);
    }

    #[test]
    fn frametime_never_hits_zero() {
        let mut config = RenderConfig::new(1, 1).unwrap();

        config.speed_up();
        assert_eq!(config.frametime_ms(), 1);

        config.slow_down();
        assert_eq!(config.frametime_ms(), 2);
    }

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from([
            "lifeview",
            "--server",
            "http://life.local:3000",
            "--size",
            "4",
            "--api",
            "v1",
            "--refresh-ms",
            "0",
        ])
        .unwrap();

        assert_eq!(args.api, ApiVersion::V1);
        assert_eq!(args.refresh_interval(), None);
        assert_eq!(args.timeout(), None);
        assert_eq!(args.render_config().unwrap().expected_shape(), Some((16, 32)));
        assert_eq!(args.server_url().unwrap().host_str(), Some("life.local"));
    }

    #[test]
    fn bad_server_url() {
        let args = Args::try_parse_from(["lifeview", "--server", "not a url"]).unwrap();

        assert!(matches!(
            args.server_url(),
            Err(ConfigError::InvalidServer { .. })
        ));
    }
}
