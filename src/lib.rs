pub mod app;
pub mod camera;
pub mod client;
pub mod config;
pub mod events;
pub mod grid;
pub mod icons;
pub mod render;
pub mod surface;

pub use client::GridClient;
pub use config::RenderConfig;
pub use grid::GridMatrix;
pub use render::DrawOutcome;
pub use render::draw_grid;
pub use surface::Surface;
