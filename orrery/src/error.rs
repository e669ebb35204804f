//! Top-level error type for starting the viewer

use common::GraphicsError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graphics(#[from] GraphicsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
