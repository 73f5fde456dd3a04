//! Engine error types
//!
//! GPU and surface initialization are the only operations in the crate that
//! can fail terminally; the interaction core itself is infallible (a lost or
//! malformed hand frame degrades to "no hand visible").

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
