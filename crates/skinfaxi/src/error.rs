//! Error type for the dispatch layer.

use skinfaxi_gen::GenError;
use skinfaxi_hal::HalError;
use skinfaxi_ir::IrError;
use skinfaxi_route::RouteError;
use thiserror::Error;

/// Errors surfaced by circuit dispatch.
///
/// Every failure is fatal and propagates to the caller; there is no retry
/// or recovery policy in the dispatch layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// Backend-layer error (unknown device, size mismatch, job failure,
    /// result-format violation).
    #[error(transparent)]
    Hal(#[from] HalError),

    /// Routing-adapter error.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Circuit-construction error while instrumenting measurement.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Circuit-generation error.
    #[error(transparent)]
    Gen(#[from] GenError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
