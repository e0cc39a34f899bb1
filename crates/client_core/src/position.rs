//! Permission-gated, single-shot device position acquisition.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Coordinate, PositionFix},
    error::PositionError,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no position fix available")]
    NoFix,
    #[error("platform location service failed: {0}")]
    Platform(String),
}

/// Host platform location capability.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> PermissionStatus;
    async fn current_position(&self) -> Result<Coordinate, ProviderError>;
}

/// Provider with a fixed permission answer and an optional fixed coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPositionProvider {
    permission: PermissionStatus,
    position: Option<Coordinate>,
}

impl StaticPositionProvider {
    pub fn granted(position: Coordinate) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some(position),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: None,
        }
    }

    /// Permission is granted but the device never obtains a fix.
    pub fn without_fix() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: None,
        }
    }
}

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        self.position.ok_or(ProviderError::NoFix)
    }
}

pub struct PositionService {
    provider: Arc<dyn PositionProvider>,
}

impl PositionService {
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self { provider }
    }

    /// Requests permission, then performs exactly one position read.
    ///
    /// A denial never reaches the position read. Failures are only reported
    /// back; the orchestrator decides whether the user still sees them.
    pub async fn acquire(&self) -> Result<PositionFix, PositionError> {
        if self.provider.request_foreground_permission().await != PermissionStatus::Granted {
            warn!("foreground location permission denied");
            return Err(PositionError::PermissionDenied);
        }

        match self.provider.current_position().await {
            Ok(coordinate) => {
                info!(
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "acquired device position"
                );
                Ok(PositionFix::now(coordinate))
            }
            Err(source) => {
                warn!(error = %source, "position read failed after permission was granted");
                Err(PositionError::Unavailable {
                    cause: source.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
