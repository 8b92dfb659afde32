// ── Device location ──
//
// Where the user is, for the nearest-center screen, routing, and report
// geotagging. The portal only needs a one-shot fix; providers decide how
// to get it. Denial and timeouts degrade features, they never abort.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::geo::Coordinates;

/// How long to wait for a position fix.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Future returned by [`LocationProvider::current_position`].
pub type PositionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Coordinates, CoreError>> + Send + 'a>>;

/// A source of the device's current position.
pub trait LocationProvider: Send + Sync {
    /// One-shot, high-accuracy position request.
    fn current_position(&self) -> PositionFuture<'_>;
}

/// A provider that always reports the same position, or always fails.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    position: Option<Coordinates>,
}

impl FixedLocation {
    pub fn at(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A provider for a user who denied location access.
    pub fn denied() -> Self {
        Self { position: None }
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> PositionFuture<'_> {
        let result = self.position.ok_or_else(|| CoreError::LocationUnavailable {
            reason: "location permission denied".into(),
        });
        Box::pin(async move { result })
    }
}

/// Ask `provider` for a fix, giving up after `timeout`.
pub async fn locate(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<Coordinates, CoreError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(at)) => {
            debug!(lat = at.lat, lon = at.lon, "position fix");
            Ok(at)
        }
        Ok(Err(e)) => {
            warn!(error = %e, "location unavailable");
            Err(match e {
                CoreError::LocationUnavailable { .. } => e,
                other => CoreError::LocationUnavailable {
                    reason: other.to_string(),
                },
            })
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "location request timed out");
            Err(CoreError::LocationUnavailable {
                reason: format!("no position fix within {}s", timeout.as_secs()),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Never answers.
    struct Stalled;

    impl LocationProvider for Stalled {
        fn current_position(&self) -> PositionFuture<'_> {
            Box::pin(std::future::pending())
        }
    }

    #[test]
    fn fixed_location_resolves() {
        let here = Coordinates::new(14.17, 121.24).unwrap();
        let got = tokio_test::block_on(locate(&FixedLocation::at(here), DEFAULT_LOCATION_TIMEOUT));
        assert_eq!(got.unwrap(), here);
    }

    #[test]
    fn denial_is_unavailable() {
        let err = tokio_test::block_on(locate(&FixedLocation::denied(), DEFAULT_LOCATION_TIMEOUT))
            .unwrap_err();
        assert!(matches!(err, CoreError::LocationUnavailable { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_times_out() {
        let err = locate(&Stalled, DEFAULT_LOCATION_TIMEOUT).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Location unavailable: no position fix within 10s"
        );
    }
}
