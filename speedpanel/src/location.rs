//! Location permission collaborator.
//!
//! Some speed test backends pick servers by device location, so the session
//! asks for location access once when it is created. Nothing downstream
//! depends on the answer.

use std::sync::Arc;

/// Level of location access requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationLevel {
    WhenInUse,
    Always,
}

/// Platform location permission service.
pub trait LocationService: Send + Sync {
    /// Whether location services are available at all.
    fn services_enabled(&self) -> bool;

    /// Ask the platform for access. The answer arrives out of band.
    fn request_authorization(&self, level: AuthorizationLevel);
}

/// Shared location service handle.
pub type SharedLocationService = Arc<dyn LocationService>;

/// Location service for hosts without location support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLocationServices;

impl LocationService for NoLocationServices {
    fn services_enabled(&self) -> bool {
        false
    }

    fn request_authorization(&self, _level: AuthorizationLevel) {}
}

/// Request location access at the levels the speed test backend uses.
///
/// Does nothing when location services are disabled.
pub fn request_location_access(service: &dyn LocationService) {
    if !service.services_enabled() {
        tracing::debug!("Location services disabled, skipping authorization request");
        return;
    }
    service.request_authorization(AuthorizationLevel::WhenInUse);
    service.request_authorization(AuthorizationLevel::Always);
    tracing::debug!("Requested location authorization");
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingLocation {
        enabled: bool,
        requests: Mutex<Vec<AuthorizationLevel>>,
    }

    impl LocationService for RecordingLocation {
        fn services_enabled(&self) -> bool {
            self.enabled
        }

        fn request_authorization(&self, level: AuthorizationLevel) {
            self.requests.lock().push(level);
        }
    }

    #[test]
    fn test_requests_both_levels_when_enabled() {
        let service = RecordingLocation {
            enabled: true,
            requests: Mutex::new(Vec::new()),
        };
        request_location_access(&service);
        assert_eq!(
            *service.requests.lock(),
            vec![AuthorizationLevel::WhenInUse, AuthorizationLevel::Always]
        );
    }

    #[test]
    fn test_skips_when_disabled() {
        let service = RecordingLocation {
            enabled: false,
            requests: Mutex::new(Vec::new()),
        };
        request_location_access(&service);
        assert!(service.requests.lock().is_empty());
    }
}
