//! Maps `Box<dyn Error>` from the `Link` boundary to typed `DriverError`.
//!
//! `pilot_traits::Link` uses `Box<dyn Error + Send + Sync>` for maximum
//! flexibility; this module converts those to our typed error enum, with an
//! optional feature-gated path for `pilot_link::LinkError` downcasting.

use crate::error::DriverError;

/// Map a trait-boundary error to a typed `DriverError`.
///
/// Attempts to downcast known link error types first, then falls back to
/// string-based heuristics.
pub fn map_link_error(e: &(dyn std::error::Error + 'static)) -> DriverError {
    // Feature-gated: try to downcast to LinkError for precise mapping
    #[cfg(feature = "link-errors")]
    {
        if let Some(le) = e.downcast_ref::<pilot_link::LinkError>() {
            return match le {
                pilot_link::LinkError::Closed => DriverError::Closed,
                pilot_link::LinkError::Timeout => DriverError::Timeout,
                other => DriverError::Link(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    let lower = s.to_lowercase();
    if lower.contains("timeout") {
        DriverError::Timeout
    } else if lower.contains("closed") {
        DriverError::Closed
    } else {
        DriverError::Link(s)
    }
}
