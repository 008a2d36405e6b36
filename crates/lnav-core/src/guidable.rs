//! Capability shared by every path segment the aircraft can be guided along.

use crate::models::{Coordinates, GuidanceParameters};

/// A segment that can produce lateral guidance.
pub trait Guidable {
    /// Guidance for an aircraft at `position` flying `true_track_deg`.
    ///
    /// `None` only when the segment cannot compute guidance at all.
    fn guidance_at(&self, position: Coordinates, true_track_deg: f64)
        -> Option<GuidanceParameters>;

    /// Distance from `position` to the point where this segment ends (nm).
    fn distance_to_go(&self, position: Coordinates) -> f64;

    /// Whether `position` lies alongside the segment's forward extent.
    fn is_abeam(&self, position: Coordinates) -> bool;
}
