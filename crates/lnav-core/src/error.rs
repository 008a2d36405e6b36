//! Errors raised while building path geometry.

use thiserror::Error;

/// Malformed flight-plan geometry.
///
/// These are deterministic: retrying the same inputs gives the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("leg {from} -> {to} has coincident endpoints")]
    DegenerateLeg { from: String, to: String },

    #[error("turn of {turn_angle_deg:.3} deg reverses the path; no fixed-radius arc exists")]
    ReversalTurn { turn_angle_deg: f64 },

    #[error(
        "turn of {turn_angle_deg:.3} deg needs {tangent_length_nm:.3} nm either side of the fix \
         but a leg is only {leg_length_nm:.3} nm"
    )]
    TurnExceedsLeg {
        turn_angle_deg: f64,
        tangent_length_nm: f64,
        leg_length_nm: f64,
    },

    #[error("legs are collinear; no turn is required")]
    CollinearLegs,

    #[error("turn radius must be positive and finite, got {radius_nm} nm")]
    InvalidRadius { radius_nm: f64 },

    #[error("{0} transitions are not supported")]
    UnsupportedTransition(&'static str),

    #[error("geometry has no leg at index {index}")]
    LegOutOfRange { index: usize },
}
