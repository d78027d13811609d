use thiserror::Error;

/// Errors raised by the progression functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressionError {
    /// An input fell outside the documented domain (e.g. negative XP).
    #[error("invalid {field}: {value} is outside the supported domain")]
    InvalidDomainInput { field: &'static str, value: i64 },

    /// Curve parameters that would not yield a strictly increasing curve.
    #[error("invalid xp curve (base_xp = {base_xp}, growth_rate = {growth_rate}): {reason}")]
    InvalidCurve {
        base_xp: u64,
        growth_rate: f64,
        reason: &'static str,
    },
}
