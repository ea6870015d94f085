//! Error types returned when a block tree or its [`Options`](crate::Options) are malformed.
//!
//! Both types here are raised at construction time and are meant to propagate to the caller;
//! they do not represent bugs in this crate (see the module-level docs for the distinction from
//! an internal invariant violation, which panics instead of returning an error).

use std::fmt;

/// An [`Options`](crate::Options) value violates one of its field invariants.
///
/// Returned by [`Options::validate`](crate::Options::validate). Each variant names the
/// offending field; the `Display` impl explains the violated constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    /// `margin_1` was set below `margin_0`.
    MarginOrder {
        /// The configured soft margin.
        margin_0: u32,
        /// The configured hard margin, which must be at least `margin_0`.
        margin_1: u32,
    },
    /// A cost slope (`margin_0_cost`, `margin_1_cost`, `break_cost`, or `late_pack_cost`) was
    /// negative.
    NegativeCost {
        /// The name of the offending field.
        field: &'static str,
        /// The negative value that was supplied.
        value: f64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MarginOrder { margin_0, margin_1 } => write!(
                f,
                "margin_1 ({margin_1}) must be greater than or equal to margin_0 ({margin_0})"
            ),
            ConfigurationError::NegativeCost { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A composite block (`Line`, `Stack`, `Choice`, `Wrap`) was constructed with zero elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockUsageError {
    /// The name of the composite block kind that rejected the empty element list.
    pub block_kind: &'static str,
}

impl fmt::Display for BlockUsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} requires at least one element", self.block_kind)
    }
}

impl std::error::Error for BlockUsageError {}
