//! Cost-model parameters shared by every block in a layout.

use std::fmt;
use std::rc::Rc;

use crate::block::Block;
use crate::error::ConfigurationError;

/// A hook that may re-partition the element-lines of a [`LineBlock`](crate::block::LineBlock)
/// before they are laid out. See [`LineBlock`](crate::block::LineBlock) for how it is invoked.
pub type BreakElementLinesHook = Rc<dyn Fn(Vec<Vec<Rc<dyn Block>>>) -> Vec<Vec<Rc<dyn Block>>>>;

/// The cost parameters governing layout selection.
///
/// `Options` is built with [`Options::new`] followed by chained `with_*` setters, then
/// validated once with [`Options::validate`]. The core optimizer (`Block::render`/`print`)
/// calls `validate` itself, so well-formed callers never need to call it directly.
///
/// # Examples
///
/// ```
/// use blockprint::Options;
///
/// let options = Options::new().with_margin_1(40).with_break_cost(1.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Options {
    margin_0: u32,
    margin_0_cost: f64,
    margin_1: u32,
    margin_1_cost: f64,
    break_cost: f64,
    late_pack_cost: f64,
    break_element_lines: Option<BreakElementLinesHook>,
}

impl Options {
    /// Create an `Options` value with the documented defaults:
    /// `margin_0 = 0`, `margin_0_cost = 0.05`, `margin_1 = 80`, `margin_1_cost = 100.0`,
    /// `break_cost = 2.0`, `late_pack_cost = 1e-3`, no `break_element_lines` hook.
    #[must_use]
    pub const fn new() -> Self {
        Options {
            margin_0: 0,
            margin_0_cost: 0.05,
            margin_1: 80,
            margin_1_cost: 100.0,
            break_cost: 2.0,
            late_pack_cost: 1e-3,
            break_element_lines: None,
        }
    }

    /// Set the soft margin.
    #[must_use]
    pub fn with_margin_0(mut self, margin_0: u32) -> Self {
        self.margin_0 = margin_0;
        self
    }

    /// Set the per-column cost of text past the soft margin.
    #[must_use]
    pub fn with_margin_0_cost(mut self, margin_0_cost: f64) -> Self {
        self.margin_0_cost = margin_0_cost;
        self
    }

    /// Set the hard margin.
    #[must_use]
    pub fn with_margin_1(mut self, margin_1: u32) -> Self {
        self.margin_1 = margin_1;
        self
    }

    /// Set the per-column cost of text past the hard margin.
    #[must_use]
    pub fn with_margin_1_cost(mut self, margin_1_cost: f64) -> Self {
        self.margin_1_cost = margin_1_cost;
        self
    }

    /// Set the cost of a single line break.
    #[must_use]
    pub fn with_break_cost(mut self, break_cost: f64) -> Self {
        self.break_cost = break_cost;
        self
    }

    /// Set the tie-breaking penalty that favors packing items onto earlier lines.
    #[must_use]
    pub fn with_late_pack_cost(mut self, late_pack_cost: f64) -> Self {
        self.late_pack_cost = late_pack_cost;
        self
    }

    /// Install a hook that may re-partition a [`LineBlock`](crate::block::LineBlock)'s
    /// element-lines before layout.
    #[must_use]
    pub fn with_break_element_lines(mut self, hook: BreakElementLinesHook) -> Self {
        self.break_element_lines = Some(hook);
        self
    }

    /// The soft margin.
    #[must_use]
    pub fn margin_0(&self) -> u32 {
        self.margin_0
    }

    /// The per-column cost of text past the soft margin.
    #[must_use]
    pub fn margin_0_cost(&self) -> f64 {
        self.margin_0_cost
    }

    /// The hard margin.
    #[must_use]
    pub fn margin_1(&self) -> u32 {
        self.margin_1
    }

    /// The per-column cost of text past the hard margin.
    #[must_use]
    pub fn margin_1_cost(&self) -> f64 {
        self.margin_1_cost
    }

    /// The cost of a single line break.
    #[must_use]
    pub fn break_cost(&self) -> f64 {
        self.break_cost
    }

    /// The tie-breaking penalty that favors packing items onto earlier lines.
    #[must_use]
    pub fn late_pack_cost(&self) -> f64 {
        self.late_pack_cost
    }

    /// The element-line re-partitioning hook, if one was installed.
    #[must_use]
    pub fn break_element_lines(&self) -> Option<&BreakElementLinesHook> {
        self.break_element_lines.as_ref()
    }

    /// Check that the configured values satisfy the invariants of each field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MarginOrder`] if `margin_1 < margin_0`, or
    /// [`ConfigurationError::NegativeCost`] if any cost/slope field is negative.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.margin_1 < self.margin_0 {
            return Err(ConfigurationError::MarginOrder {
                margin_0: self.margin_0,
                margin_1: self.margin_1,
            });
        }
        for (field, value) in [
            ("margin_0_cost", self.margin_0_cost),
            ("margin_1_cost", self.margin_1_cost),
            ("break_cost", self.break_cost),
            ("late_pack_cost", self.late_pack_cost),
        ] {
            if value < 0.0 {
                return Err(ConfigurationError::NegativeCost { field, value });
            }
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

// Manual Debug since `break_element_lines` holds a `dyn Fn` that cannot implement `Debug`.
impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("margin_0", &self.margin_0)
            .field("margin_0_cost", &self.margin_0_cost)
            .field("margin_1", &self.margin_1)
            .field("margin_1_cost", &self.margin_1_cost)
            .field("break_cost", &self.break_cost)
            .field("late_pack_cost", &self.late_pack_cost)
            .field(
                "break_element_lines",
                &self.break_element_lines.as_ref().map(|_| "Fn(..)"),
            )
            .finish()
    }
}
