//! The block tree: the combinators a caller assembles to describe a layout.
//!
//! Every block kind implements [`Block`]. Composite kinds own a child list of `Rc<dyn Block>`
//! and reject an empty list at construction with [`BlockUsageError`](crate::error::BlockUsageError).

mod choice;
mod line;
mod stack;
mod text;
mod verb;
mod wrap;

pub use choice::ChoiceBlock;
pub use line::LineBlock;
pub use stack::StackBlock;
pub use text::TextBlock;
pub use verb::VerbBlock;
pub use wrap::WrapBlock;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::ConfigurationError;
use crate::options::Options;
use crate::solution::Solution;

/// A node in the layout tree.
///
/// `opt_layout` is memoized per block by continuation identity (see [`Memo`]); block kinds
/// implement [`do_opt_layout`](Block::do_opt_layout) rather than `opt_layout` directly.
pub trait Block: fmt::Debug {
    /// Whether a line break is mandated immediately after this block.
    fn is_breaking(&self) -> bool;

    /// Retrieve or compute the least-cost layout for this block, given what comes after it.
    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution>;

    /// Render this block to a string under `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `options` is invalid. This is the only error rendering
    /// a well-formed tree can produce (see the crate-level error-handling docs).
    fn render(&self, options: &Options) -> Result<String, ConfigurationError> {
        options.validate()?;
        let solution = self.opt_layout(None, options);
        Ok(solution.layout_at(0).to_string_at_start())
    }

    /// Write this block's optimal layout directly to `sink` under `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `options` is invalid.
    fn print(&self, options: &Options, sink: &mut dyn fmt::Write) -> Result<(), ConfigurationError> {
        options.validate()?;
        let solution = self.opt_layout(None, options);
        solution
            .layout_at(0)
            .write_to(sink)
            .expect("writing to the provided sink failed");
        Ok(())
    }
}

/// Per-block memoization table, keyed by the id of the continuation `Solution` (`None` is a
/// distinguished key for "nothing to the right").
///
/// This is the shared wrapper described in the crate-level docs: each concrete block type owns
/// one `Memo` and calls [`Memo::get_or_compute`] from its `opt_layout` implementation, which
/// otherwise just delegates to a private `do_opt_layout`.
#[derive(Debug, Default)]
pub(crate) struct Memo {
    cache: RefCell<HashMap<Option<u64>, Rc<Solution>>>,
}

impl Memo {
    pub(crate) fn get_or_compute(
        &self,
        rest_of_line: Option<&Rc<Solution>>,
        compute: impl FnOnce() -> Solution,
    ) -> Rc<Solution> {
        let key = rest_of_line.map(|s| s.id());
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Rc::clone(hit);
        }
        let solution = Rc::new(compute());
        self.cache.borrow_mut().insert(key, Rc::clone(&solution));
        solution
    }
}

/// Compute the `is_breaking` flag for a composite block: that of its last child.
pub(crate) fn last_is_breaking(elements: &[Rc<dyn Block>]) -> bool {
    elements
        .last()
        .map(|e| e.is_breaking())
        .unwrap_or(false)
}
