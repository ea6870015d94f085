use std::rc::Rc;

use super::{last_is_breaking, Block, Memo};
use crate::error::BlockUsageError;
use crate::options::Options;
use crate::solution::{min_solution, Solution};

/// Returns the pointwise minimum over `child.opt_layout(rest_of_line)` for each child.
///
/// Used to offer the optimizer a set of alternative renderings of the same content (for
/// example an inline rendering and an indented, broken-out one) and let it pick whichever is
/// cheaper for the column the block ends up placed at.
#[derive(Debug)]
pub struct ChoiceBlock {
    elements: Vec<Rc<dyn Block>>,
    is_breaking: bool,
    memo: Memo,
}

impl ChoiceBlock {
    /// Create a choice block from `elements`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "ChoiceBlock",
            });
        }
        Ok(ChoiceBlock {
            is_breaking: last_is_breaking(&elements),
            elements,
            memo: Memo::default(),
        })
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let candidates: Vec<Rc<Solution>> = self
            .elements
            .iter()
            .map(|element| element.opt_layout(rest_of_line, options))
            .collect();
        let refs: Vec<&Solution> = candidates.iter().map(Rc::as_ref).collect();
        min_solution(&refs)
    }
}

impl Block for ChoiceBlock {
    fn is_breaking(&self) -> bool {
        self.is_breaking
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.memo
            .get_or_compute(rest_of_line, || self.do_opt_layout(rest_of_line, options))
    }
}
