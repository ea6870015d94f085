use std::rc::Rc;

use super::{last_is_breaking, Block, Memo};
use crate::error::BlockUsageError;
use crate::options::Options;
use crate::solution::{v_sum, Solution};

/// Arranges its children vertically, one per line.
///
/// All children except the last are solved against no continuation; the last against the
/// supplied continuation. `break_mult` scales this block's share of `break_cost`, letting a
/// stack be made more or less break-averse than its siblings (the distilled source calls this
/// variant `MultBreakBlock`; here it is simply a constructor argument).
#[derive(Debug)]
pub struct StackBlock {
    elements: Vec<Rc<dyn Block>>,
    is_breaking: bool,
    break_mult: f64,
    memo: Memo,
}

impl StackBlock {
    /// Create a stack block from `elements`, with `break_mult = 1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        Self::with_break_mult(elements, 1.0)
    }

    /// Create a stack block with a custom `break_mult`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn with_break_mult(
        elements: Vec<Rc<dyn Block>>,
        break_mult: f64,
    ) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "StackBlock",
            });
        }
        Ok(StackBlock {
            is_breaking: last_is_breaking(&elements),
            elements,
            break_mult,
            memo: Memo::default(),
        })
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let n = self.elements.len();
        let line_solutions: Vec<Rc<Solution>> = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let continuation = if i + 1 == n { rest_of_line } else { None };
                element.opt_layout(continuation, options)
            })
            .collect();

        let refs: Vec<&Solution> = line_solutions.iter().map(Rc::as_ref).collect();
        let break_count = (n.saturating_sub(1)) as u32;
        v_sum(&refs).plus_const(options.break_cost() * self.break_mult * f64::from(break_count))
    }
}

impl Block for StackBlock {
    fn is_breaking(&self) -> bool {
        self.is_breaking
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.memo
            .get_or_compute(rest_of_line, || self.do_opt_layout(rest_of_line, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TextBlock;

    #[test]
    fn rejects_empty_elements() {
        assert!(StackBlock::new(vec![]).is_err());
    }

    #[test]
    fn stacks_children_one_per_line() {
        let block = StackBlock::new(vec![
            Rc::new(TextBlock::new("hello")),
            Rc::new(TextBlock::new("world")),
            Rc::new(TextBlock::new("!")),
        ])
        .unwrap();
        assert_eq!(block.render(&Options::new()).unwrap(), "hello\nworld\n!");
    }
}
