use std::rc::Rc;

use super::{last_is_breaking, Block, Memo};
use crate::error::BlockUsageError;
use crate::options::Options;
use crate::solution::{v_sum, Solution};

/// Concatenates its children on one line, except that a child whose `is_breaking` is true
/// forces a line break immediately after it.
#[derive(Debug)]
pub struct LineBlock {
    elements: Vec<Rc<dyn Block>>,
    is_breaking: bool,
    memo: Memo,
}

impl LineBlock {
    /// Create a line block from `elements`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "LineBlock",
            });
        }
        Ok(LineBlock {
            is_breaking: last_is_breaking(&elements),
            elements,
            memo: Memo::default(),
        })
    }

    /// Split `elements` into element-lines at each internal breaking boundary (every element
    /// after one whose `is_breaking` is true starts a new element-line).
    fn element_lines(&self) -> Vec<Vec<Rc<dyn Block>>> {
        let mut lines: Vec<Vec<Rc<dyn Block>>> = vec![Vec::new()];
        for element in &self.elements {
            let breaking = element.is_breaking();
            lines.last_mut().unwrap().push(Rc::clone(element));
            if breaking {
                lines.push(Vec::new());
            }
        }
        if lines.last().map_or(false, Vec::is_empty) {
            lines.pop();
        }
        lines
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let mut lines = self.element_lines();
        if lines.len() > 1 {
            if let Some(hook) = options.break_element_lines() {
                lines = hook(lines);
            }
        }

        let num_lines = lines.len();
        let line_solutions: Vec<Solution> = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let continuation = if i + 1 == num_lines {
                    rest_of_line.cloned()
                } else {
                    None
                };
                fold_line_right_to_left(&line, continuation, options)
            })
            .collect();

        let refs: Vec<&Solution> = line_solutions.iter().collect();
        v_sum(&refs).plus_const(options.break_cost() * f64::from(num_lines as u32 - 1))
    }
}

/// Fold an element-line right-to-left, horizontally composing each child's `opt_layout` with
/// the accumulator built so far.
fn fold_line_right_to_left(
    line: &[Rc<dyn Block>],
    rest_of_line: Option<Rc<Solution>>,
    options: &Options,
) -> Solution {
    let mut accumulator = rest_of_line;
    for element in line.iter().rev() {
        let solution = element.opt_layout(accumulator.as_ref(), options);
        accumulator = Some(solution);
    }
    (*accumulator.expect("a non-empty element-line always yields a solution")).clone()
}

impl Block for LineBlock {
    fn is_breaking(&self) -> bool {
        self.is_breaking
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.memo
            .get_or_compute(rest_of_line, || self.do_opt_layout(rest_of_line, options))
    }
}
