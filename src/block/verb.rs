use std::rc::Rc;

use super::{Block, Memo};
use crate::layout::{Layout, LayoutElement};
use crate::options::Options;
use crate::solution::{Solution, SolutionFactory};

/// A leaf block that emits several lines of text verbatim, with no wrapping or composition.
#[derive(Debug)]
pub struct VerbBlock {
    lines: Vec<String>,
    first_nl: bool,
    is_breaking: bool,
    memo: Memo,
}

impl VerbBlock {
    /// Create a verbatim block from `lines`, joined by newlines, mandating a line break
    /// immediately after it (`is_breaking = true`).
    ///
    /// If `first_nl` is set, a newline is emitted before the first line too (useful when the
    /// block is itself indented and should start on its own line).
    #[must_use]
    pub fn new(lines: Vec<String>, first_nl: bool) -> Self {
        Self::with_is_breaking(lines, first_nl, true)
    }

    /// Create a verbatim block with an explicit `is_breaking` flag.
    #[must_use]
    pub fn with_is_breaking(lines: Vec<String>, first_nl: bool, is_breaking: bool) -> Self {
        VerbBlock {
            lines,
            first_nl,
            is_breaking,
            memo: Memo::default(),
        }
    }

    fn layout(&self) -> Layout {
        let mut layout = Layout::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 || self.first_nl {
                layout.push(LayoutElement::NewLine(0));
            }
            layout.push(LayoutElement::Text(line.clone()));
        }
        layout
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let margin_0 = options.margin_0();
        let margin_1 = options.margin_1();
        let margin_0_cost = options.margin_0_cost();
        let margin_1_cost = options.margin_1_cost();

        let layout = Rc::new(self.layout());
        let mut factory = SolutionFactory::new();

        // A zero-cost knot at column 0 is only needed to anchor the function when margin_0 > 0;
        // otherwise it would be a degenerate, zero-width duplicate of the next knot.
        if margin_0 > 0 {
            factory.append(0, 0, 0.0, 0.0, Rc::clone(&layout));
        }
        factory.append(margin_0, 0, 0.0, margin_0_cost, Rc::clone(&layout));
        let cost_at_margin_1 = f64::from(margin_1 - margin_0) * margin_0_cost;
        factory.append(
            margin_1,
            0,
            cost_at_margin_1,
            margin_0_cost + margin_1_cost,
            Rc::clone(&layout),
        );

        let solution = factory.build();
        solution.with_rest_of_line(rest_of_line.map(|s| s.as_ref()))
    }
}

impl Block for VerbBlock {
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

    #[test]
    fn lines_are_joined_with_newlines() {
        let block = VerbBlock::new(vec!["one".to_string(), "two".to_string()], false);
        assert_eq!(block.render(&Options::new()).unwrap(), "one\ntwo");
    }

    #[test]
    fn first_nl_prefixes_a_leading_newline() {
        let block = VerbBlock::new(vec!["one".to_string()], true);
        assert_eq!(block.render(&Options::new()).unwrap(), "\none");
    }

    #[test]
    fn is_breaking_defaults_to_true_but_can_be_overridden() {
        assert!(VerbBlock::new(vec!["one".to_string()], false).is_breaking());
        assert!(!VerbBlock::with_is_breaking(vec!["one".to_string()], false, false).is_breaking());
    }
}
