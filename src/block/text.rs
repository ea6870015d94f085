use std::rc::Rc;

use super::{Block, Memo};
use crate::layout::Layout;
use crate::options::Options;
use crate::solution::{Solution, SolutionFactory};

/// A leaf block holding a single, unbreakable piece of literal text.
#[derive(Debug)]
pub struct TextBlock {
    text: String,
    is_breaking: bool,
    memo: Memo,
}

impl TextBlock {
    /// Create a text block from `text`. `is_breaking` defaults to `false`; use
    /// [`TextBlock::breaking`] for a block that forces a line break after it.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        TextBlock {
            text: text.into(),
            is_breaking: false,
            memo: Memo::default(),
        }
    }

    /// Create a text block that mandates a line break immediately after it.
    #[must_use]
    pub fn breaking(text: impl Into<String>) -> Self {
        TextBlock {
            text: text.into(),
            is_breaking: true,
            memo: Memo::default(),
        }
    }

    /// The literal text this block renders.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let span = self.text.len() as u32;
        let margin_0 = options.margin_0();
        let margin_1 = options.margin_1();
        let margin_0_cost = options.margin_0_cost();
        let margin_1_cost = options.margin_1_cost();

        let mut factory = SolutionFactory::new();
        let layout = Rc::new(Layout::text(self.text.clone()));

        if span >= margin_1 {
            // Preserved verbatim from the distilled source: this multiplies by `margin_1`, the
            // threshold itself, rather than `margin_1_cost`. See the design notes' open
            // questions; not corrected.
            let cost = f64::from(span - margin_0) * margin_0_cost
                + f64::from(span - margin_1) * f64::from(margin_1);
            let slope = margin_0_cost + margin_1_cost;
            factory.append(0, span, cost, slope, Rc::clone(&layout));
        } else if span >= margin_0 {
            let cost0 = f64::from(span - margin_0) * margin_0_cost;
            let cost1 = f64::from(margin_1 - margin_0) * margin_0_cost;
            factory.append(0, span, cost0, margin_0_cost, Rc::clone(&layout));
            factory.append(
                margin_1 - span,
                span,
                cost1,
                margin_0_cost + margin_1_cost,
                Rc::clone(&layout),
            );
        } else {
            let cost2 = f64::from(margin_1 - margin_0) * margin_0_cost;
            factory.append(0, span, 0.0, 0.0, Rc::clone(&layout));
            factory.append(margin_0 - span, span, 0.0, margin_0_cost, Rc::clone(&layout));
            factory.append(
                margin_1 - span,
                span,
                cost2,
                margin_0_cost + margin_1_cost,
                Rc::clone(&layout),
            );
        }

        let solution = factory.build();
        solution.with_rest_of_line(rest_of_line.map(|s| s.as_ref()))
    }
}

impl Block for TextBlock {
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
    fn empty_and_short_text_render_unchanged() {
        let options = Options::new();
        assert_eq!(TextBlock::new("").render(&options).unwrap(), "");
        assert_eq!(TextBlock::new("foobar").render(&options).unwrap(), "foobar");
    }

    #[test]
    fn long_text_still_renders_as_single_line() {
        // The optimizer never breaks a single TextBlock; overflow is a cost, not a break point.
        let options = Options::new().with_margin_1(5);
        let long = "a".repeat(20);
        assert_eq!(TextBlock::new(&long).render(&options).unwrap(), long);
    }
}
