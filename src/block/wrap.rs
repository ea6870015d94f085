use std::rc::Rc;

use super::{Block, Memo, TextBlock};
use crate::error::BlockUsageError;
use crate::options::Options;
use crate::solution::{min_solution, v_sum, Solution};

/// Packs its children like a justified paragraph, separated by `sep`, wrapping onto as many
/// lines as the cost model prefers.
///
/// The optimal packing is found by a right-to-left dynamic program: `wrap[i]` is the optimal
/// solution for the tail of elements starting at `i`, and is built from `wrap[j + 1]` for every
/// candidate break position `j >= i`. See the crate-level docs for the full recurrence.
#[derive(Debug)]
pub struct WrapBlock {
    elements: Vec<Rc<dyn Block>>,
    sep: String,
    prefix: Option<String>,
    break_mult: f64,
    is_breaking: bool,
    /// Mirrors the distilled source's `elt_is_breaking` field: computed at construction, never
    /// read by `do_opt_layout`.
    #[allow(dead_code)]
    elt_is_breaking: Vec<bool>,
    memo: Memo,
}

impl WrapBlock {
    /// Create a wrap block with the default separator (`" "`), no prefix, and `break_mult = 1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        Self::with_options(elements, " ", None, 1.0)
    }

    /// Create a wrap block with a custom separator, an optional line prefix, and `break_mult`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn with_options(
        elements: Vec<Rc<dyn Block>>,
        sep: impl Into<String>,
        prefix: Option<String>,
        break_mult: f64,
    ) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "WrapBlock",
            });
        }
        let elt_is_breaking = elements.iter().map(|e| e.is_breaking()).collect();
        let is_breaking = elements
            .last()
            .map(|e| e.is_breaking())
            .unwrap_or(false);
        Ok(WrapBlock {
            elements,
            sep: sep.into(),
            prefix,
            break_mult,
            is_breaking,
            elt_is_breaking,
            memo: Memo::default(),
        })
    }

    fn do_opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Solution {
        let n = self.elements.len();
        let sep_layout = TextBlock::new(self.sep.clone()).opt_layout(None, options);
        let prefix_layout = self
            .prefix
            .as_ref()
            .map(|prefix| TextBlock::new(prefix.clone()).opt_layout(None, options));
        let elt_layouts: Vec<Rc<Solution>> = self
            .elements
            .iter()
            .map(|e| e.opt_layout(None, options))
            .collect();

        // Filled back to front; `wrap_rev[k]` holds `wrap[n - 1 - k]` until reversed below.
        let mut wrap_rev: Vec<Solution> = Vec::with_capacity(n);

        for i in (0..n).rev() {
            let mut line = match &prefix_layout {
                Some(prefix) => prefix.with_rest_of_line(Some(elt_layouts[i].as_ref())),
                None => (*elt_layouts[i]).clone(),
            };
            let mut last_breaking = self.elements[i].is_breaking();
            let mut candidates: Vec<Solution> = Vec::new();
            let mut exhausted = true;

            for j in i..n.saturating_sub(1) {
                let tail = &wrap_rev[n - 2 - j];
                let candidate = v_sum(&[&line, tail]).plus_const(
                    options.break_cost() * self.break_mult
                        + options.late_pack_cost() * f64::from((n - j) as u32),
                );
                candidates.push(candidate);

                if last_breaking {
                    exhausted = false;
                    break;
                }
                line = line.with_rest_of_line(Some(
                    &sep_layout.with_rest_of_line(Some(elt_layouts[j + 1].as_ref())),
                ));
                last_breaking = self.elements[j + 1].is_breaking();
            }

            if exhausted {
                candidates.push(line.with_rest_of_line(rest_of_line.map(|s| s.as_ref())));
            }

            let refs: Vec<&Solution> = candidates.iter().collect();
            wrap_rev.push(min_solution(&refs));
        }

        wrap_rev.reverse();
        wrap_rev
            .into_iter()
            .next()
            .expect("WrapBlock always has at least one element")
    }
}

impl Block for WrapBlock {
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

    fn words(words: &[&str]) -> Vec<Rc<dyn Block>> {
        words
            .iter()
            .map(|w| Rc::new(TextBlock::new(*w)) as Rc<dyn Block>)
            .collect()
    }

    #[test]
    fn rejects_empty_elements() {
        assert!(WrapBlock::new(vec![]).is_err());
    }

    #[test]
    fn packs_everything_on_one_line_when_it_fits() {
        let block = WrapBlock::new(words(&["one", "two", "three"])).unwrap();
        let options = Options::new().with_margin_1(80);
        assert_eq!(block.render(&options).unwrap(), "one two three");
    }

    #[test]
    fn wraps_when_the_margin_is_tight() {
        let block = WrapBlock::new(words(&["aaaa", "bbbb", "cccc", "dddd"])).unwrap();
        let options = Options::new().with_margin_1(10);
        let rendered = block.render(&options).unwrap();
        assert!(rendered.contains('\n'), "expected a wrapped rendering, got {rendered:?}");
        assert_eq!(rendered.replace('\n', " "), "aaaa bbbb cccc dddd");
    }
}
