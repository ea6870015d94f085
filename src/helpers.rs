//! Convenience constructors built on top of the core block kinds.
//!
//! Nothing here is part of the layout optimizer itself; every type in this module is ordinary
//! glue assembled from [`crate::block`]'s public API, mirroring the helpers the distilled
//! source ships alongside its optimizer.

use std::collections::HashSet;
use std::rc::Rc;

use crate::block::{Block, ChoiceBlock, LineBlock, StackBlock, TextBlock, WrapBlock};
use crate::error::BlockUsageError;
use crate::options::Options;
use crate::solution::Solution;

/// `Line([Text(" ".repeat(indent)), content])`: put `content` on its own line, indented by
/// `indent` spaces.
///
/// # Panics
///
/// Never panics: the inner `LineBlock` always has two elements.
#[must_use]
pub fn indented(content: Rc<dyn Block>, indent: usize) -> LineBlock {
    LineBlock::new(vec![Rc::new(TextBlock::new(" ".repeat(indent))), content])
        .expect("a two-element LineBlock is never empty")
}

/// A choice between breaking `content` onto its own indented block, or keeping everything on
/// one line: `Choice([Stack([prefix, indented(content)]), Line([prefix, content, suffix])])`
/// (the `suffix` is appended after `content` on the stacked branch too).
///
/// # Errors
///
/// Never actually fails in practice (every inner composite is built with a fixed, non-empty
/// element list), but returns [`BlockUsageError`] defensively should that change.
pub fn optionally_indented(
    prefix: Rc<dyn Block>,
    content: Rc<dyn Block>,
    suffix: Rc<dyn Block>,
    indent: usize,
) -> Result<ChoiceBlock, BlockUsageError> {
    let stacked: Rc<dyn Block> = Rc::new(StackBlock::new(vec![
        Rc::clone(&prefix),
        Rc::new(indented(Rc::clone(&content), indent)),
        Rc::clone(&suffix),
    ])?);
    let inline: Rc<dyn Block> = Rc::new(LineBlock::new(vec![prefix, content, suffix])?);
    ChoiceBlock::new(vec![stacked, inline])
}

/// Joins elements with a separator block, skipping the separator immediately after an element
/// whose `is_breaking` is true (unless `join_breaking` is set).
///
/// This is the public, unconditional joiner (the distilled source's `JoinedLineBlock`); see
/// [`ConditionalJoinedLineBlock`] for the character-class-based variant.
#[derive(Debug)]
pub struct JoinedLineBlock(LineBlock);

impl JoinedLineBlock {
    /// Join `elements` with a single space, never joining across a breaking element.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        Self::with_options(elements, " ", false)
    }

    /// Join `elements` with `joiner`. If `join_breaking` is set, the joiner is inserted even
    /// after an element that mandates a line break (producing e.g. a trailing space before the
    /// forced newline).
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn with_options(
        elements: Vec<Rc<dyn Block>>,
        joiner: impl Into<String>,
        join_breaking: bool,
    ) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "JoinedLineBlock",
            });
        }
        let joiner = joiner.into();
        let mut interleaved: Vec<Rc<dyn Block>> = Vec::with_capacity(elements.len() * 2);
        let mut prev_breaking = false;
        for (i, element) in elements.into_iter().enumerate() {
            if i > 0 && (join_breaking || !prev_breaking) {
                interleaved.push(Rc::new(TextBlock::new(joiner.clone())));
            }
            prev_breaking = element.is_breaking();
            interleaved.push(element);
        }
        Ok(JoinedLineBlock(
            LineBlock::new(interleaved).expect("interleaving never empties the element list"),
        ))
    }
}

impl Block for JoinedLineBlock {
    fn is_breaking(&self) -> bool {
        self.0.is_breaking()
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.0.opt_layout(rest_of_line, options)
    }
}

/// Like [`JoinedLineBlock`], but also suppresses the separator between adjacent elements based
/// on caller-supplied "no space after"/"no space before" character sets (for example, no space
/// before a closing parenthesis).
///
/// Preserves a quirk of the distilled source verbatim: the `end` marker tracking "what the
/// previous element's trailing text looked like" is seeded, for the very first element, from
/// that *same* element's own start text rather than a dedicated "end of nothing" value. This
/// means the very first separator decision is made against the first element's own opening
/// character instead of against whatever (if anything) precedes it. Likely a bug in the
/// original; preserved rather than corrected.
#[derive(Debug)]
pub struct ConditionalJoinedLineBlock {
    inner: LineBlock,
}

impl ConditionalJoinedLineBlock {
    /// Join `elements` with `joiner`, omitting it wherever the left element's last character is
    /// in `no_space_right` or the right element's first character is in `no_space_left`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(
        elements: &[TextBlock],
        joiner: &str,
        no_space_left: &HashSet<char>,
        no_space_right: &HashSet<char>,
    ) -> Result<Self, BlockUsageError> {
        Self::from_text(elements, joiner, no_space_left, no_space_right)
    }

    fn from_text(
        elements: &[TextBlock],
        joiner: &str,
        no_space_left: &HashSet<char>,
        no_space_right: &HashSet<char>,
    ) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "ConditionalJoinedLineBlock",
            });
        }
        let texts: Vec<&str> = elements.iter().map(TextBlock::text).collect();
        let mut interleaved: Vec<Rc<dyn Block>> = Vec::with_capacity(texts.len() * 2);

        // Bug preserved verbatim: `end` should track the end of the *previously emitted*
        // element, but on the first iteration there is no previous element, so it falls back
        // to this same element's own start text instead of a true "no predecessor" sentinel.
        let mut end: char = texts[0].chars().next().unwrap_or(' ');

        for (i, &text) in texts.iter().enumerate() {
            let start = text.chars().next().unwrap_or(' ');
            if i > 0 && !no_space_right.contains(&end) && !no_space_left.contains(&start) {
                interleaved.push(Rc::new(TextBlock::new(joiner.to_string())));
            }
            interleaved.push(Rc::new(TextBlock::new(text.to_string())));
            end = text.chars().last().unwrap_or(' ');
        }

        Ok(ConditionalJoinedLineBlock {
            inner: LineBlock::new(interleaved)
                .expect("interleaving never empties the element list"),
        })
    }
}

impl Block for ConditionalJoinedLineBlock {
    fn is_breaking(&self) -> bool {
        self.inner.is_breaking()
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.inner.opt_layout(rest_of_line, options)
    }
}

/// Like [`StackBlock`], but appends the separator block to every element except the last
/// before stacking (so each line but the last ends with, say, a trailing comma).
#[derive(Debug)]
pub struct JoinedStackBlock(StackBlock);

impl JoinedStackBlock {
    /// Stack `elements`, appending `joiner` after every element but the last.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>, joiner: &str) -> Result<Self, BlockUsageError> {
        if elements.is_empty() {
            return Err(BlockUsageError {
                block_kind: "JoinedStackBlock",
            });
        }
        let n = elements.len();
        let lines: Vec<Rc<dyn Block>> = elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| -> Rc<dyn Block> {
                if i + 1 == n {
                    element
                } else {
                    Rc::new(
                        LineBlock::new(vec![element, Rc::new(TextBlock::new(joiner.to_string()))])
                            .expect("a two-element LineBlock is never empty"),
                    )
                }
            })
            .collect();
        Ok(JoinedStackBlock(
            StackBlock::new(lines).expect("a non-empty element list stays non-empty"),
        ))
    }
}

impl Block for JoinedStackBlock {
    fn is_breaking(&self) -> bool {
        self.0.is_breaking()
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        self.0.opt_layout(rest_of_line, options)
    }
}

/// Delegates to [`WrapBlock`] when there are at least `wrap_len` elements (default 3),
/// otherwise to [`JoinedLineBlock`] — wrapping a handful of elements with the DP isn't worth it.
#[derive(Debug)]
pub enum WrapIfLongBlock {
    /// The element count met the threshold; delegates to the paragraph-packing DP.
    Wrapped(WrapBlock),
    /// Too few elements to bother with the DP; delegates to the plain joiner.
    Joined(JoinedLineBlock),
}

impl WrapIfLongBlock {
    /// Default wrap-length threshold below which this falls back to a joined line.
    pub const DEFAULT_WRAP_LEN: usize = 3;

    /// Create a wrap-if-long block with the default threshold.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn new(elements: Vec<Rc<dyn Block>>) -> Result<Self, BlockUsageError> {
        Self::with_wrap_len(elements, Self::DEFAULT_WRAP_LEN)
    }

    /// Create a wrap-if-long block with a custom threshold.
    ///
    /// # Errors
    ///
    /// Returns [`BlockUsageError`] if `elements` is empty.
    pub fn with_wrap_len(
        elements: Vec<Rc<dyn Block>>,
        wrap_len: usize,
    ) -> Result<Self, BlockUsageError> {
        if elements.len() >= wrap_len {
            Ok(WrapIfLongBlock::Wrapped(WrapBlock::new(elements)?))
        } else {
            Ok(WrapIfLongBlock::Joined(JoinedLineBlock::new(elements)?))
        }
    }
}

impl Block for WrapIfLongBlock {
    fn is_breaking(&self) -> bool {
        match self {
            WrapIfLongBlock::Wrapped(b) => b.is_breaking(),
            WrapIfLongBlock::Joined(b) => b.is_breaking(),
        }
    }

    fn opt_layout(&self, rest_of_line: Option<&Rc<Solution>>, options: &Options) -> Rc<Solution> {
        match self {
            WrapIfLongBlock::Wrapped(b) => b.opt_layout(rest_of_line, options),
            WrapIfLongBlock::Joined(b) => b.opt_layout(rest_of_line, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TextBlock;

    #[test]
    fn joined_line_block_matches_the_distilled_example() {
        let block = JoinedLineBlock::new(vec![
            Rc::new(TextBlock::breaking("hello")),
            Rc::new(TextBlock::new("world")),
            Rc::new(TextBlock::new("!")),
        ])
        .unwrap();
        assert_eq!(block.render(&Options::new()).unwrap(), "hello\nworld !");
    }

    #[test]
    fn indented_adds_leading_spaces_on_its_own_line() {
        let block = indented(Rc::new(TextBlock::new("x")), 2);
        assert_eq!(block.render(&Options::new()).unwrap(), "  x");
    }

    #[test]
    fn wrap_if_long_falls_back_below_the_threshold() {
        let elements: Vec<Rc<dyn Block>> = vec![
            Rc::new(TextBlock::new("a")),
            Rc::new(TextBlock::new("b")),
        ];
        let block = WrapIfLongBlock::new(elements).unwrap();
        assert!(matches!(block, WrapIfLongBlock::Joined(_)));
        assert_eq!(block.render(&Options::new()).unwrap(), "a b");
    }

    #[test]
    fn wrap_if_long_wraps_at_the_threshold() {
        let elements: Vec<Rc<dyn Block>> = vec![
            Rc::new(TextBlock::new("a")),
            Rc::new(TextBlock::new("b")),
            Rc::new(TextBlock::new("c")),
        ];
        let block = WrapIfLongBlock::new(elements).unwrap();
        assert!(matches!(block, WrapIfLongBlock::Wrapped(_)));
    }

    #[test]
    fn conditional_joined_line_block_omits_space_around_punctuation() {
        let elements = [
            TextBlock::new("foo"),
            TextBlock::new(","),
            TextBlock::new("bar"),
        ];
        let mut no_space_left: HashSet<char> = HashSet::new();
        no_space_left.insert(',');
        let block = ConditionalJoinedLineBlock::new(
            &elements,
            " ",
            &no_space_left,
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(block.render(&Options::new()).unwrap(), "foo, bar");
    }

    #[test]
    fn optionally_indented_prefers_the_inline_branch_when_it_fits() {
        let prefix: Rc<dyn Block> = Rc::new(TextBlock::new("("));
        let content: Rc<dyn Block> = Rc::new(TextBlock::new("x"));
        let suffix: Rc<dyn Block> = Rc::new(TextBlock::new(")"));
        let block = optionally_indented(prefix, content, suffix, 2).unwrap();
        assert_eq!(block.render(&Options::new()).unwrap(), "(x)");
    }

    #[test]
    fn joined_stack_block_appends_separator_except_last() {
        let block = JoinedStackBlock::new(
            vec![
                Rc::new(TextBlock::new("a")),
                Rc::new(TextBlock::new("b")),
                Rc::new(TextBlock::new("c")),
            ],
            ",",
        )
        .unwrap();
        assert_eq!(block.render(&Options::new()).unwrap(), "a,\nb,\nc");
    }
}
