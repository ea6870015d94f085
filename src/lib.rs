//! `blockprint` lays out structured, nested text under a two-margin cost model instead of a
//! single hard wrap column.
//!
//! A document is assembled as a tree of [`Block`](block::Block)s — text leaves, verbatim
//! leaves, and composites that join, stack, choose between, or wrap their children — and the
//! optimizer finds the rendering of that tree with the lowest total cost under an [`Options`]
//! value. Cost grows linearly past a soft margin and more steeply past a hard margin, so a line
//! that barely overflows the soft margin is preferred over one that breaks unnecessarily early,
//! while a line that would blow through the hard margin is avoided whenever a break is cheaper.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use blockprint::block::{Block, LineBlock, StackBlock, TextBlock};
//! use blockprint::Options;
//!
//! let greeting = StackBlock::new(vec![
//!     Rc::new(TextBlock::new("hello")) as Rc<dyn Block>,
//!     Rc::new(LineBlock::new(vec![
//!         Rc::new(TextBlock::new("world")),
//!         Rc::new(TextBlock::new("!")),
//!     ]).unwrap()),
//! ])
//! .unwrap();
//!
//! assert_eq!(greeting.render(&Options::new()).unwrap(), "hello\nworld !");
//! ```
//!
//! # Architecture
//!
//! - [`solution`] defines the cost-function algebra ([`solution::Solution`]) that every block
//!   composes from its children's solutions.
//! - [`block`] defines the block tree itself: the [`block::Block`] trait and its six concrete
//!   kinds ([`block::TextBlock`], [`block::VerbBlock`], [`block::LineBlock`],
//!   [`block::StackBlock`], [`block::ChoiceBlock`], [`block::WrapBlock`]).
//! - [`helpers`] builds convenience constructors (indentation, conditional joining, wrap-if-long
//!   runs of elements) out of the primitives in [`block`].
//! - [`layout`] is the printable output of the optimizer: a flat sequence of text and newline
//!   elements, independent of how it was derived.
//! - [`options`] and [`error`] hold the cost parameters and the two error types a malformed
//!   tree or `Options` value can produce.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod block;
pub mod error;
pub mod helpers;
pub mod layout;
pub mod options;
pub mod solution;

pub use error::{BlockUsageError, ConfigurationError};
pub use options::Options;
