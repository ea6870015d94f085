//! The concrete, printable output of the layout optimizer.

/// A single printable element of a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutElement {
    /// Literal text, emitted as-is.
    Text(String),
    /// A line break followed by `indent` leading spaces.
    ///
    /// The optimizer itself never produces a nonzero indent here (see the design notes on why
    /// indentation is realized through literal leading-space [`Text`](LayoutElement::Text)
    /// elements instead); the field exists because a caller assembling a `Layout` by hand is
    /// free to use it.
    NewLine(usize),
}

/// An ordered sequence of [`LayoutElement`]s; the printable result of laying out a block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout(Vec<LayoutElement>);

impl Layout {
    /// An empty layout.
    #[must_use]
    pub fn new() -> Self {
        Layout(Vec::new())
    }

    /// A layout consisting of a single [`LayoutElement::Text`] element.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Layout(vec![LayoutElement::Text(s.into())])
    }

    /// The elements of this layout.
    #[must_use]
    pub fn elements(&self) -> &[LayoutElement] {
        &self.0
    }

    /// Append another layout's elements to this one, consuming both.
    #[must_use]
    pub fn concat(mut self, other: Layout) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Append a single element.
    pub fn push(&mut self, element: LayoutElement) {
        self.0.push(element);
    }

    /// Render this layout to a string, starting at column 0.
    ///
    /// This is the external writer described in the top-level rendering design: `Text(s)`
    /// appends `s` and `NewLine(i)` emits `\n` followed by `i` spaces.
    #[must_use]
    pub fn to_string_at_start(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out)
            .expect("writing to a String never fails");
        out
    }

    /// Write this layout's elements to any [`std::fmt::Write`] sink.
    pub fn write_to(&self, sink: &mut dyn std::fmt::Write) -> std::fmt::Result {
        for element in &self.0 {
            match element {
                LayoutElement::Text(s) => sink.write_str(s)?,
                LayoutElement::NewLine(indent) => {
                    sink.write_char('\n')?;
                    for _ in 0..*indent {
                        sink.write_char(' ')?;
                    }
                }
            }
        }
        Ok(())
    }
}
