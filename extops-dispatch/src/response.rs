//! Per-invocation response accumulation.
//!
//! Every dispatch owns exactly one builder: created before the handler
//! runs, drained into an immutable [`Response`] right after. Consuming
//! the builder in [`ResponseBuilder::finalize`] makes use-after-finalize
//! unrepresentable.

use extops_primitives::InvocationId;
use serde::{Deserialize, Serialize};

/// Mutable accumulator a handler writes its output into.
///
/// Lines render in append order. Flags are last-write-wins requests for
/// the external renderer to attach computed data (the live extension
/// list, the open pages) to the final payload; the dispatch layer records
/// the request but never computes that data itself.
#[derive(Debug)]
pub struct ResponseBuilder {
    invocation: InvocationId,
    lines: Vec<String>,
    list_extensions: bool,
    include_pages: bool,
}

impl ResponseBuilder {
    /// Creates a fresh builder for the supplied invocation.
    #[must_use]
    pub fn new(invocation: InvocationId) -> Self {
        Self {
            invocation,
            lines: Vec::new(),
            list_extensions: false,
            include_pages: false,
        }
    }

    /// Returns the invocation this builder belongs to.
    #[must_use]
    pub const fn invocation(&self) -> InvocationId {
        self.invocation
    }

    /// Appends one line of text to the response body.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Requests that the renderer attach the live extension list.
    pub fn set_list_extensions(&mut self) {
        self.list_extensions = true;
    }

    /// Requests (or withdraws the request) that the renderer attach the
    /// currently open pages.
    pub fn set_include_pages(&mut self, include: bool) {
        self.include_pages = include;
    }

    /// Drains the builder into an immutable response.
    ///
    /// Called exactly once, by the dispatcher. Taking `self` by value
    /// means no builder method can be called afterwards.
    #[must_use]
    pub fn finalize(self) -> Response {
        Response {
            invocation: self.invocation,
            lines: self.lines,
            list_extensions: self.list_extensions,
            include_pages: self.include_pages,
        }
    }
}

/// Immutable result of one tool invocation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Response {
    invocation: InvocationId,
    lines: Vec<String>,
    list_extensions: bool,
    include_pages: bool,
}

impl Response {
    /// Returns the invocation identifier.
    #[must_use]
    pub const fn invocation(&self) -> InvocationId {
        self.invocation
    }

    /// Returns the response lines in append order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` when the renderer should attach the extension list.
    #[must_use]
    pub const fn list_extensions(&self) -> bool {
        self.list_extensions
    }

    /// Returns `true` when the renderer should attach the open pages.
    #[must_use]
    pub const fn include_pages(&self) -> bool {
        self.include_pages
    }

    /// Joins the lines into a single text block.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_preserve_append_order() {
        let mut builder = ResponseBuilder::new(InvocationId::random());
        builder.push_line("a");
        builder.push_line("b");

        let response = builder.finalize();
        assert_eq!(response.lines(), ["a", "b"]);
        assert_eq!(response.text(), "a\nb");
    }

    #[test]
    fn flags_are_last_write_wins() {
        let mut builder = ResponseBuilder::new(InvocationId::random());
        builder.set_include_pages(true);
        builder.set_include_pages(true);
        builder.set_include_pages(false);
        builder.set_list_extensions();
        builder.set_list_extensions();

        let response = builder.finalize();
        assert!(!response.include_pages());
        assert!(response.list_extensions());
    }

    #[test]
    fn fresh_builder_starts_clean() {
        let response = ResponseBuilder::new(InvocationId::random()).finalize();
        assert!(response.lines().is_empty());
        assert!(!response.list_extensions());
        assert!(!response.include_pages());
    }
}
