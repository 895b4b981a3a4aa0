//! Configuration options for Knot parsing.
//!
//! This module provides types to choose how strictly the grammar is applied:
//!
//! - [`ParseOptions`]: Main configuration struct
//! - [`GrammarVariant`]: Whether the extended enum rule is available
//! - [`SeparatorPolicy`]: Whether a collection may mix comma and whitespace separators
//!
//! The defaults are strict, which suits validating machine-generated output.
//! [`ParseOptions::lenient`] accepts everything the bare grammar accepts.
//!
//! ## Examples
//!
//! ```rust
//! use serde_knot::{parse_document_with_options, ParseOptions, SeparatorPolicy};
//!
//! // Strict by default: mixed separators are rejected
//! let strict = ParseOptions::new();
//! assert!(parse_document_with_options("xs [1, 2 3]", &strict).is_err());
//!
//! // Allow them explicitly
//! let options = ParseOptions::new().with_separators(SeparatorPolicy::Mixed);
//! assert!(parse_document_with_options("xs [1, 2 3]", &options).is_ok());
//! ```

/// Which grammar rules are enabled.
///
/// The extended variant adds the enum rule (`red|green|blue`). Documents
/// parse identically under both variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GrammarVariant {
    #[default]
    Standard,
    Extended,
}

/// How separators inside one collection may be combined.
///
/// # Examples
///
/// ```rust
/// use serde_knot::SeparatorPolicy;
///
/// assert_eq!(SeparatorPolicy::default(), SeparatorPolicy::Consistent);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeparatorPolicy {
    /// The first separator fixes the style for the rest of the collection.
    #[default]
    Consistent,
    /// Commas and whitespace may be mixed freely.
    Mixed,
}

/// Configuration options for Knot parsing.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{GrammarVariant, ParseOptions, SeparatorPolicy};
///
/// let options = ParseOptions::new()
///     .with_variant(GrammarVariant::Extended)
///     .with_separators(SeparatorPolicy::Mixed)
///     .with_line_breaks(false)
///     .with_empty_segments(true);
/// assert!(!options.require_line_breaks);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub variant: GrammarVariant,
    pub separators: SeparatorPolicy,
    /// Each datum must end at a newline or at the end of input.
    pub require_line_breaks: bool,
    /// Accept keys such as `a..b`, `a.` or the empty key.
    pub allow_empty_segments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            variant: GrammarVariant::default(),
            separators: SeparatorPolicy::default(),
            require_line_breaks: true,
            allow_empty_segments: false,
        }
    }
}

impl ParseOptions {
    /// Creates the default, strict options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert!(options.require_line_breaks);
    /// assert!(!options.allow_empty_segments);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept everything the bare grammar allows:
    /// mixed separators, datums separated by any whitespace and empty key
    /// segments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::{parse_document_with_options, ParseOptions};
    ///
    /// let doc = parse_document_with_options("a 1 b 2", &ParseOptions::lenient()).unwrap();
    /// assert_eq!(doc.len(), 2);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions {
            variant: GrammarVariant::Standard,
            separators: SeparatorPolicy::Mixed,
            require_line_breaks: false,
            allow_empty_segments: true,
        }
    }

    /// Creates strict options with the extended grammar enabled.
    #[must_use]
    pub fn extended() -> Self {
        ParseOptions {
            variant: GrammarVariant::Extended,
            ..Default::default()
        }
    }

    /// Sets the grammar variant.
    #[must_use]
    pub fn with_variant(mut self, variant: GrammarVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the collection separator policy.
    #[must_use]
    pub fn with_separators(mut self, separators: SeparatorPolicy) -> Self {
        self.separators = separators;
        self
    }

    /// Sets whether datums must be separated by line breaks.
    #[must_use]
    pub fn with_line_breaks(mut self, required: bool) -> Self {
        self.require_line_breaks = required;
        self
    }

    /// Sets whether empty key segments are accepted.
    #[must_use]
    pub fn with_empty_segments(mut self, allowed: bool) -> Self {
        self.allow_empty_segments = allowed;
        self
    }
}
