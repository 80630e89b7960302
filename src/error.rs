use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by filter parsing, evaluation, and system generation.
///
/// Empty results are *not* errors: a filter matching zero elements, or a
/// generation run producing zero systems, returns an empty `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The filter document is structurally malformed: not a JSON object,
    /// an operator object with more than one key, an unsupported operator,
    /// or a malformed `$or` combinator.
    #[error("invalid filter specification: {0}")]
    InvalidSpecification(String),

    /// A literal element list named a symbol that is not in the universe.
    #[error("unknown element symbol `{0}`")]
    UnknownElement(String),

    /// A filter referenced an attribute that elements do not have.
    #[error("unknown element attribute `{0}`")]
    UnknownAttribute(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidSpecification(msg.into())
    }
}
