use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// A chunk after the first header did not start with a header.
    #[error("entry does not start with a log header: '{line}'")]
    Desync { line: String },
}
