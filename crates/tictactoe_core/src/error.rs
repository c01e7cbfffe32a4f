//! Error types for move selection.

use derive_more::{Display, Error};

/// What went wrong while choosing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AiErrorKind {
    /// Every cell is occupied.
    #[display("No valid moves available")]
    NoValidMoves,
}

/// Move selection error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("AI error: {} at {}:{}", kind, file, line)]
pub struct AiError {
    /// Error kind.
    pub kind: AiErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AiError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(kind: AiErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`AiErrorKind::NoValidMoves`].
    #[track_caller]
    pub fn no_valid_moves() -> Self {
        Self::new(AiErrorKind::NoValidMoves)
    }
}
