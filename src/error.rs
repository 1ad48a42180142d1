//! Voice Chess Error Types
//!
//! Centralized error handling for the library side of the game.

use thiserror::Error;

/// Central error type for Voice Chess
#[derive(Error, Debug)]
pub enum ChessError {
    #[error("ASR engine error: {0}")]
    Asr(String),

    #[error("Audio capture error: {0}")]
    Audio(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for Voice Chess operations
pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChessError::Asr("model missing".to_string());
        assert_eq!(err.to_string(), "ASR engine error: model missing");

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ChessError = io.into();
        assert_eq!(err.to_string(), "pipe closed");
    }
}
