// Errors raised while setting up a match

/// Match construction and routing errors
///
/// Nothing in the running simulation fails: stale handles and unsupported
/// actions are no-ops. These only surface from configuration and from input
/// addressed to a player that does not exist.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GameError {
    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Chunk pattern {pattern} has ragged rows: row {row} is {len} cells, expected {expected}")]
    RaggedPattern {
        pattern: usize,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Chunk pattern {0} has no cells")]
    EmptyPattern(usize),

    #[error("Chunk catalog is empty")]
    EmptyCatalog,

    #[error("Unknown player: {0}")]
    UnknownPlayer(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::UnknownPlayer(7);
        assert_eq!(err.to_string(), "Unknown player: 7");

        let err = GameError::RaggedPattern {
            pattern: 1,
            row: 2,
            len: 3,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "Chunk pattern 1 has ragged rows: row 2 is 3 cells, expected 4"
        );
    }
}
