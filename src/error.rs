/// Why a game cannot be sampled.
///
/// Stored on the `GameRecord`; fatal run errors travel separately as
/// `Box<dyn Error>`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid FEN tag '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal move '{san}' at ply {ply}: {reason}")]
    IllegalMove {
        san: String,
        ply: usize,
        reason: String,
    },

    /// pgn-reader rejected the block (`InvalidData`).
    #[error("Parser-stage error: file='{file}'; game_index={game_index}; error={reason}")]
    Parser {
        file: String,
        game_index: usize,
        reason: String,
    },
}
