use crate::types::GameRecord;

use shakmaty::fen::Fen;
use shakmaty::{EnPassantMode, Position};
use std::io::{self, Write};
use std::ops::Range;

/// Plies dropped from the end of a game that likely ran into a forced mate.
pub const FORCED_MATE_TAIL: usize = 7;
/// A draw longer than this is treated as a 50-move-rule shuffle.
pub const LONG_DRAW_PLIES: usize = 160;
/// Plies dropped from the end of such a long draw.
pub const LONG_DRAW_TAIL: usize = 25;
/// Opening plies replayed without sampling for draws.
pub const DRAW_HEAD: usize = 4;
/// Opening plies replayed without sampling for decisive games.
pub const DECISIVE_HEAD: usize = 10;

/// Game outcome as used for the training label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    White,
    Black,
    Draw,
    Unknown,
}

impl Label {
    /// Single-character code written after the FEN. `Unknown` has none.
    pub fn code(self) -> Option<char> {
        match self {
            Self::White => Some('w'),
            Self::Black => Some('b'),
            Self::Draw => Some('d'),
            Self::Unknown => None,
        }
    }
}

/// Classifies a PGN `Result` value by its first two characters.
pub fn classify(result: &str) -> Label {
    let mut chars = result.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), _) => Label::Black,
        (Some('1'), Some('-')) => Label::White,
        (Some('1'), Some('/')) => Label::Draw,
        _ => Label::Unknown,
    }
}

/// Decisive games without a `Termination` tag are assumed to have been
/// played out to mate rather than resigned, flagged or agreed.
pub fn ended_in_forced_mate(label: Label, game: &GameRecord) -> bool {
    if label == Label::Draw {
        return false;
    }

    !game.headers.contains("Termination")
}

/// Range of move indices that produce a record.
///
/// The tail cut is computed from the full move list first, the head
/// boundary is applied to what remains. An empty range is a valid result.
pub fn sample_window(label: Label, game: &GameRecord) -> Range<usize> {
    let total = game.moves.len();

    let end = if ended_in_forced_mate(label, game) {
        total.saturating_sub(FORCED_MATE_TAIL)
    } else if label == Label::Draw && total > LONG_DRAW_PLIES {
        total - LONG_DRAW_TAIL
    } else {
        total
    };

    let start = if label == Label::Draw {
        DRAW_HEAD
    } else {
        DECISIVE_HEAD
    };

    start.min(end)..end
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub games_read: usize,
    pub games_sampled: usize,
    pub games_unknown_result: usize,
    pub games_malformed: usize,
    /// Records written over the whole batch.
    pub positions: usize,
}

/// Writes `<FEN>,<label>` records for every sampled ply of each game.
pub struct Extractor<W: Write> {
    out: W,
    stats: ExtractStats,
    line: String,
}

impl<W: Write> Extractor<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stats: ExtractStats::default(),
            line: String::with_capacity(128),
        }
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    /// Samples one game and returns the number of records written.
    ///
    /// Malformed games and games without a known result are skipped and
    /// only show up in the statistics.
    pub fn process_game(&mut self, game: &GameRecord) -> io::Result<usize> {
        self.stats.games_read += 1;

        if game.parse_error.is_some() {
            self.stats.games_malformed += 1;
            return Ok(0);
        }

        let label = classify(game.result().unwrap_or_default());
        let Some(code) = label.code() else {
            self.stats.games_unknown_result += 1;
            return Ok(0);
        };

        let window = sample_window(label, game);
        let mut board = game.start.clone();

        for (idx, m) in game.moves[..window.end].iter().enumerate() {
            board.play_unchecked(m.clone());
            if idx < window.start {
                continue;
            }

            self.line.clear();
            self.line
                .push_str(&Fen::from_position(&board, EnPassantMode::Legal).to_string());
            self.line.push(',');
            self.line.push(code);
            self.line.push('\n');
            self.out.write_all(self.line.as_bytes())?;
        }

        let written = window.len();
        self.stats.games_sampled += 1;
        self.stats.positions += written;
        Ok(written)
    }

    /// Flushes the output and returns the final statistics.
    pub fn finish(mut self) -> io::Result<ExtractStats> {
        self.out.flush()?;
        Ok(self.stats)
    }
}
