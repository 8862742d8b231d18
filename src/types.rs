use crate::error::GameError;
use shakmaty::{Chess, Move};
use smallvec::SmallVec;

pub type MoveList = SmallVec<[Move; 128]>;

/// Tag pairs of one game in file order. A repeated name keeps its first
/// position but takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// One decoded game: tags, starting position and the legal mainline.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub headers: Headers,

    /// Initial position, or the one given by a `FEN` tag.
    pub start: Chess,
    pub moves: MoveList,

    /// Set when the game cannot be sampled (malformed block, illegal move,
    /// bad `FEN` tag).
    pub parse_error: Option<GameError>,
}

impl GameRecord {
    pub fn result(&self) -> Option<&str> {
        self.headers.get("Result")
    }

    pub fn termination(&self) -> Option<&str> {
        self.headers.get("Termination")
    }
}
