use crate::error::GameError;
use crate::types::{GameRecord, Headers, MoveList};

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Collects every tag, then replays the mainline against a board so that
/// each SAN token is resolved to a legal move. Variations, comments and
/// NAGs are ignored. One `GameRecord` is produced per game.
#[derive(Debug, Default)]
pub struct GameVisitor;

/// Movetext state while a game's mainline is being read.
pub struct GameInProgress {
    headers: Headers,
    start: Chess,
    position: Chess,
    moves: MoveList,
    parse_error: Option<GameError>,
}

impl GameVisitor {
    pub fn new() -> Self {
        Self
    }

    /// Chess960 games name their rooks by file (`HFhf`), which standard
    /// castling rules reject.
    fn castling_mode(headers: &Headers) -> CastlingMode {
        let is_960 = headers.get("Variant").is_some_and(|variant| {
            let variant = variant.to_ascii_lowercase();
            variant.contains("960") || variant.contains("fischerandom")
        });

        if is_960 {
            CastlingMode::Chess960
        } else {
            CastlingMode::Standard
        }
    }

    fn setup_position(fen: &str, mode: CastlingMode) -> Result<Chess, GameError> {
        let fen = fen.trim();
        let invalid = |reason: String| GameError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        Fen::from_ascii(fen.as_bytes())
            .map_err(|e| invalid(e.to_string()))?
            .into_position::<Chess>(mode)
            .map_err(|e| invalid(e.to_string()))
    }
}

impl Visitor for GameVisitor {
    type Tags = Headers;
    type Movetext = GameInProgress;
    type Output = GameRecord;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Headers::default())
    }

    fn tag(
        &mut self,
        headers: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        headers.insert(
            String::from_utf8_lossy(key).into_owned(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, headers: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let mut parse_error = None;

        let start = match headers.get("FEN") {
            Some(fen) => Self::setup_position(fen, Self::castling_mode(&headers))
                .unwrap_or_else(|err| {
                    parse_error = Some(err);
                    Chess::default()
                }),
            None => Chess::default(),
        };

        ControlFlow::Continue(GameInProgress {
            headers,
            position: start.clone(),
            start,
            moves: MoveList::new(),
            parse_error,
        })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, game: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        // The rest of the mainline is meaningless once a move fails.
        if game.parse_error.is_some() {
            return ControlFlow::Continue(());
        }

        match san_plus.san.to_move(&game.position) {
            Ok(m) => {
                game.position.play_unchecked(m.clone());
                game.moves.push(m);
            }
            Err(e) => {
                game.parse_error = Some(GameError::IllegalMove {
                    san: san_plus.to_string(),
                    ply: game.moves.len() + 1,
                    reason: e.to_string(),
                });
            }
        }

        ControlFlow::Continue(())
    }

    fn end_game(&mut self, game: Self::Movetext) -> Self::Output {
        let GameInProgress {
            headers,
            start,
            moves,
            parse_error,
            ..
        } = game;

        GameRecord {
            headers,
            start,
            moves,
            parse_error,
        }
    }
}
