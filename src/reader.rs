use crate::error::GameError;
use crate::log;
use crate::types::GameRecord;
use crate::visitor::GameVisitor;

use pgn_reader::Reader;
use std::error::Error;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    /// Picks the decoder from the file extension; only `.zst` is compressed.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Expands the input argument into the list of files to read.
///
/// A plain path is used as is (opening it reports a missing file). A glob
/// pattern must match at least one path.
pub fn resolve_input_paths(pattern: &str) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !is_glob_pattern(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut paths: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(format!("No input files match '{}'", pattern).into());
    }

    Ok(paths)
}

pub fn wrap_input<R>(input: R, compression: CompressionMode) -> io::Result<PgnInput>
where
    R: Read + Send + 'static,
{
    match compression {
        CompressionMode::Plain => Ok(Box::new(input)),
        CompressionMode::Zstd => {
            ZstdDecoder::new(input).map(|decoder| Box::new(decoder) as PgnInput)
        }
    }
}

pub fn open_input_stream(path: &Path) -> Result<PgnInput, String> {
    let file =
        File::open(path).map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    // pgn-reader buffers internally, so no BufReader here.
    wrap_input(file, CompressionMode::from_path(path)).map_err(|e| {
        format!(
            "Failed to initialize zstd decoder for '{}': {}",
            path.display(),
            e
        )
    })
}

pub enum ReadNextGameOutcome {
    GameReady(GameRecord),
    ReaderFinished,
}

/// Streaming state for one input file.
pub struct PgnReaderState {
    pgn_reader: Reader<PgnInput>,
    visitor: GameVisitor,
    source: String,
    next_game_index: usize,
}

impl PgnReaderState {
    pub fn new(input: PgnInput, source: impl Into<String>) -> Self {
        Self {
            pgn_reader: Reader::new(input),
            visitor: GameVisitor::new(),
            source: source.into(),
            next_game_index: 1,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 1-based index of the game the next call will return.
    pub fn next_game_index(&self) -> usize {
        self.next_game_index
    }

    /// Reads the next game.
    ///
    /// A malformed block (`InvalidData`) is returned as a record with
    /// `parse_error` set so the caller can skip it and keep going. Any other
    /// I/O error is returned as is.
    pub fn read_next_game(&mut self) -> io::Result<ReadNextGameOutcome> {
        let game_index = self.next_game_index;

        match self.pgn_reader.read_game(&mut self.visitor) {
            Ok(Some(game)) => {
                self.next_game_index += 1;
                Ok(ReadNextGameOutcome::GameReady(game))
            }
            Ok(None) => Ok(ReadNextGameOutcome::ReaderFinished),
            Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                self.next_game_index += 1;
                Ok(ReadNextGameOutcome::GameReady(GameRecord {
                    parse_error: Some(GameError::Parser {
                        file: self.source.clone(),
                        game_index,
                        reason: error.to_string(),
                    }),
                    ..GameRecord::default()
                }))
            }
            Err(error) => {
                log::error(format!(
                    "Read failed: file='{}'; game_index={}; error={}",
                    self.source, game_index, error
                ));
                Err(error)
            }
        }
    }
}
