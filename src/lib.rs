pub mod config;
pub mod error;
pub mod log;
pub mod reader;
pub mod sampler;
pub mod types;
pub mod visitor;

use config::Config;
use reader::{PgnReaderState, ReadNextGameOutcome, open_input_stream, resolve_input_paths};
use sampler::{ExtractStats, Extractor};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::slice;

/// Opens the next readable input. With a single input a failure is fatal;
/// with several, unreadable files are reported and skipped.
fn acquire_reader(
    pending: &mut slice::Iter<'_, PathBuf>,
    single_input: bool,
) -> Result<Option<PgnReaderState>, Box<dyn Error>> {
    for path in pending {
        match open_input_stream(path) {
            Ok(input) => {
                return Ok(Some(PgnReaderState::new(
                    input,
                    path.display().to_string(),
                )));
            }
            Err(err_msg) => {
                if single_input {
                    return Err(err_msg.into());
                }

                log::warn(&err_msg);
            }
        }
    }

    Ok(None)
}

/// Feeds every game of one input to the extractor.
pub fn extract_all<W: Write>(
    reader: &mut PgnReaderState,
    extractor: &mut Extractor<W>,
) -> io::Result<()> {
    loop {
        let game_index = reader.next_game_index();

        match reader.read_next_game()? {
            ReadNextGameOutcome::GameReady(game) => {
                if let Some(parse_error) = &game.parse_error {
                    log::warn(format!(
                        "Skipping game: file='{}'; game_index={}; {}",
                        reader.source(),
                        game_index,
                        parse_error
                    ));
                }
                extractor.process_game(&game)?;
            }
            ReadNextGameOutcome::ReaderFinished => return Ok(()),
        }
    }
}

/// Runs one batch: every input matched by `config.input` is sampled into
/// `config.output`.
pub fn run(config: &Config) -> Result<ExtractStats, Box<dyn Error>> {
    let paths = resolve_input_paths(&config.input)?;
    let single_input = paths.len() == 1;
    let mut pending = paths.iter();

    // Open the first input before truncating the output.
    let mut current = acquire_reader(&mut pending, single_input)?;

    let output = File::create(&config.output).map_err(|e| {
        format!(
            "Failed to create output file '{}': {}",
            config.output.display(),
            e
        )
    })?;
    let mut extractor = Extractor::new(BufWriter::new(output));

    while let Some(mut reader) = current {
        extract_all(&mut reader, &mut extractor)?;
        current = acquire_reader(&mut pending, single_input)?;
    }

    let stats = extractor.finish()?;
    log::info(format!(
        "Read {} games: {} sampled, {} without result, {} malformed",
        stats.games_read, stats.games_sampled, stats.games_unknown_result, stats.games_malformed
    ));

    Ok(stats)
}
