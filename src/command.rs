//! Line-oriented driver: reads `<op><key>` pairs and answers `OK`/`FAIL`.
//!
//! Tokens follow stream-extraction rules over raw bytes: after skipping
//! whitespace one byte is taken as the command, then whitespace is skipped
//! again and the longest non-whitespace run is the key. `+ann` and `+ ann`
//! are the same request. Unknown commands consume their key and print
//! nothing. Keys are stored as bytes and need not be UTF-8.

use crate::table::DoubleHashSet;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Contains,
    Remove,
}

impl Command {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Command::Add),
            b'?' => Some(Command::Contains),
            b'-' => Some(Command::Remove),
            _ => None,
        }
    }

    pub fn apply(self, set: &mut DoubleHashSet<Vec<u8>>, key: &[u8]) -> bool {
        match self {
            Command::Add => set.add(key.to_vec()),
            Command::Contains => set.contains(key),
            Command::Remove => set.remove(key),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read commands: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write a reply: {0}")]
    Write(#[source] io::Error),
}

/// Counters reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub executed: usize,
    pub skipped: usize,
}

/// Scanner position between tokens. A command byte may sit at the end of
/// one line with its key on the next.
enum Pending {
    Command,
    Key(u8),
}

/// The C locale's `isspace` set; bytes outside it belong to tokens.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_space(b)).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Drive `set` with the requests in `input`, writing one reply per
/// recognised request to `output`. Output is flushed once, at end of input.
pub fn run<R, W>(
    mut input: R,
    mut output: W,
    set: &mut DoubleHashSet<Vec<u8>>,
) -> Result<RunStats, CommandError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = RunStats::default();
    let mut pending = Pending::Command;
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = input
            .read_until(b'\n', &mut line)
            .map_err(CommandError::Read)?;
        if n == 0 {
            break;
        }
        let mut rest = line.as_slice();
        loop {
            rest = skip_space(rest);
            let Some((&first, tail)) = rest.split_first() else {
                break;
            };
            match pending {
                Pending::Command => {
                    pending = Pending::Key(first);
                    rest = tail;
                }
                Pending::Key(c) => {
                    let end = rest.iter().position(|&b| is_space(b)).unwrap_or(rest.len());
                    let (key, tail) = rest.split_at(end);
                    rest = tail;
                    pending = Pending::Command;
                    match Command::from_byte(c) {
                        Some(cmd) => {
                            let ok = cmd.apply(set, key);
                            writeln!(output, "{}", if ok { "OK" } else { "FAIL" })
                                .map_err(CommandError::Write)?;
                            stats.executed += 1;
                        }
                        None => {
                            tracing::trace!(
                                command = c,
                                key = %String::from_utf8_lossy(key),
                                "skipping unknown command"
                            );
                            stats.skipped += 1;
                        }
                    }
                }
            }
        }
    }

    if let Pending::Key(c) = pending {
        tracing::trace!(command = c, "input ended before the key");
    }
    output.flush().map_err(CommandError::Write)?;
    Ok(stats)
}
