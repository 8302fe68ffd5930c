//! Farm description reader
//!
//! ```text
//! 3
//! ##start
//! start 0 0
//! mid 1 0
//! ##end
//! end 2 0
//! start-mid
//! mid-end
//! ```
//!
//! The first meaningful line is the number of ants, then room declarations
//! (`name x y`), then tunnels (`a-b`). `##start` and `##end` mark the room
//! declared on the next line. Other `#` lines are comments.

use crate::error::{FarmError, ParseError};
use crate::farm::{Farm, FarmBuilder, RoomId};

/// Marker attached to the next room declaration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Start,
    End,
}

impl Command {
    fn from_line(line: &str) -> Option<Self> {
        match line {
            "##start" => Some(Command::Start),
            "##end" => Some(Command::End),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Command::Start => "##start",
            Command::End => "##end",
        }
    }
}

/// Parse a complete farm description
pub fn parse_farm(input: &str) -> Result<Farm, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.is_empty())
        .filter(|(_, line)| !line.starts_with('#') || line.starts_with("##"));

    let (line, text) = lines.next().ok_or(ParseError::Empty)?;
    let ants = parse_ant_count(line, text)?;
    let mut builder = FarmBuilder::new(ants);

    let mut pending: Option<(usize, Command)> = None;
    let mut tunnels_started = false;

    for (line, text) in lines {
        if text.starts_with("##") {
            if let Some((_, command)) = pending {
                return Err(ParseError::MissingCommandTarget {
                    line,
                    command: command.as_str().to_string(),
                });
            }
            // unknown commands are ignored
            pending = Command::from_line(text).map(|command| (line, command));
            continue;
        }

        if text.contains('-') && !text.contains(char::is_whitespace) {
            if let Some((_, command)) = pending {
                return Err(ParseError::MissingCommandTarget {
                    line,
                    command: command.as_str().to_string(),
                });
            }
            tunnels_started = true;
            parse_tunnel(&mut builder, line, text)?;
            continue;
        }

        if tunnels_started {
            continue;
        }

        let id = parse_room(&mut builder, line, text)?;
        if let Some((_, command)) = pending.take() {
            let marked = match command {
                Command::Start => builder.set_start(id),
                Command::End => builder.set_end(id),
            };
            marked.map_err(|source| ParseError::Farm { line, source })?;
        }
    }

    if let Some((line, command)) = pending {
        return Err(ParseError::MissingCommandTarget {
            line,
            command: command.as_str().to_string(),
        });
    }

    Ok(builder.build()?)
}

fn parse_ant_count(line: usize, text: &str) -> Result<usize, ParseError> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err(ParseError::Farm {
            line,
            source: FarmError::InvalidAntCount(0),
        }),
        Ok(ants) => Ok(ants),
        Err(_) => Err(ParseError::InvalidAntCount {
            line,
            text: text.to_string(),
        }),
    }
}

fn parse_room(builder: &mut FarmBuilder, line: usize, text: &str) -> Result<RoomId, ParseError> {
    let invalid = || ParseError::InvalidRoom {
        line,
        text: text.to_string(),
    };

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [name, x, y] = parts[..] else {
        return Err(invalid());
    };
    let x = x.parse::<i64>().map_err(|_| invalid())?;
    let y = y.parse::<i64>().map_err(|_| invalid())?;

    builder
        .add_room(name, x, y)
        .map_err(|source| ParseError::Farm { line, source })
}

fn parse_tunnel(builder: &mut FarmBuilder, line: usize, text: &str) -> Result<(), ParseError> {
    let parts: Vec<&str> = text.split('-').collect();
    let [a, b] = parts[..] else {
        return Err(ParseError::InvalidTunnel {
            line,
            text: text.to_string(),
        });
    };

    builder
        .add_tunnel(a, b)
        .map_err(|source| ParseError::Farm { line, source })
}

// ============================================================================
// TESTS
// ============================================================================
