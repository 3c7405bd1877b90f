use std::num::ParseIntError;

use sweeper_core::{Coord, Pos};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Pos),
    Flag(Pos),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please enter a move")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    UnknownCommand(String),
    #[error("Expected a row and a column")]
    MissingCoordinates,
    #[error("Unexpected input after the column: `{0}`")]
    TrailingInput(String),
    #[error("`{token}` is not a valid coordinate")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

pub const HELP: &str = "\
Commands:
  r ROW COL   reveal a cell (a bare `ROW COL` works too)
  f ROW COL   flag or unflag a cell
  h           show this help
  q           quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(CommandError::Empty);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            "r" | "reveal" => Self::Reveal(parse_pos(tokens.next(), tokens.next())?),
            "f" | "flag" => Self::Flag(parse_pos(tokens.next(), tokens.next())?),
            _ if first.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') => {
                Self::Reveal(parse_pos(Some(first), tokens.next())?)
            }
            _ => return Err(CommandError::UnknownCommand(first.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_pos(row: Option<&str>, col: Option<&str>) -> Result<Pos, CommandError> {
    match (row, col) {
        (Some(row), Some(col)) => Ok(Pos::new(parse_coord(row)?, parse_coord(col)?)),
        _ => Err(CommandError::MissingCoordinates),
    }
}

fn parse_coord(token: &str) -> Result<Coord, CommandError> {
    token
        .trim_end_matches(',')
        .parse()
        .map_err(|source| CommandError::InvalidNumber {
            token: token.to_owned(),
            source,
        })
}
