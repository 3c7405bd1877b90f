use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweeper_core::{
    Board, FirstClick, GamePhase, MarkOutcome, MineGenerator, RandomMineGenerator, RevealOutcome,
};

use crate::input::{Command, HELP};
use crate::render::BoardView;
use crate::settings::Difficulty;

#[derive(Copy, Clone, Debug)]
pub struct SessionOptions {
    /// Fixed preset, the player is asked before every game otherwise.
    pub difficulty: Option<Difficulty>,
    pub first_click: FirstClick,
    pub color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum GameEnd {
    Finished(GamePhase),
    Quit,
}

/// Interactive loop: difficulty selection, one game at a time, replay prompt.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
    seeds: SmallRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions, seed: u64) -> Self {
        Self {
            input,
            output,
            options,
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        while let Some(difficulty) = self.choose_difficulty()? {
            match self.play(difficulty)? {
                GameEnd::Quit => break,
                GameEnd::Finished(phase) => log::info!("game finished: {:?}", phase),
            }
            if !self.ask_replay()? {
                break;
            }
        }
        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn play(&mut self, difficulty: Difficulty) -> io::Result<GameEnd> {
        let seed: u64 = self.seeds.random();
        log::info!("new {} game, seed {}", difficulty.label(), seed);

        let generator = RandomMineGenerator::from_seed(seed, self.options.first_click);
        self.play_on(Board::new(difficulty.config(), generator))
    }

    fn play_on<G: MineGenerator>(&mut self, mut board: Board<G>) -> io::Result<GameEnd> {
        loop {
            writeln!(self.output, "\nCurrent Status of Board:")?;
            write!(self.output, "{}", BoardView::new(&board, self.options.color))?;

            let Some(line) = self.prompt("Enter your move (r|f ROW COL) -> ")? else {
                return Ok(GameEnd::Quit);
            };
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };

            let result = match command {
                Command::Quit => return Ok(GameEnd::Quit),
                Command::Help => {
                    writeln!(self.output, "{}", HELP)?;
                    continue;
                }
                Command::Reveal(pos) => board.reveal(pos).map(|outcome| match outcome {
                    RevealOutcome::Revealed { cells } if cells > 1 => {
                        format!("Opened {} cells", cells)
                    }
                    _ => String::new(),
                }),
                Command::Flag(pos) => board.toggle_flag(pos).map(|outcome| match outcome {
                    MarkOutcome::Flagged => format!("Flagged {}", pos),
                    MarkOutcome::Unflagged => format!("Removed flag from {}", pos),
                }),
            };
            match result {
                Ok(message) if message.is_empty() => {}
                Ok(message) => writeln!(self.output, "{}", message)?,
                Err(err) => writeln!(self.output, "{}", err)?,
            }

            if board.is_finished() {
                let phase = board.phase();
                let banner = if phase == GamePhase::Won {
                    "You won!"
                } else {
                    "You lost!"
                };
                writeln!(self.output, "\n{}", banner)?;
                write!(self.output, "{}", BoardView::new(&board, self.options.color))?;
                return Ok(GameEnd::Finished(phase));
            }
        }
    }

    fn choose_difficulty(&mut self) -> io::Result<Option<Difficulty>> {
        if let Some(difficulty) = self.options.difficulty {
            return Ok(Some(difficulty));
        }

        writeln!(self.output, "Enter the Difficulty Level")?;
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let config = difficulty.config();
            writeln!(
                self.output,
                "{} for {} ({}x{}, {} Mines)",
                i,
                difficulty.label(),
                config.side,
                config.side,
                config.mines
            )?;
        }

        loop {
            let Some(line) = self.prompt("-> ")? else {
                return Ok(None);
            };
            match Difficulty::from_menu_choice(&line) {
                Some(difficulty) => return Ok(Some(difficulty)),
                None => writeln!(self.output, "Invalid choice `{}`, enter 0, 1 or 2", line.trim())?,
            }
        }
    }

    fn ask_replay(&mut self) -> io::Result<bool> {
        loop {
            let Some(line) = self.prompt("Play again? (y/n) -> ")? else {
                return Ok(false);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n")?,
            }
        }
    }

    /// Prints `text` and reads one line, `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line))
    }
}
