use std::io;

use clap::Parser;

use crate::session::{Session, SessionOptions};
use crate::settings::{Difficulty, FirstClickArg};

mod input;
mod render;
mod session;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, asked for before every game when omitted
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How the first revealed cell is kept safe
    #[arg(long, value_enum, default_value_t)]
    first_click: FirstClickArg,

    /// Print the board without colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let options = SessionOptions {
        difficulty: args.difficulty,
        first_click: args.first_click.into(),
        color: !args.no_color,
    };
    Session::new(io::stdin().lock(), io::stdout().lock(), options, seed).run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "sweeper",
            "--difficulty",
            "intermediate",
            "--seed",
            "12",
            "--first-click",
            "relocate",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.difficulty, Some(Difficulty::Intermediate));
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.first_click, FirstClickArg::Relocate);
        assert!(!args.no_color);
    }
}
