use clap::ValueEnum;
use sweeper_core::{FirstClick, GameConfig};

/// Preset board sizes offered at the start of every game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(9, 10),
            Self::Intermediate => GameConfig::new_unchecked(16, 40),
            Self::Advanced => GameConfig::new_unchecked(24, 99),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }

    /// Menu entry as typed by the player, `0` to `2`.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        Self::ALL.get(index).copied()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FirstClickArg {
    /// Never draw a mine under the first revealed cell
    #[default]
    Exclude,
    /// Move a mine found under the first revealed cell to the first free cell
    Relocate,
}

impl From<FirstClickArg> for FirstClick {
    fn from(arg: FirstClickArg) -> Self {
        match arg {
            FirstClickArg::Exclude => FirstClick::Exclude,
            FirstClickArg::Relocate => FirstClick::Relocate,
        }
    }
}
