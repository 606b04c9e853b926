//! Game rule configuration

use serde::{Deserialize, Serialize};

/// The overall game variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Standard mode: the hunt cycle never degenerates into two players
    /// hunting each other; a report that would require mutual-hunt rewiring
    /// is a rule violation.
    #[default]
    Gotcha,
    /// Variant where two remaining players may hunt each other and the
    /// mutual pair resolves normally.
    Vendetta,
}

impl GameMode {
    pub fn allows_mutual_hunts(&self) -> bool {
        matches!(self, GameMode::Vendetta)
    }
}

/// How the initial hunting order is drawn.
///
/// Both modes produce the same structural guarantee (a single cycle over all
/// players with no self-assignment); they only differ in which random stream
/// orders the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AssignmentMode {
    /// Shuffle the roster with the game's own RNG stream.
    #[default]
    Sequential,
    /// Shuffle with an independent stream derived from the game's RNG.
    Random,
}

/// Per-game rule switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rules {
    pub game_mode: GameMode,

    /// When set, every hunting edge carries a weapon drawn from a pool
    /// supplied at start, and every kill report must name a weapon.
    pub custom_weapons: bool,

    pub assignment_mode: AssignmentMode,
}

impl Rules {
    pub fn new(game_mode: GameMode) -> Self {
        Rules {
            game_mode,
            ..Rules::default()
        }
    }

    pub fn with_custom_weapons(mut self) -> Self {
        self.custom_weapons = true;
        self
    }

    pub fn with_assignment_mode(mut self, mode: AssignmentMode) -> Self {
        self.assignment_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = Rules::default();
        assert_eq!(rules.game_mode, GameMode::Gotcha);
        assert!(!rules.custom_weapons);
        assert_eq!(rules.assignment_mode, AssignmentMode::Sequential);
    }

    #[test]
    fn test_mutual_hunts_per_mode() {
        assert!(!GameMode::Gotcha.allows_mutual_hunts());
        assert!(GameMode::Vendetta.allows_mutual_hunts());
    }

    #[test]
    fn test_builder_style() {
        let rules = Rules::new(GameMode::Vendetta)
            .with_custom_weapons()
            .with_assignment_mode(AssignmentMode::Random);
        assert!(rules.custom_weapons);
        assert_eq!(rules.assignment_mode, AssignmentMode::Random);
    }
}
