use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::{GameState, Player};
use crate::error::Error;

/// Scores a position from the perspective of `player`; larger is better for `player`.
///
/// Implementations must be deterministic and free of side effects, the search relies on repeated calls on the
/// same position giving the same score. Plain functions and closures are evaluators too.
pub trait Evaluate<S: GameState> {
    fn score(&self, state: &S, player: Player) -> f64;
}

impl<S, F> Evaluate<S> for F
where
    S: GameState,
    F: Fn(&S, Player) -> f64,
{
    fn score(&self, state: &S, player: Player) -> f64 {
        self(state, player)
    }
}

/*====================================================================================================================*/

const DEFAULT_OPPONENT_WEIGHT: f64 = 3.0;
const DEFAULT_PENALTY_CAP: f64 = 4.0;

fn default_opponent_weight() -> f64 {
    DEFAULT_OPPONENT_WEIGHT
}

fn default_penalty_cap() -> f64 {
    DEFAULT_PENALTY_CAP
}

/// The mobility heuristics: functions of own mobility `O`, opponent mobility `P` and ply count `D`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Heuristic {
    /// `O - P`
    OwnMobilityMinusOpponent,
    /// `O`
    OwnMobilityOnly,
    /// `O - weight * P`
    OpponentPenalized {
        #[serde(default = "default_opponent_weight")]
        weight: f64,
    },
    /// `O - D * P`
    PlyScaledPenalty,
    /// `O - max(1, cap - D) * P`
    LateGameCappedPenalty {
        #[serde(default = "default_penalty_cap")]
        cap: f64,
    },
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::OwnMobilityMinusOpponent,
        Heuristic::OwnMobilityOnly,
        Heuristic::OpponentPenalized {
            weight: DEFAULT_OPPONENT_WEIGHT,
        },
        Heuristic::PlyScaledPenalty,
        Heuristic::LateGameCappedPenalty {
            cap: DEFAULT_PENALTY_CAP,
        },
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::OwnMobilityMinusOpponent => "own_mobility_minus_opponent",
            Heuristic::OwnMobilityOnly => "own_mobility_only",
            Heuristic::OpponentPenalized { .. } => "opponent_penalized",
            Heuristic::PlyScaledPenalty => "ply_scaled_penalty",
            Heuristic::LateGameCappedPenalty { .. } => "late_game_capped_penalty",
        }
    }

    /// weight applied to the opponent's mobility at ply `ply_count`
    fn opponent_weight(&self, ply_count: u32) -> f64 {
        let ply_count = ply_count as f64;

        match *self {
            Heuristic::OwnMobilityMinusOpponent => 1.0,
            Heuristic::OwnMobilityOnly => 0.0,
            Heuristic::OpponentPenalized { weight } => weight,
            Heuristic::PlyScaledPenalty => ply_count,
            Heuristic::LateGameCappedPenalty { cap } => (cap - ply_count).max(1.0),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::OwnMobilityMinusOpponent
    }
}

impl<S: GameState> Evaluate<S> for Heuristic {
    fn score(&self, state: &S, player: Player) -> f64 {
        let own_mobility = state.mobility(player) as f64;

        if let Heuristic::OwnMobilityOnly = self {
            return own_mobility;
        }

        let opp_mobility = state.mobility(!player) as f64;

        own_mobility - self.opponent_weight(state.ply_count()) * opp_mobility
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::OpponentPenalized { weight } => write!(f, "{}({weight})", self.name()),
            Heuristic::LateGameCappedPenalty { cap } => write!(f, "{}({cap})", self.name()),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let heuristic = match s.trim() {
            "own_mobility_minus_opponent" | "baseline" => Heuristic::OwnMobilityMinusOpponent,
            "own_mobility_only" => Heuristic::OwnMobilityOnly,
            "opponent_penalized" | "opponent_penalized_3x" => Heuristic::OpponentPenalized {
                weight: DEFAULT_OPPONENT_WEIGHT,
            },
            "ply_scaled_penalty" => Heuristic::PlyScaledPenalty,
            "late_game_capped_penalty" => Heuristic::LateGameCappedPenalty {
                cap: DEFAULT_PENALTY_CAP,
            },
            other => return Err(Error::UnknownHeuristic(other.to_owned())),
        };

        Ok(heuristic)
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isolation::{Action, Isolation, Loc};

    // first player in the center (8 liberties), second player at `second`, first player to move at ply 2
    fn position(second: Loc) -> Isolation {
        Isolation::new()
            .result(Action::Place(Loc::new(4, 5)))
            .result(Action::Place(second))
    }

    #[test]
    fn test_formulas() {
        let state = position(Loc::new(4, 1));

        assert_eq!(state.mobility(Player::First), 8);
        assert_eq!(state.mobility(Player::Second), 6);

        let score = |heuristic: Heuristic| heuristic.score(&state, Player::First);

        assert_eq!(score(Heuristic::OwnMobilityMinusOpponent), 2.0);
        assert_eq!(score(Heuristic::OwnMobilityOnly), 8.0);
        assert_eq!(score(Heuristic::OpponentPenalized { weight: 3.0 }), 8.0 - 18.0);
        assert_eq!(score(Heuristic::PlyScaledPenalty), 8.0 - 2.0 * 6.0);
        assert_eq!(score(Heuristic::LateGameCappedPenalty { cap: 4.0 }), 8.0 - 2.0 * 6.0);
    }

    #[test]
    fn test_perspective_is_the_given_player() {
        let state = position(Loc::new(4, 1));

        assert_eq!(Heuristic::OwnMobilityMinusOpponent.score(&state, Player::Second), -2.0);
        assert_eq!(Heuristic::OwnMobilityOnly.score(&state, Player::Second), 6.0);
    }

    #[test]
    fn test_capped_penalty_holds_at_one() {
        let heuristic = Heuristic::LateGameCappedPenalty { cap: 4.0 };

        assert_eq!(heuristic.opponent_weight(0), 4.0);
        assert_eq!(heuristic.opponent_weight(1), 3.0);
        assert_eq!(heuristic.opponent_weight(3), 1.0);
        assert_eq!(heuristic.opponent_weight(4), 1.0);
        assert_eq!(heuristic.opponent_weight(40), 1.0);
    }

    #[test]
    fn test_opponent_term_is_load_bearing() {
        // same own mobility, different opponent mobility
        let open_opponent = position(Loc::new(4, 1));
        let cornered_opponent = position(Loc::new(0, 0));

        assert_eq!(open_opponent.mobility(Player::First), cornered_opponent.mobility(Player::First));
        assert_ne!(open_opponent.mobility(Player::Second), cornered_opponent.mobility(Player::Second));

        let own_only = Heuristic::OwnMobilityOnly;
        let minus_opponent = Heuristic::OwnMobilityMinusOpponent;

        assert_eq!(
            own_only.score(&open_opponent, Player::First),
            own_only.score(&cornered_opponent, Player::First)
        );
        assert!(
            minus_opponent.score(&cornered_opponent, Player::First)
                > minus_opponent.score(&open_opponent, Player::First)
        );
    }

    #[test]
    fn test_closures_are_evaluators() {
        let state = position(Loc::new(0, 0));
        let constant = |_: &Isolation, _: Player| 42.0;

        assert_eq!(constant.score(&state, Player::First), 42.0);
    }

    #[test]
    fn test_parse_names() {
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.name().parse::<Heuristic>().unwrap(), heuristic);
        }

        assert_eq!(
            "opponent_penalized_3x".parse::<Heuristic>().unwrap(),
            Heuristic::OpponentPenalized { weight: 3.0 }
        );
        assert!(matches!(
            "aggressive".parse::<Heuristic>(),
            Err(Error::UnknownHeuristic(name)) if name == "aggressive"
        ));
    }

    #[test]
    fn test_deserialize_with_default_parameters() {
        let heuristic: Heuristic = serde_json::from_str(r#"{ "kind": "opponent_penalized" }"#).unwrap();
        assert_eq!(heuristic, Heuristic::OpponentPenalized { weight: 3.0 });

        let json = r#"{ "kind": "late_game_capped_penalty", "cap": 6.0 }"#;
        let heuristic: Heuristic = serde_json::from_str(json).unwrap();
        assert_eq!(heuristic, Heuristic::LateGameCappedPenalty { cap: 6.0 });
    }
}
