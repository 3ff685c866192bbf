use crate::board::Board;
use crate::roll::DiceRoll;
use rand::seq::SliceRandom;
use rand::Rng;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
pub enum StrategyError {
    Unknown(String),
}

impl Error for StrategyError {}
impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrategyError::Unknown(name) => write!(f, "unknown strategy {:?}", name),
        }
    }
}

/// Target-selection policy for a turn. A closed set of variants sharing one
/// capability: pick a target from the current roll and board, or None when
/// nothing rollable can still move. Randomness comes in through the caller's
/// RNG, keeping seeded games reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Picks uniformly among valid targets.
    Random,
    /// Scores each valid target by potential moves times remaining distance,
    /// favoring big moves on pegs far from the top.
    Greedy,
    /// Like Greedy but a target that would finish its peg outranks raw move
    /// count.
    FinishFirst,
}

pub const STRATEGY_NAMES: [&str; 3] = ["random", "greedy", "finish-first"];

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => STRATEGY_NAMES[0],
            Strategy::Greedy => STRATEGY_NAMES[1],
            Strategy::FinishFirst => STRATEGY_NAMES[2],
        }
    }

    /// Choose a target for this turn. Only returns targets that the roll can
    /// make and whose peg can still move.
    pub fn choose_target<R: Rng>(
        &self,
        board: &Board,
        roll: &DiceRoll,
        rng: &mut R,
    ) -> Option<u8> {
        let available = roll.available_targets();
        match self {
            Strategy::Random => {
                let valid: Vec<u8> = available
                    .keys()
                    .cloned()
                    .filter(|&t| board.is_peg_movable(t))
                    .collect();
                valid.choose(rng).cloned()
            }
            Strategy::Greedy => {
                let mut best: Option<(u8, u32)> = None;
                for (&target, &count) in available.iter() {
                    let peg = match board.get_peg(target) {
                        Some(peg) if !peg.is_at_top() => peg,
                        _ => continue,
                    };
                    let remaining = (peg.max_position() - peg.position()) as u32;
                    let score = count as u32 * remaining;
                    // strict > keeps the first-seen target on ties, in
                    // ascending target order
                    if best.map_or(true, |(_, s)| score > s) {
                        best = Some((target, score));
                    }
                }
                best.map(|(target, _)| target)
            }
            Strategy::FinishFirst => {
                let mut best: Option<(u8, u32)> = None;
                for (&target, &count) in available.iter() {
                    let peg = match board.get_peg(target) {
                        Some(peg) if !peg.is_at_top() => peg,
                        _ => continue,
                    };
                    let finishes = peg.position().saturating_add(count) >= peg.max_position();
                    let bonus = if finishes { peg.max_position() as u32 } else { 0 };
                    let score = count as u32 + bonus;
                    if best.map_or(true, |(_, s)| score > s) {
                        best = Some((target, score));
                    }
                }
                best.map(|(target, _)| target)
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "greedy" => Ok(Strategy::Greedy),
            "finish-first" => Ok(Strategy::FinishFirst),
            _ => Err(StrategyError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Strategy, StrategyError};
    use crate::board::Board;
    use crate::global::BOARD_HEIGHT;
    use crate::roll::DiceRoll;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roll(values: &[u8]) -> DiceRoll {
        DiceRoll::new(values.to_vec()).unwrap()
    }

    fn all_strategies() -> [Strategy; 3] {
        [Strategy::Random, Strategy::Greedy, Strategy::FinishFirst]
    }

    #[test]
    fn from_str_roundtrip() {
        for s in all_strategies().iter() {
            assert_eq!(s.name().parse::<Strategy>().unwrap(), *s);
        }
        assert_eq!(
            "nonsense".parse::<Strategy>(),
            Err(StrategyError::Unknown("nonsense".to_string()))
        );
    }

    #[test]
    fn only_valid_targets() {
        // everything but peg 3 is finished; only rolls containing a 3 can
        // yield a target
        let mut board = Board::new();
        for n in (1..=12).filter(|&n| n != 3) {
            board.move_peg(n, BOARD_HEIGHT).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(5);
        for s in all_strategies().iter() {
            assert_eq!(s.choose_target(&board, &roll(&[3, 1, 5]), &mut rng), Some(3));
            assert_eq!(s.choose_target(&board, &roll(&[1, 2, 5, 6]), &mut rng), None);
        }
    }

    #[test]
    fn none_on_complete_board() {
        let mut board = Board::new();
        for n in 1..=12 {
            board.move_peg(n, BOARD_HEIGHT).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(5);
        for s in all_strategies().iter() {
            assert_eq!(s.choose_target(&board, &roll(&[1, 2, 3, 4, 5, 6]), &mut rng), None);
        }
    }

    #[test]
    fn greedy_prefers_many_moves_far_from_top() {
        let board = Board::new();
        // target 6 can be made 6 times, target 12 three times; all pegs at
        // the bottom so 6 scores 6*5=30 and 12 scores 3*5=15
        let mut rng = StdRng::seed_from_u64(5);
        let target = Strategy::Greedy.choose_target(&board, &roll(&[6; 6]), &mut rng);
        assert_eq!(target, Some(6));
        // with peg 6 one step from the top, 6 scores 6*1=6 and 12 wins
        let mut board = Board::new();
        board.move_peg(6, BOARD_HEIGHT - 1).unwrap();
        let target = Strategy::Greedy.choose_target(&board, &roll(&[6; 6]), &mut rng);
        assert_eq!(target, Some(12));
    }

    #[test]
    fn greedy_tie_breaks_ascending() {
        // [2, 5]: both targets score 1 * 5; first-seen in ascending order wins
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(5);
        let target = Strategy::Greedy.choose_target(&board, &roll(&[2, 5, 2, 5]), &mut rng);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn finish_first_prefers_completion() {
        let mut board = Board::new();
        // peg 5 needs one more step; peg 2 is fresh. Raw counts favor 2
        // (two matches vs one) but finishing 5 carries the bonus:
        // 2 scores 2, 5 scores 1 + 5
        board.move_peg(5, BOARD_HEIGHT - 1).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let target = Strategy::FinishFirst.choose_target(&board, &roll(&[2, 2, 5]), &mut rng);
        assert_eq!(target, Some(5));
        // without a finishable peg it behaves like raw move count
        let board = Board::new();
        let target = Strategy::FinishFirst.choose_target(&board, &roll(&[2, 2, 5]), &mut rng);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn random_is_seeded() {
        let board = Board::new();
        let r = roll(&[1, 2, 3, 4, 5, 6]);
        let mut rng1 = StdRng::seed_from_u64(77);
        let mut rng2 = StdRng::seed_from_u64(77);
        for _ in 0..50 {
            assert_eq!(
                Strategy::Random.choose_target(&board, &r, &mut rng1),
                Strategy::Random.choose_target(&board, &r, &mut rng2)
            );
        }
    }

    #[test]
    fn random_only_returns_rollable() {
        let board = Board::new();
        let r = roll(&[2, 2, 6]);
        // available: 2 (twice), 6, 8 (2+6)
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let t = Strategy::Random.choose_target(&board, &r, &mut rng).unwrap();
            assert!([2, 6, 8].contains(&t));
        }
    }
}
