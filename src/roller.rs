use crate::global::{BOARD_HEIGHT, DIE_MAX, DIE_MIN, NUM_DICE};
use crate::roll::DiceRoll;
use rand::Rng;

/// Draws die faces and resolves a whole turn's worth of rolling for a fixed
/// target. Holds no randomness of its own: every draw goes through the RNG
/// the caller passes in, so a seeded game replays identically.
#[derive(Debug, Clone, Copy)]
pub struct DiceRoller {
    num_dice: usize,
}

impl DiceRoller {
    pub fn new(num_dice: usize) -> Self {
        Self { num_dice }
    }

    pub fn num_dice(&self) -> usize {
        self.num_dice
    }

    /// Roll the full set of dice.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> DiceRoll {
        self.roll_remaining(rng, self.num_dice)
    }

    /// Roll only the dice still in hand after some were set aside as matches.
    pub fn roll_remaining<R: Rng>(&self, rng: &mut R, remaining: usize) -> DiceRoll {
        let values: Vec<u8> = (0..remaining)
            .map(|_| rng.gen_range(DIE_MIN, DIE_MAX + 1))
            .collect();
        // values are drawn in range, so this cannot fail
        DiceRoll::new(values).unwrap()
    }

    /// Play out one turn chasing `target`: roll the dice in hand, set aside
    /// every match, and keep rolling the rest. Using up all dice earns a
    /// fresh handful. The streak ends on the first roll with no matches, or
    /// once the total reaches the board height (a peg cannot go further
    /// anyway). Returns the number of steps to move the target's peg.
    pub fn simulate_turn<R: Rng>(&self, rng: &mut R, target: u8) -> u8 {
        let mut total: u8 = 0;
        let mut available = self.num_dice;

        while available > 0 {
            let roll = self.roll_remaining(rng, available);

            let count = if target <= DIE_MAX {
                roll.count_target(target)
            } else {
                // each pair eats two dice
                std::cmp::min(roll.combinations_for_target(target).len(), available / 2)
            };
            if count == 0 {
                break;
            }

            total += count as u8;
            if total >= BOARD_HEIGHT {
                break;
            }

            available -= if target <= DIE_MAX { count } else { count * 2 };
            if available == 0 {
                // all dice used: roll all of them again to extend the streak
                available = self.num_dice;
            }
        }
        total
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(NUM_DICE)
    }
}

#[cfg(test)]
mod tests {
    use super::DiceRoller;
    use crate::global::{BOARD_HEIGHT, NUM_DICE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn roll_always_valid() {
        let roller = DiceRoller::default();
        let mut rng = StdRng::from_entropy();
        for _ in 0..1000 {
            let r = roller.roll(&mut rng);
            assert_eq!(r.len(), NUM_DICE);
            assert!(r.values().iter().all(|&v| (1..=6).contains(&v)));
        }
    }

    #[test]
    fn roll_remaining_len() {
        let roller = DiceRoller::default();
        let mut rng = StdRng::seed_from_u64(7);
        for k in 0..=NUM_DICE {
            assert_eq!(roller.roll_remaining(&mut rng, k).len(), k);
        }
    }

    #[test]
    fn roll_reproducible() {
        let roller = DiceRoller::default();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(roller.roll(&mut rng1), roller.roll(&mut rng2));
        }
    }

    #[test]
    fn simulate_turn_terminates_all_targets() {
        for num_dice in [1, 2, 3, 6, 12].iter() {
            let roller = DiceRoller::new(*num_dice);
            let mut rng = StdRng::seed_from_u64(1234);
            for target in 1..=12 {
                for _ in 0..200 {
                    let _ = roller.simulate_turn(&mut rng, target);
                }
            }
        }
    }

    #[test]
    fn simulate_turn_bounded_total() {
        // a streak stops as soon as the board height is reached, and a
        // single roll adds at most num_dice matches, so the total never
        // exceeds height - 1 + num_dice
        let roller = DiceRoller::default();
        let mut rng = StdRng::seed_from_u64(99);
        for target in 1..=12 {
            for _ in 0..500 {
                let moves = roller.simulate_turn(&mut rng, target);
                assert!(moves as usize <= BOARD_HEIGHT as usize - 1 + NUM_DICE);
            }
        }
    }

    #[test]
    fn simulate_turn_reproducible() {
        let roller = DiceRoller::default();
        let mut rng1 = StdRng::seed_from_u64(314);
        let mut rng2 = StdRng::seed_from_u64(314);
        for target in 1..=12 {
            assert_eq!(
                roller.simulate_turn(&mut rng1, target),
                roller.simulate_turn(&mut rng2, target)
            );
        }
    }
}
