use crate::board::{Board, BoardError};
use crate::global::NUM_DICE;
use crate::roll::DiceRoll;
use crate::roller::DiceRoller;
use crate::stats::{GameStats, MoveStatus, PlayerMove};
use crate::strategy::Strategy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum GameError {
    /// A game needs at least one player
    NoPlayers,
    NoSuchPlayer(usize),
    Board(BoardError),
}

impl Error for GameError {}
impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::NoPlayers => write!(f, "game has no players"),
            GameError::NoSuchPlayer(i) => write!(f, "no player at index {}", i),
            GameError::Board(e) => write!(f, "board error: {}", e),
        }
    }
}

impl From<BoardError> for GameError {
    fn from(e: BoardError) -> Self {
        GameError::Board(e)
    }
}

pub struct Player {
    name: String,
    board: Board,
    strategy: Strategy,
}

impl Player {
    fn new(name: String) -> Self {
        Self {
            name,
            board: Board::new(),
            strategy: Strategy::Random,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is_winner(&self) -> bool {
        self.board.is_complete()
    }
}

struct GameState {
    players: Vec<Player>,
    current_player_index: usize,
    turn_count: u32,
    game_over: bool,
    winner: Option<usize>,
}

impl GameState {
    fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            current_player_index: 0,
            turn_count: 0,
            game_over: false,
            winner: None,
        }
    }

    /// Advance to the next player, circularly. A full round is complete when
    /// the index wraps back to the first player.
    fn next_player(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            self.turn_count += 1;
        }
    }
}

/// Result of one play_turn call, tagged for the display/stats consumers.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The game already ended; nothing happened.
    GameOver { winner: Option<String> },
    /// The roll offered no target that could advance an open peg.
    Skipped {
        player: String,
        roll: DiceRoll,
        reason: String,
    },
    Continue {
        player: String,
        target: u8,
        moves: u8,
        roll: DiceRoll,
    },
    Winner {
        player: String,
        target: u8,
        moves: u8,
        roll: DiceRoll,
    },
}

/// One game session: the players, their boards, the dice, and a single RNG
/// that every draw (dice and strategy tie-breaking) flows through, so a
/// seeded game replays bit for bit.
pub struct Game {
    roller: DiceRoller,
    rng: StdRng,
    state: GameState,
    stats: GameStats,
    seed: Option<u64>,
}

impl Game {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Self::build(num_players, StdRng::from_entropy(), None)
    }

    pub fn with_seed(num_players: usize, seed: u64) -> Result<Self, GameError> {
        Self::build(num_players, StdRng::seed_from_u64(seed), Some(seed))
    }

    fn build(num_players: usize, rng: StdRng, seed: Option<u64>) -> Result<Self, GameError> {
        if num_players == 0 {
            return Err(GameError::NoPlayers);
        }
        let players: Vec<Player> = (0..num_players)
            .map(|i| Player::new(format!("Player {}", i + 1)))
            .collect();
        let mut stats = GameStats::new(seed, num_players);
        for p in players.iter() {
            stats.add_player(&p.name, p.strategy.name());
        }
        Ok(Self {
            roller: DiceRoller::new(NUM_DICE),
            rng,
            state: GameState::new(players),
            stats,
            seed,
        })
    }

    pub fn set_player_strategy(
        &mut self,
        index: usize,
        strategy: Strategy,
    ) -> Result<(), GameError> {
        let player = self
            .state
            .players
            .get_mut(index)
            .ok_or(GameError::NoSuchPlayer(index))?;
        player.strategy = strategy;
        let name = player.name.clone();
        self.stats.set_strategy(&name, strategy.name());
        Ok(())
    }

    /// Resolve one turn for the current player: roll, pick a target via the
    /// player's strategy, play out the streak, apply the moves, check for a
    /// win, and advance to the next player (winners keep the turn; the game
    /// is over). Calling after the game has ended is a no-op returning
    /// GameOver.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, GameError> {
        if self.state.game_over {
            let winner = self
                .state
                .winner
                .map(|i| self.state.players[i].name.clone());
            return Ok(TurnOutcome::GameOver { winner });
        }

        let idx = self.state.current_player_index;
        let turn_number = self.state.turn_count;
        let roll = self.roller.roll(&mut self.rng);
        self.stats.add_dice_roll(&roll);

        let target = {
            let player = &self.state.players[idx];
            player.strategy.choose_target(&player.board, &roll, &mut self.rng)
        };
        let name = self.state.players[idx].name.clone();

        let target = match target {
            Some(t) => t,
            None => {
                self.stats.add_move(PlayerMove {
                    turn_number,
                    player_name: name.clone(),
                    dice_roll: roll.values().to_vec(),
                    target_chosen: None,
                    moves_made: 0,
                    status: MoveStatus::Skipped,
                });
                self.state.next_player();
                return Ok(TurnOutcome::Skipped {
                    player: name,
                    roll,
                    reason: "no_valid_target".to_string(),
                });
            }
        };

        let moves = self.roller.simulate_turn(&mut self.rng, target);
        if moves > 0 {
            // the strategy only returns movable targets
            self.state.players[idx].board.move_peg(target, moves)?;
        }

        if self.state.players[idx].is_winner() {
            self.state.game_over = true;
            self.state.winner = Some(idx);
            self.stats.set_winner(&name);
            self.stats.add_move(PlayerMove {
                turn_number,
                player_name: name.clone(),
                dice_roll: roll.values().to_vec(),
                target_chosen: Some(target),
                moves_made: moves,
                status: MoveStatus::Winner,
            });
            self.stats.finalize(self.state.turn_count);
            return Ok(TurnOutcome::Winner {
                player: name,
                target,
                moves,
                roll,
            });
        }

        self.stats.add_move(PlayerMove {
            turn_number,
            player_name: name.clone(),
            dice_roll: roll.values().to_vec(),
            target_chosen: Some(target),
            moves_made: moves,
            status: MoveStatus::Continue,
        });
        self.state.next_player();
        self.stats.finalize(self.state.turn_count);
        Ok(TurnOutcome::Continue {
            player: name,
            target,
            moves,
            roll,
        })
    }

    /// Play turns until someone wins. Returns the winner, or the first
    /// player in the degenerate case of a game already over with no winner
    /// recorded.
    pub fn play_game(&mut self) -> Result<&Player, GameError> {
        while !self.state.game_over {
            self.play_turn()?;
        }
        self.stats.finalize(self.state.turn_count);
        let idx = self.state.winner.unwrap_or(0);
        Ok(&self.state.players[idx])
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn current_player(&self) -> &Player {
        &self.state.players[self.state.current_player_index]
    }

    pub fn turn_count(&self) -> u32 {
        self.state.turn_count
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn winner(&self) -> Option<&Player> {
        self.state.winner.map(|i| &self.state.players[i])
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
