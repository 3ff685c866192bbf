use crate::global::DIE_MAX;
use crate::roll::DiceRoll;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Face frequencies over every roll seen in a game.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct DiceCounts {
    faces: [u32; DIE_MAX as usize],
}

impl DiceCounts {
    pub fn add(&mut self, roll: &DiceRoll) {
        for &v in roll.values() {
            self.faces[v as usize - 1] += 1;
        }
    }

    pub fn count(&self, face: u8) -> u32 {
        self.faces[face as usize - 1]
    }

    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Continue,
    Skipped,
    Winner,
}

/// One record per played turn, consumed by display and reporting layers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerMove {
    pub turn_number: u32,
    pub player_name: String,
    pub dice_roll: Vec<u8>,
    pub target_chosen: Option<u8>,
    pub moves_made: u8,
    pub status: MoveStatus,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PlayerStats {
    pub strategy_name: String,
    pub total_moves: u32,
    pub turns_played: u32,
    pub turns_skipped: u32,
    pub is_winner: bool,
}

/// Running statistics for one game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameStats {
    seed: Option<u64>,
    num_players: usize,
    total_turns: u32,
    winner: Option<String>,
    dice: DiceCounts,
    players: BTreeMap<String, PlayerStats>,
    moves: Vec<PlayerMove>,
}

impl GameStats {
    pub fn new(seed: Option<u64>, num_players: usize) -> Self {
        Self {
            seed,
            num_players,
            total_turns: 0,
            winner: None,
            dice: DiceCounts::default(),
            players: BTreeMap::new(),
            moves: Vec::new(),
        }
    }

    pub fn add_player(&mut self, name: &str, strategy_name: &str) {
        self.players.insert(
            name.to_string(),
            PlayerStats {
                strategy_name: strategy_name.to_string(),
                ..Default::default()
            },
        );
    }

    pub fn set_strategy(&mut self, name: &str, strategy_name: &str) {
        if let Some(stats) = self.players.get_mut(name) {
            stats.strategy_name = strategy_name.to_string();
        }
    }

    pub fn add_dice_roll(&mut self, roll: &DiceRoll) {
        self.dice.add(roll);
    }

    pub fn add_move(&mut self, mv: PlayerMove) {
        if let Some(stats) = self.players.get_mut(&mv.player_name) {
            match mv.status {
                MoveStatus::Skipped => stats.turns_skipped += 1,
                MoveStatus::Continue | MoveStatus::Winner => {
                    stats.turns_played += 1;
                    stats.total_moves += u32::from(mv.moves_made);
                }
            }
        }
        self.moves.push(mv);
    }

    pub fn set_winner(&mut self, name: &str) {
        self.winner = Some(name.to_string());
        if let Some(stats) = self.players.get_mut(name) {
            stats.is_winner = true;
        }
    }

    pub fn finalize(&mut self, total_turns: u32) {
        self.total_turns = total_turns;
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn total_turns(&self) -> u32 {
        self.total_turns
    }

    pub fn dice(&self) -> &DiceCounts {
        &self.dice
    }

    pub fn player(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    pub fn moves(&self) -> &[PlayerMove] {
        &self.moves
    }

    /// Condensed report without the full move history.
    pub fn summary(&self) -> Value {
        json!({
            "game_info": {
                "seed": self.seed,
                "num_players": self.num_players,
                "total_turns": self.total_turns,
                "winner": self.winner,
            },
            "dice_counts": self.dice,
            "player_stats": self.players,
        })
    }
}
