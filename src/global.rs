/// Number of dice rolled at the start of a turn (and again whenever all dice
/// have been used up mid-streak)
pub const NUM_DICE: usize = 6;
/// Lowest face on a die
pub const DIE_MIN: u8 = 1;
/// Highest face on a die
pub const DIE_MAX: u8 = 6;
/// Number of pegs on a board, one per target 1 through 12
pub const PEG_COUNT: usize = 12;
/// Highest target: the sum of two dice
pub const MAX_TARGET: u8 = DIE_MAX * 2;
/// Steps from the bottom of a board to the top
pub const BOARD_HEIGHT: u8 = 5;

pub mod conf_def {
    pub const NUM_PLAYERS: &str = "2";
    pub const NUM_GAMES: &str = "1000";
    pub const STRATEGY: &str = "random";
}
