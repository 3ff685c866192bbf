use crate::global::{BOARD_HEIGHT, PEG_COUNT};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum BoardError {
    /// The peg is already at the top; callers must check is_peg_movable
    /// first, so hitting this means a bug in the caller
    PegAtTop(u8),
    NoSuchPeg(u8),
}

impl Error for BoardError {}
impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::PegAtTop(n) => write!(f, "peg {} is already at the top", n),
            BoardError::NoSuchPeg(n) => write!(f, "no peg for number {}", n),
        }
    }
}

/// One peg (prikkie), tracking progress from the bottom of the board
/// (position 0) to the top (max_position).
#[derive(Serialize, Deserialize, PartialEq, Copy, Clone, Debug)]
pub struct Peg {
    number: u8,
    position: u8,
    max_position: u8,
}

impl Peg {
    fn new(number: u8, max_position: u8) -> Self {
        Self {
            number,
            position: 0,
            max_position,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn max_position(&self) -> u8 {
        self.max_position
    }

    pub fn is_at_top(&self) -> bool {
        self.position >= self.max_position
    }

    /// Move the peg up by `steps`, clamping at the top. Returns true if the
    /// peg is at the top afterward.
    fn move_up(&mut self, steps: u8) -> bool {
        self.position = std::cmp::min(self.position.saturating_add(steps), self.max_position);
        self.is_at_top()
    }
}

/// A player's board: one peg per number 1 through 12, stored in a fixed
/// array indexed by number - 1.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct Board {
    pegs: [Peg; PEG_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::with_height(BOARD_HEIGHT)
    }

    pub fn with_height(height: u8) -> Self {
        let mut pegs = [Peg::new(0, height); PEG_COUNT];
        for (i, peg) in pegs.iter_mut().enumerate() {
            peg.number = i as u8 + 1;
        }
        Self { pegs }
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// The peg for `number`, or None for numbers outside 1..=12.
    pub fn get_peg(&self, number: u8) -> Option<&Peg> {
        if number < 1 || number as usize > PEG_COUNT {
            None
        } else {
            Some(&self.pegs[number as usize - 1])
        }
    }

    /// A peg can move as long as it has not reached the top. Unknown numbers
    /// are not movable.
    pub fn is_peg_movable(&self, number: u8) -> bool {
        match self.get_peg(number) {
            Some(peg) => !peg.is_at_top(),
            None => false,
        }
    }

    /// Move a peg up by `steps`, clamped at the top. Returns true if the peg
    /// reached the top this call. Moving a peg already at the top is a
    /// contract violation and fails.
    pub fn move_peg(&mut self, number: u8, steps: u8) -> Result<bool, BoardError> {
        if number < 1 || number as usize > PEG_COUNT {
            return Err(BoardError::NoSuchPeg(number));
        }
        let peg = &mut self.pegs[number as usize - 1];
        if peg.is_at_top() {
            return Err(BoardError::PegAtTop(number));
        }
        Ok(peg.move_up(steps))
    }

    pub fn is_complete(&self) -> bool {
        self.pegs.iter().all(|peg| peg.is_at_top())
    }

    pub fn incomplete_pegs(&self) -> Vec<&Peg> {
        self.pegs.iter().filter(|peg| !peg.is_at_top()).collect()
    }

    /// Current position of every peg, indexed by number - 1.
    pub fn peg_positions(&self) -> [u8; PEG_COUNT] {
        let mut positions = [0; PEG_COUNT];
        for (i, peg) in self.pegs.iter().enumerate() {
            positions[i] = peg.position;
        }
        positions
    }

    /// Row-major grid of the board: one row per position from bottom to top,
    /// one column per number, with each peg's number marked at its current
    /// row. Consumed by the display rendering.
    pub fn board_state(&self) -> Vec<Vec<Option<u8>>> {
        let height = self.pegs[0].max_position as usize;
        let mut grid = vec![vec![None; PEG_COUNT]; height + 1];
        for peg in self.pegs.iter() {
            grid[peg.position as usize][peg.number as usize - 1] = Some(peg.number);
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let grid = self.board_state();
        let header: Vec<String> = (1..=PEG_COUNT).map(|n| format!("{:2}", n)).collect();
        writeln!(f, "   {}", header.join(" "))?;
        writeln!(f, "   {}", "-".repeat(PEG_COUNT * 3 - 1))?;
        // top row first
        for (row_idx, row) in grid.iter().enumerate().rev() {
            write!(f, "{:2} ", row_idx)?;
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(n) => format!("{:2}", n),
                    None => " .".to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError};
    use crate::global::{BOARD_HEIGHT, PEG_COUNT};

    #[test]
    fn new_board_complete_set() {
        let board = Board::new();
        assert_eq!(board.pegs().len(), PEG_COUNT);
        for (i, peg) in board.pegs().iter().enumerate() {
            assert_eq!(peg.number(), i as u8 + 1);
            assert_eq!(peg.position(), 0);
            assert_eq!(peg.max_position(), BOARD_HEIGHT);
        }
        assert!(!board.is_complete());
    }

    #[test]
    fn get_peg_lookup_miss() {
        let board = Board::new();
        assert!(board.get_peg(0).is_none());
        assert!(board.get_peg(13).is_none());
        for n in 1..=12 {
            assert_eq!(board.get_peg(n).unwrap().number(), n);
        }
    }

    #[test]
    fn move_clamps_at_top() {
        let mut board = Board::new();
        // position 3, then 2 more steps lands exactly on top
        assert!(!board.move_peg(4, 3).unwrap());
        assert!(board.move_peg(4, 2).unwrap());
        assert_eq!(board.get_peg(4).unwrap().position(), BOARD_HEIGHT);
        // overshoot clamps
        assert!(board.move_peg(5, BOARD_HEIGHT + 40).unwrap());
        assert_eq!(board.get_peg(5).unwrap().position(), BOARD_HEIGHT);
    }

    #[test]
    fn move_at_top_is_contract_violation() {
        let mut board = Board::new();
        assert!(board.move_peg(7, BOARD_HEIGHT).unwrap());
        assert_eq!(board.move_peg(7, 1), Err(BoardError::PegAtTop(7)));
    }

    #[test]
    fn move_unknown_peg() {
        let mut board = Board::new();
        assert_eq!(board.move_peg(0, 1), Err(BoardError::NoSuchPeg(0)));
        assert_eq!(board.move_peg(13, 1), Err(BoardError::NoSuchPeg(13)));
    }

    #[test]
    fn movable() {
        let mut board = Board::new();
        assert!(board.is_peg_movable(3));
        board.move_peg(3, BOARD_HEIGHT).unwrap();
        assert!(!board.is_peg_movable(3));
        assert!(!board.is_peg_movable(0));
        assert!(!board.is_peg_movable(13));
    }

    #[test]
    fn complete_iff_all_at_top() {
        let mut board = Board::new();
        for n in 1..=11 {
            board.move_peg(n, BOARD_HEIGHT).unwrap();
            assert!(!board.is_complete());
        }
        board.move_peg(12, BOARD_HEIGHT).unwrap();
        assert!(board.is_complete());
        assert!(board.incomplete_pegs().is_empty());
    }

    #[test]
    fn board_state_marks_positions() {
        let mut board = Board::new();
        board.move_peg(1, 2).unwrap();
        board.move_peg(12, 5).unwrap();
        let grid = board.board_state();
        assert_eq!(grid.len(), BOARD_HEIGHT as usize + 1);
        assert_eq!(grid[2][0], Some(1));
        assert_eq!(grid[5][11], Some(12));
        assert_eq!(grid[0][0], None);
        // untouched pegs still sit on the bottom row
        assert_eq!(grid[0][1], Some(2));
    }

    #[test]
    fn display_renders() {
        let board = Board::new();
        let s = board.to_string();
        assert!(s.contains("12"));
        assert!(s.contains('.'));
    }
}
