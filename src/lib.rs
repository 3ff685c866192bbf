pub mod board;
pub mod game;
pub mod global;
pub mod roll;
pub mod roller;
pub mod stats;
pub mod strategy;
