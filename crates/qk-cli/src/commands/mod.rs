pub mod leaderboard;
pub mod play;
pub mod questions;
pub mod samples;
