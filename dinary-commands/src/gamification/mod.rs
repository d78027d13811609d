pub mod award;
pub mod cards;
pub mod curve;
pub mod history;
pub mod leaderboard;
pub mod level;
pub mod profile;
pub mod resync;
pub mod rewards;
