//! Exports of the league table and player statistics

pub mod csv;
pub mod xlsx;

pub use self::csv::{write_standings_csv, write_statistics_csv};
pub use self::xlsx::write_league_xlsx;

pub(crate) const STANDINGS_HEADERS: [&str; 10] = [
    "Pos", "Team", "Played", "Won", "Drawn", "Lost", "Pairs For", "Pairs Against", "Pairs Diff",
    "Points",
];

pub(crate) const STATISTICS_HEADERS: [&str; 8] = [
    "Rank", "Player", "Team", "Played", "Won", "Lost", "Total Points", "Avg Points",
];
