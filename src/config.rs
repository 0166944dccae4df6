//! League configuration

use crate::error::LeagueError;
use std::fmt;
use std::str::FromStr;

/// How many table points a match result is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsConvention {
    pub points_per_win: u32,
    pub points_per_draw: u32,
}

impl Default for PointsConvention {
    fn default() -> Self {
        Self::three_point()
    }
}

impl PointsConvention {
    /// Three points for a win, one for a draw
    pub fn three_point() -> Self {
        Self {
            points_per_win: 3,
            points_per_draw: 1,
        }
    }

    /// Two points for a win, nothing for a draw
    pub fn two_point() -> Self {
        Self {
            points_per_win: 2,
            points_per_draw: 0,
        }
    }

    pub fn with_points_per_win(mut self, points: u32) -> Self {
        self.points_per_win = points;
        self
    }

    pub fn with_points_per_draw(mut self, points: u32) -> Self {
        self.points_per_draw = points;
        self
    }

    pub fn points(&self, wins: u32, draws: u32) -> u32 {
        wins.saturating_mul(self.points_per_win)
            .saturating_add(draws.saturating_mul(self.points_per_draw))
    }
}

impl FromStr for PointsConvention {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "three-point" | "three_point" | "3" => Ok(Self::three_point()),
            "two-point" | "two_point" | "2" => Ok(Self::two_point()),
            _ => Err(LeagueError::InvalidConvention(s.to_string())),
        }
    }
}

impl fmt::Display for PointsConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} per win, {} per draw",
            self.points_per_win, self.points_per_draw
        )
    }
}
