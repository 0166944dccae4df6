//! Text notation for pair results
//!
//! A result is written as up to three `home-away` games separated by
//! whitespace or commas, e.g. `21-15 18-21 21-19`. Games not written are
//! left unplayed.

use crate::error::{LeagueError, Result};
use crate::model::{Game, Side, GAMES_PER_PAIR};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0, u32 as score},
    multi::separated_list1,
    sequence::delimited,
    IResult, Parser,
};

/// Parse a single game: 21-15
fn game(input: &str) -> IResult<&str, Game> {
    let (input, (home, _, away)) =
        (score, delimited(space0, char('-'), space0), score).parse(input)?;
    Ok((input, Game::new(home, away)))
}

fn separator(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_whitespace() || c == ',').parse(input)
}

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Parse a pair result into its three games
pub fn parse_games(text: &str) -> Result<[Game; GAMES_PER_PAIR]> {
    let mut games = [Game::unplayed(); GAMES_PER_PAIR];

    let trimmed = text.trim_matches(is_padding);
    if trimmed.is_empty() {
        return Ok(games);
    }

    let (rest, parsed) = separated_list1(separator, game)
        .parse(trimmed)
        .map_err(|_| LeagueError::Notation(format!("expected games like 21-15, got '{}'", text)))?;

    if !rest.is_empty() {
        return Err(LeagueError::Notation(format!(
            "unexpected '{}' in '{}'",
            rest.trim_start_matches(is_padding),
            text
        )));
    }
    if parsed.len() > GAMES_PER_PAIR {
        return Err(LeagueError::Notation(format!(
            "{} games given, at most {} are played",
            parsed.len(),
            GAMES_PER_PAIR
        )));
    }

    for (slot, game) in games.iter_mut().zip(parsed) {
        *slot = game;
    }
    Ok(games)
}

/// Render games in the notation accepted by [`parse_games`]. Trailing
/// unplayed games are omitted.
pub fn format_games(games: &[Game; GAMES_PER_PAIR]) -> String {
    let last_played = match games.iter().rposition(|g| g.is_played()) {
        Some(i) => i,
        None => return String::new(),
    };

    games[..=last_played]
        .iter()
        .map(|g| format!("{}-{}", g.score(Side::Home), g.score(Side::Away)))
        .collect::<Vec<_>>()
        .join(" ")
}
