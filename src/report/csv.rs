use super::{STANDINGS_HEADERS, STATISTICS_HEADERS};
use crate::error::Result;
use crate::standings::Standing;
use crate::statistics::PlayerStatistic;
use std::io::Write;

/// Write the league table as CSV, one row per team in ranked order
pub fn write_standings_csv<W: Write>(standings: &[Standing], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(STANDINGS_HEADERS)?;

    for (pos, row) in standings.iter().enumerate() {
        writer.write_record(&[
            (pos + 1).to_string(),
            row.team_name.clone(),
            row.played.to_string(),
            row.wins.to_string(),
            row.draws.to_string(),
            row.losses.to_string(),
            row.pairs_won.to_string(),
            row.pairs_lost.to_string(),
            row.pairs_diff.to_string(),
            row.points.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write player statistics as CSV with the average to one decimal
pub fn write_statistics_csv<W: Write>(statistics: &[PlayerStatistic], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(STATISTICS_HEADERS)?;

    for (rank, row) in statistics.iter().enumerate() {
        writer.write_record(&[
            (rank + 1).to_string(),
            row.player_name.clone(),
            row.team_name.clone(),
            row.games_played.to_string(),
            row.games_won.to_string(),
            row.games_lost.to_string(),
            row.total_points.to_string(),
            row.avg_points_display(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_csv() {
        let standings = vec![Standing {
            team_id: 1,
            team_name: "Smashers, Town".to_string(),
            played: 1,
            wins: 0,
            draws: 0,
            losses: 1,
            pairs_won: 3,
            pairs_lost: 5,
            pairs_diff: -2,
            points: 0,
        }];

        let mut out = Vec::new();
        write_standings_csv(&standings, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Pos,Team,Played,Won,Drawn,Lost,Pairs For,Pairs Against,Pairs Diff,Points")
        );
        assert_eq!(lines.next(), Some("1,\"Smashers, Town\",1,0,0,1,3,5,-2,0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_statistics_csv_formats_average() {
        let statistics = vec![PlayerStatistic {
            player_id: 1,
            player_name: "Alice".to_string(),
            team_id: 1,
            team_name: "Smashers".to_string(),
            games_played: 3,
            games_won: 2,
            games_lost: 1,
            total_points: 125,
            avg_points: 125.0 / 3.0,
        }];

        let mut out = Vec::new();
        write_statistics_csv(&statistics, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("1,Alice,Smashers,3,2,1,125,41.7\n"));
    }
}
