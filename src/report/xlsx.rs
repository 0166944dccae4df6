use super::{STANDINGS_HEADERS, STATISTICS_HEADERS};
use crate::error::Result;
use crate::standings::Standing;
use crate::statistics::PlayerStatistic;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write standings and player statistics to an Excel workbook
pub fn write_league_xlsx(
    path: &Path,
    standings: &[Standing],
    statistics: &[PlayerStatistic],
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_standings_sheet(sheet, standings)?;

    let sheet = workbook.add_worksheet();
    write_statistics_sheet(sheet, statistics)?;

    workbook.save(path)?;
    log::debug!("Wrote workbook to {}", path.display());
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_standings_sheet(sheet: &mut Worksheet, standings: &[Standing]) -> Result<()> {
    sheet.set_name("Standings")?;

    sheet.set_column_width(0, 6)?; // Pos
    sheet.set_column_width(1, 24)?; // Team
    for col in 2..STANDINGS_HEADERS.len() as u16 {
        sheet.set_column_width(col, 12)?;
    }
    write_headers(sheet, &STANDINGS_HEADERS)?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);
    let points_format = Format::new().set_align(FormatAlign::Center).set_bold();

    for (idx, standing) in standings.iter().enumerate() {
        let row = (idx + 1) as u32;

        sheet.write_number_with_format(row, 0, row as f64, &center_format)?;
        sheet.write_string_with_format(row, 1, &standing.team_name, &left_format)?;

        let counts = [
            standing.played,
            standing.wins,
            standing.draws,
            standing.losses,
            standing.pairs_won,
            standing.pairs_lost,
        ];
        for (offset, value) in counts.iter().enumerate() {
            sheet.write_number_with_format(row, 2 + offset as u16, *value as f64, &center_format)?;
        }

        sheet.write_number_with_format(row, 8, standing.pairs_diff as f64, &center_format)?;
        sheet.write_number_with_format(row, 9, standing.points as f64, &points_format)?;
    }

    Ok(())
}

fn write_statistics_sheet(sheet: &mut Worksheet, statistics: &[PlayerStatistic]) -> Result<()> {
    sheet.set_name("Player Statistics")?;

    sheet.set_column_width(0, 6)?; // Rank
    sheet.set_column_width(1, 22)?; // Player
    sheet.set_column_width(2, 22)?; // Team
    for col in 3..STATISTICS_HEADERS.len() as u16 {
        sheet.set_column_width(col, 12)?;
    }
    write_headers(sheet, &STATISTICS_HEADERS)?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);
    let avg_format = Format::new()
        .set_align(FormatAlign::Right)
        .set_num_format("0.0");

    for (idx, stat) in statistics.iter().enumerate() {
        let row = (idx + 1) as u32;

        sheet.write_number_with_format(row, 0, row as f64, &center_format)?;
        sheet.write_string_with_format(row, 1, &stat.player_name, &left_format)?;
        sheet.write_string_with_format(row, 2, &stat.team_name, &left_format)?;
        sheet.write_number_with_format(row, 3, stat.games_played as f64, &center_format)?;
        sheet.write_number_with_format(row, 4, stat.games_won as f64, &center_format)?;
        sheet.write_number_with_format(row, 5, stat.games_lost as f64, &center_format)?;
        sheet.write_number_with_format(row, 6, stat.total_points as f64, &center_format)?;
        sheet.write_number_with_format(row, 7, stat.avg_points, &avg_format)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_league_xlsx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("league.xlsx");

        let standings = vec![Standing {
            team_id: 1,
            team_name: "Smashers".to_string(),
            played: 1,
            wins: 1,
            draws: 0,
            losses: 0,
            pairs_won: 5,
            pairs_lost: 3,
            pairs_diff: 2,
            points: 3,
        }];
        let statistics = vec![PlayerStatistic {
            player_id: 1,
            player_name: "Alice".to_string(),
            team_id: 1,
            team_name: "Smashers".to_string(),
            games_played: 1,
            games_won: 1,
            games_lost: 0,
            total_points: 60,
            avg_points: 60.0,
        }];

        write_league_xlsx(&path, &standings, &statistics).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_empty_league() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_league_xlsx(&path, &[], &[]).unwrap();
        assert!(path.exists());
    }
}
