use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};

use league_scoring::report;
use league_scoring::{
    authorize, format_games, nominate, nominated_players, parse_games, player_statistics,
    score_pair, standings, unnominate, update_pair, Action, Caller, EntityKind, JsonFileStore,
    LeagueError, LeagueStore, MatchUpdate, NewMatch, NewUser, Pair, PairUpdate, PlayerId,
    PointsConvention, Role, Side, TeamDetails, TeamId, PAIRS_PER_MATCH,
};

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Manage a badminton league: fixtures, pair results, standings and statistics", long_about = None)]
struct Cli {
    /// League data file
    #[arg(long, global = true, env = "LEAGUE_DATA", default_value = "league.json")]
    data: PathBuf,

    /// Act as this user; without it commands run as a local administrator
    #[arg(long, global = true, env = "LEAGUE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty data file
    Init {
        /// Overwrite an existing data file
        #[arg(long)]
        force: bool,

        /// Also create an admin user with this username
        #[arg(long)]
        admin: Option<String>,
    },

    /// Manage teams
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },

    /// Manage players
    Player {
        #[command(subcommand)]
        command: PlayerCommand,
    },

    /// Manage matches
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },

    /// Record pair line-ups and results
    Pair {
        #[command(subcommand)]
        command: PairCommand,
    },

    /// Nominate a player for a match
    Nominate { match_id: u32, player_id: PlayerId },

    /// Withdraw a player's nomination
    Unnominate { match_id: u32, player_id: PlayerId },

    /// List nominated players for a match
    Nominations {
        match_id: u32,

        /// Only show this team's players
        #[arg(long)]
        team: Option<TeamId>,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Show the league table
    Standings {
        #[command(flatten)]
        points: PointsArgs,
    },

    /// Show player statistics
    Stats,

    /// Export standings or statistics to CSV or Excel
    Export {
        /// Output file (.csv or .xlsx)
        output: PathBuf,

        /// Which table to write to a CSV file
        #[arg(long, value_enum, default_value_t = ReportKind::Standings)]
        report: ReportKind,

        #[command(flatten)]
        points: PointsArgs,
    },
}

#[derive(Subcommand)]
enum TeamCommand {
    Add {
        name: String,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    List,
    Edit {
        id: TeamId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Remove a team with its players and matches
    Remove { id: TeamId },
}

#[derive(Subcommand)]
enum PlayerCommand {
    Add { team: TeamId, name: String },
    List {
        #[arg(long)]
        team: Option<TeamId>,
    },
    Rename { id: PlayerId, name: String },
    Remove { id: PlayerId },
}

#[derive(Subcommand)]
enum MatchCommand {
    /// Schedule a match; its nine pairs are created empty
    Add {
        home: TeamId,
        away: TeamId,
        /// Match date (YYYY-MM-DD)
        date: NaiveDate,
        #[arg(long, default_value = "")]
        location: String,
    },
    List,
    /// Show a match with all of its pairs
    Show { id: u32 },
    Edit {
        id: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Mark a match completed so it counts in the standings
    Complete {
        id: u32,
        /// Mark the match as not completed again
        #[arg(long)]
        undo: bool,
    },
    Remove { id: u32 },
}

#[derive(Subcommand)]
enum PairCommand {
    /// Set players and/or games of one pair
    Set {
        match_id: u32,
        pair_number: u8,
        /// Home player ids, e.g. "3,7" (use "-" for an empty slot)
        #[arg(long)]
        home: Option<String>,
        /// Away player ids, e.g. "12,15"
        #[arg(long)]
        away: Option<String>,
        /// Game scores, e.g. "21-15 18-21 21-19"
        #[arg(long)]
        games: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    Add {
        username: String,
        /// admin, league_manager, team_manager or observer
        #[arg(long, default_value = "observer", value_parser = parse_role)]
        role: Role,
        #[arg(long)]
        team: Option<TeamId>,
        /// Stored as given; hash it before passing it in
        #[arg(long, default_value = "")]
        password: String,
    },
    List,
    Remove { id: u32 },
}

#[derive(Args)]
struct PointsArgs {
    /// Points convention: three-point or two-point
    #[arg(long, env = "LEAGUE_CONVENTION", default_value = "three-point")]
    convention: String,

    /// Override the points awarded for a win
    #[arg(long)]
    points_per_win: Option<u32>,

    /// Override the points awarded for a draw
    #[arg(long)]
    points_per_draw: Option<u32>,
}

impl PointsArgs {
    fn resolve(&self) -> Result<PointsConvention> {
        let mut convention: PointsConvention = self.convention.parse()?;
        if let Some(points) = self.points_per_win {
            convention = convention.with_points_per_win(points);
        }
        if let Some(points) = self.points_per_draw {
            convention = convention.with_points_per_draw(points);
        }
        Ok(convention)
    }
}

fn parse_role(text: &str) -> std::result::Result<Role, String> {
    text.parse().map_err(|_| {
        let known: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Standings,
    Statistics,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Commands::Init { force, admin } = &cli.command {
        return init(&cli.data, *force, admin.as_deref());
    }

    let mut store = JsonFileStore::open(&cli.data)
        .with_context(|| format!("Failed to open {}", cli.data.display()))?;
    let caller = resolve_caller(&store, cli.user.as_deref())?;

    match cli.command {
        Commands::Init { .. } => unreachable!("init runs before the data file is opened"),
        Commands::Team { command } => team(&mut store, &caller, command)?,
        Commands::Player { command } => player(&mut store, &caller, command)?,
        Commands::Match { command } => fixture(&mut store, &caller, command)?,
        Commands::Pair { command } => pair(&mut store, &caller, command)?,
        Commands::Nominate { match_id, player_id } => {
            authorize_nomination(&store, &caller, player_id)?;
            nominate(&mut store, match_id, player_id)?;
            println!("Player {} nominated for match {}", player_id, match_id);
        }
        Commands::Unnominate { match_id, player_id } => {
            authorize_nomination(&store, &caller, player_id)?;
            unnominate(&mut store, match_id, player_id)?;
            println!("Player {} withdrawn from match {}", player_id, match_id);
        }
        Commands::Nominations { match_id, team } => nominations(&store, match_id, team)?,
        Commands::User { command } => user(&mut store, &caller, command)?,
        Commands::Standings { points } => print_standings(&store, &points.resolve()?)?,
        Commands::Stats => print_statistics(&store)?,
        Commands::Export { output, report, points } => {
            export(&store, &output, report, &points.resolve()?)?
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool, admin: Option<&str>) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut store = JsonFileStore::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    println!("Created {}", path.display());

    if let Some(username) = admin {
        store.create_user(NewUser {
            username: username.to_string(),
            password: String::new(),
            role: Role::Admin,
            team_id: None,
        })?;
        println!("Created admin user {}", username);
    }

    Ok(())
}

fn resolve_caller(store: &JsonFileStore, username: Option<&str>) -> Result<Caller> {
    match username {
        None => Ok(Caller::local_admin()),
        Some(name) => match store.user_by_username(name)? {
            Some(user) => Ok(Caller::from(&user)),
            None => bail!("Unknown user: {}", name),
        },
    }
}

fn authorize_nomination(store: &JsonFileStore, caller: &Caller, player_id: PlayerId) -> Result<()> {
    // Missing players are reported by the nomination itself
    if let Some(player) = store.player(player_id)? {
        authorize(caller, &Action::Nominate { team_id: player.team_id })?;
    }
    Ok(())
}

fn team(store: &mut JsonFileStore, caller: &Caller, command: TeamCommand) -> Result<()> {
    match command {
        TeamCommand::Add { name, day, time, address } => {
            authorize(caller, &Action::CreateTeam)?;
            let details = TeamDetails::new(name)
                .with_home_day(day.unwrap_or_default())
                .with_home_time(time.unwrap_or_default())
                .with_address(address.unwrap_or_default());
            let team = store.create_team(details)?;
            println!("Created team {} ({})", team.name, team.id);
        }
        TeamCommand::List => {
            for team in store.teams()? {
                let players = store.players(Some(team.id))?.len();
                println!("{:>4}  {:<24} {:>2} players  {}", team.id, team.name, players, team.venue());
            }
        }
        TeamCommand::Edit { id, name, day, time, address } => {
            authorize(caller, &Action::EditTeam { team_id: id })?;
            let existing = store
                .team(id)?
                .ok_or(LeagueError::not_found(EntityKind::Team, id))?;
            let details = TeamDetails::new(name.unwrap_or(existing.name))
                .with_home_day(day.unwrap_or(existing.home_day))
                .with_home_time(time.unwrap_or(existing.home_time))
                .with_address(address.unwrap_or(existing.address));
            let team = store.update_team(id, details)?;
            println!("Updated team {} ({})", team.name, team.id);
        }
        TeamCommand::Remove { id } => {
            authorize(caller, &Action::DeleteTeam)?;
            store.delete_team(id)?;
            println!("Removed team {}", id);
        }
    }
    Ok(())
}

fn player(store: &mut JsonFileStore, caller: &Caller, command: PlayerCommand) -> Result<()> {
    match command {
        PlayerCommand::Add { team, name } => {
            authorize(caller, &Action::ManagePlayer { team_id: team })?;
            let player = store.create_player(team, &name)?;
            println!("Created player {} ({})", player.name, player.id);
        }
        PlayerCommand::List { team } => {
            let teams = store.teams()?;
            for player in store.players(team)? {
                let team_name = teams
                    .iter()
                    .find(|t| t.id == player.team_id)
                    .map(|t| t.name.as_str())
                    .unwrap_or("Unknown");
                println!("{:>4}  {:<24} {}", player.id, player.name, team_name);
            }
        }
        PlayerCommand::Rename { id, name } => {
            let existing = store
                .player(id)?
                .ok_or(LeagueError::not_found(EntityKind::Player, id))?;
            authorize(caller, &Action::ManagePlayer { team_id: existing.team_id })?;
            let player = store.rename_player(id, &name)?;
            println!("Renamed player {} to {}", id, player.name);
        }
        PlayerCommand::Remove { id } => {
            let existing = store
                .player(id)?
                .ok_or(LeagueError::not_found(EntityKind::Player, id))?;
            authorize(caller, &Action::ManagePlayer { team_id: existing.team_id })?;
            store.delete_player(id)?;
            println!("Removed player {}", existing.name);
        }
    }
    Ok(())
}

fn team_name(store: &JsonFileStore, id: TeamId) -> Result<String> {
    Ok(store
        .team(id)?
        .map(|t| t.name)
        .unwrap_or_else(|| "Unknown".to_string()))
}

fn fixture(store: &mut JsonFileStore, caller: &Caller, command: MatchCommand) -> Result<()> {
    match command {
        MatchCommand::Add { home, away, date, location } => {
            authorize(caller, &Action::ManageMatch)?;
            if home == away {
                bail!("A team cannot play itself");
            }
            let fixture = store.create_match(NewMatch {
                home_team_id: home,
                away_team_id: away,
                match_date: date,
                location,
            })?;
            println!(
                "Created match {}: {} v {} on {}",
                fixture.id,
                team_name(store, home)?,
                team_name(store, away)?,
                fixture.match_date
            );
        }
        MatchCommand::List => {
            for fixture in store.matches()? {
                println!(
                    "{:>4}  {}  {:<20} {:>5}  {:<20} {}",
                    fixture.id,
                    fixture.match_date,
                    team_name(store, fixture.home_team_id)?,
                    fixture.score().to_string(),
                    team_name(store, fixture.away_team_id)?,
                    if fixture.completed { "completed" } else { "" }
                );
            }
        }
        MatchCommand::Show { id } => show_match(store, id)?,
        MatchCommand::Edit { id, date, location } => {
            authorize(caller, &Action::ManageMatch)?;
            let fixture = store.update_match(
                id,
                MatchUpdate {
                    match_date: date,
                    location,
                    completed: None,
                },
            )?;
            println!("Updated match {} ({})", fixture.id, fixture.match_date);
        }
        MatchCommand::Complete { id, undo } => {
            authorize(caller, &Action::ManageMatch)?;
            let fixture = store.update_match(
                id,
                MatchUpdate {
                    completed: Some(!undo),
                    ..Default::default()
                },
            )?;
            if fixture.completed {
                println!("Match {} completed: {}", fixture.id, fixture.score());
            } else {
                println!("Match {} reopened", fixture.id);
            }
        }
        MatchCommand::Remove { id } => {
            authorize(caller, &Action::ManageMatch)?;
            store.delete_match(id)?;
            println!("Removed match {}", id);
        }
    }
    Ok(())
}

/// Game points scored by each side over every pair of a match
fn match_points(pairs: &[Pair]) -> [u64; 2] {
    Side::BOTH.map(|side| {
        pairs
            .iter()
            .map(|pair| u64::from(pair.points(side)))
            .sum()
    })
}

fn show_match(store: &JsonFileStore, id: u32) -> Result<()> {
    let fixture = store
        .fixture(id)?
        .ok_or(LeagueError::not_found(EntityKind::Match, id))?;

    println!(
        "{} v {}  {}  {}",
        team_name(store, fixture.home_team_id)?,
        team_name(store, fixture.away_team_id)?,
        fixture.match_date,
        fixture.location
    );
    let pairs = store.pairs(id)?;
    let [home_points, away_points] = match_points(&pairs);

    println!(
        "Score: {}{}",
        fixture.score(),
        if fixture.completed { " (completed)" } else { "" }
    );
    println!("Points: {}-{}", home_points, away_points);
    println!();

    let player_name = |slot: Option<PlayerId>| -> Result<String> {
        Ok(match slot {
            Some(player_id) => store
                .player(player_id)?
                .map(|p| p.name)
                .unwrap_or_else(|| format!("#{}", player_id)),
            None => "-".to_string(),
        })
    };

    for pair in pairs {
        let mut sides = Vec::new();
        for side in Side::BOTH {
            let [a, b] = pair.players(side);
            sides.push(format!("{} / {}", player_name(a)?, player_name(b)?));
        }
        let winner = match score_pair(&pair).winner() {
            Some(side) => side.to_string(),
            None => String::new(),
        };
        println!(
            "{:>2}  {:<30} v {:<30} {:<18} {}",
            pair.pair_number,
            sides[0],
            sides[1],
            format_games(&pair.games),
            winner
        );
    }

    Ok(())
}

/// Parse slot ids like "3,7", "3" or "-,7"
fn parse_slots(text: &str) -> Result<[Option<PlayerId>; 2]> {
    let mut slots = [None; 2];
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() > 2 {
        bail!("At most two players per side: {}", text);
    }

    for (slot, part) in slots.iter_mut().zip(parts) {
        if !part.is_empty() && part != "-" {
            *slot = Some(
                part.parse()
                    .with_context(|| format!("Invalid player id: {}", part))?,
            );
        }
    }
    Ok(slots)
}

fn pair(store: &mut JsonFileStore, caller: &Caller, command: PairCommand) -> Result<()> {
    match command {
        PairCommand::Set { match_id, pair_number, home, away, games } => {
            let fixture = store
                .fixture(match_id)?
                .ok_or(LeagueError::not_found(EntityKind::Match, match_id))?;
            authorize(caller, &Action::edit_pair(&fixture))?;

            if !(1..=PAIRS_PER_MATCH).contains(&pair_number) {
                return Err(LeagueError::InvalidPairNumber(pair_number).into());
            }
            let target = store
                .pairs(match_id)?
                .into_iter()
                .find(|p| p.pair_number == pair_number)
                .ok_or(LeagueError::InvalidPairNumber(pair_number))?;

            let mut update = PairUpdate::default();
            if let Some(text) = home {
                update = update.with_home_players(parse_slots(&text)?);
            }
            if let Some(text) = away {
                update = update.with_away_players(parse_slots(&text)?);
            }
            if let Some(text) = games {
                update = update.with_games(parse_games(&text)?);
            }

            for player_id in update.player_ids() {
                if store.player(player_id)?.is_none() {
                    return Err(LeagueError::not_found(EntityKind::Player, player_id).into());
                }
            }

            let written = update_pair(store, target.id, update)?;
            let score = store
                .fixture(match_id)?
                .map(|m| m.score())
                .unwrap_or_default();
            println!(
                "Pair {} of match {}: {}  (match score {})",
                written.pair_number,
                match_id,
                format_games(&written.games),
                score
            );
        }
    }
    Ok(())
}

fn nominations(store: &JsonFileStore, match_id: u32, team: Option<TeamId>) -> Result<()> {
    let fixture = store
        .fixture(match_id)?
        .ok_or(LeagueError::not_found(EntityKind::Match, match_id))?;

    let teams = match team {
        Some(team_id) => vec![team_id],
        None => vec![fixture.home_team_id, fixture.away_team_id],
    };

    for team_id in teams {
        println!("{}:", team_name(store, team_id)?);
        for player in nominated_players(store, match_id, team_id)? {
            println!("  {:>4}  {}", player.id, player.name);
        }
    }
    Ok(())
}

fn user(store: &mut JsonFileStore, caller: &Caller, command: UserCommand) -> Result<()> {
    authorize(caller, &Action::ManageUsers)?;

    match command {
        UserCommand::Add { username, role, team, password } => {
            if store.user_by_username(&username)?.is_some() {
                bail!("User {} already exists", username);
            }
            let user = store.create_user(NewUser {
                username,
                password,
                role,
                team_id: team,
            })?;
            println!("Created user {} ({}, {})", user.username, user.id, user.role);
        }
        UserCommand::List => {
            for user in store.users()? {
                let team = match user.team_id {
                    Some(team_id) => team_name(store, team_id)?,
                    None => String::new(),
                };
                println!("{:>4}  {:<20} {:<15} {}", user.id, user.username, user.role, team);
            }
        }
        UserCommand::Remove { id } => {
            store.delete_user(id)?;
            println!("Removed user {}", id);
        }
    }
    Ok(())
}

fn print_standings(store: &JsonFileStore, convention: &PointsConvention) -> Result<()> {
    let rows = standings(store, convention)?;

    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "Pos", "Team", "P", "W", "D", "L", "PF", "PA", "+/-", "Pts"
    );
    for (pos, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            pos + 1,
            row.team_name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.pairs_won,
            row.pairs_lost,
            row.pairs_diff,
            row.points
        );
    }
    println!("({})", convention);
    Ok(())
}

fn print_statistics(store: &JsonFileStore) -> Result<()> {
    let rows = player_statistics(store)?;

    println!(
        "{:>4}  {:<22} {:<22} {:>3} {:>3} {:>3} {:>6} {:>6}",
        "Rank", "Player", "Team", "P", "W", "L", "Points", "Avg"
    );
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<22} {:<22} {:>3} {:>3} {:>3} {:>6} {:>6}",
            rank + 1,
            row.player_name,
            row.team_name,
            row.games_played,
            row.games_won,
            row.games_lost,
            row.total_points,
            row.avg_points_display()
        );
    }
    Ok(())
}

fn export(
    store: &JsonFileStore,
    output: &Path,
    kind: ReportKind,
    convention: &PointsConvention,
) -> Result<()> {
    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match output_ext.as_str() {
        "csv" => {
            let file = File::create(output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            match kind {
                ReportKind::Standings => {
                    report::write_standings_csv(&standings(store, convention)?, file)?
                }
                ReportKind::Statistics => {
                    report::write_statistics_csv(&player_statistics(store)?, file)?
                }
            }
        }
        "xlsx" => {
            let table = standings(store, convention)?;
            let stats = player_statistics(store)?;
            report::write_league_xlsx(output, &table, &stats)
                .context("Failed to write Excel file")?;
        }
        _ => bail!("Unsupported export format: {} (use .csv or .xlsx)", output_ext),
    }

    println!("Wrote {}", output.display());
    Ok(())
}
