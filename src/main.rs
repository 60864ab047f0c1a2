use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_manager::config::LeagueConfig;
use league_manager::models::{
    clear_result, record_entry, Fixture, FixtureId, Participant, ResultEntry,
};
use league_manager::schedule::{fixtures_in_round, ScheduleGenerator, Seeding};
use league_manager::standings::StandingsEngine;
use league_manager::storage::{LeagueSnapshot, LeagueStore};

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Home-and-away league scheduling and standings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./league.toml")]
    config: PathBuf,

    /// League snapshot file (overrides the config)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a league and generate its fixtures
    New {
        /// Number of teams (defaults to the number of --name values)
        #[arg(long)]
        teams: Option<usize>,

        /// Team name, repeat for each team; missing names become "Team N"
        #[arg(long = "name")]
        names: Vec<String>,

        /// Seed for a reproducible shuffle
        #[arg(long, conflicts_with = "as_given")]
        seed: Option<u64>,

        /// Pair teams in the order given instead of shuffling
        #[arg(long)]
        as_given: bool,

        /// Overwrite an existing league
        #[arg(long)]
        force: bool,
    },

    /// List fixtures
    Fixtures {
        /// Only this round
        #[arg(long)]
        round: Option<u32>,

        /// Only fixtures without a result
        #[arg(long)]
        pending: bool,
    },

    /// Record or overwrite a result
    Record {
        /// Fixture id as shown by `fixtures`
        #[arg(long)]
        fixture: String,

        #[arg(long, allow_negative_numbers = true)]
        home: i64,

        #[arg(long, allow_negative_numbers = true)]
        away: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        home_yellow: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        away_yellow: i64,

        /// Reds from a second caution
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        home_second_yellow: i64,

        /// Reds from a second caution
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        away_second_yellow: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        home_red: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        away_red: i64,
    },

    /// Clear a recorded result
    Clear {
        #[arg(long)]
        fixture: String,
    },

    /// Print the standings
    Table {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the league
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LeagueConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting league v{}", env!("CARGO_PKG_VERSION"));

    let store = LeagueStore::new(&config.data_file);

    match cli.command {
        Commands::New {
            teams,
            names,
            seed,
            as_given,
            force,
        } => {
            if store.exists() && !force {
                bail!(
                    "A league already exists at {:?}; pass --force to replace it",
                    store.path()
                );
            }

            let count = teams.unwrap_or(names.len());
            if names.len() > count {
                bail!("Got {} names for {} teams", names.len(), count);
            }
            let mut entered = names;
            entered.resize(count, String::new());
            let participants = Participant::roster(&entered);

            let seeding = match (as_given, seed) {
                (true, _) => Seeding::AsGiven,
                (false, Some(seed)) => Seeding::Seeded(seed),
                (false, None) => config.seeding(),
            };
            let fixtures = ScheduleGenerator::new(seeding).generate(&participants)?;

            let mut snapshot = LeagueSnapshot::new(participants, fixtures);
            store.save(&mut snapshot)?;

            println!(
                "Created league with {} teams and {} fixtures",
                snapshot.participants.len(),
                snapshot.fixtures.len()
            );
        }

        Commands::Fixtures { round, pending } => {
            let snapshot = store.load()?;
            let fixtures: Vec<&Fixture> = match round {
                Some(r) => fixtures_in_round(&snapshot.fixtures, r).collect(),
                None => snapshot.fixtures.iter().collect(),
            };

            for fixture in fixtures.into_iter().filter(|f| !pending || !f.is_played()) {
                println!("{}", describe_fixture(&snapshot, fixture));
            }
        }

        Commands::Record {
            fixture,
            home,
            away,
            home_yellow,
            away_yellow,
            home_second_yellow,
            away_second_yellow,
            home_red,
            away_red,
        } => {
            let mut snapshot = store.load()?;
            let entry = ResultEntry {
                home_goals: home,
                away_goals: away,
                home_yellow,
                away_yellow,
                home_second_yellow_red: home_second_yellow,
                away_second_yellow_red: away_second_yellow,
                home_direct_red: home_red,
                away_direct_red: away_red,
            };

            let id = FixtureId::from(fixture);
            let recorded = record_entry(&mut snapshot.fixtures, &id, entry)?.clone();
            store.save(&mut snapshot)?;

            println!("{}", describe_fixture(&snapshot, &recorded));
        }

        Commands::Clear { fixture } => {
            let mut snapshot = store.load()?;
            let id = FixtureId::from(fixture);
            clear_result(&mut snapshot.fixtures, &id)?;
            store.save(&mut snapshot)?;

            println!("Cleared result for {}", id);
        }

        Commands::Table { json } => {
            let snapshot = store.load()?;
            let engine = StandingsEngine::new(config.standings.tie_break);
            let table = engine.rank(&snapshot.participants, &snapshot.fixtures);

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!(
                    "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}  {:>5}",
                    "#", "Team", "P", "W", "D", "L", "GD", "GF", "Pts", "Cards"
                );
                for row in &table {
                    println!(
                        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}  {:>5}",
                        row.rank,
                        row.name,
                        row.played,
                        row.wins,
                        row.draws,
                        row.losses,
                        row.goal_difference,
                        row.goals_for,
                        row.points,
                        format!("{}/{}", row.discipline.yellow, row.discipline.reds())
                    );
                }
            }
        }

        Commands::Reset => {
            if store.remove()? {
                println!("Removed league at {:?}", store.path());
            } else {
                println!("No league at {:?}", store.path());
            }
        }
    }

    Ok(())
}

fn describe_fixture(snapshot: &LeagueSnapshot, fixture: &Fixture) -> String {
    let score = match &fixture.result {
        Some(result) => format!("{} - {}", result.home_goals, result.away_goals),
        None => "v".to_string(),
    };
    format!(
        "{}  R{:<3} {} {} {}",
        fixture.id,
        fixture.round,
        snapshot.participant_name(fixture.home_id),
        score,
        snapshot.participant_name(fixture.away_id)
    )
}
