mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ts_core::{
    BehaviorRecord, Engine, Level, UserState, now_unix_secs, unix_day, unix_to_hhmm,
    unix_to_iso8601,
};
use ts_store::{Store, StoreError, WishStatus};

#[derive(Parser)]
#[command(name = "ts", about = "TimeScore behavior tracking and scoring")]
struct Cli {
    /// Override the data directory (default: $TS_DATA_DIR or ~/.timescore)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Engine config TOML (default: <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a completed behavior and score it
    Log {
        /// Behavior level: S, A, B, C, D, R, R1, R2 or R3
        #[arg(long)]
        level: String,

        /// Duration in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,

        /// Mood rating 1-5
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
        mood: u8,

        /// Behavior name, used for repeat detection
        #[arg(long)]
        name: Option<String>,
    },

    /// Show energy, today's score and the current streak
    Status,

    /// List recent scored behaviors
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Apply the start-of-day energy reset now
    NewDay,

    /// Manage wishes (point-cost goals)
    #[command(subcommand)]
    Wish(WishCommands),
}

#[derive(Subcommand)]
enum WishCommands {
    /// Add a wish
    Add {
        name: String,

        /// Point cost (minimum 100)
        #[arg(long)]
        cost: i64,
    },

    /// List wishes with redemption progress
    List,

    /// Redeem a pending wish by id
    Redeem { id: i64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Log {
            level,
            minutes,
            mood,
            name,
        } => cmd_log(&cli, level, *minutes, *mood, name.clone()),
        Commands::Status => cmd_status(&cli),
        Commands::History { limit } => cmd_history(&cli, *limit),
        Commands::NewDay => cmd_new_day(&cli),
        Commands::Wish(command) => cmd_wish(&cli, command),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir
        .clone()
        .or_else(|| std::env::var("TS_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(default_base_dir)
}

fn default_base_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".timescore")
}

fn open_store(cli: &Cli) -> Result<Store> {
    let dir = data_dir(cli);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data dir {}", dir.display()))?;
    Store::open(&dir.join("timescore.db")).map_err(store_err)
}

fn build_engine(cli: &Cli) -> Result<Engine> {
    let config = settings::load_engine_config(cli.config.as_deref(), &data_dir(cli));
    Engine::new(config).context("invalid engine configuration")
}

fn store_err(e: StoreError) -> anyhow::Error {
    anyhow::anyhow!("{e}")
}

/// Run the daily reset at most once per UTC calendar day. The engine never
/// tracks wall clocks; the shell owns the boundary.
fn maybe_daily_reset(
    engine: &Engine,
    store: &Store,
    state: &mut UserState,
    now_ts: u64,
) -> Result<bool> {
    let today = unix_day(now_ts);
    let last = store
        .get_metadata("last_reset_day")
        .map_err(store_err)?
        .and_then(|v| v.parse::<i64>().ok());

    match last {
        Some(day) if day >= today => Ok(false),
        Some(_) => {
            let energy = engine.daily_reset(state);
            store.save_energy(state).map_err(store_err)?;
            store
                .set_metadata("last_reset_day", &today.to_string())
                .map_err(store_err)?;
            tracing::info!("daily reset applied, energy now {energy:.1}");
            Ok(true)
        }
        None => {
            // First run: mark the day without topping up.
            store
                .set_metadata("last_reset_day", &today.to_string())
                .map_err(store_err)?;
            Ok(false)
        }
    }
}

fn cmd_log(cli: &Cli, level: &str, minutes: u32, mood: u8, name: Option<String>) -> Result<()> {
    let level: Level = level
        .parse()
        .map_err(|e: ts_core::ParseLevelError| anyhow::anyhow!(e))?;

    let engine = build_engine(cli)?;
    let store = open_store(cli)?;
    let now = now_unix_secs();

    let mut state = store
        .load_user_state(engine.config(), now)
        .map_err(store_err)?;
    maybe_daily_reset(&engine, &store, &mut state, now)?;

    let after_idle = engine.apply_passive_recovery(&mut state, now);
    tracing::debug!("energy after passive recovery: {after_idle:.1}");

    let start_ts = now.saturating_sub(u64::from(minutes) * 60);
    let mut behavior = BehaviorRecord::new(level, minutes, mood, start_ts, now);
    if let Some(name) = name {
        behavior = behavior.named(name);
    }

    let result = engine.record_behavior(&mut state, &behavior);
    store
        .record_scored(&behavior, &result, &state)
        .map_err(store_err)?;

    let entry = engine.catalog().entry(result.resolved_level);
    println!(
        "scored:  {:+.1} points ({} × {} min, {})",
        result.final_score, result.resolved_level, minutes, entry.anchor
    );
    println!(
        "energy:  {:+.1} → {:.1} ({})",
        -result.energy_delta,
        state.current_energy,
        engine.energy_status(&state)
    );
    Ok(())
}

fn cmd_status(cli: &Cli) -> Result<()> {
    let engine = build_engine(cli)?;
    let store = open_store(cli)?;
    let now = now_unix_secs();

    let mut state = store
        .load_user_state(engine.config(), now)
        .map_err(store_err)?;
    maybe_daily_reset(&engine, &store, &mut state, now)?;

    let day_start = unix_day(now) as u64 * 86_400;
    let today = store.records_since(day_start).map_err(store_err)?;
    let today_score: f64 = today.iter().map(|r| r.final_score).sum();
    let streak = state
        .recent
        .iter()
        .filter(|b| b.level.is_positive())
        .count();
    let total = store.total_score().map_err(store_err)?;

    println!(
        "energy:  {:.1}/{:.0} ({})",
        state.current_energy,
        engine.config().energy_max,
        engine.energy_status(&state)
    );
    println!(
        "today:   {:+.1} points over {} behaviors",
        today_score,
        today.len()
    );
    println!("total:   {total:.1} points");
    println!(
        "streak:  {streak} positive in the last {}",
        state.recent.capacity()
    );
    if state.beginner_period {
        println!("novice bonus active");
    }
    Ok(())
}

fn cmd_history(cli: &Cli, limit: usize) -> Result<()> {
    let store = open_store(cli)?;
    let rows = store.recent_records(limit).map_err(store_err)?;

    if rows.is_empty() {
        println!("(no behaviors logged yet)");
        return Ok(());
    }

    for row in rows {
        let name = row.name.as_deref().unwrap_or("");
        let date = &unix_to_iso8601(row.start_ts)[..10];
        println!(
            "{date} {}–{}  {:<2} {:>4} min  mood {}  {:>+8.1} pts  {:>+6.1} energy  {}",
            unix_to_hhmm(row.start_ts),
            unix_to_hhmm(row.end_ts),
            row.level,
            row.duration,
            row.mood,
            row.final_score,
            -row.energy_delta,
            name
        );
    }
    Ok(())
}

fn cmd_new_day(cli: &Cli) -> Result<()> {
    let engine = build_engine(cli)?;
    let store = open_store(cli)?;
    let now = now_unix_secs();

    let mut state = store
        .load_user_state(engine.config(), now)
        .map_err(store_err)?;
    let energy = engine.daily_reset(&mut state);
    store.save_energy(&state).map_err(store_err)?;
    store
        .set_metadata("last_reset_day", &unix_day(now).to_string())
        .map_err(store_err)?;

    println!(
        "new day: energy {:.1} ({})",
        energy,
        engine.energy_status(&state)
    );
    Ok(())
}

fn cmd_wish(cli: &Cli, command: &WishCommands) -> Result<()> {
    let store = open_store(cli)?;
    let now = now_unix_secs();

    match command {
        WishCommands::Add { name, cost } => {
            let id = store.add_wish(name, *cost, now).map_err(store_err)?;
            println!("wish #{id} added: {name} ({cost} points)");
        }
        WishCommands::List => {
            let wishes = store.wishes().map_err(store_err)?;
            if wishes.is_empty() {
                println!("(no wishes yet)");
                return Ok(());
            }
            let total = store.total_score().map_err(store_err)?;
            println!("accumulated: {total:.1} points");
            for wish in wishes {
                match wish.status {
                    WishStatus::Redeemed => println!(
                        "#{:<3} {:<24} {:>6} pts  redeemed",
                        wish.id, wish.name, wish.cost
                    ),
                    WishStatus::Pending => {
                        let bar = progress_bar(wish.progress, 20);
                        println!(
                            "#{:<3} {:<24} {:>6} pts  [{bar}] {:>3.0}%",
                            wish.id,
                            wish.name,
                            wish.cost,
                            wish.progress * 100.0
                        );
                    }
                }
            }
        }
        WishCommands::Redeem { id } => {
            let wish = store.redeem_wish(*id, now).map_err(store_err)?;
            let remaining = store.total_score().map_err(store_err)? - wish.cost as f64;
            println!("redeemed: {} (-{} points)", wish.name, wish.cost);
            println!("remaining: {remaining:.1} points");
        }
    }
    Ok(())
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}
