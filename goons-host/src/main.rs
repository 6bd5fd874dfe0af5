mod bundles;
mod host;
mod storage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use goons_core::clock::format_timestamp_local;
use goons_core::{
    Clock, Evaluation, FixedClock, ModConfig, RngStreams, RotationOutcome, RotationTrigger,
    SystemClock,
};

use bundles::{AnimationSet, MovementSettings, apply_bundles};
use host::{LOCATIONS_ROUTE, ModHost};
use storage::{ModPaths, default_map_config};

#[derive(Debug, Parser)]
#[command(name = "goons-host", version)]
#[command(about = "Drive the Dynamic Goons rotation and Old Tarkov Movement mods from the command line")]
struct Args {
    /// Mod directory holding config/ and db/
    #[arg(long, default_value = ".")]
    mod_dir: PathBuf,

    /// Seed for the roll and map streams (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pin the clock to this epoch-millisecond timestamp
    #[arg(long)]
    now: Option<i64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write default config files that are not already present
    Init,
    /// Seed spawn tables, evaluate, and print the Goons chance per map
    Locations,
    /// Evaluate a rotation as if a raid just ended
    MatchEnd,
    /// Send a chat message to the Goons Tracker bot
    Chat {
        /// Message text, e.g. "goons track"
        text: String,
    },
    /// Print the current location status as JSON
    Status,
    /// Apply the movement mod's animation bundle setting
    Bundles,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let paths = ModPaths::new(&args.mod_dir);
    match &args.command {
        Command::Init => init_mod_dir(&paths),
        Command::Bundles => run_bundles(&paths),
        Command::Locations => {
            let host = build_host(&args, paths);
            announce_banner();
            host.post_db_load().await;
            let body = host
                .handle_route(LOCATIONS_ROUTE)
                .await
                .context("serving location data")?;
            if args.verbose {
                println!("{body}");
            }
            print_tables(&host).await;
            Ok(())
        }
        Command::MatchEnd => {
            let host = build_host(&args, paths);
            announce_banner();
            println!(
                "Rotation interval: {} minutes",
                host.config().rotation_interval_minutes
            );
            let eval = host.on_match_ended(host.now()).await;
            print_evaluation(&eval);
            if args.verbose {
                let (rolls, picks) = host.rng_draws().await;
                println!("RNG draws: roll {rolls}, map {picks}");
            }
            Ok(())
        }
        Command::Chat { text } => {
            let host = build_host(&args, paths);
            let bot = host.bot_info();
            println!("{} {}", "You:".bright_white().bold(), text);
            let reply = host.on_chat_command(text).await;
            println!("{}", format!("{}:", bot.nickname).bright_cyan().bold());
            println!("{reply}");
            Ok(())
        }
        Command::Status => {
            let host = build_host(&args, paths);
            let status = host
                .status()
                .await
                .context("reading rotation status")?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
    }
}

fn build_host(args: &Args, paths: ModPaths) -> ModHost {
    let clock: Arc<dyn Clock> = match args.now {
        Some(now) => Arc::new(FixedClock::new(now)),
        None => Arc::new(SystemClock),
    };
    let random = args
        .seed
        .map_or_else(RngStreams::from_entropy, RngStreams::from_seed);
    ModHost::new(paths, clock, random)
}

fn announce_banner() {
    println!("{}", "Dynamic Goons".bright_cyan().bold());
    println!("{}", "=============".cyan());
}

fn print_evaluation(eval: &Evaluation) {
    println!(
        "Remaining: {}ms  Chance: {:.2}%  Roll: {:.2}",
        eval.remaining_ms, eval.chance, eval.roll
    );
    match &eval.outcome {
        RotationOutcome::Stayed => {
            println!(
                "{} {}",
                "Stayed on".green(),
                eval.record.selected_location.bold()
            );
        }
        RotationOutcome::Rotated {
            from,
            to,
            trigger,
            persisted,
        } => {
            let reason = match trigger {
                RotationTrigger::IntervalChanged {
                    previous,
                    configured,
                } => format!("interval changed {previous} -> {configured} minutes"),
                RotationTrigger::ChanceRoll => "chance roll".to_string(),
            };
            println!(
                "{} {} -> {} ({reason})",
                "Rotated".bright_yellow().bold(),
                from,
                to.bold()
            );
            if !persisted {
                eprintln!("{}", "Rotation record could not be saved".red());
            }
        }
    }
    println!(
        "Next update: {}",
        format_timestamp_local(eval.record.next_update_at)
    );
}

async fn print_tables(host: &ModHost) {
    let tables = host.tables().await;
    for (map, spawns) in &tables.locations {
        if let Some(chance) = tables.goons_chance(map) {
            let line = format!("  {map:16} {chance:>3}%");
            if chance > 0 {
                println!("{}", line.bright_green());
            } else {
                println!("{line}");
            }
        } else if !spawns.is_empty() {
            println!("  {map:16} (no Goons entry)");
        }
    }
}

fn run_bundles(paths: &ModPaths) -> Result<()> {
    let settings_path = paths.movement_settings();
    let settings = MovementSettings::load(&settings_path)
        .with_context(|| format!("loading {}", settings_path.display()))?;
    let set = apply_bundles(&settings, &paths.bundles(), &paths.true_bundles())
        .context("rewriting bundle manifest")?;
    match set {
        AnimationSet::Modern => println!("{}", "Modern animations active".green()),
        AnimationSet::Nostalgia => println!("{}", "Old animations active".yellow()),
    }
    Ok(())
}

fn init_mod_dir(paths: &ModPaths) -> Result<()> {
    write_if_missing(
        &paths.config(),
        &serde_json::to_string_pretty(&ModConfig::default())?,
    )?;
    write_if_missing(
        &paths.map_config(),
        &serde_json::to_string_pretty(&default_map_config())?,
    )?;
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} {}", "Keeping".dimmed(), path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}
