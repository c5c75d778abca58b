//! Grid-bot programming game.
//!
//! Lists and validates level catalogs and replays programs against a level,
//! printing every step. The exit code reports the outcome.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use gridbot::core::command::{Action, parse_actions};
use gridbot::core::types::{LossReason, Outcome, RunSnapshot, RunSummary};
use gridbot::engine::{NoPause, StepEvent, ThreadPacer, execute};
use gridbot::exit_codes;
use gridbot::io::catalog_store::{load_catalog, load_catalog_or_builtin};
use gridbot::io::config::{DEFAULT_CONFIG_FILE, GameConfig, load_config, write_config};
use gridbot::io::program_store::{ProgramFile, load_program, write_program};
use gridbot::logging;
use gridbot::session::Session;

#[derive(Parser)]
#[command(
    name = "gridbot",
    version,
    about = "Program a bot across a grid, one command at a time"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List levels in play order.
    Levels {
        /// Level catalog JSON (defaults to the built-in levels).
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Check a catalog file against the schema and level invariants.
    Validate {
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Replay a program against a level.
    Run(RunArgs),
    /// Write the default config file.
    InitConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Level number in play order, starting at 1. Defaults to the level
    /// recorded in the program file.
    #[arg(long)]
    level: Option<usize>,

    /// Program file (JSON).
    #[arg(long, conflicts_with = "commands", required_unless_present = "commands")]
    program: Option<PathBuf>,

    /// Inline program, e.g. "move move left goto:2,3".
    #[arg(long)]
    commands: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Level catalog JSON, overriding the config file.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Skip the pauses between steps.
    #[arg(long)]
    instant: bool,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,

    /// Request a stop after this many steps (at least 1).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    stop_after: Option<u64>,

    /// Save the program to this file before running.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Levels { catalog } => cmd_levels(catalog.as_deref()),
        Command::Validate { catalog } => cmd_validate(&catalog),
        Command::Run(args) => cmd_run(&args),
        Command::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

fn cmd_levels(catalog: Option<&Path>) -> Result<i32> {
    let catalog = load_catalog_or_builtin(catalog)?;
    for (index, level) in catalog.levels().iter().enumerate() {
        let kinds: Vec<&str> = level
            .allowed_commands
            .iter()
            .map(|kind| kind.label())
            .collect();
        println!(
            "{}. {} [{}x{}] start {} facing {} goal {}{} commands: {}",
            index + 1,
            level.title,
            level.grid_size,
            level.grid_size,
            level.start,
            level.start_direction,
            level.goal,
            if level.special_task {
                " (visit corners + center)"
            } else {
                ""
            },
            kinds.join(", ")
        );
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(path: &Path) -> Result<i32> {
    let catalog = load_catalog(path)?;
    println!("ok: {} levels", catalog.len());
    Ok(exit_codes::OK)
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &GameConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_run(args: &RunArgs) -> Result<i32> {
    let cfg = load_config(&args.config)?;
    let catalog_path = args.catalog.as_deref().or(cfg.catalog_path.as_deref());
    let catalog = load_catalog_or_builtin(catalog_path)?;

    let (recorded_level, actions) = read_program(args)?;
    let index = match (args.level, recorded_level) {
        (Some(number), _) => number
            .checked_sub(1)
            .ok_or_else(|| anyhow!("--level starts at 1"))?,
        (None, Some(id)) => catalog
            .levels()
            .iter()
            .position(|level| level.id == id)
            .ok_or_else(|| anyhow!("program level id {} not in catalog", id))?,
        (None, None) => bail!("--level is required when the program does not name one"),
    };

    let mut session = Session::new(catalog)?;
    session.select_level(index)?;
    let level = session.level().clone();

    for action in &actions {
        if let Some(reason) = level.palette_rejection(action) {
            bail!("{reason}");
        }
        session.append(*action)?;
    }

    if let Some(path) = &args.save {
        write_program(
            path,
            &ProgramFile {
                level: Some(level.id),
                commands: actions.clone(),
            },
        )?;
    }

    let handle = session.start_run()?;
    let run_id = handle.id;
    let stop = handle.run.stop_token().clone();
    let total = actions.len();
    info!(level = level.id, commands = total, "replaying program");
    if !args.json {
        println!("{} | start {} facing {}", level.title, level.start, level.start_direction);
    }

    let on_event = |event: &StepEvent| {
        if let StepEvent::Advanced(snapshot) = event {
            session.record_snapshot(run_id, snapshot);
            let done = snapshot.current_step.map_or(0, |i| i as u64 + 1);
            if args.stop_after.is_some_and(|limit| done >= limit) {
                stop.request_stop();
            }
        }
        if args.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => eprintln!("serialize event: {err}"),
            }
        } else {
            print_event(event, &actions, total);
        }
    };

    let summary = if args.instant {
        execute(handle.run, &NoPause, &cfg.timing, on_event)
    } else {
        execute(handle.run, &ThreadPacer, &cfg.timing, on_event)
    };
    session.finish_run(run_id, &summary);

    if !args.json {
        for row in session.checkpoints() {
            let mark = if row.visited { 'x' } else { ' ' };
            println!("  [{}] {} {}", mark, row.label, row.position);
        }
    }

    Ok(match summary.outcome {
        Outcome::Won => exit_codes::OK,
        Outcome::Lost { .. } => exit_codes::LOST,
        Outcome::Aborted => exit_codes::ABORTED,
    })
}

fn read_program(args: &RunArgs) -> Result<(Option<u32>, Vec<Action>)> {
    if let Some(list) = &args.commands {
        let actions = parse_actions(list).map_err(|err| anyhow!("--commands: {err}"))?;
        return Ok((None, actions));
    }
    let path = args
        .program
        .as_deref()
        .ok_or_else(|| anyhow!("either --program or --commands is required"))?;
    let program = load_program(path)?;
    Ok((program.level, program.commands))
}

fn print_event(event: &StepEvent, actions: &[Action], total: usize) {
    match event {
        StepEvent::Advanced(snapshot) => print_step(snapshot, actions, total),
        StepEvent::Finished(summary) => {
            print_step(&summary.snapshot, actions, total);
            println!("{}", describe(summary));
        }
    }
}

fn print_step(snapshot: &RunSnapshot, actions: &[Action], total: usize) {
    let Some(index) = snapshot.current_step else {
        return;
    };
    let label = actions
        .get(index)
        .map(ToString::to_string)
        .unwrap_or_default();
    println!(
        "step {}/{} {:<16} -> {} facing {}",
        index + 1,
        total,
        label,
        snapshot.position,
        snapshot.direction
    );
}

fn describe(summary: &RunSummary) -> String {
    match &summary.outcome {
        Outcome::Won => format!(
            "won at {} after {} steps",
            summary.snapshot.position, summary.steps_executed
        ),
        Outcome::Aborted => format!("stopped after {} steps", summary.steps_executed),
        Outcome::Lost { reason } => match reason {
            LossReason::OutOfBounds { attempted } => {
                format!("lost: {} is off the board", attempted)
            }
            LossReason::Obstacle { at } => format!("lost: hit an obstacle at {}", at),
            LossReason::GoalNotReached { final_position } => {
                format!("lost: stopped at {}, goal not reached", final_position)
            }
            LossReason::CheckpointsMissed { missing } => {
                let cells: Vec<String> = missing.iter().map(ToString::to_string).collect();
                format!("lost: checkpoints not visited: {}", cells.join(" "))
            }
        },
    }
}
