mod app;
mod config;
mod domain;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod views;

use anyhow::{anyhow, Result};
use app::ProjectTimerState;
use clap::Parser;
use config::{position_to_index, Cli, Commands};
use domain::{format_duration, TickOutcome, TimerEndChoice};
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use views::{render_project_list, render_status};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with appropriate log level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tima={}", cli.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let paths = cli.state_paths()?;
    info!("Using state file: {}", paths.primary.display());

    let mut state = ProjectTimerState::load(paths);
    let result = dispatch(&mut state, cli.command);

    // Save on exit
    state.save();

    result
}

fn dispatch(state: &mut ProjectTimerState, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Run { on_end, ticks }) => run_timer(state, on_end, ticks),
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            input::run_shell(state, stdin.lock(), &mut io::stdout())
        }
        Some(Commands::List) | None => {
            print_projects(state);
            Ok(())
        }
        Some(Commands::Add { name }) => {
            state.add(&name)?;
            print_projects(state);
            Ok(())
        }
        Some(Commands::Delete { position }) => {
            state.delete(index_arg(position)?)?;
            print_projects(state);
            Ok(())
        }
        Some(Commands::Rename { position, name }) => {
            state.rename(index_arg(position)?, &name)?;
            print_projects(state);
            Ok(())
        }
        Some(Commands::Pause { position }) => {
            let paused = state.toggle_pause(index_arg(position)?)?;
            println!("{}", if paused { "Paused" } else { "Resumed" });
            Ok(())
        }
        Some(Commands::Reset { position }) => {
            state.reset(index_arg(position)?)?;
            print_projects(state);
            Ok(())
        }
        Some(Commands::Next) => {
            state.next_project();
            print_projects(state);
            Ok(())
        }
        Some(Commands::Prev) => {
            state.previous_project();
            print_projects(state);
            Ok(())
        }
        Some(Commands::Move { position, direction }) => {
            state.move_project(index_arg(position)?, direction)?;
            print_projects(state);
            Ok(())
        }
        Some(Commands::Duration { hours, minutes }) => {
            state.set_default_duration(hours, minutes)?;
            println!("Default duration: {}", format_duration(state.default_duration()));
            Ok(())
        }
        Some(Commands::Import { path }) => {
            let count = state.import_from_file(&path)?;
            println!("Imported {} projects from {}", count, path.display());
            Ok(())
        }
        Some(Commands::Export { path }) => {
            state.export_to_file(&path)?;
            println!("Exported {} projects to {}", state.projects().len(), path.display());
            Ok(())
        }
    }
}

fn index_arg(position: usize) -> Result<usize> {
    position_to_index(position).ok_or_else(|| anyhow!("Positions start at 1"))
}

fn print_projects(state: &ProjectTimerState) {
    println!("{}", render_project_list(state));
}

fn print_status(state: &ProjectTimerState) -> Result<()> {
    let Some(line) = render_status(state, chrono::Local::now()) else {
        return Ok(());
    };
    let mut stdout = io::stdout();
    write!(stdout, "\r\x1b[2K{}", line)?;
    stdout.flush()?;
    Ok(())
}

/// Drive the countdown once per second until interrupted or `ticks` runs out
fn run_timer(
    state: &mut ProjectTimerState,
    on_end: TimerEndChoice,
    ticks: Option<u64>,
) -> Result<()> {
    let mut ticker = ticker::Ticker::new(ticker::tick_duration());
    let mut count = 0;
    info!("Running; when a timer ends: {}", on_end.to_tag());

    print_status(state)?;
    loop {
        if ticks.is_some_and(|limit| count >= limit) {
            break;
        }
        ticker.wait();
        count += 1;

        match state.tick() {
            TickOutcome::NoProject => {
                warn!("No projects to time; add one with `tima add <name>`");
                break;
            }
            TickOutcome::Paused | TickOutcome::Counted { .. } => print_status(state)?,
            TickOutcome::Ended { project } => {
                println!("\nTime's up for: {}", project);
                notifications::notify_timer_ended(&project);
                state.resolve_timer_end(on_end);
                if let Some(next) = state.current_project() {
                    info!("Continuing with {}", next);
                }
                print_status(state)?;
            }
        }
    }
    println!();
    Ok(())
}
