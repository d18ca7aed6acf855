use crate::app::ProjectTimerState;
use crate::domain::{Direction, TickOutcome, TimerEndChoice};
use crate::views::{render_project_list, render_status};
use anyhow::{anyhow, bail, Result};
use std::io::{BufRead, Write};

/// Largest count accepted by `tick`; every tick writes the state file
const MAX_MANUAL_TICKS: u64 = 3600;

const HELP: &str = "\
Commands (positions start at 1):
  list                      show projects
  add <name>                add a project
  delete <n>                delete a project
  rename <n> <name>         rename a project
  pause [n]                 pause/resume a project (current if omitted)
  reset [n]                 reset a project's timer (current if omitted)
  next | prev               switch project
  move <n> up|down          reorder a project
  tick [count]              advance the countdown by hand (stops when a timer ends)
  undo                      undo the last delete or rename
  duration <h> [m]          set the default duration
  import <path>             replace projects from a text file
  export <path>             write project names to a text file
  quit                      save and leave";

/// Read commands from `input` until it ends or the user quits
pub fn run_shell<R: BufRead, W: Write>(
    state: &mut ProjectTimerState,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", render_project_list(state))?;
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        if handle_line(state, &line, out)? {
            break;
        }
    }
    Ok(())
}

/// Handle one command line. Returns true when the user asked to quit.
///
/// Validation failures are reported on `out`; only write errors are returned.
pub fn handle_line<W: Write>(
    state: &mut ProjectTimerState,
    line: &str,
    out: &mut W,
) -> Result<bool> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(false);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(true),
        "help" | "?" => writeln!(out, "{}", HELP)?,
        other => match execute(state, other, rest) {
            Ok(Some(message)) => writeln!(out, "{}", message)?,
            Ok(None) => {}
            Err(e) => writeln!(out, "Error: {}", e)?,
        },
    }
    Ok(false)
}

/// Run a command against the state, returning what to show the user
fn execute(state: &mut ProjectTimerState, command: &str, rest: &str) -> Result<Option<String>> {
    match command {
        "list" | "ls" => {}
        "add" | "a" => state.add(rest)?,
        "delete" | "del" | "d" => state.delete(parse_position(rest)?)?,
        "rename" | "r" => {
            let (position, name) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: rename <n> <name>"))?;
            state.rename(parse_position(position)?, name)?;
        }
        "pause" | "p" => {
            let paused = if rest.is_empty() {
                state.toggle_current_pause()?
            } else {
                state.toggle_pause(parse_position(rest)?)?
            };
            return Ok(Some(if paused { "Paused" } else { "Resumed" }.to_string()));
        }
        "reset" => {
            if rest.is_empty() {
                state.reset_current()?;
            } else {
                state.reset(parse_position(rest)?)?;
            }
        }
        "next" | "n" => state.next_project(),
        "prev" | "previous" => state.previous_project(),
        "move" | "m" => {
            let (position, direction) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: move <n> up|down"))?;
            let direction = Direction::from_tag(direction)
                .ok_or_else(|| anyhow!("direction must be up or down"))?;
            state.move_project(parse_position(position)?, direction)?;
        }
        "tick" | "t" => return tick(state, rest),
        "undo" | "u" => {
            let message = state.undo()?;
            return Ok(Some(match state.undo_depth() {
                0 => message,
                left => format!("{} ({} more to undo)", message, left),
            }));
        }
        "duration" => {
            let mut parts = rest.split_whitespace();
            let hours: i64 = parts
                .next()
                .ok_or_else(|| anyhow!("usage: duration <hours> [minutes]"))?
                .parse()?;
            let minutes: i64 = match parts.next() {
                Some(m) => m.parse()?,
                None => 0,
            };
            state.set_default_duration(hours, minutes)?;
        }
        "import" => {
            if rest.is_empty() {
                bail!("usage: import <path>");
            }
            let count = state.import_from_file(rest)?;
            return Ok(Some(format!("Imported {} projects", count)));
        }
        "export" => {
            if rest.is_empty() {
                bail!("usage: export <path>");
            }
            state.export_to_file(rest)?;
            return Ok(Some(format!("Exported {} projects", state.projects().len())));
        }
        other => bail!("unknown command `{}` (try `help`)", other),
    }
    Ok(Some(render_project_list(state)))
}

/// Advance the countdown by hand, stopping early when a timer runs out.
/// The finished project is reset in place.
fn tick(state: &mut ProjectTimerState, rest: &str) -> Result<Option<String>> {
    let count: u64 = if rest.is_empty() { 1 } else { rest.parse()? };
    if count > MAX_MANUAL_TICKS {
        bail!("tick count must be at most {}", MAX_MANUAL_TICKS);
    }
    let mut lines = Vec::new();
    for _ in 0..count {
        match state.tick() {
            TickOutcome::Ended { project } => {
                state.resolve_timer_end(TimerEndChoice::Stay);
                lines.push(format!("Time's up for: {}", project));
                break;
            }
            TickOutcome::NoProject => break,
            TickOutcome::Paused | TickOutcome::Counted { .. } => {}
        }
    }
    lines.extend(render_status(state, chrono::Local::now()));
    Ok(Some(lines.join("\n")))
}

fn parse_position(s: &str) -> Result<usize> {
    let position: usize = s
        .trim()
        .parse()
        .map_err(|_| anyhow!("expected a position, got `{}`", s.trim()))?;
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}
