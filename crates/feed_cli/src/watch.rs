//! Terminal rendition of the live panel.
//!
//! Updates from [`FeedRuntime`] and slash commands from stdin both turn into
//! plain output lines; [`describe_update`] and [`apply_command`] hold no I/O
//! so they can be driven directly.

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use feed_transport::{FeedRuntime, FeedUpdate, SharedManager, WebSocketConnector};
use thinking_feed::session::SUMMARY_GRAPHEMES;
use thinking_feed::{format_line, EnvConfig, FeedEvent, TranscriptManager};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::cli::WatchArgs;
use crate::commands::{parse_slash_command, WatchCommand, HELP_LINES};

const DORMANT_SWEEP: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue(Vec<String>),
    Quit,
}

/// Lines to print for one applied feed event.
pub fn describe_update(
    update: &FeedUpdate,
    manager: &TranscriptManager,
    markup: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    let panel = manager.panel();

    if let Some(id) = update.outcome.archived {
        lines.push(archived_line(manager, id));
    }
    if let Some(id) = update.outcome.started {
        lines.push(format!("[session] {id} started"));
    }

    let status = update.status.label();
    match &update.event {
        FeedEvent::Connecting | FeedEvent::Opened => lines.push(format!("[feed] {status}")),
        FeedEvent::Error(message) => lines.push(format!("[feed] {status}: {message}")),
        FeedEvent::Closed => match update.outcome.reconnect {
            Some(plan) => lines.push(format!(
                "[feed] {status}; reconnecting in {} ms",
                plan.after.as_millis()
            )),
            None => lines.push(format!("[feed] {status}")),
        },
        FeedEvent::Message(text) => {
            if panel.open && !panel.minimized && panel.previewing.is_none() {
                lines.push(render(text, markup));
            }
        }
    }

    lines
}

/// Applies one slash command to the manager.
pub fn apply_command(
    manager: &mut TranscriptManager,
    command: WatchCommand,
    export_dir: &Path,
    markup: bool,
) -> Reply {
    let lines = match command {
        WatchCommand::Help => HELP_LINES.iter().map(|line| line.to_string()).collect(),
        WatchCommand::History => {
            if manager.toggle_history() {
                history_listing(manager)
            } else {
                vec!["[history] hidden".to_string()]
            }
        }
        WatchCommand::View(position) => match manager.view_session_at(position - 1) {
            Some(id) => {
                let mut lines = vec![format!("[preview] session {id}")];
                lines.extend(displayed(manager, markup));
                lines
            }
            None => vec![format!("[history] no archived session #{position}")],
        },
        WatchCommand::Live => {
            manager.show_live();
            let mut lines = vec!["[panel] live".to_string()];
            lines.extend(displayed(manager, markup));
            lines
        }
        WatchCommand::Minimize => {
            if manager.toggle_minimized() {
                vec!["[panel] minimized".to_string()]
            } else {
                let mut lines = vec!["[panel] restored".to_string()];
                lines.extend(displayed(manager, markup));
                lines
            }
        }
        WatchCommand::Dismiss => match manager.dismiss() {
            Some(id) => vec![
                "[panel] dismissed".to_string(),
                archived_line(manager, id),
            ],
            None => vec!["[panel] dismissed".to_string()],
        },
        WatchCommand::Export => match manager.export_displayed(export_dir) {
            Ok(path) => vec![format!("[export] wrote {}", path.display())],
            Err(error) => vec![format!("[export] failed: {error}")],
        },
        WatchCommand::Quit => return Reply::Quit,
        WatchCommand::Usage(usage) => vec![usage.to_string()],
        WatchCommand::Unknown(command) => vec![format!("unknown command {command}; try /help")],
    };

    Reply::Continue(lines)
}

/// Numbered archived sessions, oldest first, one summary line each.
pub fn history_listing(manager: &TranscriptManager) -> Vec<String> {
    let entries = manager.history().entries();
    if entries.is_empty() {
        return vec!["[history] no archived sessions".to_string()];
    }

    let mut lines = vec![format!("[history] {} archived sessions", entries.len())];
    lines.extend(entries.iter().enumerate().map(|(index, entry)| {
        format!(
            "{:>3}. {}  {}",
            index + 1,
            entry.archived_at_rfc3339(),
            entry.summary(SUMMARY_GRAPHEMES).replace('\n', " ")
        )
    }));
    lines
}

fn displayed(manager: &TranscriptManager, markup: bool) -> Vec<String> {
    manager
        .displayed_lines()
        .into_iter()
        .map(|line| render(line, markup))
        .collect()
}

fn render(line: &str, markup: bool) -> String {
    if markup {
        format_line(line)
    } else {
        line.to_string()
    }
}

fn archived_line(manager: &TranscriptManager, id: thinking_feed::SessionId) -> String {
    let count = manager
        .history()
        .get(id)
        .map_or(0, |entry| entry.lines().len());
    format!("[history] archived session {id} ({count} lines)")
}

/// Runs the watch loop until `/quit`, Ctrl-C, or a stdout failure.
pub async fn run_watch(args: &WatchArgs, env: &EnvConfig) -> Result<()> {
    let endpoint = args.endpoint(env);
    let manager: SharedManager = Arc::new(Mutex::new(TranscriptManager::new(
        args.manager_options(env),
    )));
    let (tx, mut updates) = mpsc::unbounded_channel();
    let runtime = FeedRuntime::spawn(
        WebSocketConnector,
        endpoint.clone(),
        Arc::clone(&manager),
        Some(tx),
    );

    let mut stdout = io::stdout();
    print_lines(
        &mut stdout,
        &[format!("watching {endpoint}; type /help for commands")],
    )?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut sweep = tokio::time::interval(DORMANT_SWEEP);

    loop {
        tokio::select! {
            Some(update) = updates.recv() => {
                let lines = describe_update(&update, &lock_unpoisoned(&manager), args.markup);
                print_lines(&mut stdout, &lines)?;
            }
            line = input.next_line(), if input_open => {
                let Some(line) = line.context("reading commands from stdin")? else {
                    input_open = false;
                    continue;
                };
                let Some(command) = parse_slash_command(&line) else {
                    continue;
                };
                let reply = apply_command(
                    &mut lock_unpoisoned(&manager),
                    command,
                    &args.export_dir,
                    args.markup,
                );
                match reply {
                    Reply::Quit => break,
                    Reply::Continue(lines) => print_lines(&mut stdout, &lines)?,
                }
            }
            _ = sweep.tick() => {
                let expired = {
                    let mut manager = lock_unpoisoned(&manager);
                    manager.expire_dormant().map(|id| archived_line(&manager, id))
                };
                if let Some(line) = expired {
                    print_lines(&mut stdout, &[line])?;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for Ctrl-C")?;
                break;
            }
        }
    }

    runtime.shutdown().await;
    while let Ok(update) = updates.try_recv() {
        let lines = describe_update(&update, &lock_unpoisoned(&manager), args.markup);
        print_lines(&mut stdout, &lines)?;
    }

    let archived = lock_unpoisoned(&manager).history().len();
    print_lines(
        &mut stdout,
        &[format!("[feed] stopped; {archived} archived sessions")],
    )?;
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}").context("writing to stdout")?;
    }
    out.flush().context("flushing stdout")
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
