#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Help,
    History,
    /// 1-based position in the history listing.
    View(usize),
    Live,
    Minimize,
    Dismiss,
    Export,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

pub const HELP_LINES: [&str; 8] = [
    "/help        show this list",
    "/history     show or hide archived sessions",
    "/view <n>    preview archived session n",
    "/live        return to the live session",
    "/minimize    minimize or restore the panel",
    "/dismiss     archive the live session and clear the panel",
    "/export      write the displayed transcript to a file",
    "/quit        stop watching",
];

pub fn parse_slash_command(input: &str) -> Option<WatchCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let command = words.next().unwrap_or(trimmed).to_string();

    let parsed = match command.as_str() {
        "/help" => WatchCommand::Help,
        "/history" => WatchCommand::History,
        "/view" => match words.next().and_then(|arg| arg.parse::<usize>().ok()) {
            Some(index) if index > 0 => WatchCommand::View(index),
            _ => WatchCommand::Usage("usage: /view <n> where n starts at 1"),
        },
        "/live" => WatchCommand::Live,
        "/minimize" => WatchCommand::Minimize,
        "/dismiss" => WatchCommand::Dismiss,
        "/export" => WatchCommand::Export,
        "/quit" => WatchCommand::Quit,
        _ => WatchCommand::Unknown(command),
    };

    Some(parsed)
}
