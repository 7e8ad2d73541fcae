//! `thinking-feed` command line.
//!
//! `watch` streams the live transcript panel and takes slash commands on
//! stdin; `search`, `suggest`, `recent`, `saved` and `prefs` cover the search
//! side. Output is plain text on stdout, logs go to stderr.

pub mod app;
pub mod cli;
pub mod commands;
pub mod search;
pub mod watch;
