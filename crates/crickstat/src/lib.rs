// Batsman comparison front ends: the command-line commands and the
// terminal dashboard.

pub mod cli;
pub mod tui;
