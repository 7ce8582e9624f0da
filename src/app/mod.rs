// Application layer: command handlers driving a `Platform` for the CLI.

pub mod commands;
