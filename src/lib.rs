// RR Scorers: pluggable query/document scorers and a concurrent executor

pub mod cli;
pub mod config;
pub mod formatter;
pub mod observability;
pub mod plugin;
pub mod scorers;
pub mod scoring;
