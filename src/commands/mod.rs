//! CLI subcommands

pub mod init;
pub mod list;
pub mod manifest;
pub mod new;
pub mod show;
