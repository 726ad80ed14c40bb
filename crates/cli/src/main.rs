// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # shift-desk - command-line client
//!
//! Each invocation opens the local draft database, reconciles the owed
//! periods with the backend, runs one command and exits. Drafts persist
//! between invocations when `--database` points at a file.
//!
//! Periods are addressed either by id or by their start date:
//!
//! ```text
//! shift-desk --store store-001 --employee emp-042 periods
//! shift-desk --store store-001 --employee emp-042 --database drafts.db \
//!     edit --period 2025-06-01 --date 2025-06-02 --start 9 --end 17.5
//! shift-desk --store store-001 --employee emp-042 --database drafts.db \
//!     submit --period 2025-06-01
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod render;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use color_eyre::Result;
use commands::Command;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run().await {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "shift-desk", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    connection: Connection,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Where the engine reads and writes.
#[derive(Debug, Clone, clap::Args)]
struct Connection {
    /// Base URL of the shift backend
    #[arg(long, default_value = "http://localhost:8000/api")]
    backend_url: String,

    /// Bearer token; the employee is read from its `employeeId` claim
    #[arg(long)]
    token: Option<String>,

    /// Draft database file. If not provided, drafts are kept in memory.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Store whose periods are managed
    #[arg(long)]
    store: String,

    /// Employee whose periods are generated
    #[arg(long)]
    employee: String,

    /// IANA timezone of the store
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

impl Args {
    async fn run(self) -> Result<()> {
        self.command.run(&self.connection).await
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}
