// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use clap::Subcommand;
use color_eyre::Result;
use color_eyre::eyre::{Context, OptionExt, eyre};
use shift_desk::ShiftState;
use shift_desk_api::{
    EngineConfig, HttpShiftBackend, IdentityProvider, ShiftService, StaticIdentity,
    SubmissionOutcome, SystemClock, UnverifiedTokenClaims,
};
use shift_desk_domain::{
    EmployeeId, IdentityToken, ShiftPeriod, ShiftTime, StoreId, parse_iso_date,
};
use shift_desk_persistence::SqliteDraftStore;
use time::Date;
use tracing::info;

use crate::Connection;
use crate::render::{render_entry, render_outcome, render_period};

type CliService = ShiftService<HttpShiftBackend, SqliteDraftStore>;

/// The plan applied by `edit` and `bulk-edit`.
#[derive(Debug, Clone, clap::Args)]
pub struct Plan {
    /// Start time, e.g. `9`, `9.5` or `09:30`
    #[arg(long)]
    pub start: Option<ShiftTime>,

    /// End time, e.g. `17`, `17.5` or `17:30`
    #[arg(long)]
    pub end: Option<ShiftTime>,

    /// Mark the day as a holiday
    #[arg(long)]
    pub holiday: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// List owed periods with their statuses
    #[command(visible_alias = "ls")]
    Periods,

    /// Show every day of one period, draft first
    Show {
        /// Period id or start date
        #[arg(long)]
        period: String,
    },

    /// Set the plan for one day
    Edit {
        /// Period id or start date
        #[arg(long)]
        period: String,

        /// Day to edit (`YYYY-MM-DD`)
        #[arg(long, value_parser = parse_date)]
        date: Date,

        #[command(flatten)]
        plan: Plan,
    },

    /// Set the same plan for several days
    BulkEdit {
        /// Period id or start date
        #[arg(long)]
        period: String,

        /// Days to edit (`YYYY-MM-DD`), comma separated
        #[arg(long, value_parser = parse_date, value_delimiter = ',', required = true)]
        dates: Vec<Date>,

        #[command(flatten)]
        plan: Plan,
    },

    /// Copy the preceding period's plan into a period
    #[command(visible_alias = "cp")]
    CopyPrevious {
        /// Period id or start date
        #[arg(long)]
        period: String,
    },

    /// Throw away the draft of a period
    Discard {
        /// Period id or start date
        #[arg(long)]
        period: String,
    },

    /// Submit the draft of a period
    Submit {
        /// Period id or start date
        #[arg(long)]
        period: String,
    },
}

/// Parses a `YYYY-MM-DD` command-line date.
pub fn parse_date(value: &str) -> Result<Date, String> {
    parse_iso_date(value).map_err(|e| e.to_string())
}

impl Command {
    pub async fn run(self, connection: &Connection) -> Result<()> {
        let mut service: CliService = open_service(connection).await?;

        match self {
            Self::Periods => {
                let today: Date = service.today()?;
                println!("Today: {today}");
                for period in service.state().known_periods() {
                    let has_draft: bool = service.state().has_draft(&period.id);
                    println!(
                        "{}",
                        render_period(
                            period,
                            has_draft,
                            service.period_status(period)?,
                            service.submission_status(period)?,
                        )
                    );
                }
            }
            Self::Show { period } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                let shown: &ShiftPeriod = service
                    .state()
                    .find_draft(&period_id)
                    .or_else(|| service.state().find_period(&period_id))
                    .ok_or_eyre("Period disappeared after resolution")?;
                for entry in &shown.entries {
                    println!("{}", render_entry(entry));
                }
            }
            Self::Edit { period, date, plan } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                service.select_for_editing(&period_id)?;
                service.update_shift(date, plan.start, plan.end, plan.holiday)?;
                println!("Saved draft of {period_id} for {date}");
            }
            Self::BulkEdit {
                period,
                dates,
                plan,
            } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                let count: usize = dates.len();
                service.select_for_editing(&period_id)?;
                service.bulk_update_shifts(dates, plan.start, plan.end, plan.holiday)?;
                println!("Saved draft of {period_id} for {count} days");
            }
            Self::CopyPrevious { period } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                service.select_for_editing(&period_id)?;
                if service.copy_previous_period()? {
                    println!("Copied previous period into {period_id}");
                } else {
                    println!("No period precedes {period_id}; nothing copied");
                }
            }
            Self::Discard { period } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                service.discard_draft(&period_id)?;
                println!("Discarded draft of {period_id}");
            }
            Self::Submit { period } => {
                let period_id: IdentityToken = resolve_period(service.state(), &period)?;
                let outcome: SubmissionOutcome = service.submit_shift(&period_id).await?;
                println!("{}", render_outcome(&period_id, &outcome));
                if !outcome.is_submitted() {
                    return Err(eyre!("Submission of {period_id} was aborted"));
                }
            }
        }

        Ok(())
    }
}

async fn open_service(connection: &Connection) -> Result<CliService> {
    let store_id: StoreId = StoreId::new(&connection.store).wrap_err("Invalid --store")?;
    let employee_id: EmployeeId =
        EmployeeId::new(&connection.employee).wrap_err("Invalid --employee")?;
    let config: EngineConfig =
        EngineConfig::with_timezone(&connection.timezone).wrap_err("Invalid --timezone")?;

    let drafts: SqliteDraftStore = match &connection.database {
        Some(path) => {
            info!("Using draft database at {}", path.display());
            SqliteDraftStore::new_with_file(path)?
        }
        None => {
            info!("Using in-memory draft database");
            SqliteDraftStore::new_in_memory()?
        }
    };

    let identity: Arc<dyn IdentityProvider> = match &connection.token {
        Some(token) => Arc::new(UnverifiedTokenClaims::new(Some(token.clone()))),
        None => Arc::new(StaticIdentity::new(employee_id.clone())),
    };

    let mut service: CliService = ShiftService::open(
        HttpShiftBackend::new(&connection.backend_url, connection.token.clone()),
        drafts,
        identity,
        Arc::new(SystemClock),
        config,
    )?;
    service.initialize(&store_id, &employee_id).await?;
    Ok(service)
}

/// Resolves a period argument given as an id or a start date.
pub fn resolve_period(state: &ShiftState, reference: &str) -> Result<IdentityToken> {
    if let Ok(period_id) = IdentityToken::parse(reference) {
        return Ok(period_id);
    }

    let start_date: Date = parse_date(reference)
        .map_err(|_| eyre!("'{reference}' is neither a period id nor a start date"))?;
    state
        .known_periods()
        .into_iter()
        .find(|p| p.start_date == start_date)
        .map(|p| p.id.clone())
        .ok_or_else(|| eyre!("No period starts on {start_date}"))
}
