use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use workforce_core::{engine, Period, RunConfig, ServiceSelection};
use workforce_io::{read_all_demand_sheets, read_demand_sheet, read_roster, write_report, write_week_grids};

/// Runs one staffing simulation: roster + demand workbooks in, report and
/// week-grid workbooks out.
#[derive(Parser, Debug)]
#[command(name = "workforce-sim", version, about = "Call-centre staffing simulator")]
struct Cli {
    /// Roster workbook path
    #[arg(long)]
    roster: PathBuf,

    /// Demand workbook path
    #[arg(long)]
    demand: PathBuf,

    /// Service key (one of the seven real services), or any other string for "all services"
    #[arg(long)]
    service: String,

    /// Period: mes, sem1, sem2, sem3 or sem4
    #[arg(long, default_value = "mes")]
    period: String,

    /// PRNG seed for the break-time picker, the engine's only non-deterministic step
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Report workbook output path
    #[arg(long, default_value = "report.xlsx")]
    report_out: PathBuf,

    /// Week-grid workbook output path
    #[arg(long, default_value = "week_grids.xlsx")]
    weekgrid_out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let period = Period::parse(&cli.period).with_context(|| format!("unrecognised period '{}'", cli.period))?;
    let selection = ServiceSelection::parse(&cli.service);
    let config = RunConfig::new(selection, period).with_seed(cli.seed);

    let roster = read_roster(&cli.roster).context("reading roster workbook")?;

    let reports = match config.service {
        ServiceSelection::Single(service) => {
            let sheet = read_demand_sheet(&cli.demand, service).context("reading demand workbook")?;
            vec![engine::run_simulation(&roster, &sheet, service, config.period, config.seed)]
        }
        ServiceSelection::All => {
            let sheets = read_all_demand_sheets(&cli.demand).context("reading demand workbook")?;
            engine::run_all_services(&roster, &sheets, config.period, config.seed)
        }
    };

    write_report(&cli.report_out, &reports).context("writing report workbook")?;
    write_week_grids(&cli.weekgrid_out, &reports).context("writing week-grid workbook")?;

    log::info!("wrote {} service report(s) to {}", reports.len(), cli.report_out.display());
    Ok(())
}
