//! workforce-io: xlsx roster/demand reading and report/week-grid writing,
//! kept decoupled from `workforce-core`'s pure engine — the engine trades
//! only in typed in-memory records, never in a workbook type.

pub mod read;
pub mod write;

pub use read::{read_all_demand_sheets, read_demand_sheet, read_roster};
pub use write::{write_report, write_week_grids};
