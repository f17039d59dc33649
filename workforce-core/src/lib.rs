//! workforce-core: demand matching, movement resolution, and break
//! placement for call-centre staffing simulation.

pub mod assign;
pub mod availability;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod escalate;
pub mod movement;
pub mod offdays;
pub mod pivot;
pub mod roster;
pub mod simulate;
pub mod types;

pub use assign::{assign_all, bounds, AssignmentRow, IntervalState, Shortage};
pub use availability::{available_with_sunday_rule, base_availability};
pub use config::{RunConfig, ServiceSelection};
pub use demand::{melt, slice_by_period, DemandCell, Period, RawDemandSheet};
pub use engine::{run_all_services, run_simulation, EscalatedSimRow, ServiceReport};
pub use error::{Result, WorkforceError};
pub use escalate::{escalate_row, EscalatedMovement};
pub use movement::{resolve_movements, Movement};
pub use offdays::assign_off_days;
pub use pivot::{build_week_grids, filter_by_service, flatten_presence, normalize_name, Presence, PresenceRecord, WeekGrid, WeekGridRow};
pub use roster::{parse_roster, Agent, RosterRecord};
pub use simulate::apply_movements;
pub use types::{canonical_ceil, canonical_floor, Contract, ServiceKey, CANONICAL_ENTRY_HOURS};
