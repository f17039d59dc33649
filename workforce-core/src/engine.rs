//! Top-level orchestration: wires C1–C9 together for one service,
//! the single entry point other crates call into.

use crate::assign::{self, AssignmentRow};
use crate::demand::{self, DemandCell, Period, RawDemandSheet};
use crate::escalate::{self, EscalatedMovement};
use crate::movement::{self, Movement};
use crate::offdays;
use crate::pivot::{self, WeekGrid};
use crate::roster::{self, Agent, RosterRecord};
use crate::simulate;
use crate::types::ServiceKey;

/// A `Simulacion`/`Sim_EscSug` row paired with its suggested escalation
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalatedSimRow {
    pub row: AssignmentRow,
    pub escalona_sugerida: String,
}

/// Everything C10 needs to emit one service's five report sheets plus its
/// week grids.
#[derive(Debug, Clone)]
pub struct ServiceReport {
    pub service: ServiceKey,
    pub nomina: Vec<AssignmentRow>,
    pub simulacion: Vec<AssignmentRow>,
    pub movimientos: Vec<Movement>,
    pub sim_esc_sug: Vec<EscalatedSimRow>,
    pub mov_escalonados: Vec<EscalatedMovement>,
    pub week_grids: Vec<WeekGrid>,
}

/// Runs the full pipeline — C1 through C9 — for one service.
///
/// `demand_sheet` is this service's raw demand sheet (already selected
/// from the workbook by `workforce-io`); `roster` is the full, unfiltered
/// roster (C2 does the service-substring filtering itself).
pub fn run_simulation(roster: &[RosterRecord], demand_sheet: &RawDemandSheet, service: ServiceKey, period: Period, seed: u64) -> ServiceReport {
    let mut agents: Vec<Agent> = roster::parse_roster(roster, service);
    offdays::assign_off_days(&mut agents);

    let cells: Vec<DemandCell> = demand::slice_by_period(demand::melt(demand_sheet), period);

    let (nominal, mut simulated, shortages) = assign::assign_all(&agents, &cells);
    let movements = movement::resolve_movements(&shortages, &nominal);
    simulate::apply_movements(&mut simulated, &movements);

    let mut sim_esc_sug = Vec::with_capacity(simulated.len());
    let mut mov_escalonados = Vec::new();
    for row in &simulated {
        let (escalona_sugerida, mut expanded) = escalate::escalate_row(row);
        mov_escalonados.append(&mut expanded);
        sim_esc_sug.push(EscalatedSimRow { row: row.clone(), escalona_sugerida });
    }

    let presence = pivot::flatten_presence(&nominal, &agents);
    let week_grids = pivot::build_week_grids(&presence, seed);

    ServiceReport {
        service,
        nomina: nominal,
        simulacion: simulated,
        movimientos: movements,
        sim_esc_sug,
        mov_escalonados,
        week_grids,
    }
}

/// Runs C1–C9 for every real service (multi-service mode),
/// using `demand_by_service` to locate each service's sheet.
pub fn run_all_services(roster: &[RosterRecord], demand_by_service: &std::collections::HashMap<ServiceKey, RawDemandSheet>, period: Period, seed: u64) -> Vec<ServiceReport> {
    ServiceKey::ALL
        .into_iter()
        .filter_map(|svc| {
            let sheet = demand_by_service.get(&svc)?;
            Some(run_simulation(roster, sheet, svc, period, seed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::RawDemandSheet;
    use crate::roster::RosterRecord;

    #[test]
    fn empty_demand_produces_empty_outputs_without_error() {
        let roster = vec![RosterRecord {
            nombre: "Ana".into(),
            dni: "1".into(),
            superior: "Jefa".into(),
            ingreso: "10:00:00".into(),
            servicio: "Internet".into(),
            activo: "ACTIVO".into(),
            contrato: "24HS".into(),
        }];
        let sheet = RawDemandSheet::default();
        let report = run_simulation(&roster, &sheet, ServiceKey::SopConectividad, Period::Mes, 0);
        assert!(report.nomina.is_empty());
        assert!(report.simulacion.is_empty());
        assert!(report.movimientos.is_empty());
        assert!(report.week_grids.is_empty());
    }
}
