//! Roster loading (C2): parses the employee roster, filters to active
//! agents for the target service, and derives each agent's shift egress.

use chrono::NaiveTime;
use log::{debug, warn};

use crate::types::{Contract, ServiceKey};

/// One roster row as read off the wire, before any parsing or filtering.
/// Keeps the wire schema (plain strings) separate from the internal
/// `Agent` type.
#[derive(Debug, Clone, Default)]
pub struct RosterRecord {
    pub nombre: String,
    pub dni: String,
    pub superior: String,
    pub ingreso: String,
    pub servicio: String,
    pub activo: String,
    pub contrato: String,
}

/// An employee eligible for scheduling, with shift bounds already derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Upper-cased, trimmed.
    pub name: String,
    pub dni: String,
    pub superior: Option<String>,
    pub servicio: String,
    pub contract: Contract,
    pub entry: NaiveTime,
    /// `entry + shift_hours(contract)`, wrapped modulo 24h.
    pub exit: NaiveTime,
    /// Weekdays this agent is off. Empty until `offdays::assign_off_days`
    /// has run.
    pub off_days: Vec<chrono::Weekday>,
}

impl Agent {
    /// True if the shift window wraps past midnight (exit <= entry).
    pub fn wraps_midnight(&self) -> bool {
        self.exit < self.entry
    }

    /// Whether time-of-day `t` falls inside this agent's shift window.
    pub fn covers(&self, t: NaiveTime) -> bool {
        if self.wraps_midnight() {
            t >= self.entry || t < self.exit
        } else {
            self.entry <= t && t < self.exit
        }
    }

    pub fn is_off(&self, weekday: chrono::Weekday) -> bool {
        self.off_days.contains(&weekday)
    }
}

fn parse_ingreso(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M")).ok()
}

fn derive_exit(entry: NaiveTime, contract: Contract) -> NaiveTime {
    let hours = contract.shift_hours();
    entry + chrono::Duration::hours(hours)
}

/// Parse and filter the raw roster for one service (C2).
///
/// - Name is upper-cased and trimmed.
/// - `INGRESO` is parsed as `HH:MM:SS`; unparseable rows are dropped silently.
/// - `SERVICIO` must contain (case-insensitively) one of the service's
///   roster substrings; `ACTIVO` must equal `"ACTIVO"`.
/// - Result is sorted by name (stable ascending), which fixes the roster
///   index C3's off-day planner keys off of.
pub fn parse_roster(records: &[RosterRecord], service: ServiceKey) -> Vec<Agent> {
    let mut agents: Vec<Agent> = records
        .iter()
        .filter_map(|rec| {
            let servicio = rec.servicio.trim();
            if !service.matches_roster_field(servicio) {
                return None;
            }
            if rec.activo.trim().to_uppercase() != "ACTIVO" {
                return None;
            }

            let name = rec.nombre.trim().to_uppercase();
            if name.is_empty() {
                return None;
            }

            let entry = match parse_ingreso(&rec.ingreso) {
                Some(t) => t,
                None => {
                    warn!("roster: dropping agent '{name}' with unparseable INGRESO '{}'", rec.ingreso);
                    return None;
                }
            };

            let contract = Contract::parse(&rec.contrato);
            if contract == Contract::Unknown {
                debug!(
                    "roster: agent '{name}' has unrecognised CONTRATO '{}', treating as always-on",
                    rec.contrato
                );
            }
            let exit = derive_exit(entry, contract);

            let superior = {
                let s = rec.superior.trim();
                if s.is_empty() { None } else { Some(s.to_string()) }
            };

            Some(Agent {
                name,
                dni: rec.dni.trim().to_string(),
                superior,
                servicio: servicio.to_string(),
                contract,
                entry,
                exit,
                off_days: Vec::new(),
            })
        })
        .collect();

    agents.sort_by(|a, b| a.name.cmp(&b.name));
    agents
}
