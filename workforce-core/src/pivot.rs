//! Week Pivot + Break Synthesiser (C9): groups assigned rows into ISO
//! weeks, pivots to a per-agent/per-weekday presence grid, and picks a
//! break time for each (agent, weekday).

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assign::AssignmentRow;
use crate::roster::Agent;

/// One (agent, date, interval) observation, flattened out of the assignment
/// log's `present_names` column — the wire-level format the pivot actually
/// consumes.
#[derive(Debug, Clone)]
pub struct PresenceRecord {
    pub agent_name: String,
    pub dni: String,
    pub superior: String,
    pub servicio: String,
    pub canonical_entry: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Explodes the assignment log's `;`-joined `present_names` into one
/// [`PresenceRecord`] per (agent, date, interval), looking up each named
/// agent's DNI/superior/service/entry time from the roster.
pub fn flatten_presence(rows: &[AssignmentRow], agents: &[Agent]) -> Vec<PresenceRecord> {
    let mut out = Vec::new();
    for row in rows {
        let time = NaiveTime::parse_from_str(&row.interval_label, "%H:%M").expect("HH:MM label");
        for raw_name in row.present_names.split(';') {
            let name = raw_name.trim();
            if name.is_empty() {
                continue;
            }
            let Some(agent) = agents.iter().find(|a| a.name == name) else { continue };
            out.push(PresenceRecord {
                agent_name: agent.name.clone(),
                dni: agent.dni.clone(),
                superior: agent.superior.clone().unwrap_or_default(),
                servicio: agent.servicio.clone(),
                canonical_entry: format!("{:02}:{:02}", agent.entry.hour(), agent.entry.minute()),
                date: row.date,
                time,
            });
        }
    }
    out
}

/// Normalises a `"APELLIDO, NOMBRE"` surname-first name into
/// `"NOMBRE APELLIDO"`; names with no comma pass through unchanged. Mirrors
/// the upstream nómina-export reconciliation step the original converter
/// performs before grouping (see `SPEC_FULL.md` C9).
pub fn normalize_name(raw: &str) -> String {
    let name = raw.trim().to_uppercase();
    match name.split_once(',') {
        Some((apellido, nombre)) => format!("{} {}", nombre.trim(), apellido.trim()),
        None => name,
    }
}

/// Re-filters presence records by a service substring, mirroring C2's own
/// roster filter so a converted week grid never leaks another service's
/// names when fed a mixed-service assignment log.
pub fn filter_by_service(records: Vec<PresenceRecord>, substring: &str) -> Vec<PresenceRecord> {
    let needle = substring.to_lowercase();
    records.into_iter().filter(|r| r.servicio.to_lowercase().contains(&needle)).collect()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

const WEEKDAYS: [Weekday; 7] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Franco,
}

/// One row of a week-grid sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGridRow {
    pub dni: String,
    pub name: String,
    pub servicio: String,
    pub superior: String,
    pub canonical_entry: String,
    pub weekdays: [Presence; 7],
    pub breaks: [Option<String>; 7],
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    /// Monday of the week, used to name the sheet (`Sem YYYY-MM-DD`).
    pub week_start: NaiveDate,
    pub rows: Vec<WeekGridRow>,
}

/// Picks the agent's break time for one weekday's worked intervals.
/// `times` must be sorted ascending; emptiness is checked by the caller.
/// This is the engine's only non-deterministic step; `rng` must be seeded
/// for reproducible output.
fn pick_break(times: &[NaiveTime], rng: &mut StdRng) -> Option<String> {
    if times.is_empty() {
        return None;
    }

    let median = || times[times.len() / 2].format("%H:%M").to_string();

    if times.len() < 3 {
        return Some(median());
    }

    let window_start = *times.first().unwrap() + chrono::Duration::hours(2);
    let window_end = *times.last().unwrap() - chrono::Duration::hours(2);
    if window_start > window_end {
        return Some(median());
    }

    let candidates: Vec<&NaiveTime> = times.iter().filter(|t| **t >= window_start && **t <= window_end).collect();
    if candidates.is_empty() {
        return Some(median());
    }

    let idx = rng.random_range(0..candidates.len());
    Some(candidates[idx].format("%H:%M").to_string())
}

/// Builds one [`WeekGrid`] per ISO week present in `records` (Monday week
/// start), with presence pivoted per weekday and a
/// synthesised break per (agent, weekday).
pub fn build_week_grids(records: &[PresenceRecord], seed: u64) -> Vec<WeekGrid> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut weeks: std::collections::BTreeMap<NaiveDate, Vec<&PresenceRecord>> = std::collections::BTreeMap::new();
    for r in records {
        weeks.entry(week_start(r.date)).or_default().push(r);
    }

    let mut grids = Vec::new();
    for (week, week_records) in weeks {
        let mut by_agent: std::collections::BTreeMap<&str, Vec<&PresenceRecord>> = std::collections::BTreeMap::new();
        for r in &week_records {
            by_agent.entry(r.agent_name.as_str()).or_default().push(r);
        }

        let mut rows = Vec::new();
        for (_, agent_records) in by_agent {
            let first = agent_records[0];
            let mut weekdays = [Presence::Franco; 7];
            let mut breaks: [Option<String>; 7] = Default::default();

            for (i, wd) in WEEKDAYS.iter().enumerate() {
                let mut times: Vec<NaiveTime> =
                    agent_records.iter().filter(|r| r.date.weekday() == *wd).map(|r| r.time).collect();
                times.sort();

                if !times.is_empty() {
                    weekdays[i] = Presence::Present;
                }
                breaks[i] = pick_break(&times, &mut rng);
            }

            rows.push(WeekGridRow {
                dni: first.dni.clone(),
                name: first.agent_name.clone(),
                servicio: first.servicio.clone(),
                superior: first.superior.clone(),
                canonical_entry: first.canonical_entry.clone(),
                weekdays,
                breaks,
            });
        }

        grids.push(WeekGrid { week_start: week, rows });
    }

    grids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, date: NaiveDate, hhmm: &str) -> PresenceRecord {
        PresenceRecord {
            agent_name: name.to_string(),
            dni: "123".to_string(),
            superior: "Jefa".to_string(),
            servicio: "Internet".to_string(),
            canonical_entry: "10:00".to_string(),
            date,
            time: NaiveTime::parse_from_str(hhmm, "%H:%M").unwrap(),
        }
    }

    #[test]
    fn normalize_name_swaps_surname_first_format() {
        assert_eq!(normalize_name("Garcia, Juan"), "JUAN GARCIA");
        assert_eq!(normalize_name("Juan Garcia"), "JUAN GARCIA");
    }

    #[test]
    fn week_grid_marks_franco_on_days_with_no_presence() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let records = vec![record("ANA", monday, "10:00")];
        let grids = build_week_grids(&records, 0);
        assert_eq!(grids.len(), 1);
        let row = &grids[0].rows[0];
        assert_eq!(row.weekdays[0], Presence::Present); // Monday
        assert_eq!(row.weekdays[1], Presence::Franco); // Tuesday
    }

    #[test]
    fn break_picker_is_deterministic_given_a_seed() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let records = vec![
            record("ANA", monday, "09:00"),
            record("ANA", monday, "10:00"),
            record("ANA", monday, "11:00"),
            record("ANA", monday, "12:00"),
            record("ANA", monday, "13:00"),
        ];
        let a = build_week_grids(&records, 42);
        let b = build_week_grids(&records, 42);
        assert_eq!(a[0].rows[0].breaks[0], b[0].rows[0].breaks[0]);
        assert!(a[0].rows[0].breaks[0].is_some());
    }

    #[test]
    fn fewer_than_three_intervals_uses_median() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let records = vec![record("ANA", monday, "09:00"), record("ANA", monday, "11:00")];
        let grids = build_week_grids(&records, 0);
        // median of [09:00, 11:00] sorted, index len/2 = 1 -> 11:00
        assert_eq!(grids[0].rows[0].breaks[0], Some("11:00".to_string()));
    }

    #[test]
    fn empty_interval_set_yields_empty_break_cell() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let records = vec![record("ANA", monday, "09:00")];
        let grids = build_week_grids(&records, 0);
        // Tuesday has no presence at all.
        assert_eq!(grids[0].rows[0].breaks[1], None);
    }
}
