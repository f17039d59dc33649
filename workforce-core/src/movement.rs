//! Movement Resolver (C6): decides which over-staffed interval donates
//! headcount to each shortage interval.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::assign::{AssignmentRow, IntervalState, Shortage};
use crate::types::{canonical_ceil, canonical_floor};

/// A shift-entry adjustment recommendation: move `count` agents' entry
/// time from `from` to `to` on `date` to cover the interval at
/// `interval_label`. `from`/`to` are canonicalised hour strings (`HH:00`),
/// except `from` may be the literal `"19:00 (extraordinario)"` when no
/// donor interval qualifies at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub date: NaiveDate,
    pub interval_label: String,
    pub move_count: i64,
    pub from: String,
    pub to: String,
}

const EXTRAORDINARY: &str = "19:00 (extraordinario)";

fn parse_label(label: &str) -> NaiveTime {
    NaiveTime::parse_from_str(label, "%H:%M").expect("assignment rows always carry HH:MM labels")
}

fn donor_search_date(shortage_date: NaiveDate, t: NaiveTime) -> NaiveDate {
    if t < NaiveTime::from_hms_opt(1, 0, 0).unwrap() {
        shortage_date - chrono::Duration::days(1)
    } else {
        shortage_date
    }
}

/// Raw (uncanonicalised) donor hour string, before the `from` canonicalisation step.
fn find_raw_donor(nominal: &[AssignmentRow], search_date: NaiveDate, t: NaiveTime) -> String {
    let within_two_hours: Vec<(i64, &str)> = nominal
        .iter()
        .filter(|r| r.date == search_date && r.state == IntervalState::Over)
        .filter_map(|r| {
            let candidate = parse_label(&r.interval_label);
            let delta = (candidate - t).num_seconds();
            if delta != 0 && delta.abs() <= 2 * 3600 {
                Some((delta.abs(), r.interval_label.as_str()))
            } else {
                None
            }
        })
        .collect();

    if let Some(&(_, label)) = within_two_hours.iter().min_by_key(|t| (t.0, parse_label(t.1))) {
        return label.to_string();
    }

    let nineteen = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
    let eighteen_thirty = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
    let evening_candidates: Vec<(i64, &str)> = nominal
        .iter()
        .filter(|r| r.date == search_date && r.state == IntervalState::Over)
        .filter_map(|r| {
            let candidate = parse_label(&r.interval_label);
            if candidate <= eighteen_thirty {
                let dist = (nineteen - candidate).num_seconds().abs();
                Some((dist, r.interval_label.as_str()))
            } else {
                None
            }
        })
        .collect();

    match evening_candidates.iter().min_by_key(|t| (t.0, parse_label(t.1))) {
        Some(&(_, label)) => label.to_string(),
        None => EXTRAORDINARY.to_string(),
    }
}

fn canonicalize_from(raw: &str) -> String {
    if raw.contains('(') {
        return raw.to_string();
    }
    let hour: u32 = raw.split(':').next().unwrap().parse().expect("HH:MM donor label");
    format!("{:02}:00", canonical_floor(hour))
}

fn canonicalize_to(t: NaiveTime) -> String {
    if t < NaiveTime::from_hms_opt(1, 0, 0).unwrap() {
        return "19:00".to_string();
    }
    let hour = t.hour() + if t.minute() > 0 { 1 } else { 0 };
    format!("{:02}:00", canonical_ceil(hour))
}

/// Resolves every shortage into a `Movement`.
pub fn resolve_movements(shortages: &[Shortage], nominal: &[AssignmentRow]) -> Vec<Movement> {
    shortages
        .iter()
        .map(|s| {
            let t = parse_label(&s.interval_label);
            let search_date = donor_search_date(s.date, t);
            let raw_donor = find_raw_donor(nominal, search_date, t);
            let from = canonicalize_from(&raw_donor);
            let to = canonicalize_to(t);
            Movement { date: s.date, interval_label: s.interval_label.clone(), move_count: s.amount, from, to }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over_row(date: NaiveDate, label: &str, count: i64, lower: i64, upper: i64) -> AssignmentRow {
        AssignmentRow {
            date,
            interval_label: label.to_string(),
            prime: false,
            required: count,
            lower_bound: lower,
            upper_bound: upper,
            shortage: 0,
            surplus: (count - upper).max(0),
            count,
            state: if count > upper { IntervalState::Over } else { IntervalState::Ok },
            leaders: Vec::new(),
            movements: String::new(),
            present_names: String::new(),
        }
    }

    #[test]
    fn scenario_b_shortage_with_canonical_donor() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let nominal = vec![over_row(date, "08:30", 5, 2, 4)];
        let shortages = vec![Shortage { date, interval_label: "10:00".to_string(), amount: 3 }];
        let movements = resolve_movements(&shortages, &nominal);
        assert_eq!(movements.len(), 1);
        let m = &movements[0];
        assert_eq!(m.from, "08:00");
        assert_eq!(m.to, "10:00");
        assert_eq!(m.move_count, 3);
    }

    #[test]
    fn scenario_c_extraordinary_donor_when_none_qualify() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let nominal: Vec<AssignmentRow> = Vec::new();
        let shortages = vec![Shortage { date, interval_label: "10:00".to_string(), amount: 1 }];
        let movements = resolve_movements(&shortages, &nominal);
        assert_eq!(movements[0].from, "19:00 (extraordinario)");
        assert_eq!(movements[0].to, "19:00");
    }

    #[test]
    fn scenario_d_post_midnight_searches_previous_date() {
        let d3 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let d4 = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let nominal = vec![over_row(d3, "19:00", 10, 5, 8)];
        let shortages = vec![Shortage { date: d4, interval_label: "00:30".to_string(), amount: 2 }];
        let movements = resolve_movements(&shortages, &nominal);
        assert_eq!(movements[0].to, "19:00");
        assert_eq!(movements[0].from, "19:00");
    }
}
