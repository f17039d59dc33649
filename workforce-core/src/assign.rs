//! Interval Assigner (C5): computes bounds, assigns present agents,
//! classifies interval state, and records an assignment row.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::availability::available_with_sunday_rule;
use crate::demand::DemandCell;
use crate::roster::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalState {
    Under,
    Over,
    Limite,
    Ok,
}

/// One row of the assignment log, shared by the `Nomina` and `Simulacion`
/// sheets. `movements` starts empty and is
/// filled in by C7 on the `simulated` copy only.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub date: NaiveDate,
    /// `HH:MM`.
    pub interval_label: String,
    pub prime: bool,
    pub required: i64,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub shortage: i64,
    pub surplus: i64,
    pub count: i64,
    pub state: IntervalState,
    pub leaders: Vec<String>,
    pub movements: String,
    /// `;`-joined, de-duplicated, order preserved by filtered selection.
    pub present_names: String,
}

/// A shortage waiting on C6's movement resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortage {
    pub date: NaiveDate,
    pub interval_label: String,
    pub amount: i64,
}

/// Dynamic bounds `[L, U]` for a required count `r`.
pub fn bounds(required: i64) -> (i64, i64) {
    if required < 10 {
        ((required - 1).max(0), required + 1)
    } else if required < 20 {
        ((required - 2).max(0), required + 2)
    } else {
        let r = required as f64;
        ((r * 0.9).floor() as i64, (r * 1.1).ceil() as i64)
    }
}

fn is_prime(t: NaiveTime) -> bool {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let twenty_one = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
    t >= nine && t < twenty_one
}

fn interval_label(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

fn classify(count: i64, lower: i64, upper: i64) -> IntervalState {
    if count < lower {
        IntervalState::Under
    } else if count > upper {
        IntervalState::Over
    } else if count == lower {
        IntervalState::Limite
    } else {
        IntervalState::Ok
    }
}

/// Runs C5 over every demand cell in ascending (date, time) order,
/// producing the `nominal` assignment log and the shortage list C6
/// consumes. The `simulated` log starts as an exact clone of `nominal`;
/// C7 mutates it in place.
///
/// Determinism requirement: for fixed inputs, order, content
/// and names in every row are reproducible bit-for-bit — this function
/// performs no randomness and no unordered iteration over agents.
pub fn assign_all(agents: &[Agent], demand: &[DemandCell]) -> (Vec<AssignmentRow>, Vec<AssignmentRow>, Vec<Shortage>) {
    let mut nominal: Vec<AssignmentRow> = Vec::with_capacity(demand.len());
    let mut shortages = Vec::new();

    for cell in demand {
        let (lower, upper) = bounds(cell.required);
        let prime = is_prime(cell.time);
        let label = interval_label(cell.time);

        let present = available_with_sunday_rule(agents, cell.date, cell.time, &label, lower, &nominal);
        let count = present.len() as i64;
        let shortage = (lower - count).max(0);
        let surplus = (count - upper).max(0);
        let state = classify(count, lower, upper);

        let mut leaders: Vec<String> = Vec::new();
        for a in &present {
            if let Some(s) = &a.superior {
                if !leaders.contains(s) {
                    leaders.push(s.clone());
                }
            }
        }

        let mut present_names: Vec<String> = Vec::new();
        for a in &present {
            if !present_names.contains(&a.name) {
                present_names.push(a.name.clone());
            }
        }

        if shortage > 0 {
            shortages.push(Shortage { date: cell.date, interval_label: label.clone(), amount: shortage });
        }

        nominal.push(AssignmentRow {
            date: cell.date,
            interval_label: label,
            prime,
            required: cell.required,
            lower_bound: lower,
            upper_bound: upper,
            shortage,
            surplus,
            count,
            state,
            leaders,
            movements: String::new(),
            present_names: present_names.join(";"),
        });
    }

    let simulated = nominal.clone();
    (nominal, simulated, shortages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_small_requirement() {
        assert_eq!(bounds(0), (0, 1));
        assert_eq!(bounds(5), (4, 6));
    }

    #[test]
    fn bounds_medium_requirement() {
        assert_eq!(bounds(10), (8, 12));
        assert_eq!(bounds(19), (17, 21));
    }

    #[test]
    fn bounds_large_requirement() {
        assert_eq!(bounds(20), (18, 22));
        assert_eq!(bounds(25), (22, 28));
    }

    #[test]
    fn state_classification_matches_count_vs_bounds() {
        assert_eq!(classify(3, 4, 6), IntervalState::Under);
        assert_eq!(classify(7, 4, 6), IntervalState::Over);
        assert_eq!(classify(4, 4, 6), IntervalState::Limite);
        assert_eq!(classify(5, 4, 6), IntervalState::Ok);
    }

    #[test]
    fn scenario_a_single_agent_single_interval_ok() {
        use crate::roster::Agent;
        use crate::types::Contract;

        let agent = Agent {
            name: "A".into(),
            dni: "1".into(),
            superior: None,
            servicio: "svc".into(),
            contract: Contract::H24,
            entry: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            exit: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            off_days: Vec::new(),
        };
        let demand = vec![DemandCell {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            required: 1,
        }];
        let (nominal, _, shortages) = assign_all(&[agent], &demand);
        assert_eq!(nominal.len(), 1);
        let row = &nominal[0];
        assert_eq!(row.count, 1);
        assert_eq!(row.lower_bound, 0);
        assert_eq!(row.upper_bound, 2);
        assert_eq!(row.state, IntervalState::Ok);
        assert_eq!(row.present_names, "A");
        assert!(shortages.is_empty());
    }
}
