//! Escalation Planner (C8): splits any movement whose span exceeds two
//! hours into a chain of one-hour stepping movements.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::assign::AssignmentRow;

/// One hour-stepping sub-movement produced by escalating a wide movement.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalatedMovement {
    pub date: NaiveDate,
    pub move_count: i64,
    pub from: String,
    pub to: String,
}

fn movement_pattern() -> Regex {
    Regex::new(r"^(\d+) desde (\d{2}:\d{2}) → (\d{2}:\d{2})$").expect("static regex")
}

/// Escalates one row's (already-applied) movement text into the
/// `Escalona_Sugerida` string plus the flat list of hour-stepping
/// sub-movements contributed to `Mov_Escalonados`.
pub fn escalate_row(row: &AssignmentRow) -> (String, Vec<EscalatedMovement>) {
    let pattern = movement_pattern();
    let mut suggestions: Vec<String> = Vec::new();
    let mut expanded: Vec<EscalatedMovement> = Vec::new();

    for segment in row.movements.split(';').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let Some(caps) = pattern.captures(segment) else { continue };
        let count: i64 = caps[1].parse().expect("regex guarantees digits");
        let from = NaiveTime::parse_from_str(&caps[2], "%H:%M").expect("regex guarantees HH:MM");
        let to = NaiveTime::parse_from_str(&caps[3], "%H:%M").expect("regex guarantees HH:MM");

        let delta_hours = (to - from).num_seconds() / 3600;
        if delta_hours <= 2 {
            continue;
        }

        let mut current = from;
        for _ in 0..delta_hours {
            let next = current + chrono::Duration::hours(1);
            suggestions.push(format!("{count} desde {} → {}", current.format("%H:%M"), next.format("%H:%M")));
            expanded.push(EscalatedMovement {
                date: row.date,
                move_count: count,
                from: current.format("%H:%M").to_string(),
                to: next.format("%H:%M").to_string(),
            });
            current = next;
        }
    }

    (suggestions.join("; "), expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::IntervalState;
    use chrono::NaiveDate;

    fn row_with_movement(text: &str) -> AssignmentRow {
        AssignmentRow {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            interval_label: "09:00".to_string(),
            prime: true,
            required: 0,
            lower_bound: 0,
            upper_bound: 0,
            shortage: 0,
            surplus: 0,
            count: 0,
            state: IntervalState::Limite,
            leaders: Vec::new(),
            movements: text.to_string(),
            present_names: String::new(),
        }
    }

    #[test]
    fn scenario_e_escalation_split_four_hours() {
        let row = row_with_movement("2 desde 09:00 → 13:00");
        let (text, expanded) = escalate_row(&row);
        assert_eq!(text, "2 desde 09:00 → 10:00; 2 desde 10:00 → 11:00; 2 desde 11:00 → 12:00; 2 desde 12:00 → 13:00");
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[0].from, "09:00");
        assert_eq!(expanded.last().unwrap().to, "13:00");
    }

    #[test]
    fn span_of_two_hours_or_less_has_no_escalation() {
        let row = row_with_movement("1 desde 08:00 → 10:00");
        let (text, expanded) = escalate_row(&row);
        assert!(text.is_empty());
        assert!(expanded.is_empty());
    }

    #[test]
    fn empty_movement_text_escalates_to_nothing() {
        let row = row_with_movement("");
        let (text, expanded) = escalate_row(&row);
        assert!(text.is_empty());
        assert!(expanded.is_empty());
    }
}
