//! Simulation Applier (C7): folds resolved movements back into the
//! `simulated` assignment log.

use crate::assign::{AssignmentRow, IntervalState};
use crate::movement::Movement;

/// Applies every movement to its matching `simulated` row: adds `move_count`
/// to `count`, forces `state` to `Limite`, and records the movement text.
///
/// The collision case is resolved as **overwrite**: a second
/// movement landing on an already-annotated row replaces its text rather
/// than appending with `"; "`. Shortages are unique per row in practice,
/// so this branch is not expected to be exercised outside of
/// directly-constructed tests.
pub fn apply_movements(simulated: &mut [AssignmentRow], movements: &[Movement]) {
    for mov in movements {
        if let Some(row) = simulated
            .iter_mut()
            .find(|r| r.date == mov.date && r.interval_label == mov.interval_label)
        {
            row.count += mov.move_count;
            row.state = IntervalState::Limite;
            row.movements = format!("{} desde {} → {}", mov.move_count, mov.from, mov.to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: chrono::NaiveDate, label: &str, count: i64) -> AssignmentRow {
        AssignmentRow {
            date,
            interval_label: label.to_string(),
            prime: false,
            required: 0,
            lower_bound: 0,
            upper_bound: 0,
            shortage: 0,
            surplus: 0,
            count,
            state: IntervalState::Under,
            leaders: Vec::new(),
            movements: String::new(),
            present_names: String::new(),
        }
    }

    #[test]
    fn movement_bumps_count_and_forces_limite() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let mut simulated = vec![row(date, "10:00", 1)];
        let movements = vec![Movement { date, interval_label: "10:00".to_string(), move_count: 3, from: "08:00".to_string(), to: "10:00".to_string() }];

        apply_movements(&mut simulated, &movements);

        assert_eq!(simulated[0].count, 4);
        assert_eq!(simulated[0].state, IntervalState::Limite);
        assert_eq!(simulated[0].movements, "3 desde 08:00 → 10:00");
    }

    #[test]
    fn non_matching_movement_leaves_row_untouched() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let other = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let mut simulated = vec![row(date, "10:00", 1)];
        let movements = vec![Movement { date: other, interval_label: "10:00".to_string(), move_count: 3, from: "08:00".to_string(), to: "10:00".to_string() }];

        apply_movements(&mut simulated, &movements);

        assert_eq!(simulated[0].count, 1);
        assert_eq!(simulated[0].state, IntervalState::Under);
    }
}
