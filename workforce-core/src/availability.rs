//! Availability Filter (C4): for a given (date, interval) returns the
//! subset of agents on shift and not off, then applies the Sunday/36HS
//! exclusivity rule.

use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::assign::AssignmentRow;
use crate::roster::Agent;
use crate::types::Contract;

/// Agents whose shift window covers `time` on `date` and who are not off
/// that date, in roster order (the base rule, applied before the Sunday
/// exclusivity pass).
pub fn base_availability<'a>(agents: &'a [Agent], date: NaiveDate, time: NaiveTime) -> Vec<&'a Agent> {
    let weekday = date.weekday();
    agents
        .iter()
        .filter(|a| !a.is_off(weekday) && a.covers(time))
        .collect()
}

/// Names credited to the same interval on the preceding Saturday, read from
/// the accumulated nominal rows of the current run.
fn names_credited_on_saturday(nominal_so_far: &[AssignmentRow], saturday: NaiveDate, interval_label: &str) -> std::collections::HashSet<String> {
    nominal_so_far
        .iter()
        .filter(|r| r.date == saturday && r.interval_label == interval_label)
        .flat_map(|r| r.present_names.split(';').map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Full C4 contract: base availability, then — only on Sundays — the
/// 36HS exclusivity rule. Open Question Q2 pins the order: split
/// candidates by contract first (36HS kept whole, exempt from the
/// Saturday-credit exclusion), *then* drop names already credited on the
/// matching Saturday interval from the remaining pool, filling only up to
/// `required_lower_bound`.
pub fn available_with_sunday_rule<'a>(
    agents: &'a [Agent],
    date: NaiveDate,
    time: NaiveTime,
    interval_label: &str,
    required_lower_bound: i64,
    nominal_so_far: &[AssignmentRow],
) -> Vec<&'a Agent> {
    let mut present = base_availability(agents, date, time);

    if date.weekday() == Weekday::Sun {
        let saturday = date - chrono::Duration::days(1);
        let used = names_credited_on_saturday(nominal_so_far, saturday, interval_label);

        let (p36, others): (Vec<&Agent>, Vec<&Agent>) =
            present.into_iter().partition(|a| a.contract == Contract::H36);

        let need = (required_lower_bound - p36.len() as i64).max(0) as usize;
        let mut combined = p36;
        combined.extend(others.into_iter().filter(|a| !used.contains(&a.name)).take(need));
        present = combined;
    }

    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn agent(name: &str, contract: Contract) -> Agent {
        Agent {
            name: name.to_string(),
            dni: "1".into(),
            superior: None,
            servicio: "svc".into(),
            contract,
            entry: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            exit: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            off_days: Vec::new(),
        }
    }

    #[test]
    fn off_day_excludes_agent() {
        let mut a = agent("ANA", Contract::H24);
        a.off_days = vec![chrono::Weekday::Mon];
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(monday.weekday(), chrono::Weekday::Mon);
        let present = base_availability(&[a], monday, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert!(present.is_empty());
    }

    #[test]
    fn sunday_rule_readds_36hs_after_excluding_saturday_credit() {
        // 36HS agents are exempt from Saturday-credit exclusion; non-36HS agents credited on Saturday drop out.
        let x36 = agent("X36", Contract::H36);
        let y30 = agent("Y30", Contract::H30);
        let agents = vec![x36, y30];

        let saturday = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(saturday.weekday(), chrono::Weekday::Sat);
        assert_eq!(sunday.weekday(), chrono::Weekday::Sun);

        let nominal_so_far = vec![AssignmentRow {
            date: saturday,
            interval_label: "14:00".to_string(),
            prime: true,
            required: 1,
            lower_bound: 1,
            upper_bound: 3,
            shortage: 0,
            surplus: 0,
            count: 2,
            state: crate::assign::IntervalState::Ok,
            leaders: Vec::new(),
            movements: String::new(),
            present_names: "X36;Y30".to_string(),
        }];

        let present = available_with_sunday_rule(
            &agents,
            sunday,
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            "14:00",
            1,
            &nominal_so_far,
        );
        let names: Vec<&str> = present.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["X36"]);
    }
}
