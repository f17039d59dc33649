//! Off-Day Planner (C3): deterministically assigns weekly off-days from
//! contract category and stable roster order.

use chrono::Weekday;

use crate::roster::Agent;
use crate::types::Contract;

fn weekday_from_index(i: i64) -> Weekday {
    match i.rem_euclid(7) {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Assigns `off_days` on every agent in place. Pure function of the
/// (already roster-index-ordered) slice: re-running on the same roster
/// yields byte-identical off-day sets.
pub fn assign_off_days(agents: &mut [Agent]) {
    let weekend_idxs: Vec<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| matches!(a.contract, Contract::H30 | Contract::H35))
        .map(|(i, _)| i)
        .collect();
    let half = weekend_idxs.len() / 2;

    for (i, agent) in agents.iter_mut().enumerate() {
        agent.off_days = match agent.contract {
            Contract::H24 => (0..3).map(|k| weekday_from_index(i as i64 + k)).collect(),
            Contract::H30 | Contract::H35 => {
                let weekday_off = weekday_from_index((i % 5) as i64);
                let weekend_pos = weekend_idxs.iter().position(|&idx| idx == i).unwrap();
                let weekend_off = if weekend_pos < half { Weekday::Sat } else { Weekday::Sun };
                vec![weekday_off, weekend_off]
            }
            Contract::H36 => {
                vec![if i % 2 == 0 { Weekday::Sat } else { Weekday::Sun }]
            }
            Contract::Unknown => Vec::new(),
        };
    }
}
