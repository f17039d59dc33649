//! Demand Table Loader (C1): parses the required-agents matrix, normalises
//! intervals to time-of-day, melts to a long sequence, and slices by
//! period.

use chrono::{Datelike, NaiveDate, NaiveTime};
use log::debug;

/// One demand sheet as read off the wire: the leftmost column (interval
/// strings) and a parallel set of date columns (header row,
/// two skipped rows). Kept string-typed so `workforce-core` has no
/// dependency on the workbook library.
#[derive(Debug, Clone, Default)]
pub struct RawDemandSheet {
    /// Raw header strings for the date columns, in column order.
    pub date_headers: Vec<String>,
    /// One entry per interval row: the raw interval string, followed by
    /// one raw required-count string per date column (same order as
    /// `date_headers`).
    pub rows: Vec<(String, Vec<String>)>,
}

/// One (date, interval, required) observation, already melted to long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandCell {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub required: i64,
}

fn parse_interval(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S").ok()
}

fn parse_date_header(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Melts the raw sheet to a long `[(date, time, required)]` sequence.
/// Non-parseable interval rows and non-date columns are dropped silently;
/// an empty result is valid, not an error.
pub fn melt(sheet: &RawDemandSheet) -> Vec<DemandCell> {
    let date_columns: Vec<(usize, NaiveDate)> = sheet
        .date_headers
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| match parse_date_header(raw) {
            Some(d) => Some((i, d)),
            None => {
                debug!("demand: dropping non-date column header '{raw}'");
                None
            }
        })
        .collect();

    let mut out = Vec::new();
    for (interval_raw, values) in &sheet.rows {
        let time = match parse_interval(interval_raw) {
            Some(t) => t,
            None => {
                debug!("demand: dropping unparseable interval '{interval_raw}'");
                continue;
            }
        };

        for &(col, date) in &date_columns {
            let Some(raw_val) = values.get(col) else { continue };
            let trimmed = raw_val.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Ok(required) = trimmed.parse::<i64>() else {
                continue;
            };
            out.push(DemandCell { date, time, required });
        }
    }

    out.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
    out
}

/// Period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Mes,
    Sem1,
    Sem2,
    Sem3,
    Sem4,
}

impl Period {
    pub fn parse(s: &str) -> Option<Period> {
        match s.trim() {
            "mes" => Some(Period::Mes),
            "sem1" => Some(Period::Sem1),
            "sem2" => Some(Period::Sem2),
            "sem3" => Some(Period::Sem3),
            "sem4" => Some(Period::Sem4),
            _ => None,
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap();
    let this_month_first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    (next_month_first - this_month_first).num_days() as u32
}

/// Clamps `cells` to the calendar month inferred from the earliest
/// observed date, then slices to the requested week range. Clipping
/// against the last day of the month is mandatory.
pub fn slice_by_period(cells: Vec<DemandCell>, period: Period) -> Vec<DemandCell> {
    if period == Period::Mes {
        return cells;
    }

    let Some(first) = cells.iter().map(|c| c.date).min() else {
        return cells;
    };
    let (year, month) = (first.year(), first.month());
    let last_day = days_in_month(year, month);

    let clamp_day = |d: u32| d.min(last_day);
    let ymd = |d: u32| NaiveDate::from_ymd_opt(year, month, clamp_day(d)).unwrap();

    let (start, end) = match period {
        Period::Sem1 => (ymd(1), ymd(7)),
        Period::Sem2 => (ymd(8), ymd(14)),
        Period::Sem3 => (ymd(15), ymd(21)),
        Period::Sem4 => (ymd(22), ymd(last_day)),
        Period::Mes => unreachable!(),
    };

    cells.into_iter().filter(|c| c.date >= start && c.date <= end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> RawDemandSheet {
        RawDemandSheet {
            date_headers: vec!["2024-06-03".to_string(), "not-a-date".to_string()],
            rows: vec![
                ("11:00:00".to_string(), vec!["1".to_string(), "5".to_string()]),
                ("garbage".to_string(), vec!["2".to_string(), "6".to_string()]),
            ],
        }
    }

    #[test]
    fn melt_drops_bad_interval_rows_and_non_date_columns() {
        let cells = melt(&sheet());
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].required, 1);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn empty_sheet_melts_to_empty_sequence() {
        let sheet = RawDemandSheet::default();
        assert!(melt(&sheet).is_empty());
    }

    #[test]
    fn period_slicing_clamps_sem4_to_last_day_of_month() {
        // June 2024 has 30 days.
        let mut cells = Vec::new();
        for day in [1, 15, 22, 30] {
            cells.push(DemandCell {
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                required: 1,
            });
        }
        let sliced = slice_by_period(cells, Period::Sem4);
        let dates: Vec<u32> = sliced.iter().map(|c| c.date.day()).collect();
        assert_eq!(dates, vec![22, 30]);
    }

    #[test]
    fn period_slicing_sem1_is_days_1_through_7() {
        let cells = vec![
            DemandCell { date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), time: NaiveTime::from_hms_opt(10,0,0).unwrap(), required: 1 },
            DemandCell { date: NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(), time: NaiveTime::from_hms_opt(10,0,0).unwrap(), required: 1 },
        ];
        let sliced = slice_by_period(cells, Period::Sem1);
        assert_eq!(sliced.len(), 1);
        assert_eq!(sliced[0].date.day(), 1);
    }
}
