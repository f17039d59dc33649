//! Closed-set domain vocabulary: service keys and contract categories.

use std::str::FromStr;

/// One of the seven real call-centre services the roster/demand files are
/// keyed by. Any other string selects "all services" mode upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    SopConectividad,
    SopFlow,
    EspCatv,
    EspMovil,
    EspXdsl,
    Digital,
    Cbs,
}

impl ServiceKey {
    /// All seven services, in the fixed order used for multi-service runs.
    pub const ALL: [ServiceKey; 7] = [
        ServiceKey::SopConectividad,
        ServiceKey::SopFlow,
        ServiceKey::EspCatv,
        ServiceKey::EspMovil,
        ServiceKey::EspXdsl,
        ServiceKey::Digital,
        ServiceKey::Cbs,
    ];

    /// The sheet name this service is addressed by in the demand workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ServiceKey::SopConectividad => "Sop_Conectividad",
            ServiceKey::SopFlow => "Sop_Flow",
            ServiceKey::EspCatv => "Esp_CATV",
            ServiceKey::EspMovil => "Esp_Movil",
            ServiceKey::EspXdsl => "Esp_XDSL",
            ServiceKey::Digital => "Digital",
            ServiceKey::Cbs => "CBS",
        }
    }

    /// The substring matched case-insensitively against the roster's
    /// `SERVICIO` column. `Cbs` matches either "CBS" or "PTF".
    pub fn roster_substrings(&self) -> &'static [&'static str] {
        match self {
            ServiceKey::SopConectividad => &["Internet"],
            ServiceKey::SopFlow => &["Flow"],
            ServiceKey::EspCatv => &["CATV"],
            ServiceKey::EspMovil => &["Movil"],
            ServiceKey::EspXdsl => &["XDSL"],
            ServiceKey::Digital => &["Digital"],
            ServiceKey::Cbs => &["CBS", "PTF"],
        }
    }

    /// True if `servicio` contains any of this service's roster substrings,
    /// case-insensitively.
    pub fn matches_roster_field(&self, servicio: &str) -> bool {
        let haystack = servicio.to_lowercase();
        self.roster_substrings()
            .iter()
            .any(|needle| haystack.contains(&needle.to_lowercase()))
    }

    /// Truncated to 12 characters, used as the sheet-name prefix in
    /// multi-service report output.
    pub fn sheet_prefix(&self) -> String {
        let name = self.sheet_name();
        name.chars().take(12).collect()
    }
}

impl FromStr for ServiceKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ServiceKey::ALL
            .into_iter()
            .find(|svc| svc.sheet_name() == trimmed)
            .ok_or(())
    }
}

/// Employee contract category. Fixes a shift length in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    H24,
    H30,
    H35,
    H36,
    /// Any unrecognised contract string. Kept, rather than rejected at
    /// parse time, so the rest of the pipeline can log and skip instead of
    /// aborting the whole run over one bad roster row: per-row anomalies
    /// are data drops, not hard errors.
    Unknown,
}

impl Contract {
    /// Shift length in hours. Unknown contracts get the sentinel 24h
    /// "always on" length, kept for parity with the legacy behaviour
    /// rather than surfaced as a validation error.
    pub fn shift_hours(&self) -> i64 {
        match self {
            Contract::H24 => 6,
            Contract::H30 => 6,
            Contract::H35 => 7,
            Contract::H36 => 6,
            Contract::Unknown => 24,
        }
    }

    pub fn parse(s: &str) -> Contract {
        match s.trim().to_uppercase().as_str() {
            "24HS" => Contract::H24,
            "30HS" => Contract::H30,
            "35HS" => Contract::H35,
            "36HS" => Contract::H36,
            _ => Contract::Unknown,
        }
    }
}

/// Canonical entry hours that every movement endpoint snaps to.
pub const CANONICAL_ENTRY_HOURS: [u32; 8] = [8, 9, 10, 11, 14, 15, 18, 19];

/// Snap `hour` down to the greatest canonical entry hour `<= hour`, or the
/// minimum canonical hour if none qualify.
pub fn canonical_floor(hour: u32) -> u32 {
    CANONICAL_ENTRY_HOURS
        .iter()
        .copied()
        .filter(|&h| h <= hour)
        .max()
        .unwrap_or(CANONICAL_ENTRY_HOURS[0])
}

/// Snap `hour` up to the smallest canonical entry hour `>= hour`, or the
/// maximum canonical hour if none qualify.
pub fn canonical_ceil(hour: u32) -> u32 {
    CANONICAL_ENTRY_HOURS
        .iter()
        .copied()
        .filter(|&h| h >= hour)
        .min()
        .unwrap_or(*CANONICAL_ENTRY_HOURS.last().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_key_roundtrips_sheet_name() {
        assert_eq!("Sop_Conectividad".parse(), Ok(ServiceKey::SopConectividad));
    }

    #[test]
    fn unknown_service_string_fails_to_parse() {
        assert!("NotAService".parse::<ServiceKey>().is_err());
    }

    #[test]
    fn cbs_matches_either_substring() {
        assert!(ServiceKey::Cbs.matches_roster_field("cbs norte"));
        assert!(ServiceKey::Cbs.matches_roster_field("PTF sur"));
        assert!(!ServiceKey::Cbs.matches_roster_field("digital"));
    }

    #[test]
    fn contract_hours_table() {
        assert_eq!(Contract::parse("24hs").shift_hours(), 6);
        assert_eq!(Contract::parse("35HS").shift_hours(), 7);
        assert_eq!(Contract::parse("bogus").shift_hours(), 24);
    }

    #[test]
    fn canonical_floor_and_ceil() {
        assert_eq!(canonical_floor(10), 10);
        assert_eq!(canonical_floor(13), 11);
        assert_eq!(canonical_floor(7), 8);
        assert_eq!(canonical_ceil(10), 10);
        assert_eq!(canonical_ceil(12), 14);
        assert_eq!(canonical_ceil(20), 19);
    }
}
