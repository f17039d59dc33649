//! Xlsx reading: roster and demand workbooks, at the wire-schema boundary.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use log::warn;
use workforce_core::{RawDemandSheet, RosterRecord, ServiceKey, WorkforceError};

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn open(path: &Path) -> Result<Xlsx<std::io::BufReader<std::fs::File>>, WorkforceError> {
    open_workbook(path).map_err(|e| WorkforceError::Resource(format!("opening workbook {}: {e}", path.display())))
}

/// Reads the employee roster sheet (the workbook's first sheet) into raw
/// wire rows. Column order on the sheet is irrelevant; columns are located
/// by header name.
pub fn read_roster(path: &Path) -> Result<Vec<RosterRecord>, WorkforceError> {
    let mut wb = open(path)?;
    let sheet_name = wb
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WorkforceError::InputFormat("roster workbook has no sheets".into()))?;
    let range: Range<Data> = wb
        .worksheet_range(&sheet_name)
        .map_err(|e| WorkforceError::InputFormat(format!("reading roster sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| WorkforceError::InputFormat("roster sheet is empty".into()))?;

    let locate = |name: &str| header.iter().position(|c| cell_to_string(c).eq_ignore_ascii_case(name));
    let cols = [
        ("NOMBRE", locate("NOMBRE")),
        ("DNI", locate("DNI")),
        ("SUPERIOR", locate("SUPERIOR")),
        ("INGRESO", locate("INGRESO")),
        ("SERVICIO", locate("SERVICIO")),
        ("ACTIVO", locate("ACTIVO")),
        ("CONTRATO", locate("CONTRATO")),
    ];
    for (name, idx) in &cols {
        if idx.is_none() {
            return Err(WorkforceError::InputFormat(format!("roster sheet is missing required column '{name}'")));
        }
    }
    let [nombre, dni, superior, ingreso, servicio, activo, contrato] = cols.map(|(_, idx)| idx.unwrap());

    let get = |row: &[Data], idx: usize| row.get(idx).map(cell_to_string).unwrap_or_default();

    Ok(rows
        .map(|row| RosterRecord {
            nombre: get(row, nombre),
            dni: get(row, dni),
            superior: get(row, superior),
            ingreso: get(row, ingreso),
            servicio: get(row, servicio),
            activo: get(row, activo),
            contrato: get(row, contrato),
        })
        .collect())
}

/// Reads one service's demand sheet: header row 0 (dates from column 1
/// onward), rows 1 and 2 skipped, data starting at row 3.
fn read_sheet(range: &Range<Data>) -> RawDemandSheet {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return RawDemandSheet::default();
    };
    let date_headers: Vec<String> = header.iter().skip(1).map(cell_to_string).collect();

    // Two rows skipped before data begins.
    rows.next();
    rows.next();

    let data_rows: Vec<(String, Vec<String>)> = rows
        .map(|row| {
            let interval = row.first().map(cell_to_string).unwrap_or_default();
            let values: Vec<String> = row.iter().skip(1).map(cell_to_string).collect();
            (interval, values)
        })
        .collect();

    RawDemandSheet { date_headers, rows: data_rows }
}

/// Reads the named service's sheet out of the demand workbook.
pub fn read_demand_sheet(path: &Path, service: ServiceKey) -> Result<RawDemandSheet, WorkforceError> {
    let mut wb = open(path)?;
    let range = wb
        .worksheet_range(service.sheet_name())
        .map_err(|e| WorkforceError::InputFormat(format!("reading demand sheet '{}': {e}", service.sheet_name())))?;
    Ok(read_sheet(&range))
}

/// Reads every recognised service sheet present in the demand workbook,
/// for multi-service runs; sheets for services absent from the workbook
/// are skipped rather than treated as an error.
pub fn read_all_demand_sheets(path: &Path) -> Result<HashMap<ServiceKey, RawDemandSheet>, WorkforceError> {
    let mut wb = open(path)?;
    let present: Vec<String> = wb.sheet_names().to_vec();
    let mut out = HashMap::new();

    for service in ServiceKey::ALL {
        if !present.iter().any(|n| n == service.sheet_name()) {
            warn!("demand workbook has no sheet for '{}', skipping", service.sheet_name());
            continue;
        }
        let range = wb
            .worksheet_range(service.sheet_name())
            .map_err(|e| WorkforceError::InputFormat(format!("reading demand sheet '{}': {e}", service.sheet_name())))?;
        out.insert(service, read_sheet(&range));
    }

    Ok(out)
}
