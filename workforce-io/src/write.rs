//! Xlsx writing: the per-service report workbook and the week-grid
//! workbook.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};
use workforce_core::{AssignmentRow, EscalatedMovement, IntervalState, Movement, ServiceReport, WorkforceError};

fn xlsx_err(context: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> WorkforceError + '_ {
    move |e| WorkforceError::Resource(format!("{context}: {e}"))
}

fn state_fill(state: IntervalState) -> Format {
    let color = match state {
        IntervalState::Under => Color::RGB(0xFF0000),
        IntervalState::Over => Color::RGB(0xFFFF00),
        IntervalState::Limite => Color::RGB(0xFFA500),
        IntervalState::Ok => Color::RGB(0x00FF00),
    };
    Format::new().set_background_color(color)
}

fn header_format() -> Format {
    Format::new().set_bold()
}

fn write_header(sheet: &mut rust_xlsxwriter::Worksheet, cols: &[&str]) -> Result<(), WorkforceError> {
    let fmt = header_format();
    for (i, name) in cols.iter().enumerate() {
        sheet.write_string_with_format(0, i as u16, *name, &fmt).map_err(xlsx_err("writing header cell"))?;
    }
    Ok(())
}

fn write_assignment_rows(
    sheet: &mut rust_xlsxwriter::Worksheet,
    rows: &[AssignmentRow],
    with_movements: bool,
) -> Result<(), WorkforceError> {
    let mut cols = vec!["Fecha", "Intervalo", "Prime", "Requerido", "L", "U", "Faltante", "Sobrante", "Cantidad", "Estado", "Lideres", "Presentes"];
    if with_movements {
        cols.push("Movimientos");
    }
    write_header(sheet, &cols)?;

    for (r, row) in rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        let fill = state_fill(row.state);
        sheet.write_string(excel_row, 0, &row.date.format("%Y-%m-%d").to_string()).map_err(xlsx_err("date"))?;
        sheet.write_string(excel_row, 1, &row.interval_label).map_err(xlsx_err("interval"))?;
        sheet.write_boolean(excel_row, 2, row.prime).map_err(xlsx_err("prime"))?;
        sheet.write_number(excel_row, 3, row.required as f64).map_err(xlsx_err("required"))?;
        sheet.write_number(excel_row, 4, row.lower_bound as f64).map_err(xlsx_err("lower"))?;
        sheet.write_number(excel_row, 5, row.upper_bound as f64).map_err(xlsx_err("upper"))?;
        sheet.write_number(excel_row, 6, row.shortage as f64).map_err(xlsx_err("shortage"))?;
        sheet.write_number(excel_row, 7, row.surplus as f64).map_err(xlsx_err("surplus"))?;
        sheet.write_number_with_format(excel_row, 8, row.count as f64, &fill).map_err(xlsx_err("count"))?;
        sheet.write_string_with_format(excel_row, 9, &format!("{:?}", row.state), &fill).map_err(xlsx_err("state"))?;
        sheet.write_string(excel_row, 10, &row.leaders.join(";")).map_err(xlsx_err("leaders"))?;
        sheet.write_string(excel_row, 11, &row.present_names).map_err(xlsx_err("present"))?;
        if with_movements {
            sheet.write_string(excel_row, 12, &row.movements).map_err(xlsx_err("movements"))?;
        }
    }
    Ok(())
}

fn write_movements(sheet: &mut rust_xlsxwriter::Worksheet, movements: &[Movement]) -> Result<(), WorkforceError> {
    write_header(sheet, &["Fecha", "Intervalo", "Move", "From", "To"])?;
    for (r, m) in movements.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string(row, 0, &m.date.format("%Y-%m-%d").to_string()).map_err(xlsx_err("date"))?;
        sheet.write_string(row, 1, &m.interval_label).map_err(xlsx_err("interval"))?;
        sheet.write_number(row, 2, m.move_count as f64).map_err(xlsx_err("move"))?;
        sheet.write_string(row, 3, &m.from).map_err(xlsx_err("from"))?;
        sheet.write_string(row, 4, &m.to).map_err(xlsx_err("to"))?;
    }
    Ok(())
}

fn write_escalated_movements(sheet: &mut rust_xlsxwriter::Worksheet, movements: &[EscalatedMovement]) -> Result<(), WorkforceError> {
    write_header(sheet, &["Fecha", "Move", "From", "To"])?;
    for (r, m) in movements.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string(row, 0, &m.date.format("%Y-%m-%d").to_string()).map_err(xlsx_err("date"))?;
        sheet.write_number(row, 1, m.move_count as f64).map_err(xlsx_err("move"))?;
        sheet.write_string(row, 2, &m.from).map_err(xlsx_err("from"))?;
        sheet.write_string(row, 3, &m.to).map_err(xlsx_err("to"))?;
    }
    Ok(())
}

/// Writes the five report sheets per service. In multi-service mode each
/// sheet is named `<svc[:12]>_<suffix>`; in single-service mode the bare
/// suffix is used. `Movimientos`/`Mov_Escalonados` sheets are omitted when
/// empty.
pub fn write_report(path: &Path, reports: &[ServiceReport]) -> Result<(), WorkforceError> {
    let multi = reports.len() > 1;
    let mut wb = Workbook::new();

    for report in reports {
        let prefix = if multi { format!("{}_", report.service.sheet_prefix()) } else { String::new() };

        let sheet = wb.add_worksheet().set_name(&format!("{prefix}Nomina")).map_err(xlsx_err("naming Nomina sheet"))?;
        write_assignment_rows(sheet, &report.nomina, false)?;

        let sheet = wb.add_worksheet().set_name(&format!("{prefix}Simulacion")).map_err(xlsx_err("naming Simulacion sheet"))?;
        write_assignment_rows(sheet, &report.simulacion, true)?;

        if !report.movimientos.is_empty() {
            let sheet = wb.add_worksheet().set_name(&format!("{prefix}Movimientos")).map_err(xlsx_err("naming Movimientos sheet"))?;
            write_movements(sheet, &report.movimientos)?;
        }

        let sheet = wb.add_worksheet().set_name(&format!("{prefix}Sim_EscSug")).map_err(xlsx_err("naming Sim_EscSug sheet"))?;
        let cols = ["Fecha", "Intervalo", "Prime", "Requerido", "L", "U", "Faltante", "Sobrante", "Cantidad", "Estado", "Lideres", "Presentes", "Movimientos", "Escalona_Sugerida"];
        write_header(sheet, &cols)?;
        for (r, esc) in report.sim_esc_sug.iter().enumerate() {
            let excel_row = (r + 1) as u32;
            let row = &esc.row;
            let fill = state_fill(row.state);
            sheet.write_string(excel_row, 0, &row.date.format("%Y-%m-%d").to_string()).map_err(xlsx_err("date"))?;
            sheet.write_string(excel_row, 1, &row.interval_label).map_err(xlsx_err("interval"))?;
            sheet.write_boolean(excel_row, 2, row.prime).map_err(xlsx_err("prime"))?;
            sheet.write_number(excel_row, 3, row.required as f64).map_err(xlsx_err("required"))?;
            sheet.write_number(excel_row, 4, row.lower_bound as f64).map_err(xlsx_err("lower"))?;
            sheet.write_number(excel_row, 5, row.upper_bound as f64).map_err(xlsx_err("upper"))?;
            sheet.write_number(excel_row, 6, row.shortage as f64).map_err(xlsx_err("shortage"))?;
            sheet.write_number(excel_row, 7, row.surplus as f64).map_err(xlsx_err("surplus"))?;
            sheet.write_number_with_format(excel_row, 8, row.count as f64, &fill).map_err(xlsx_err("count"))?;
            sheet.write_string_with_format(excel_row, 9, &format!("{:?}", row.state), &fill).map_err(xlsx_err("state"))?;
            sheet.write_string(excel_row, 10, &row.leaders.join(";")).map_err(xlsx_err("leaders"))?;
            sheet.write_string(excel_row, 11, &row.present_names).map_err(xlsx_err("present"))?;
            sheet.write_string(excel_row, 12, &row.movements).map_err(xlsx_err("movements"))?;
            sheet.write_string(excel_row, 13, &esc.escalona_sugerida).map_err(xlsx_err("escalona"))?;
        }

        if !report.mov_escalonados.is_empty() {
            let sheet = wb.add_worksheet().set_name(&format!("{prefix}Mov_Escalonados")).map_err(xlsx_err("naming Mov_Escalonados sheet"))?;
            write_escalated_movements(sheet, &report.mov_escalonados)?;
        }
    }

    wb.save(path).map_err(xlsx_err("saving report workbook"))?;
    Ok(())
}

const WEEKDAY_NAMES: [&str; 7] = ["Lunes", "Martes", "Miercoles", "Jueves", "Viernes", "Sabado", "Domingo"];

/// Writes the week-grid workbook: one sheet per (service, ISO week), named
/// `Sem YYYY-MM-DD` (or `<svc[:12]>_Sem YYYY-MM-DD` in multi-service mode).
/// Weekday header cells are amber, all other header cells blue, header
/// font bold.
pub fn write_week_grids(path: &Path, reports: &[ServiceReport]) -> Result<(), WorkforceError> {
    let multi = reports.len() > 1;
    let mut wb = Workbook::new();

    let mut cols: Vec<String> = vec!["DNI".into(), "Nombre".into(), "SERVICIO".into(), "SUPERIOR".into(), "Intervalo".into()];
    cols.extend(WEEKDAY_NAMES.iter().map(|s| s.to_string()));
    cols.extend(WEEKDAY_NAMES.iter().map(|s| format!("Break_{s}")));

    let amber = Format::new().set_background_color(Color::RGB(0xFFC000)).set_bold();
    let blue = Format::new().set_background_color(Color::RGB(0x538DD5)).set_bold().set_font_color(Color::Black);

    for report in reports {
        let prefix = if multi { format!("{}_", report.service.sheet_prefix()) } else { String::new() };

        for grid in &report.week_grids {
            let name = format!("{prefix}Sem {}", grid.week_start.format("%Y-%m-%d"));
            let sheet = wb.add_worksheet().set_name(&name).map_err(xlsx_err("naming week-grid sheet"))?;

            for (i, label) in cols.iter().enumerate() {
                let fmt = if WEEKDAY_NAMES.contains(&label.as_str()) { &amber } else { &blue };
                sheet.write_string_with_format(0, i as u16, label, fmt).map_err(xlsx_err("week header"))?;
            }

            for (r, row) in grid.rows.iter().enumerate() {
                let excel_row = (r + 1) as u32;
                sheet.write_string(excel_row, 0, &row.dni).map_err(xlsx_err("dni"))?;
                sheet.write_string(excel_row, 1, &row.name).map_err(xlsx_err("name"))?;
                sheet.write_string(excel_row, 2, &row.servicio).map_err(xlsx_err("servicio"))?;
                sheet.write_string(excel_row, 3, &row.superior).map_err(xlsx_err("superior"))?;
                sheet.write_string(excel_row, 4, &row.canonical_entry).map_err(xlsx_err("entry"))?;
                for (d, presence) in row.weekdays.iter().enumerate() {
                    let col = 5 + d as u16;
                    match presence {
                        workforce_core::Presence::Present => sheet.write_number(excel_row, col, 1.0).map_err(xlsx_err("presence"))?,
                        workforce_core::Presence::Franco => sheet.write_string(excel_row, col, "Franco").map_err(xlsx_err("presence"))?,
                    };
                }
                for (d, brk) in row.breaks.iter().enumerate() {
                    let col = 12 + d as u16;
                    sheet.write_string(excel_row, col, brk.as_deref().unwrap_or("")).map_err(xlsx_err("break"))?;
                }
            }
        }
    }

    wb.save(path).map_err(xlsx_err("saving week-grid workbook"))?;
    Ok(())
}
