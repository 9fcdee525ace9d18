//! CSV adapters for workloads and reports.
//!
//! The engine itself never touches files; these adapters translate between
//! the fixed CSV layouts and the domain types.
//!
//! Formats:
//!
//! - Workload: `Index,Arrival Time,Job Size` — one row per job, arrivals
//!   may be out of order.
//! - Report: `Index,Arrival Time,Job Size,Start Time,End Time,Response
//!   Time,Turnaround Time,Job State,Context Switches` — one row per job in
//!   input order, then two trailing scalar rows with the averages.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};

use crate::models::{Job, SimulationReport};

/// Workload file header.
pub const WORKLOAD_HEADER: &str = "Index,Arrival Time,Job Size";

/// Report file header.
pub const REPORT_HEADER: &str = "Index,Arrival Time,Job Size,Start Time,End Time,\
Response Time,Turnaround Time,Job State,Context Switches";

/// A CSV adapter error.
#[derive(Debug)]
pub enum CsvError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// Missing or unrecognized header line.
    Header(String),
    /// A malformed data row, with its 1-based line number.
    Row { line: usize, message: String },
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::Io(err) => write!(f, "I/O error: {err}"),
            CsvError::Header(found) => {
                write!(f, "expected header '{WORKLOAD_HEADER}', found '{found}'")
            }
            CsvError::Row { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CsvError {
    fn from(err: io::Error) -> Self {
        CsvError::Io(err)
    }
}

/// Reads a workload from CSV.
///
/// Rows are returned in file order; the engine tolerates arrivals that are
/// not sorted. Blank lines are skipped.
pub fn read_workload<R: Read>(reader: R) -> Result<Vec<Job>, CsvError> {
    let mut lines = BufReader::new(reader).lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(CsvError::Header(String::new())),
    };
    if header.trim() != WORKLOAD_HEADER {
        return Err(CsvError::Header(header.trim().to_string()));
    }

    let mut jobs = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() {
            continue;
        }
        let number = offset + 2; // header is line 1

        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(CsvError::Row {
                line: number,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let index = parse_field::<usize>(fields[0], "index", number)?;
        let arrival = parse_field::<u64>(fields[1], "arrival time", number)?;
        let size = parse_field::<u64>(fields[2], "job size", number)?;
        jobs.push(Job::new(index, arrival, size));
    }

    Ok(jobs)
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    name: &str,
    line: usize,
) -> Result<T, CsvError> {
    field.parse().map_err(|_| CsvError::Row {
        line,
        message: format!("invalid {name} '{field}'"),
    })
}

/// Writes a workload in the generator's format.
pub fn write_workload<W: Write>(mut writer: W, jobs: &[Job]) -> Result<(), CsvError> {
    writeln!(writer, "{WORKLOAD_HEADER}")?;
    for job in jobs {
        writeln!(writer, "{},{},{}", job.index, job.arrival, job.size)?;
    }
    Ok(())
}

/// Writes a full report: per-job rows plus the two trailing average rows.
pub fn write_report<W: Write>(mut writer: W, report: &SimulationReport) -> Result<(), CsvError> {
    writeln!(writer, "{REPORT_HEADER}")?;
    for o in &report.outcomes {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{:?},{}",
            o.index,
            o.arrival,
            o.size,
            o.start_first,
            o.finish,
            o.response_time,
            o.turnaround_time,
            o.final_state,
            o.context_switches
        )?;
    }
    writeln!(
        writer,
        "Average Response Time,{:.2}",
        report.metrics.avg_response_time
    )?;
    writeln!(
        writer,
        "Average Turnaround Time,{:.2}",
        report.metrics.avg_turnaround_time
    )?;
    Ok(())
}
