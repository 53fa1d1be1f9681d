use std::io;
use std::path::Path;

use memtrace::TraceEvent;
use serde::Serialize;

use super::simulation::simulate;
use crate::config::SimulationConfig;
use crate::errors::SimulationError;
use crate::mmu::PolicyKind;

/// One line of the sweep CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub trace: String,
    pub algorithm: String,
    pub frames: usize,
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_fault_rate: f64,
}

/// Runs every trace against every policy and frame count, in that nesting
/// order. Each trace file is read once.
pub fn sweep<P: AsRef<Path>>(
    traces: &[P],
    policies: &[PolicyKind],
    frame_counts: &[usize],
) -> Result<Vec<ReportRow>, SimulationError> {
    let mut loaded = Vec::with_capacity(traces.len());
    for path in traces {
        let path = path.as_ref();
        let events = memtrace::read_trace(path)?;
        log::info!("loaded {} events from {}", events.len(), path.display());

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        loaded.push((name, events));
    }

    sweep_loaded(&loaded, policies, frame_counts)
}

fn sweep_loaded(
    traces: &[(String, Vec<TraceEvent>)],
    policies: &[PolicyKind],
    frame_counts: &[usize],
) -> Result<Vec<ReportRow>, SimulationError> {
    let mut rows = Vec::with_capacity(traces.len() * policies.len() * frame_counts.len());

    for (name, events) in traces {
        for &policy in policies {
            for &frames in frame_counts {
                let report = simulate(&SimulationConfig::new(frames, policy), events)?;
                rows.push(ReportRow {
                    trace: name.clone(),
                    algorithm: policy.name().to_string(),
                    frames,
                    events: report.events,
                    disk_reads: report.disk_reads,
                    disk_writes: report.disk_writes,
                    page_fault_rate: report.page_fault_rate(),
                });
            }
        }
    }

    Ok(rows)
}

/// Writes `rows` as CSV with a header line.
pub fn write_csv<W: io::Write>(writer: W, rows: &[ReportRow]) -> Result<(), SimulationError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
