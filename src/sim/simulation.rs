use std::fmt;

use memtrace::TraceEvent;

use crate::config::{SimulationConfig, PAGE_OFFSET_BITS};
use crate::errors::MmuError;
use crate::mmu::Mmu;

/// Counters collected at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationReport {
    pub frames: usize,
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_faults: u64,
}

impl SimulationReport {
    /// Faults per event, 0 for an empty trace.
    pub fn page_fault_rate(&self) -> f64 {
        if self.events == 0 {
            return 0.0;
        }
        self.page_faults as f64 / self.events as f64
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total memory frames: {}", self.frames)?;
        writeln!(f, "events in trace: {}", self.events)?;
        writeln!(f, "total disk reads: {}", self.disk_reads)?;
        writeln!(f, "total disk writes: {}", self.disk_writes)?;
        write!(f, "page fault rate: {:.4}", self.page_fault_rate())
    }
}

/// Feeds trace events, in order, to a replacement engine.
pub struct Simulation {
    mmu: Box<dyn Mmu>,
    events: u64,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self, MmuError> {
        config.validate()?;
        let mut mmu = config.policy.build(config.frames)?;
        if config.trace {
            mmu.enable_trace();
        }
        Ok(Simulation::from_mmu(mmu))
    }

    pub fn from_mmu(mmu: Box<dyn Mmu>) -> Self {
        Simulation { mmu, events: 0 }
    }

    pub fn step(&mut self, event: &TraceEvent) {
        let page = event.page_number(PAGE_OFFSET_BITS);
        self.mmu.access(page, event.operation.into());
        self.events += 1;
    }

    pub fn run<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a TraceEvent>,
    {
        for event in events {
            self.step(event);
        }
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            frames: self.mmu.frames(),
            events: self.events,
            disk_reads: self.mmu.total_disk_reads(),
            disk_writes: self.mmu.total_disk_writes(),
            page_faults: self.mmu.total_page_faults(),
        }
    }
}

/// Runs `events` through a fresh engine built from `config`.
pub fn simulate(
    config: &SimulationConfig,
    events: &[TraceEvent],
) -> Result<SimulationReport, MmuError> {
    let mut simulation = Simulation::new(config)?;
    simulation.run(events);
    let report = simulation.report();
    log::info!(
        "{} with {} frames: {} events, {} faults",
        config.policy,
        config.frames,
        report.events,
        report.page_faults
    );
    Ok(report)
}
