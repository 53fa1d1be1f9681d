use std::error::Error;

use memtrace::TraceError;

#[derive(Debug, PartialEq, Eq)]
pub enum MmuError {
    /// An engine needs at least one frame.
    InvalidFrameCount(usize),
    /// The policy name is not one of `rand`, `lru` or `clock`.
    UnknownPolicy(String),
}

#[derive(Debug)]
pub enum SimulationError {
    /// The engine could not be built.
    Mmu(MmuError),
    /// Derived error from the trace reader
    Trace(TraceError),
    /// Opening or writing an output file failed.
    Io(std::io::Error),
    /// Serializing the report failed.
    Report(csv::Error),
}

impl std::fmt::Display for MmuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MmuError::InvalidFrameCount(frames) => {
                write!(f, "Frame count must be positive, got {}", frames)
            }
            MmuError::UnknownPolicy(name) => {
                write!(f, "Unknown replacement policy {:?} (expected rand, lru or clock)", name)
            }
        }
    }
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Mmu(err) => write!(f, "Configuration error: {}", err),
            SimulationError::Trace(err) => write!(f, "Trace error: {}", err),
            SimulationError::Io(err) => write!(f, "IO error: {}", err),
            SimulationError::Report(err) => write!(f, "Report error: {}", err),
        }
    }
}

impl std::convert::From<MmuError> for SimulationError {
    fn from(err: MmuError) -> Self {
        SimulationError::Mmu(err)
    }
}

impl std::convert::From<TraceError> for SimulationError {
    fn from(err: TraceError) -> Self {
        SimulationError::Trace(err)
    }
}

impl std::convert::From<csv::Error> for SimulationError {
    fn from(err: csv::Error) -> Self {
        SimulationError::Report(err)
    }
}

impl std::convert::From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Io(err)
    }
}

impl Error for MmuError {}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulationError::Mmu(err) => Some(err),
            SimulationError::Trace(err) => Some(err),
            SimulationError::Io(err) => Some(err),
            SimulationError::Report(err) => Some(err),
        }
    }
}
