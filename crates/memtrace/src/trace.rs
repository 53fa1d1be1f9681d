use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
    str::FromStr,
};

use crate::errors::TraceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    pub fn is_write(self) -> bool {
        self == Operation::Write
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(Operation::Read),
            "W" | "w" => Ok(Operation::Write),
            other => Err(format!("unexpected read/write identifier {other:?}")),
        }
    }
}

/// A single memory access recorded in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    pub address: u64,
    pub operation: Operation,
}

impl TraceEvent {
    pub fn new(address: u64, operation: Operation) -> Self {
        TraceEvent { address, operation }
    }

    /// The virtual page this access falls in, dropping the in-page offset.
    pub fn page_number(&self, offset_bits: u32) -> u64 {
        self.address.checked_shr(offset_bits).unwrap_or(0)
    }

    fn parse(line_number: usize, line: &str) -> Result<Self, TraceError> {
        let malformed = |reason: String| TraceError::Malformed {
            line: line_number,
            reason,
        };

        let mut fields = line.split_whitespace();
        let (Some(address), Some(operation), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(format!(
                "expected `<address> <R|W>`, got {line:?}"
            )));
        };

        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);
        let address = u64::from_str_radix(digits, 16)
            .map_err(|err| malformed(format!("invalid address {address:?}: {err}")))?;
        let operation = operation.parse::<Operation>().map_err(malformed)?;

        Ok(TraceEvent { address, operation })
    }
}

/// Streams events out of a trace, one per non-empty line.
///
/// Lines starting with `#` are comments. A malformed line yields an error and
/// the iterator moves on to the next one.
pub struct TraceReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        TraceReader {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(TraceError::Io(err))),
            };
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(TraceEvent::parse(self.line_number, line));
        }
    }
}

/// Reads a whole trace file into memory.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceEvent>, TraceError> {
    let file = File::open(path)?;
    TraceReader::new(BufReader::new(file)).collect()
}
