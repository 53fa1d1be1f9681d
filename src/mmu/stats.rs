/// Disk and fault counters of an engine. They only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    reads: u64,
    writes: u64,
    faults: u64,
}

impl Stats {
    pub fn disk_reads(&self) -> u64 {
        self.reads
    }

    pub fn disk_writes(&self) -> u64 {
        self.writes
    }

    pub fn page_faults(&self) -> u64 {
        self.faults
    }

    pub(crate) fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// A page was fetched from disk into a frame.
    pub(crate) fn record_read(&mut self) {
        self.reads += 1;
    }

    /// A dirty page was written back on eviction.
    pub(crate) fn record_write_back(&mut self) {
        self.writes += 1;
    }
}
