pub mod config;
mod macros;

pub mod errors;

// For submodules I only expose the public API to the parent module

pub mod shared {
    pub mod logger;
}

pub mod mmu {
    mod clock;
    mod eviction;
    mod frame;
    mod lru;
    mod memory;
    mod policy;
    mod random;
    mod stats;

    pub use clock::{ClockMmu, ClockPolicy};
    pub use eviction::EvictionPolicy;
    pub use frame::{Frame, FrameId, PageId};
    pub use lru::{LruMmu, LruPolicy};
    pub use memory::PagedMemory;
    pub use policy::{AccessKind, Mmu, PolicyKind};
    pub use random::{RandomMmu, RandomPolicy};
    pub use stats::Stats;
}

pub mod sim {
    mod report;
    mod simulation;

    pub use report::{sweep, write_csv, ReportRow};
    pub use simulation::{simulate, Simulation, SimulationReport};
}
