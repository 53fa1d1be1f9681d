use crate::errors::MmuError;
use crate::macros::static_assert;
use crate::mmu::PolicyKind;

pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// The size (in bytes) of a virtual page. Trace addresses are mapped to pages
/// by dropping the lowest `PAGE_OFFSET_BITS` bits.
pub const PAGE_SIZE: usize = 4096;
pub const PAGE_OFFSET_BITS: u32 = 12;

/// Seed used by the random replacement policy when none is given, so that two
/// runs over the same trace agree.
pub const DEFAULT_RANDOM_SEED: u64 = 0x5eed_cafe;

/// Frame counts visited by a sweep when the caller doesn't pick any.
pub const DEFAULT_SWEEP_FRAMES: [usize; 16] = [
    2, 4, 6, 8, 12, 16, 24, 32, 48, 64, 96, 128, 192, 256, 384, 512,
];

static_assert!(PAGE_SIZE.is_power_of_two());
static_assert!(1usize << PAGE_OFFSET_BITS == PAGE_SIZE);

/// Runtime knobs of a single simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of physical frames. Must be positive.
    pub frames: usize,
    pub policy: PolicyKind,
    /// Emit a log line for every hit, miss, eviction and install.
    pub trace: bool,
}

impl SimulationConfig {
    pub fn new(frames: usize, policy: PolicyKind) -> Self {
        SimulationConfig {
            frames,
            policy,
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn validate(&self) -> Result<(), MmuError> {
        if self.frames == 0 {
            return Err(MmuError::InvalidFrameCount(self.frames));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_frames() {
        let config = SimulationConfig::new(0, PolicyKind::Lru);
        assert_eq!(config.validate(), Err(MmuError::InvalidFrameCount(0)));
        assert!(SimulationConfig::new(1, PolicyKind::Clock).validate().is_ok());
    }

    #[test]
    fn test_with_trace() {
        let config = SimulationConfig::new(4, PolicyKind::Lru).with_trace(true);
        assert!(config.trace);
        assert_eq!(config.frames, 4);
    }
}
