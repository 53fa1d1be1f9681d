use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::eviction::EvictionPolicy;
use super::frame::{Frame, FrameId};
use super::memory::PagedMemory;
use crate::config::DEFAULT_RANDOM_SEED;
use crate::errors::MmuError;

/// Evicts a uniformly random frame.
pub type RandomMmu = PagedMemory<RandomPolicy>;

impl RandomMmu {
    pub fn new(frames: usize) -> Result<Self, MmuError> {
        Self::with_seed(frames, DEFAULT_RANDOM_SEED)
    }

    /// Two engines built with the same seed evict the same frames.
    pub fn with_seed(frames: usize, seed: u64) -> Result<Self, MmuError> {
        PagedMemory::with_policy(
            frames,
            RandomPolicy {
                rng: StdRng::seed_from_u64(seed),
            },
        )
    }
}

#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl EvictionPolicy for RandomPolicy {
    type Metadata = ();

    fn name(&self) -> &'static str {
        "rand"
    }

    fn record_access(&mut self, _frame: &mut Frame<()>) {}

    fn record_install(&mut self, _frame_id: FrameId) {}

    fn evict(&mut self, frames: &mut [Frame<()>], trace: bool) -> FrameId {
        let victim = self.rng.random_range(0..frames.len());
        if trace {
            log::debug!("VICTIM frame {victim} drawn at random");
        }
        victim
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mmu::memory::AccessOutcome;
    use crate::mmu::{AccessKind, Mmu};

    fn victims(seed: u64) -> Vec<FrameId> {
        let mut mmu = RandomMmu::with_seed(4, seed).unwrap();
        (0..64)
            .filter_map(|page| match mmu.touch(page, AccessKind::Write) {
                AccessOutcome::Replaced { frame, .. } => Some(frame),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_victims() {
        assert_eq!(victims(42), victims(42));
        assert_eq!(victims(42).len(), 60);
        assert!(victims(42).iter().all(|&frame| frame < 4));
    }

    #[test]
    fn test_every_eviction_of_a_written_page_is_written_back() {
        let mut mmu = RandomMmu::new(3).unwrap();
        for page in 0..20 {
            mmu.write(page);
        }
        assert_eq!(mmu.total_page_faults(), 20);
        assert_eq!(mmu.total_disk_reads(), 20);
        assert_eq!(mmu.total_disk_writes(), 17);
        assert_eq!(mmu.resident_pages(), 3);
        mmu.table().assert_consistent();
    }
}
