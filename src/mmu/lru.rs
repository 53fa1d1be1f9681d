use super::eviction::EvictionPolicy;
use super::frame::{Frame, FrameId};
use super::memory::PagedMemory;
use crate::errors::MmuError;

/// Exact least-recently-used replacement.
pub type LruMmu = PagedMemory<LruPolicy>;

/// Stamps every access with a logical clock and evicts the oldest stamp.
#[derive(Debug, Default)]
pub struct LruPolicy {
    /// An incremental counter that tracks the current timestamp starting from 0.
    current_timestamp: u64,
}

impl LruPolicy {
    fn next_timestamp(&mut self) -> u64 {
        self.current_timestamp += 1;
        self.current_timestamp
    }
}

impl LruMmu {
    pub fn new(frames: usize) -> Result<Self, MmuError> {
        PagedMemory::with_policy(frames, LruPolicy::default())
    }
}

impl EvictionPolicy for LruPolicy {
    /// Timestamp of the last access. 0 for frames never used.
    type Metadata = u64;

    fn name(&self) -> &'static str {
        "lru"
    }

    fn record_access(&mut self, frame: &mut Frame<u64>) {
        frame.metadata = self.next_timestamp();
    }

    fn record_install(&mut self, _frame_id: FrameId) -> u64 {
        self.next_timestamp()
    }

    /// Linear scan over the occupied frames for the smallest timestamp. On a
    /// tie the lowest frame id wins.
    fn evict(&mut self, frames: &mut [Frame<u64>], trace: bool) -> FrameId {
        let victim = frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.is_occupied())
            .min_by_key(|(_, frame)| frame.metadata)
            .map(|(frame_id, _)| frame_id)
            .unwrap_or(0);

        if trace {
            log::debug!(
                "VICTIM frame {victim} (last used at {})",
                frames[victim].metadata
            );
        }
        victim
    }
}
