use super::eviction::EvictionPolicy;
use super::frame::{Frame, FrameId};
use super::memory::PagedMemory;
use crate::errors::MmuError;

/// Second-chance replacement with a circular hand over the frames.
pub type ClockMmu = PagedMemory<ClockPolicy>;

impl ClockMmu {
    /// A frame with a clear reference bit is evicted on the first sweep,
    /// dirty or not.
    pub fn new(frames: usize) -> Result<Self, MmuError> {
        PagedMemory::with_policy(frames, ClockPolicy::new(frames, false))
    }

    /// Like [`ClockMmu::new`], but the first sweep passes over dirty frames
    /// looking for a clean one. Dirty frames are only taken on the second.
    pub fn preferring_clean(frames: usize) -> Result<Self, MmuError> {
        PagedMemory::with_policy(frames, ClockPolicy::new(frames, true))
    }
}

#[derive(Debug)]
pub struct ClockPolicy {
    hand: FrameId,
    size: usize,
    prefer_clean: bool,
}

impl ClockPolicy {
    fn new(size: usize, prefer_clean: bool) -> Self {
        ClockPolicy {
            hand: 0,
            size,
            prefer_clean,
        }
    }

    /// The frame the next scan starts at.
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    fn advance_hand(&mut self) {
        self.hand = (self.hand + 1) % self.size;
    }
}

impl EvictionPolicy for ClockPolicy {
    /// The reference bit.
    type Metadata = bool;

    fn name(&self) -> &'static str {
        "clock"
    }

    fn record_access(&mut self, frame: &mut Frame<bool>) {
        frame.metadata = true;
    }

    /// Installing always moves the hand one step, free frame or not.
    fn record_install(&mut self, _frame_id: FrameId) -> bool {
        self.advance_hand();
        true
    }

    /// Sweeps at most twice from wherever the hand is. Referenced frames get
    /// their bit cleared and are skipped. The hand is left on the victim.
    fn evict(&mut self, frames: &mut [Frame<bool>], trace: bool) -> FrameId {
        for pass in 1..=2 {
            for _ in 0..self.size {
                let frame_id = self.hand;
                let frame = &mut frames[frame_id];

                if frame.metadata {
                    frame.metadata = false;
                    if trace {
                        log::debug!("SCAN frame {frame_id}: referenced, clearing (pass {pass})");
                    }
                } else if frame.dirty && self.prefer_clean && pass == 1 {
                    if trace {
                        log::debug!("SCAN frame {frame_id}: dirty, looking for a clean one");
                    }
                } else {
                    if trace {
                        let state = if frame.dirty { "DIRTY" } else { "CLEAN" };
                        log::debug!(
                            "VICTIM frame {frame_id} page {:?} ({state}, pass {pass})",
                            frame.resident
                        );
                    }
                    return frame_id;
                }

                self.advance_hand();
            }
        }

        log::warn!(
            "clock found no unreferenced frame in two sweeps, taking frame {}",
            self.hand
        );
        self.hand
    }
}
