use super::eviction::EvictionPolicy;
use super::frame::{FrameId, FrameTable, PageId};
use super::policy::{AccessKind, Mmu};
use super::stats::Stats;
use crate::errors::MmuError;

/// What a single access did to the frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessOutcome {
    Hit(FrameId),
    /// The page was loaded into a frame nobody had used yet.
    Loaded(FrameId),
    /// The page replaced `victim` in `frame`.
    Replaced {
        frame: FrameId,
        victim: PageId,
        dirty: bool,
    },
}

/// A fixed pool of frames managed by a replacement policy.
///
/// The pool owns the frames, the page table and the counters. The policy only
/// decides metadata and victims, so every algorithm shares the same hit, miss
/// and write-back accounting.
pub struct PagedMemory<P: EvictionPolicy> {
    table: FrameTable<P::Metadata>,
    policy: P,
    stats: Stats,
    trace: bool,
}

impl<P: EvictionPolicy> PagedMemory<P> {
    pub fn with_policy(frames: usize, policy: P) -> Result<Self, MmuError> {
        if frames == 0 {
            return Err(MmuError::InvalidFrameCount(frames));
        }
        log::debug!("allocating {frames} frames for {} replacement", policy.name());

        Ok(PagedMemory {
            table: FrameTable::new(frames),
            policy,
            stats: Stats::default(),
            trace: false,
        })
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub(crate) fn table(&self) -> &FrameTable<P::Metadata> {
        &self.table
    }

    pub(crate) fn touch(&mut self, page: PageId, kind: AccessKind) -> AccessOutcome {
        let is_write = kind.is_write();

        if let Some(frame_id) = self.table.lookup(page) {
            let frame = self.table.frame_mut(frame_id);
            self.policy.record_access(frame);
            if is_write {
                frame.dirty = true;
            }
            if self.trace {
                log::debug!(
                    "HIT page {page} in frame {frame_id} (write={is_write}, dirty={})",
                    frame.dirty
                );
            }
            return AccessOutcome::Hit(frame_id);
        }

        self.stats.record_fault();
        if self.trace {
            log::debug!("MISS page {page} (write={is_write})");
        }

        let outcome = match self.table.take_free_frame() {
            Some(frame_id) => AccessOutcome::Loaded(frame_id),
            None => self.evict(page),
        };
        let frame_id = match outcome {
            AccessOutcome::Hit(frame_id) | AccessOutcome::Loaded(frame_id) => frame_id,
            AccessOutcome::Replaced { frame, .. } => frame,
        };

        let metadata = self.policy.record_install(frame_id);
        self.table.install(frame_id, page, is_write, metadata);
        self.stats.record_read();
        if self.trace {
            log::debug!("INSTALL page {page} into frame {frame_id} (write={is_write})");
        }

        outcome
    }

    /// Asks the policy for a victim and pays for its write-back. This is the
    /// only place a disk write is counted.
    fn evict(&mut self, incoming: PageId) -> AccessOutcome {
        let frame_id = self.policy.evict(self.table.frames_mut(), self.trace);
        let frame = self.table.frame(frame_id);
        let (victim, dirty) = match frame.resident {
            Some(victim) => (victim, frame.dirty),
            None => unreachable!("evicting empty frame {frame_id} while loading page {incoming}"),
        };

        if dirty {
            self.stats.record_write_back();
        }
        if self.trace {
            let state = if dirty { "DIRTY" } else { "CLEAN" };
            log::debug!("EVICT page {victim} from frame {frame_id} ({state})");
        }

        AccessOutcome::Replaced {
            frame: frame_id,
            victim,
            dirty,
        }
    }
}

impl<P: EvictionPolicy> Mmu for PagedMemory<P> {
    fn access(&mut self, page: PageId, kind: AccessKind) {
        self.touch(page, kind);
    }

    fn total_disk_reads(&self) -> u64 {
        self.stats.disk_reads()
    }

    fn total_disk_writes(&self) -> u64 {
        self.stats.disk_writes()
    }

    fn total_page_faults(&self) -> u64 {
        self.stats.page_faults()
    }

    fn enable_trace(&mut self) {
        self.trace = true;
    }

    fn disable_trace(&mut self) {
        self.trace = false;
    }

    fn frames(&self) -> usize {
        self.table.len()
    }

    fn resident_pages(&self) -> usize {
        self.table.resident_count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mmu::frame::Frame;

    /// Always evicts frame 0.
    #[derive(Default)]
    struct FirstFrame {
        installs: usize,
    }

    impl EvictionPolicy for FirstFrame {
        type Metadata = ();

        fn name(&self) -> &'static str {
            "first"
        }

        fn record_access(&mut self, _frame: &mut Frame<()>) {}

        fn record_install(&mut self, _frame_id: FrameId) {
            self.installs += 1;
        }

        fn evict(&mut self, _frames: &mut [Frame<()>], _trace: bool) -> FrameId {
            0
        }
    }

    #[test]
    fn test_zero_frames_is_a_configuration_error() {
        let err = PagedMemory::with_policy(0, FirstFrame::default()).err();
        assert_eq!(err, Some(MmuError::InvalidFrameCount(0)));
    }

    #[test]
    fn test_outcomes() {
        let mut memory = PagedMemory::with_policy(2, FirstFrame::default()).unwrap();
        assert_eq!(memory.touch(10, AccessKind::Write), AccessOutcome::Loaded(0));
        assert_eq!(memory.touch(11, AccessKind::Read), AccessOutcome::Loaded(1));
        assert_eq!(memory.touch(10, AccessKind::Read), AccessOutcome::Hit(0));
        assert_eq!(
            memory.touch(12, AccessKind::Read),
            AccessOutcome::Replaced {
                frame: 0,
                victim: 10,
                dirty: true
            }
        );
        assert_eq!(memory.policy().installs, 3);
        memory.table().assert_consistent();
    }

    #[test]
    fn test_write_back_counted_once_per_dirty_eviction() {
        let mut memory = PagedMemory::with_policy(1, FirstFrame::default()).unwrap();

        memory.write(1);
        memory.write(1);
        assert_eq!(memory.total_disk_writes(), 0);

        memory.read(2);
        assert_eq!(memory.total_disk_writes(), 1);

        // page 2 was loaded clean
        memory.read(3);
        assert_eq!(memory.total_disk_writes(), 1);

        memory.write(3);
        memory.read(4);
        assert_eq!(memory.total_disk_writes(), 2);
        assert_eq!(memory.total_page_faults(), 4);
        assert_eq!(memory.total_disk_reads(), 4);
    }

    #[test]
    fn test_hit_write_marks_dirty() {
        let mut memory = PagedMemory::with_policy(2, FirstFrame::default()).unwrap();
        memory.read(1);
        assert!(!memory.table().frame(0).dirty);
        memory.write(1);
        assert!(memory.table().frame(0).dirty);
        assert_eq!(memory.stats(), {
            let mut stats = Stats::default();
            stats.record_fault();
            stats.record_read();
            stats
        });
    }
}
