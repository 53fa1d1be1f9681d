use std::fmt;
use std::str::FromStr;

use memtrace::Operation;

use super::frame::PageId;
use super::{ClockMmu, LruMmu, RandomMmu};
use crate::config::DEFAULT_RANDOM_SEED;
use crate::errors::MmuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    pub fn is_write(self) -> bool {
        self == AccessKind::Write
    }
}

impl From<Operation> for AccessKind {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Read => AccessKind::Read,
            Operation::Write => AccessKind::Write,
        }
    }
}

/// A simulated memory management unit with a fixed pool of frames.
///
/// Every access either hits a resident page or faults. A fault loads the page
/// (one disk read) into a free frame or into a victim chosen by the policy,
/// and a dirty victim costs one disk write.
pub trait Mmu {
    fn access(&mut self, page: PageId, kind: AccessKind);

    fn read(&mut self, page: PageId) {
        self.access(page, AccessKind::Read);
    }

    /// Like [`Mmu::read`], and marks the page dirty.
    fn write(&mut self, page: PageId) {
        self.access(page, AccessKind::Write);
    }

    fn total_disk_reads(&self) -> u64;

    fn total_disk_writes(&self) -> u64;

    fn total_page_faults(&self) -> u64;

    /// Log every hit, miss, eviction and install at debug level. Has no
    /// effect on counters or victim choice.
    fn enable_trace(&mut self);

    fn disable_trace(&mut self);

    /// Number of physical frames.
    fn frames(&self) -> usize;

    /// Number of frames currently holding a page.
    fn resident_pages(&self) -> usize;
}

/// The replacement algorithms the simulator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Random { seed: u64 },
    Lru,
    Clock,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Random {
            seed: DEFAULT_RANDOM_SEED,
        },
        PolicyKind::Lru,
        PolicyKind::Clock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Random { .. } => "rand",
            PolicyKind::Lru => "lru",
            PolicyKind::Clock => "clock",
        }
    }

    pub fn build(self, frames: usize) -> Result<Box<dyn Mmu>, MmuError> {
        Ok(match self {
            PolicyKind::Random { seed } => Box::new(RandomMmu::with_seed(frames, seed)?),
            PolicyKind::Lru => Box::new(LruMmu::new(frames)?),
            PolicyKind::Clock => Box::new(ClockMmu::new(frames)?),
        })
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = MmuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rand" | "random" => Ok(PolicyKind::Random {
                seed: DEFAULT_RANDOM_SEED,
            }),
            "lru" => Ok(PolicyKind::Lru),
            "clock" => Ok(PolicyKind::Clock),
            _ => Err(MmuError::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::logger::setup_logger_with_level;
    use log::LevelFilter;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("lru", PolicyKind::Lru)]
    #[case("LRU", PolicyKind::Lru)]
    #[case("clock", PolicyKind::Clock)]
    #[case("rand", PolicyKind::Random { seed: DEFAULT_RANDOM_SEED })]
    #[case("random", PolicyKind::Random { seed: DEFAULT_RANDOM_SEED })]
    fn test_parse_policy(#[case] name: &str, #[case] expected: PolicyKind) {
        assert_eq!(name.parse::<PolicyKind>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown_policy() {
        assert_eq!(
            "fifo".parse::<PolicyKind>(),
            Err(MmuError::UnknownPolicy("fifo".to_string()))
        );
    }

    #[rstest]
    #[case(PolicyKind::Lru)]
    #[case(PolicyKind::Clock)]
    #[case(PolicyKind::Random { seed: 1 })]
    fn test_build_rejects_zero_frames(#[case] kind: PolicyKind) {
        assert_eq!(kind.build(0).err(), Some(MmuError::InvalidFrameCount(0)));
    }

    #[rstest]
    #[case(PolicyKind::Lru)]
    #[case(PolicyKind::Clock)]
    #[case(PolicyKind::Random { seed: 1 })]
    fn test_single_frame_thrashes(#[case] kind: PolicyKind) {
        let mut mmu = kind.build(1).unwrap();
        mmu.write(1);
        mmu.read(2);
        mmu.write(1);
        mmu.read(1);
        assert_eq!(mmu.total_page_faults(), 3);
        assert_eq!(mmu.total_disk_reads(), 3);
        // page 1 was dirty when 2 replaced it; the second copy of 1 is never evicted
        assert_eq!(mmu.total_disk_writes(), 1);
        assert_eq!(mmu.resident_pages(), 1);
    }

    #[rstest]
    #[case(PolicyKind::Lru)]
    #[case(PolicyKind::Clock)]
    #[case(PolicyKind::Random { seed: 1 })]
    fn test_repeated_reads_are_free(#[case] kind: PolicyKind) {
        let mut mmu = kind.build(2).unwrap();
        mmu.read(5);
        for _ in 0..10 {
            mmu.read(5);
        }
        assert_eq!(mmu.total_page_faults(), 1);
        assert_eq!(mmu.total_disk_reads(), 1);
        assert_eq!(mmu.total_disk_writes(), 0);
    }

    fn policy_strategy() -> impl Strategy<Value = PolicyKind> {
        prop_oneof![
            Just(PolicyKind::Lru),
            Just(PolicyKind::Clock),
            any::<u64>().prop_map(|seed| PolicyKind::Random { seed }),
        ]
    }

    fn accesses_strategy() -> impl Strategy<Value = Vec<(PageId, bool)>> {
        prop::collection::vec((0u64..24, any::<bool>()), 0..300)
    }

    fn run(mmu: &mut dyn Mmu, accesses: &[(PageId, bool)]) -> (u64, u64, u64) {
        for &(page, is_write) in accesses {
            if is_write {
                mmu.write(page);
            } else {
                mmu.read(page);
            }
            assert!(mmu.resident_pages() <= mmu.frames());
        }
        (
            mmu.total_disk_reads(),
            mmu.total_disk_writes(),
            mmu.total_page_faults(),
        )
    }

    proptest! {
        /// Every fault loads exactly one page and nothing else does.
        #[test]
        fn prop_reads_match_faults(
            kind in policy_strategy(),
            frames in 1usize..10,
            accesses in accesses_strategy(),
        ) {
            let mut mmu = kind.build(frames).unwrap();
            let (reads, writes, faults) = run(mmu.as_mut(), &accesses);
            prop_assert_eq!(reads, faults);
            prop_assert!(writes <= faults);
            prop_assert!(faults <= accesses.len() as u64);
        }

        /// Turning the trace on never changes what the engine decides.
        #[test]
        fn prop_trace_does_not_change_counters(
            kind in policy_strategy(),
            frames in 1usize..10,
            accesses in accesses_strategy(),
        ) {
            setup_logger_with_level(LevelFilter::Debug);

            let mut quiet = kind.build(frames).unwrap();
            let mut traced = kind.build(frames).unwrap();
            traced.enable_trace();

            prop_assert_eq!(run(quiet.as_mut(), &accesses), run(traced.as_mut(), &accesses));
        }

        /// With at least as many frames as distinct pages nothing is ever evicted.
        #[test]
        fn prop_no_eviction_when_everything_fits(
            kind in policy_strategy(),
            accesses in accesses_strategy(),
        ) {
            let mut mmu = kind.build(24).unwrap();
            let (reads, writes, faults) = run(mmu.as_mut(), &accesses);
            let distinct = accesses
                .iter()
                .map(|&(page, _)| page)
                .collect::<std::collections::HashSet<_>>()
                .len() as u64;
            prop_assert_eq!(faults, distinct);
            prop_assert_eq!(reads, distinct);
            prop_assert_eq!(writes, 0);
        }
    }
}
