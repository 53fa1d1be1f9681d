use std::fmt::Debug;

use super::frame::{Frame, FrameId};

/// The part of a replacement policy that differs between algorithms.
///
/// [`super::PagedMemory`] owns the frames and the page table and calls into the
/// policy to refresh metadata and to pick victims. Policies never touch the
/// page table or the counters.
pub trait EvictionPolicy {
    /// Per-frame bookkeeping stored next to the resident page.
    type Metadata: Default + Debug;

    /// Short lowercase name used in logs and reports.
    fn name(&self) -> &'static str;

    /// The resident page in `frame` was accessed again.
    fn record_access(&mut self, frame: &mut Frame<Self::Metadata>);

    /// Metadata for a page just loaded into `frame_id`.
    fn record_install(&mut self, frame_id: FrameId) -> Self::Metadata;

    /// Picks the frame to evict. Only called when every frame is occupied, so
    /// `frames` is never empty. `trace` enables scan logging.
    fn evict(&mut self, frames: &mut [Frame<Self::Metadata>], trace: bool) -> FrameId;
}
