use std::collections::HashMap;

/// Virtual page number as seen by the simulator. Any value is accepted.
pub type PageId = u64;

/// Physical frame slot, `0..frames`. It is not associated with the page id.
pub type FrameId = usize;

/// One physical frame slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<M> {
    /// The page currently loaded in this frame, if any.
    pub resident: Option<PageId>,
    /// Whether the resident page was written since it was loaded.
    pub dirty: bool,
    /// Policy bookkeeping: a timestamp for LRU, a reference bit for clock.
    pub metadata: M,
}

impl<M: Default> Frame<M> {
    fn empty() -> Self {
        Frame {
            resident: None,
            dirty: false,
            metadata: M::default(),
        }
    }
}

impl<M> Frame<M> {
    pub fn is_occupied(&self) -> bool {
        self.resident.is_some()
    }
}

/// The frame store together with the page index that points into it.
///
/// Every entry `(page, frame_id)` of the page table satisfies
/// `frames[frame_id].resident == Some(page)`, and every occupied frame has
/// exactly one entry.
#[derive(Debug)]
pub(crate) struct FrameTable<M> {
    frames: Vec<Frame<M>>,
    /// Maps page id to frame id. Returns None if the page is not resident.
    page_table: HashMap<PageId, FrameId>,
    /// Frames never used so far, lowest id on top. Getting a free frame is O(1).
    free_list: Vec<FrameId>,
}

impl<M: Default> FrameTable<M> {
    pub(crate) fn new(size: usize) -> Self {
        FrameTable {
            frames: (0..size).map(|_| Frame::empty()).collect(),
            page_table: HashMap::with_capacity(size),
            free_list: (0..size).rev().collect(),
        }
    }
}

impl<M> FrameTable<M> {
    /// Number of frame slots. Fixed at construction.
    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames holding a page.
    pub(crate) fn resident_count(&self) -> usize {
        self.page_table.len()
    }

    pub(crate) fn lookup(&self, page: PageId) -> Option<FrameId> {
        self.page_table.get(&page).copied()
    }

    pub(crate) fn frame(&self, frame_id: FrameId) -> &Frame<M> {
        &self.frames[frame_id]
    }

    pub(crate) fn frame_mut(&mut self, frame_id: FrameId) -> &mut Frame<M> {
        &mut self.frames[frame_id]
    }

    #[cfg(test)]
    pub(crate) fn frames(&self) -> &[Frame<M>] {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame<M>] {
        &mut self.frames
    }

    pub(crate) fn take_free_frame(&mut self) -> Option<FrameId> {
        self.free_list.pop()
    }

    /// Loads `page` into `frame_id`, dropping whatever page was there before.
    /// Returns the page that was replaced.
    pub(crate) fn install(
        &mut self,
        frame_id: FrameId,
        page: PageId,
        dirty: bool,
        metadata: M,
    ) -> Option<PageId> {
        let frame = &mut self.frames[frame_id];
        let old_page = frame.resident.replace(page);
        if let Some(old_page) = old_page {
            if self.page_table.get(&old_page) == Some(&frame_id) {
                self.page_table.remove(&old_page);
            }
        }
        frame.dirty = dirty;
        frame.metadata = metadata;

        let previous = self.page_table.insert(page, frame_id);
        debug_assert!(previous.is_none(), "page {page} was already resident");
        old_page
    }

    /// Panics if the page table and the frames disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (&page, &frame_id) in &self.page_table {
            assert_eq!(
                self.frames[frame_id].resident,
                Some(page),
                "page table points page {page} at frame {frame_id}"
            );
        }
        let occupied = self.frames.iter().filter(|f| f.is_occupied()).count();
        assert_eq!(occupied, self.page_table.len());
        assert!(occupied <= self.frames.len());
    }
}
