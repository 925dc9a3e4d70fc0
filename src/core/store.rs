use std::cmp::Ordering;

use crate::core::models::{BlockFilter, BlockId, FilterPatch, TimeBlock, TimeBlockDraft};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Inserted,
    StartAsc,
}

struct FilterSorter<'a> {
    filters: Vec<Box<dyn Fn(&TimeBlock) -> bool + 'a>>,
    sort: Sort,
    cmp: Option<Box<dyn Fn(&TimeBlock, &TimeBlock) -> Ordering + 'a>>,
}

impl<'a> FilterSorter<'a> {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Sort::Inserted,
            cmp: None,
        }
    }

    fn push_filter(mut self, pred: impl Fn(&TimeBlock) -> bool + 'a) -> Self {
        self.filters.push(Box::new(pred));
        self
    }

    fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    fn with_cmp(mut self, cmp: impl Fn(&TimeBlock, &TimeBlock) -> Ordering + 'a) -> Self {
        self.cmp = Some(Box::new(cmp));
        self
    }

    fn apply<'b>(&self, blocks: &'b [TimeBlock]) -> Vec<&'b TimeBlock> {
        let mut out: Vec<&TimeBlock> = blocks
            .iter()
            .filter(|b| self.filters.iter().all(|f| f(b)))
            .collect();

        // Stable sorts keep insertion order among equals.
        if let Some(cmp) = &self.cmp {
            out.sort_by(|a, b| cmp(a, b));
        } else {
            match self.sort {
                Sort::Inserted => {}
                Sort::StartAsc => out.sort_by_key(|b| (b.start_time, b.end_time)),
            }
        }
        out
    }
}

/// Canonical, insertion-ordered collection of blocks plus selection,
/// drag pointer and filter.
#[derive(Debug)]
pub struct TimeBlockStore {
    blocks: Vec<TimeBlock>,
    next_id: u32,
    selected: Option<BlockId>,
    dragged: Option<BlockId>,
    filter: BlockFilter,
}

impl Default for TimeBlockStore {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 1,
            selected: None,
            dragged: None,
            filter: BlockFilter::default(),
        }
    }
}

impl TimeBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }

    /// Validate the draft, assign a fresh id and append.
    pub fn add(&mut self, draft: TimeBlockDraft) -> Result<&TimeBlock> {
        draft.validate()?;
        let id = BlockId(self.next_id);
        let block = draft.into_block(id)?;
        self.next_id += 1;
        self.blocks.push(block);
        self.blocks
            .last()
            .ok_or_else(|| Error::Domain("Block missing after insert.".into()))
    }

    /// Replace the block with the same id in place. Returns `false` when the
    /// id is gone; that case leaves the collection untouched.
    pub fn update(&mut self, block: TimeBlock) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == block.id) {
            Some(slot) => {
                *slot = block;
                true
            }
            None => false,
        }
    }

    /// Remove by id; a missing id is a no-op returning `false`.
    pub fn remove(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        let removed = self.blocks.len() != before;
        if removed {
            if self.selected == Some(id) {
                self.selected = None;
            }
            if self.dragged == Some(id) {
                self.dragged = None;
            }
        }
        removed
    }

    pub fn get(&self, id: BlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn require(&self, id: BlockId) -> Result<&TimeBlock> {
        self.get(id)
            .ok_or_else(|| Error::Parse(format!("Block with id {} not found.", id)))
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Blocks passing the current filter, in insertion order.
    pub fn visible(&self) -> Vec<&TimeBlock> {
        self.query().r#where(|b| self.filter.matches(b)).collect()
    }

    pub fn set_selected(&mut self, id: Option<BlockId>) {
        self.selected = id;
    }

    pub fn set_dragged(&mut self, id: Option<BlockId>) {
        self.dragged = id;
    }

    pub fn selected(&self) -> Option<&TimeBlock> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn dragged_id(&self) -> Option<BlockId> {
        self.dragged
    }

    pub fn filter(&self) -> &BlockFilter {
        &self.filter
    }

    pub fn update_filter(&mut self, patch: FilterPatch) {
        self.filter.merge(patch);
    }

    pub fn reset_filter(&mut self) {
        self.filter = BlockFilter::default();
    }

    /// Swap in a whole collection at once; transient pointers are cleared.
    pub fn replace_all(&mut self, blocks: Vec<TimeBlock>, next_id: u32) {
        let floor = blocks.iter().map(|b| b.id.0 + 1).max().unwrap_or(1);
        self.blocks = blocks;
        self.next_id = next_id.max(floor);
        self.selected = None;
        self.dragged = None;
    }

    pub fn query(&self) -> Query<'_> {
        Query::new(&self.blocks)
    }
}

pub struct Query<'a> {
    blocks: &'a [TimeBlock],
    fs: FilterSorter<'a>,
}

impl<'a> Query<'a> {
    fn new(blocks: &'a [TimeBlock]) -> Self {
        Self {
            blocks,
            fs: FilterSorter::new(),
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&TimeBlock) -> bool + 'a) -> Self {
        self.fs = self.fs.push_filter(pred);
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.fs = self.fs.with_sort(sort);
        self
    }

    pub fn order_with(mut self, cmp: impl Fn(&TimeBlock, &TimeBlock) -> Ordering + 'a) -> Self {
        self.fs = self.fs.with_cmp(cmp);
        self
    }

    pub fn collect(self) -> Vec<&'a TimeBlock> {
        self.fs.apply(self.blocks)
    }

    pub fn ids(self) -> Vec<BlockId> {
        self.collect().into_iter().map(|b| b.id).collect()
    }

    pub fn count(self) -> usize {
        self.collect().len()
    }
}
