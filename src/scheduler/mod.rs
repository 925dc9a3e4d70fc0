use crate::core::context::AppContext;
use crate::core::models::{BlockId, TimeBlock, TimeBlockDraft, TimeSlot};
use crate::core::types::{DropDatePolicy, ResizeEdge};
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use crate::scheduler::pointer::{DropOutcome, DropTarget, ResizeFrame};
use crate::scheduler::slots::SLOT_MINUTES;
use chrono::Duration;

pub mod analytics;
pub mod calendar_view;
pub mod pointer;
pub mod slots;
#[cfg(test)]
mod tests;

/// Hooks fired as gestures commit or get refused.
pub trait GestureObserver {
    fn frame_applied(&self, block: &TimeBlock, frame: usize);
    fn frame_rejected(&self, block_id: BlockId, frame: usize, reason: &str);
    fn block_moved(&self, block: &TimeBlock);
    fn drop_missed(&self, block_id: BlockId);
    fn block_placed(&self, block: &TimeBlock);
}

struct LoggerObserver {
    logger: Logger,
}

impl GestureObserver for LoggerObserver {
    fn frame_applied(&self, block: &TimeBlock, frame: usize) {
        self.logger.debug(
            format!(
                "Resize frame {} applied to block {}: {} - {}",
                frame,
                block.id,
                block.start_time.format("%H:%M"),
                block.end_time.format("%H:%M")
            ),
            LogTarget::FileOnly,
        );
    }

    fn frame_rejected(&self, block_id: BlockId, frame: usize, reason: &str) {
        self.logger.debug(
            format!("Resize frame {frame} on block {block_id} rejected: {reason}"),
            LogTarget::FileOnly,
        );
    }

    fn block_moved(&self, block: &TimeBlock) {
        self.logger.info(
            format!(
                "Block with id {} moved to {}",
                block.id,
                block.start_time.format("%Y-%m-%d %H:%M")
            ),
            LogTarget::FileOnly,
        );
    }

    fn drop_missed(&self, block_id: BlockId) {
        self.logger.info(
            format!("Drop of block with id {block_id} had no valid target"),
            LogTarget::FileOnly,
        );
    }

    fn block_placed(&self, block: &TimeBlock) {
        self.logger.info(
            format!("Block with id {} created from slot click", block.id),
            LogTarget::FileOnly,
        );
    }
}

/// Result of one complete resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSummary {
    pub block_id: BlockId,
    pub applied: usize,
    pub rejected: Vec<String>,
    pub block: Option<TimeBlock>,
}

/// Runs whole pointer gestures against the session's store.
pub struct InteractionManager<'a> {
    ctx: &'a mut AppContext,
    observer: Box<dyn GestureObserver>,
}

impl<'a> InteractionManager<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let observer = Box::new(LoggerObserver {
            logger: ctx.logger.clone(),
        });
        Self { ctx, observer }
    }

    pub fn with_observer(mut self, observer: Box<dyn GestureObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Press on an edge at y = 0, move through `pointer_ys`, release.
    /// The gesture is closed even when a frame errors.
    pub fn resize(
        &mut self,
        block_id: BlockId,
        edge: ResizeEdge,
        pointer_ys: &[f64],
    ) -> Result<ResizeSummary> {
        let ctx = &mut *self.ctx;
        ctx.pointer.begin_resize(&ctx.store, block_id, edge, 0.0)?;

        let mut summary = ResizeSummary {
            block_id,
            applied: 0,
            rejected: Vec::new(),
            block: None,
        };
        for (i, y) in pointer_ys.iter().enumerate() {
            let frame = match ctx.pointer.resize_move(&mut ctx.store, *y) {
                Ok(frame) => frame,
                Err(err) => {
                    ctx.pointer.end(&mut ctx.store);
                    return Err(err);
                }
            };
            match frame {
                ResizeFrame::Applied(block) => {
                    self.observer.frame_applied(&block, i + 1);
                    summary.applied += 1;
                }
                ResizeFrame::Rejected(reason) => {
                    self.observer.frame_rejected(block_id, i + 1, &reason);
                    summary.rejected.push(reason);
                }
            }
        }
        ctx.pointer.end(&mut ctx.store);
        summary.block = ctx.store.get(block_id).cloned();
        Ok(summary)
    }

    /// Pick the block up and drop it on `target`; `None` is a release
    /// outside the grid.
    pub fn move_block(&mut self, block_id: BlockId, target: Option<DropTarget>) -> Result<DropOutcome> {
        let today = self.ctx.today();
        let ctx = &mut *self.ctx;
        ctx.pointer.begin_drag(&mut ctx.store, block_id)?;
        let outcome = ctx.pointer.drop_on(&mut ctx.store, target, today)?;
        match &outcome {
            DropOutcome::Moved(block) => self.observer.block_moved(block),
            DropOutcome::NoTarget => self.observer.drop_missed(block_id),
        }
        Ok(outcome)
    }

    /// Slot click: create a default block at the snapped target on the
    /// clicked column's date and select it. Off-grid targets create nothing.
    pub fn place(&mut self, target: DropTarget) -> Result<Option<BlockId>> {
        let scale = self.ctx.pointer.scale();
        let Some(start_time) = target.start_time(scale, DropDatePolicy::Column, target.date) else {
            return Ok(None);
        };
        let slot = TimeSlot {
            start_time,
            end_time: start_time + Duration::minutes(SLOT_MINUTES),
            is_available: true,
        };
        let draft = TimeBlockDraft::for_slot(&slot, self.ctx.config.default_duration());
        let block = self.ctx.store.add(draft)?.clone();
        self.ctx.store.set_selected(Some(block.id));
        self.observer.block_placed(&block);
        Ok(Some(block.id))
    }
}
