use crate::core::models::{BlockId, TimeBlock, validate_range};
use crate::core::store::TimeBlockStore;
use crate::core::types::{DropDatePolicy, ResizeEdge};
use crate::errors::{Error, Result};
use crate::extensions::chrono::{NaiveDateExt, NaiveDateTimeExt};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Grid resolution for every snapped time.
pub const SNAP_MINUTES: i64 = 30;
pub const DEFAULT_PIXELS_PER_HOUR: f64 = 80.0;

/// Vertical pixel scale shared by move and resize; one hour row is
/// `pixels_per_hour` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    pixels_per_hour: f64,
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
        }
    }
}

impl GridScale {
    pub fn new(pixels_per_hour: f64) -> Result<Self> {
        if !pixels_per_hour.is_finite() || pixels_per_hour <= 0.0 {
            return Err(Error::validation(format!(
                "Pixels per hour must be a positive number (got {pixels_per_hour})."
            )));
        }
        Ok(Self { pixels_per_hour })
    }

    pub fn pixels_per_hour(&self) -> f64 {
        self.pixels_per_hour
    }

    pub fn row_height(&self) -> f64 {
        self.pixels_per_hour
    }

    pub fn delta_hours(&self, delta_y: f64) -> f64 {
        delta_y / self.pixels_per_hour
    }

    /// Minutes into an hour row for a pointer offset, floored.
    pub fn offset_minutes(&self, offset_px: f64) -> i64 {
        (offset_px / self.row_height() * 60.0).floor() as i64
    }

    pub fn pixels_for_minutes(&self, minutes: i64) -> f64 {
        minutes as f64 / 60.0 * self.pixels_per_hour
    }
}

/// Round to the nearest grid step; exact halves round up.
pub fn snap_minutes(minutes: i64) -> i64 {
    let steps = (minutes as f64 / SNAP_MINUTES as f64 + 0.5).floor() as i64;
    steps * SNAP_MINUTES
}

/// Snap the minute-of-hour and clear seconds. A result of 60 rolls into the
/// next hour; `None` when that hour is past the last representable date.
pub fn snap_to_grid(t: NaiveDateTime) -> Option<NaiveDateTime> {
    let minute = t.minute() as i64;
    let hour_floor = t.floor_minute() - Duration::minutes(minute);
    hour_floor.checked_add_signed(Duration::minutes(snap_minutes(minute)))
}

/// Where a pointer lands inside the hour grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub hour: u32,
    pub offset_px: f64,
    /// Date of the column under the pointer.
    pub date: NaiveDate,
}

impl DropTarget {
    pub fn new(hour: u32, offset_px: f64, date: NaiveDate) -> Self {
        Self {
            hour,
            offset_px,
            date,
        }
    }

    /// Snapped start time for this target, or `None` when the pointer is
    /// outside the grid.
    pub fn start_time(
        &self,
        scale: GridScale,
        policy: DropDatePolicy,
        today: NaiveDate,
    ) -> Option<NaiveDateTime> {
        if self.hour > 23 || !(0.0..scale.row_height()).contains(&self.offset_px) {
            return None;
        }
        let minutes = snap_minutes(scale.offset_minutes(self.offset_px));
        let date = match policy {
            DropDatePolicy::Today => today,
            DropDatePolicy::Column => self.date,
        };
        date.day_start()
            .checked_add_signed(Duration::minutes(self.hour as i64 * 60 + minutes))
    }
}

/// Candidate block for one resize frame. The opposite edge never moves.
pub fn resize_candidate(
    block: &TimeBlock,
    edge: ResizeEdge,
    initial_time: NaiveDateTime,
    delta_y: f64,
    scale: GridScale,
) -> Result<TimeBlock> {
    let delta_ms = (scale.delta_hours(delta_y) * 3_600_000.0).trunc() as i64;
    let snapped = Duration::try_milliseconds(delta_ms)
        .and_then(|delta| initial_time.checked_add_signed(delta))
        .and_then(snap_to_grid)
        .ok_or_else(|| {
            Error::validation(format!("Pointer moved {delta_y}px, past the end of the calendar."))
        })?;
    let (start, end) = match edge {
        ResizeEdge::Start => (snapped, block.end_time),
        ResizeEdge::End => (block.start_time, snapped),
    };
    validate_range(start, end)?;
    Ok(block.with_times(start, end))
}

/// Candidate block for a drop; duration is preserved.
pub fn drop_candidate(
    block: &TimeBlock,
    target: &DropTarget,
    scale: GridScale,
    policy: DropDatePolicy,
    today: NaiveDate,
) -> Option<TimeBlock> {
    let start = target.start_time(scale, policy, today)?;
    let end = start.checked_add_signed(block.duration())?;
    Some(block.with_times(start, end))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        block_id: BlockId,
    },
    Resizing {
        block_id: BlockId,
        edge: ResizeEdge,
        initial_y: f64,
        initial_time: NaiveDateTime,
    },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Dragging { .. } => "drag",
            Gesture::Resizing { .. } => "resize",
        }
    }

    pub fn block_id(&self) -> Option<BlockId> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { block_id } | Gesture::Resizing { block_id, .. } => Some(*block_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResizeFrame {
    Applied(TimeBlock),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Moved(TimeBlock),
    NoTarget,
}

/// Gesture state machine: idle -> dragging | resizing -> idle.
#[derive(Debug)]
pub struct PointerEngine {
    scale: GridScale,
    drop_policy: DropDatePolicy,
    gesture: Gesture,
}

impl Default for PointerEngine {
    fn default() -> Self {
        Self::new(GridScale::default(), DropDatePolicy::Today)
    }
}

impl PointerEngine {
    pub fn new(scale: GridScale, drop_policy: DropDatePolicy) -> Self {
        Self {
            scale,
            drop_policy,
            gesture: Gesture::Idle,
        }
    }

    pub fn scale(&self) -> GridScale {
        self.scale
    }

    pub fn drop_policy(&self) -> DropDatePolicy {
        self.drop_policy
    }

    /// Settings only change between gestures.
    pub fn configure(&mut self, scale: GridScale, drop_policy: DropDatePolicy) -> Result<()> {
        self.ensure_idle()?;
        self.scale = scale;
        self.drop_policy = drop_policy;
        Ok(())
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.gesture.block_id() {
            None => Ok(()),
            Some(block_id) => Err(Error::GestureInProgress {
                active: self.gesture.name(),
                block_id,
            }),
        }
    }

    pub fn begin_resize(
        &mut self,
        store: &TimeBlockStore,
        block_id: BlockId,
        edge: ResizeEdge,
        pointer_y: f64,
    ) -> Result<()> {
        self.ensure_idle()?;
        let block = store.require(block_id)?;
        let initial_time = match edge {
            ResizeEdge::Start => block.start_time,
            ResizeEdge::End => block.end_time,
        };
        self.gesture = Gesture::Resizing {
            block_id,
            edge,
            initial_y: pointer_y,
            initial_time,
        };
        Ok(())
    }

    /// Apply one pointer frame. Rejected frames leave the block at its last
    /// valid size and keep the gesture open.
    pub fn resize_move(&mut self, store: &mut TimeBlockStore, pointer_y: f64) -> Result<ResizeFrame> {
        let Gesture::Resizing {
            block_id,
            edge,
            initial_y,
            initial_time,
        } = self.gesture
        else {
            return Err(Error::validation("No resize gesture in progress."));
        };

        let Some(block) = store.get(block_id) else {
            return Ok(ResizeFrame::Rejected(format!(
                "Block with id {block_id} no longer exists."
            )));
        };

        match resize_candidate(block, edge, initial_time, pointer_y - initial_y, self.scale) {
            Ok(candidate) => {
                store.update(candidate.clone());
                Ok(ResizeFrame::Applied(candidate))
            }
            Err(Error::Validation(reason)) => Ok(ResizeFrame::Rejected(reason)),
            Err(other) => Err(other),
        }
    }

    pub fn begin_drag(&mut self, store: &mut TimeBlockStore, block_id: BlockId) -> Result<()> {
        self.ensure_idle()?;
        store.require(block_id)?;
        self.gesture = Gesture::Dragging { block_id };
        store.set_dragged(Some(block_id));
        Ok(())
    }

    /// Release the dragged block. The gesture is cleared whatever happens;
    /// without a valid target nothing is committed.
    pub fn drop_on(
        &mut self,
        store: &mut TimeBlockStore,
        target: Option<DropTarget>,
        today: NaiveDate,
    ) -> Result<DropOutcome> {
        let Gesture::Dragging { block_id } = self.gesture else {
            return Err(Error::validation("No drag gesture in progress."));
        };
        self.end(store);

        let Some(target) = target else {
            return Ok(DropOutcome::NoTarget);
        };
        let Some(block) = store.get(block_id) else {
            return Ok(DropOutcome::NoTarget);
        };
        match drop_candidate(block, &target, self.scale, self.drop_policy, today) {
            Some(moved) => {
                store.update(moved.clone());
                Ok(DropOutcome::Moved(moved))
            }
            None => Ok(DropOutcome::NoTarget),
        }
    }

    /// Normal release or abnormal termination; always returns to idle.
    pub fn end(&mut self, store: &mut TimeBlockStore) -> Gesture {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            store.set_dragged(None);
        }
        std::mem::replace(&mut self.gesture, Gesture::Idle)
    }
}
