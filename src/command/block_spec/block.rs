use crate::arg::arg_extractor::{extract_all, extract_at};
use crate::arg::args::{
    Arg, CategoryArg, DateArg, EdgeArg, IntArg, NameArg, NumberArg, PriorityArg, StatusArg,
    TagArg, TimeArg,
};
use crate::command::block_spec::common::{
    block_id_slot, edge_slot, field_slots, grid_hour, hour_slot, pixels_slot, title_slot,
};
use crate::command::block_spec::core::{
    ArgPattern, ArgSchema, ArgSlot, ColumnIndexer, PatternIdExt,
};
use crate::core::context::AppContext;
use crate::core::models::{
    BlockId, Category, TimeBlock, TimeBlockDraft, check_duration, checked_end,
};
use crate::core::types::{BlockCommand, BlockStatus, ClockTime, Date, Priority, ResizeEdge};
use crate::errors::{Error, Result};
use crate::scheduler::pointer::DropTarget;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPat {
    Add,
    Modify,
    Delete,
    Move,
    Resize,
    Place,
    Select,
    Sync,
}

impl BlockPat {
    const fn usage(self) -> &'static str {
        match self {
            BlockPat::Add => {
                r#""<title>" <time> [minutes] [date] ["<description>"] [status] [priority] [#category] [+tag...]
Required:
  title - (string) Title of the block, wrapped in single or double quotes
  time  - (Time)   Start time of day. Run 'time' to see valid formats
Optional:
  minutes     - (int)    Duration in minutes, 15 to 10080 (one week). Defaults to DEFAULT_DURATION
  date        - (Date)   Day of the block. Defaults to the day in view. Run 'date' to see valid formats
  description - (string) Free text, wrapped in quotes
  status      - pending | in-progress | completed. Defaults to pending
  priority    - low | medium | high. Defaults to medium
  category    - Category name prefixed with '#'. Run 'colors' to see how categories map to colors
  tag         - Free-form tag prefixed with '+'; repeatable"#
            }
            BlockPat::Modify => {
                r#"<id> ["<title>"] [time] [minutes] [date] ["<description>"] [status] [priority] [#category] [+tag...]
Required:
  id - (int) id of the block
Optional:
  Any field accepted by 'add', in the same order. A new time or date keeps the duration;
  new minutes keep the start. Tags, when given, replace the existing tags"#
            }
            BlockPat::Delete => {
                r#"<id>
Required:
  id - (int) id of the block"#
            }
            BlockPat::Move => {
                r#"<id> <hour> <offsetPx> [date]
Required:
  id       - (int)    id of the block
  hour     - (int)    Hour row the block is dropped on, 0-23
  offsetPx - (number) Pointer offset inside the hour row, in pixels
Optional:
  date - (Date) Date of the column under the pointer. Used when DROP_DATE_POLICY is 'column'"#
            }
            BlockPat::Resize => {
                r#"<id> <start|end> <deltaPx>...
Required:
  id      - (int)    id of the block
  edge    - start | end
  deltaPx - (number) Pointer positions relative to where the edge was grabbed, one per frame"#
            }
            BlockPat::Place => {
                r#"<hour> <offsetPx> [date]
Required:
  hour     - (int)    Hour row that was clicked, 0-23
  offsetPx - (number) Pointer offset inside the hour row, in pixels
Optional:
  date - (Date) Date of the clicked column. Defaults to the day in view"#
            }
            BlockPat::Select => {
                r#"[id]
Optional:
  id - (int) id of the block to select. Leave out to clear the selection"#
            }
            BlockPat::Sync => {
                r#"<id>
Required:
  id - (int) id of the block to push to the external calendar"#
            }
        }
    }
}

impl fmt::Display for BlockPat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.usage())
    }
}

impl PatternIdExt for BlockPat {
    fn pattern(&self) -> ArgPattern {
        match self {
            BlockPat::Add => {
                let mut v = vec![title_slot()];
                v.extend(field_slots(true));
                v
            }
            BlockPat::Modify => {
                let mut v = vec![block_id_slot(), title_slot().optional()];
                v.extend(field_slots(false));
                v
            }
            BlockPat::Delete | BlockPat::Sync => vec![block_id_slot()],
            BlockPat::Move => vec![
                block_id_slot(),
                hour_slot(),
                pixels_slot(),
                ArgSlot::is_of_arg_type::<DateArg>().optional(),
            ],
            BlockPat::Resize => vec![block_id_slot(), edge_slot(), pixels_slot().repeated()],
            BlockPat::Place => vec![
                hour_slot(),
                pixels_slot(),
                ArgSlot::is_of_arg_type::<DateArg>().optional(),
            ],
            BlockPat::Select => vec![block_id_slot().optional()],
        }
    }
}

pub struct BlockArgSchema;

impl ArgSchema for BlockArgSchema {
    type PatternId = BlockPat;

    fn patterns_for(&self, command: BlockCommand) -> Vec<BlockPat> {
        let pid = match command {
            BlockCommand::Add => BlockPat::Add,
            BlockCommand::Modify => BlockPat::Modify,
            BlockCommand::Delete => BlockPat::Delete,
            BlockCommand::Move => BlockPat::Move,
            BlockCommand::Resize => BlockPat::Resize,
            BlockCommand::Place => BlockPat::Place,
            BlockCommand::Select => BlockPat::Select,
            BlockCommand::Sync => BlockPat::Sync,
        };
        vec![pid]
    }
}

/// Optional fields shared by `add` and `mod`.
#[derive(Debug, Default)]
struct BlockFields<'a> {
    time: Option<ClockTime>,
    minutes: Option<i64>,
    date: Option<Date>,
    description: Option<&'a String>,
    status: Option<BlockStatus>,
    priority: Option<Priority>,
    category: Option<&'a Category>,
    tags: Vec<String>,
}

impl<'a> BlockFields<'a> {
    fn read(ix: &mut ColumnIndexer<'a>) -> Self {
        let time = ix.next_opt::<TimeArg>();
        let minutes = ix.next_opt::<IntArg>();
        let date = ix.next_opt::<DateArg>();
        let description = ix.next_opt::<NameArg>();
        let status = ix.next_opt::<StatusArg>();
        let priority = ix.next_opt::<PriorityArg>();
        let category = ix.next_opt::<CategoryArg>();
        let mut tags: Vec<String> = Vec::new();
        for tag in ix.take_all::<TagArg>() {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        Self {
            time,
            minutes,
            date,
            description,
            status,
            priority,
            category,
            tags,
        }
    }

    fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.minutes.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.tags.is_empty()
    }
}

/// Turns matched arguments into drafts, replacement blocks and pointer
/// targets.
pub struct BlockBuilder;

impl BlockBuilder {
    /// `default_date` fills a missing date, `default_minutes` a missing
    /// duration.
    pub fn create(
        &self,
        args: &[Arg],
        default_date: NaiveDate,
        default_minutes: i64,
    ) -> Result<TimeBlockDraft> {
        let pattern = BlockPat::Add.pattern();
        let mut ix = ColumnIndexer::new(args, &pattern);
        let title = ix.next::<NameArg>()?;
        let fields = BlockFields::read(&mut ix);
        let time = fields
            .time
            .ok_or_else(|| Error::Parse("A start time is required.".into()))?;
        let date = fields.date.map(|d| d.0).unwrap_or(default_date);

        let mut draft = TimeBlockDraft::new(
            title.trim(),
            date.and_time(time.0),
            fields.minutes.unwrap_or(default_minutes),
        )
        .with_description(fields.description.cloned())
        .with_tags(fields.tags);
        if let Some(status) = fields.status {
            draft = draft.with_status(status);
        }
        if let Some(priority) = fields.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(category) = fields.category {
            draft = draft.with_category(category.clone());
        }
        draft.validate()?;
        Ok(draft)
    }

    /// Full replacement for `existing`; fields left out keep their value.
    pub fn modify(&self, existing: &TimeBlock, args: &[Arg]) -> Result<TimeBlock> {
        let pattern = BlockPat::Modify.pattern();
        let mut ix = ColumnIndexer::new(args, &pattern);
        ix.next::<IntArg>()?;
        let title = ix.next_opt::<NameArg>();
        let fields = BlockFields::read(&mut ix);
        if title.is_none() && fields.is_empty() {
            return Err(Error::Parse(format!(
                "Nothing to modify.\nUsage: {} {}",
                BlockCommand::Modify,
                BlockPat::Modify
            )));
        }

        let date = fields
            .date
            .map(|d| d.0)
            .unwrap_or(existing.start_time.date());
        let time = fields
            .time
            .map(|t| t.0)
            .unwrap_or(existing.start_time.time());
        let start = date.and_time(time);
        let minutes = fields
            .minutes
            .unwrap_or_else(|| existing.duration_minutes());
        check_duration(minutes)?;

        let mut updated = existing.with_times(start, checked_end(start, minutes)?);
        if let Some(title) = title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = fields.description {
            updated.description = Some(description.clone());
        }
        if let Some(status) = fields.status {
            updated.status = status;
        }
        if let Some(priority) = fields.priority {
            updated.priority = priority;
        }
        if let Some(category) = fields.category {
            updated = updated.with_category(category.clone());
        }
        if !fields.tags.is_empty() {
            updated.tags = fields.tags;
        }
        updated.validate()?;
        Ok(updated)
    }

    pub fn block_id(&self, args: &[Arg], idx: usize) -> Result<BlockId> {
        let raw = extract_at::<IntArg>(args, idx)?;
        u32::try_from(raw)
            .map(BlockId)
            .map_err(|_| Error::Parse(format!("Invalid block id: {raw}")))
    }

    /// `<hour> <offsetPx> [date]` starting at `idx`. `None` is a release
    /// outside the grid.
    pub fn drop_target(
        &self,
        args: &[Arg],
        idx: usize,
        default_date: NaiveDate,
    ) -> Result<Option<DropTarget>> {
        let hour = extract_at::<IntArg>(args, idx)?;
        let offset = extract_at::<NumberArg>(args, idx + 1)?;
        let date = match args.get(idx + 2) {
            Some(_) => extract_at::<DateArg>(args, idx + 2)?.0,
            None => default_date,
        };
        Ok(grid_hour(hour).map(|hour| DropTarget::new(hour, offset, date)))
    }

    pub fn resize_frames(&self, args: &[Arg]) -> Result<(ResizeEdge, Vec<f64>)> {
        let edge = extract_at::<EdgeArg>(args, 1)?;
        let deltas = extract_all::<NumberArg>(&args[2.min(args.len())..]);
        if deltas.is_empty() {
            return Err(Error::Parse("At least one pointer delta is required.".into()));
        }
        Ok((edge, deltas))
    }
}

/// Checks block command args against their pattern, then builds.
pub struct BlockSpec {
    schema: BlockArgSchema,
    builder: BlockBuilder,
}

impl Default for BlockSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockSpec {
    pub fn new() -> Self {
        Self {
            schema: BlockArgSchema,
            builder: BlockBuilder,
        }
    }

    pub fn arg_schema(&self) -> &BlockArgSchema {
        &self.schema
    }

    pub fn builder(&self) -> &BlockBuilder {
        &self.builder
    }

    pub fn check(&self, ctx: &AppContext, args: &[Arg], command: BlockCommand) -> Result<BlockPat> {
        self.schema.assert_matches_pattern(ctx, args, command)
    }

    pub fn create(&self, ctx: &AppContext, args: &[Arg]) -> Result<TimeBlockDraft> {
        self.check(ctx, args, BlockCommand::Add)?;
        self.builder.create(
            args,
            ctx.view.current_date(),
            ctx.config.default_duration(),
        )
    }

    pub fn modify(&self, ctx: &AppContext, args: &[Arg]) -> Result<TimeBlock> {
        self.check(ctx, args, BlockCommand::Modify)?;
        let id = self.builder.block_id(args, 0)?;
        let existing = ctx.store.require(id)?;
        self.builder.modify(existing, args)
    }
}
