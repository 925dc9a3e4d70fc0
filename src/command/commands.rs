use crate::arg::arg_extractor::{extract_all, extract_at};
use crate::arg::args::{Arg, CategoryArg, DateArg, StatusArg, TagArg, ViewArg};
use crate::command::block_spec::block::BlockSpec;
use crate::command::block_spec::core::ArgSchema;
use crate::command::manual::ManualCatalog;
use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy, HelpAtIdx, NoArgs};
use crate::config::ConfigKey;
use crate::core::context::AppContext;
use crate::core::models::{DateRange, FilterPatch};
use crate::core::persist::{load_state, save_state};
use crate::core::store::Sort;
use crate::core::types::{BlockCommand, ViewCommand};
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use crate::scheduler::InteractionManager;
use crate::scheduler::analytics::AnalyticsReport;
use crate::scheduler::pointer::DropOutcome;
use crate::scheduler::slots::DaySlots;
use crate::sync::SyncError;
use crate::sync::event_mapper::encode_block_event;
use crate::ui::display_data::GridFrame;
use crate::ui::display_manager::DisplayManager;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct CommandCore<'a> {
    pub args: &'a [Arg],
    pub flag_policy: FlagPolicy,
}

impl<'a> CommandCore<'a> {
    pub fn new(args: &'a [Arg], flag_policy: FlagPolicy) -> Self {
        Self { args, flag_policy }
    }

    fn help_only(args: &'a [Arg]) -> Self {
        Self::new(args, FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]))
    }

    fn help_or_nothing(args: &'a [Arg]) -> Self {
        Self::new(
            args,
            FlagPolicy::new(vec![Box::new(HelpAtIdx(0)), Box::new(NoArgs)]),
        )
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => {
                ctx.logger.info(self.usage(), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Continue => self.perform(ctx),
            FlagDecision::Error(e) => Err(e),
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

macro_rules! impl_sealed {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'a> sealed::Sealed<'a> for $ty<'a> {
                fn core(&self) -> &CommandCore<'a> {
                    &self.core
                }
            }
        )*
    };
}

impl_sealed!(
    BlockActionCommand,
    ViewNavCommand,
    SlotsCommand,
    StatsCommand,
    FilterCommand,
    ConfigCommand,
    LogCommand,
    ManCommand,
    SaveCommand,
    ReadCommand,
    TypeHelpCommand,
);

// ---------- blocks ----------

pub struct BlockActionCommand<'a> {
    core: CommandCore<'a>,
    action: BlockCommand,
    spec: BlockSpec,
}

impl<'a> BlockActionCommand<'a> {
    pub fn new(action: BlockCommand, args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
            action,
            spec: BlockSpec::new(),
        }
    }

    fn args(&self) -> &'a [Arg] {
        self.core.args
    }

    fn handle_add(&self, ctx: &mut AppContext) -> Result<()> {
        if self.args().is_empty() {
            let blocks = ctx.store.query().order(Sort::StartAsc).collect();
            DisplayManager::new().display_blocks("Blocks", &blocks, ctx.store.selected_id());
            return Ok(());
        }
        let draft = self.spec.create(ctx, self.args())?;
        let stored = ctx.store.add(draft)?;
        let msg = format!("Added block with id {}: {}", stored.id, stored);
        ctx.logger.info(msg, LogTarget::ConsoleAndFile);
        Ok(())
    }

    fn handle_modify(&self, ctx: &mut AppContext) -> Result<()> {
        let updated = self.spec.modify(ctx, self.args())?;
        let msg = format!("Modified block with id {}: {}", updated.id, updated);
        if !ctx.store.update(updated) {
            return Err(Error::Domain(msg));
        }
        ctx.logger.info(msg, LogTarget::ConsoleAndFile);
        Ok(())
    }

    fn handle_delete(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        let id = self.spec.builder().block_id(self.args(), 0)?;
        if ctx.store.remove(id) {
            ctx.logger.info(
                format!("Deleted block with id {id}."),
                LogTarget::ConsoleAndFile,
            );
        }
        Ok(())
    }

    fn handle_move(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        let builder = self.spec.builder();
        let id = builder.block_id(self.args(), 0)?;
        let target = builder.drop_target(self.args(), 1, ctx.view.current_date())?;
        let logger = ctx.logger.clone();
        match InteractionManager::new(ctx).move_block(id, target)? {
            DropOutcome::Moved(block) => logger.info(
                format!("Moved block with id {}: {}", block.id, block),
                LogTarget::ConsoleOnly,
            ),
            DropOutcome::NoTarget => logger.warn(
                format!("Block with id {id} dropped with no valid target; nothing changed."),
                LogTarget::ConsoleOnly,
            ),
        }
        Ok(())
    }

    fn handle_resize(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        let builder = self.spec.builder();
        let id = builder.block_id(self.args(), 0)?;
        let (edge, frames) = builder.resize_frames(self.args())?;
        let logger = ctx.logger.clone();
        let summary = InteractionManager::new(ctx).resize(id, edge, &frames)?;
        for reason in &summary.rejected {
            logger.warn(format!("Frame ignored: {reason}"), LogTarget::ConsoleOnly);
        }
        let shape = summary
            .block
            .map(|b| b.to_string())
            .unwrap_or_else(|| "block no longer exists".into());
        logger.info(
            format!(
                "Resized block with id {id} ({} of {} frames applied): {shape}",
                summary.applied,
                frames.len()
            ),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn handle_place(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        let target = self
            .spec
            .builder()
            .drop_target(self.args(), 0, ctx.view.current_date())?;
        let placed = match target {
            Some(target) => InteractionManager::new(ctx).place(target)?,
            None => None,
        };
        match placed.and_then(|id| ctx.store.get(id)) {
            Some(block) => ctx.logger.info(
                format!("Added block with id {}: {}", block.id, block),
                LogTarget::ConsoleAndFile,
            ),
            None => ctx
                .logger
                .warn("Click is outside the grid; nothing placed.", LogTarget::ConsoleOnly),
        }
        Ok(())
    }

    fn handle_select(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        if self.args().is_empty() {
            ctx.store.set_selected(None);
            ctx.logger.info("Selection cleared.", LogTarget::ConsoleOnly);
            return Ok(());
        }
        let id = self.spec.builder().block_id(self.args(), 0)?;
        ctx.store.set_selected(Some(id));
        ctx.logger
            .info(format!("Selected block with id {id}."), LogTarget::ConsoleOnly);
        Ok(())
    }

    fn handle_sync(&self, ctx: &mut AppContext) -> Result<()> {
        self.spec.check(ctx, self.args(), self.action)?;
        let id = self.spec.builder().block_id(self.args(), 0)?;
        let block = ctx.store.require(id)?.clone();
        if !ctx.calendar.is_authorized() {
            return Err(SyncError::NotAuthorized.into());
        }
        let event = encode_block_event(&block)?;
        let remote_id = ctx.calendar.push(&event)?;
        ctx.logger.info(
            format!("Synced block with id {id} (event {remote_id})."),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

impl<'a> Command<'a> for BlockActionCommand<'a> {
    fn usage(&self) -> String {
        self.spec
            .arg_schema()
            .patterns_for(self.action)
            .iter()
            .map(|pid| format!("Usage: {} {}", self.action, pid))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match self.action {
            BlockCommand::Add => self.handle_add(ctx),
            BlockCommand::Modify => self.handle_modify(ctx),
            BlockCommand::Delete => self.handle_delete(ctx),
            BlockCommand::Move => self.handle_move(ctx),
            BlockCommand::Resize => self.handle_resize(ctx),
            BlockCommand::Place => self.handle_place(ctx),
            BlockCommand::Select => self.handle_select(ctx),
            BlockCommand::Sync => self.handle_sync(ctx),
        }
    }
}

// ---------- views ----------

pub struct ViewNavCommand<'a> {
    core: CommandCore<'a>,
    command: ViewCommand,
}

impl<'a> ViewNavCommand<'a> {
    pub fn new(command: ViewCommand, args: &'a [Arg]) -> Self {
        let core = match command {
            ViewCommand::View | ViewCommand::Pick => CommandCore::help_only(args),
            _ => CommandCore::help_or_nothing(args),
        };
        Self { core, command }
    }

    fn announce(&self, ctx: &AppContext) {
        ctx.logger.info(
            format!("[{}] {}", ctx.view.current_view(), ctx.view.label()),
            LogTarget::ConsoleOnly,
        );
    }

    fn show(&self, ctx: &mut AppContext) {
        let now = ctx.now();
        ctx.marker.refresh(now);
        let frame = GridFrame {
            view: &ctx.view,
            blocks: ctx.store.visible(),
            selected: ctx.store.selected_id(),
            marker: &ctx.marker,
            scale: ctx.pointer.scale(),
            today: now.date(),
        };
        DisplayManager::new().display_view(&frame);
    }
}

impl<'a> Command<'a> for ViewNavCommand<'a> {
    fn usage(&self) -> String {
        match self.command {
            ViewCommand::View => "view [day|week|month]   # Show or switch the calendar view",
            ViewCommand::Next => "next   # Step the focus date forward one day, week or month",
            ViewCommand::Prev => "prev   # Step the focus date back one day, week or month",
            ViewCommand::Today => "today   # Jump back to today",
            ViewCommand::Pick => "pick <date>   # Open a day (switches month view to day view)",
            ViewCommand::Show => "show   # Draw the current view with visible blocks",
        }
        .into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let args = self.core.args;
        match self.command {
            ViewCommand::View => {
                match args.len() {
                    0 => {}
                    1 => ctx.view.set_view(extract_at::<ViewArg>(args, 0)?),
                    _ => return Err(Error::parse(format!("Too many arguments.\n{}", self.usage()))),
                }
                self.announce(ctx);
            }
            ViewCommand::Next => {
                ctx.view.next();
                self.announce(ctx);
            }
            ViewCommand::Prev => {
                ctx.view.prev();
                self.announce(ctx);
            }
            ViewCommand::Today => {
                let today = ctx.today();
                ctx.view.today(today);
                self.announce(ctx);
            }
            ViewCommand::Pick => {
                if args.len() != 1 {
                    return Err(Error::parse(format!("Expected one date.\n{}", self.usage())));
                }
                let date = extract_at::<DateArg>(args, 0)?;
                if ctx.view.select_day(date.0) {
                    ctx.logger
                        .info("Switched to day view.", LogTarget::ConsoleOnly);
                }
                self.announce(ctx);
            }
            ViewCommand::Show => self.show(ctx),
        }
        Ok(())
    }
}

// ---------- slots & stats ----------

pub struct SlotsCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> SlotsCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }
}

impl<'a> Command<'a> for SlotsCommand<'a> {
    fn usage(&self) -> String {
        "slots [date]   # List the 30-minute slots of a day and which are free".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let date = match self.core.args {
            [] => ctx.view.current_date(),
            [_] => extract_at::<DateArg>(self.core.args, 0)?.0,
            _ => return Err(Error::parse(format!("Too many arguments.\n{}", self.usage()))),
        };
        let slots = DaySlots::new(ctx.store.blocks(), date);
        DisplayManager::new().display_slots(&slots);
        Ok(())
    }
}

pub struct StatsCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> StatsCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_or_nothing(args),
        }
    }
}

impl<'a> Command<'a> for StatsCommand<'a> {
    fn usage(&self) -> String {
        "stats   # Totals, completion rate and status/priority breakdown".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let report =
            AnalyticsReport::build(ctx.store.blocks(), ctx.today(), ctx.config.week_start());
        DisplayManager::new().display_stats(&report);
        Ok(())
    }
}

// ---------- filter ----------

pub struct FilterCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> FilterCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }

    fn patch(&self) -> Result<FilterPatch> {
        let args = self.core.args;
        if let Some(other) = args.iter().find(|a| {
            !matches!(
                a,
                Arg::Status(_) | Arg::Category(_) | Arg::Tag(_) | Arg::Date(_)
            )
        }) {
            return Err(Error::parse(format!(
                "Unexpected filter argument: {other}.\n{}",
                self.usage()
            )));
        }

        let statuses: Vec<_> = extract_all::<StatusArg>(args);
        let categories: BTreeSet<_> = extract_all::<CategoryArg>(args).into_iter().cloned().collect();
        let tags: BTreeSet<_> = extract_all::<TagArg>(args).into_iter().cloned().collect();
        let dates = extract_all::<DateArg>(args);

        let date_range = match dates.as_slice() {
            [] => None,
            [from, to] => Some(Some(DateRange::new(from.0, to.0)?)),
            _ => {
                return Err(Error::parse(format!(
                    "A date range needs both <from> and <to>.\n{}",
                    self.usage()
                )));
            }
        };

        Ok(FilterPatch {
            categories: (!categories.is_empty()).then_some(categories),
            date_range,
            statuses: (!statuses.is_empty()).then_some(statuses),
            tags: (!tags.is_empty()).then_some(tags),
        })
    }

    fn report(&self, ctx: &AppContext) {
        ctx.logger.info(
            format!(
                "Filter: {} ({} of {} blocks visible)",
                ctx.store.filter(),
                ctx.store.visible().len(),
                ctx.store.len()
            ),
            LogTarget::ConsoleOnly,
        );
    }
}

impl<'a> Command<'a> for FilterCommand<'a> {
    fn usage(&self) -> String {
        "filter [status...] [#category...] [+tag...] [<from> <to>] | filter reset   # Narrow the visible blocks".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match self.core.args {
            [] => {}
            [Arg::Word(w)] if w.eq_ignore_ascii_case("reset") => {
                ctx.store.reset_filter();
                ctx.logger.debug("Filter reset", LogTarget::FileOnly);
            }
            _ => {
                let patch = self.patch()?;
                ctx.store.update_filter(patch);
                ctx.logger.debug(
                    format!("Filter updated: {}", ctx.store.filter()),
                    LogTarget::FileOnly,
                );
            }
        }
        self.report(ctx);
        Ok(())
    }
}

// ---------- config ----------

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }

    fn key_of(&self, ctx: &AppContext, raw: &str) -> Result<ConfigKey> {
        match raw.parse::<usize>() {
            Ok(index) => {
                let rows = ctx.config.rows();
                let (name, _, _) = rows
                    .get(index)
                    .ok_or_else(|| Error::parse(format!("Invalid ID: {index}")))?;
                ConfigKey::try_from(name)
            }
            Err(_) => ConfigKey::try_from(raw),
        }
    }
}

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        "config [KEY|ID [value]]   # List, show or change configuration items".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let display = DisplayManager::new();
        match self.core.args {
            [] => display.display_config(&ctx.config),
            [Arg::Name(key)] => {
                let key = self.key_of(ctx, key)?;
                display.display_config_item(&ctx.config, key);
            }
            [Arg::Name(key), Arg::Name(value)] => {
                let key = self.key_of(ctx, key)?;
                ctx.config.set_key(key, value)?;
                ctx.apply_config()?;
                if let Some((key, old, new)) = ctx.config.take_last_change() {
                    ctx.logger.info(
                        format!("Config {key} changed from {old} to {new}"),
                        LogTarget::ConsoleAndFile,
                    );
                }
            }
            _ => return Err(Error::parse(format!("Unexpected arguments.\n{}", self.usage()))),
        }
        Ok(())
    }
}

// ---------- session ----------

pub struct LogCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> LogCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_or_nothing(args),
        }
    }
}

impl<'a> Command<'a> for LogCommand<'a> {
    fn usage(&self) -> String {
        "log   # Print the current session log".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match ctx.logger.log_path() {
            None => println!("No logs"),
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(contents) => print!("{contents}"),
                Err(err) => eprintln!("Unable to read log file: {err}"),
            },
        }
        Ok(())
    }
}

pub struct ManCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ManCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }

    fn topic_arg(&self) -> Result<Option<String>> {
        match self.core.args {
            [] => Ok(None),
            [Arg::Name(name)] => Ok(Some(name.clone())),
            [other] => Err(Error::parse(format!(
                "Unsupported manual topic: {other}. Usage: man [topic]"
            ))),
            _ => Err(Error::parse("Expected at most one topic. Usage: man [topic]")),
        }
    }
}

impl<'a> Command<'a> for ManCommand<'a> {
    fn usage(&self) -> String {
        "man [topic]   # Show manual pages".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let topic = self.topic_arg()?;
        let page = ManualCatalog::new().page_for(topic.as_deref())?;
        ctx.logger.info(page.render(), LogTarget::ConsoleOnly);
        Ok(())
    }
}

fn file_name_arg(args: &[Arg], usage: &str) -> Result<String> {
    match args {
        [Arg::Name(n)] | [Arg::Word(n)] if !n.trim().is_empty() => Ok(n.trim().to_string()),
        _ => Err(Error::parse(format!("Expected a file name.\nUsage: {usage}"))),
    }
}

pub struct SaveCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> SaveCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }
}

impl<'a> Command<'a> for SaveCommand<'a> {
    fn usage(&self) -> String {
        "save \"<name>\"   # Save every block to saves/<name>.json".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let name = file_name_arg(self.core.args, "save \"<name>\"")?;
        let name = name.strip_suffix(".json").unwrap_or(&name);
        let saved = save_state(&ctx.store, &ctx.save_path(name))?;
        ctx.logger.info(
            format!("Saved {} blocks to {}", ctx.store.len(), saved.display()),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

pub struct ReadCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ReadCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::help_only(args),
        }
    }
}

impl<'a> Command<'a> for ReadCommand<'a> {
    fn usage(&self) -> String {
        "read \"<name|path>\"   # Replace all blocks with a saved file".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let name = file_name_arg(self.core.args, "read \"<name|path>\"")?;
        let candidate = PathBuf::from(&name);
        let path = if candidate.components().count() == 1 {
            let mut path = ctx.saves_dir.join(candidate);
            if path.extension().is_none() {
                path.set_extension("json");
            }
            path
        } else {
            candidate
        };

        let count = load_state(&mut ctx.store, &path)?;
        ctx.logger.info(
            format!("Loaded {count} blocks from {}", path.display()),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

pub struct TypeHelpCommand<'a> {
    core: CommandCore<'a>,
    command_type: crate::core::types::TypeHelpCommand,
}

impl<'a> TypeHelpCommand<'a> {
    pub fn new(args: &'a [Arg], command_type: crate::core::types::TypeHelpCommand) -> Self {
        Self {
            core: CommandCore::help_only(args),
            command_type,
        }
    }
}

impl<'a> Command<'a> for TypeHelpCommand<'a> {
    fn usage(&self) -> String {
        self.command_type.usage()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        ctx.logger
            .info(self.command_type.usage(), LogTarget::ConsoleOnly);
        Ok(())
    }
}
