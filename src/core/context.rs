use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::store::TimeBlockStore;
use crate::errors::Result;
use crate::logging::Logger;
use crate::scheduler::calendar_view::{CurrentTimeMarker, ViewState};
use crate::scheduler::pointer::PointerEngine;
use crate::sync::{CalendarSync, OutboxCalendar};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;

/// Everything one session owns.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub store: TimeBlockStore,
    pub view: ViewState,
    pub pointer: PointerEngine,
    pub marker: CurrentTimeMarker,
    pub calendar: Box<dyn CalendarSync>,
    pub logger: Logger,
    pub startup_displayed: bool,
    pub config_path: PathBuf,
    pub saves_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(paths: &CliPaths) -> Result<Self> {
        let config = Config::load_from(&paths.config_path)?;

        let logger = Logger::new();
        logger.set_log_dir(&paths.logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());
        logger.set_min_level(config.log_level());

        let now = Local::now().naive_local();
        let view = ViewState::new(config.default_view(), now.date(), config.week_start());
        let pointer = PointerEngine::new(config.grid_scale(), config.drop_date_policy());

        Ok(Self {
            config,
            store: TimeBlockStore::new(),
            view,
            pointer,
            marker: CurrentTimeMarker::new(now),
            calendar: Box::new(OutboxCalendar::new(&paths.outbox_path)),
            logger,
            startup_displayed: false,
            config_path: paths.config_path.clone(),
            saves_dir: paths.saves_dir.clone(),
            logs_dir: paths.logs_dir.clone(),
        })
    }

    pub fn with_calendar(mut self, calendar: Box<dyn CalendarSync>) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Push config-derived settings into the session after an edit.
    pub fn apply_config(&mut self) -> Result<()> {
        self.logger
            .set_file_logging_enabled(self.config.file_logging_enabled());
        self.logger.set_min_level(self.config.log_level());
        self.view.set_week_start(self.config.week_start());
        self.pointer
            .configure(self.config.grid_scale(), self.config.drop_date_policy())
    }

    pub fn save_path(&self, name: &str) -> PathBuf {
        self.saves_dir.join(format!("{name}.json"))
    }
}
