use crate::config::{Config, ConfigKey};
use crate::core::models::{BlockId, TimeBlock};
use crate::core::types::ViewKind;
use crate::scheduler::analytics::AnalyticsReport;
use crate::scheduler::slots::DaySlots;
use crate::ui::ansi::{FG_RED, STYLE_RESET};
use crate::ui::display_data::{DisplayDataBuilder, GridFrame, ScheduleSection};
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;
use std::io;
use std::io::Write;

const BLOCK_HEADERS: [&str; 9] = [
    "ID", "TITLE", "DATE", "TIME", "MINS", "STATUS", "PRIORITY", "CATEGORY", "TAGS",
];
const GRID_HEADERS: [&str; 6] = ["ID", "TIME", "TITLE", "STATUS", "TOP", "HEIGHT"];
const CONFIG_HEADERS: [&str; 4] = ["ID", "KEY", "DESCRIPTION", "VALUE"];

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            printer: TablePrinter::new(),
            util: WidthUtil::default(),
            data: DisplayDataBuilder::new(),
        }
    }

    // ---------- config ----------

    pub fn render_config<W: Write>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let rows: Vec<Vec<String>> = config
            .rows()
            .iter()
            .enumerate()
            .map(|(i, (k, d, v))| vec![i.to_string(), k.clone(), d.clone(), v.clone()])
            .collect();

        self.printer.render_table(
            "Config",
            &CONFIG_HEADERS,
            &rows,
            Some("No config items found."),
            None,
            out,
        )
    }

    pub fn display_config(&self, config: &Config) {
        let _ = self.render_config(config, &mut io::stdout());
    }

    pub fn render_config_item<W: Write>(
        &self,
        config: &Config,
        key: ConfigKey,
        out: &mut W,
    ) -> io::Result<()> {
        let name = key.to_string();
        let rows: Vec<Vec<String>> = config
            .rows()
            .iter()
            .filter(|(k, _, _)| *k == name)
            .map(|(k, d, v)| vec![k.clone(), d.clone(), v.clone()])
            .collect();
        self.printer
            .render_table(&name, &["KEY", "DESCRIPTION", "VALUE"], &rows, None, None, out)
    }

    pub fn display_config_item(&self, config: &Config, key: ConfigKey) {
        let _ = self.render_config_item(config, key, &mut io::stdout());
    }

    // ---------- blocks ----------

    pub fn render_blocks<W: Write>(
        &self,
        title: &str,
        blocks: &[&TimeBlock],
        selected: Option<BlockId>,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.block_rows(blocks, selected);
        self.printer.render_table(
            title,
            &BLOCK_HEADERS,
            &rows,
            Some("No blocks to show."),
            None,
            out,
        )
    }

    pub fn display_blocks(&self, title: &str, blocks: &[&TimeBlock], selected: Option<BlockId>) {
        let _ = self.render_blocks(title, blocks, selected, &mut io::stdout());
    }

    // ---------- calendar views ----------

    pub fn render_view<W: Write>(&self, frame: &GridFrame<'_>, out: &mut W) -> io::Result<()> {
        let label = frame.view.label();
        match frame.view.current_view() {
            ViewKind::Day | ViewKind::Week => {
                let days = frame.view.visible_days();
                let sections = self.data.day_sections(&days, frame);
                self.render_sections(&label, &sections, out)
            }
            ViewKind::Month => self.render_month(&label, frame, out),
        }
    }

    pub fn display_view(&self, frame: &GridFrame<'_>) {
        let _ = self.render_view(frame, &mut io::stdout());
    }

    fn render_sections<W: Write>(
        &self,
        label: &str,
        sections: &[ScheduleSection],
        out: &mut W,
    ) -> io::Result<()> {
        let empty_msg = "No blocks scheduled.";
        let max_width = self.sections_max_width(label, sections, empty_msg);

        self.printer.render_banner(label, max_width, out)?;
        for s in sections {
            let empty = s.rows.is_empty().then_some(empty_msg);
            self.printer.render_table(
                &s.title,
                &GRID_HEADERS,
                &s.rows,
                empty,
                Some(max_width),
                out,
            )?;
            if let Some(marker) = &s.marker {
                writeln!(out, "{FG_RED}{marker}{STYLE_RESET}")?;
            }
        }
        Ok(())
    }

    fn render_month<W: Write>(
        &self,
        label: &str,
        frame: &GridFrame<'_>,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = self.data.weekday_headers(frame.view.week_start());
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let rows = self.data.month_rows(frame);
        self.printer
            .render_table(label, &header_refs, &rows, None, None, out)?;
        writeln!(
            out,
            "day(count): blocks that day  [ ]: selected  *: today. Use 'pick <date>' to open a day."
        )
    }

    fn sections_max_width(
        &self,
        label: &str,
        sections: &[ScheduleSection],
        empty_msg: &str,
    ) -> usize {
        let mut max_width = self.util.visible_width(label);
        for s in sections {
            let table_w = self.printer.compute_table_width(&GRID_HEADERS, &s.rows);
            let title_w = self.util.visible_width(&s.title);
            let empty_w = if s.rows.is_empty() {
                self.util.visible_width(empty_msg)
            } else {
                0
            };
            max_width = max_width.max(table_w.max(title_w).max(empty_w));
        }
        max_width
    }

    // ---------- slots & stats ----------

    pub fn render_slots<W: Write>(&self, slots: &DaySlots<'_>, out: &mut W) -> io::Result<()> {
        let rows = self.data.slot_rows(slots);
        let title = format!(
            "Slots {} ({} of {} free)",
            slots.date().format("%Y-%m-%d"),
            slots.available_count(),
            rows.len()
        );
        self.printer
            .render_table(&title, &["SLOT", "STATE", "BLOCKS"], &rows, None, None, out)
    }

    pub fn display_slots(&self, slots: &DaySlots<'_>) {
        let _ = self.render_slots(slots, &mut io::stdout());
    }

    pub fn render_stats<W: Write>(&self, report: &AnalyticsReport, out: &mut W) -> io::Result<()> {
        let summary = self.data.stats_rows(report);
        let statuses = self.data.status_rows(&report.statuses);
        let priorities = self.data.priority_rows(&report.priorities);

        let dist_headers = ["KEY", "COUNT", "SHARE", ""];
        let width = self
            .printer
            .compute_table_width(&["METRIC", "VALUE"], &summary)
            .max(self.printer.compute_table_width(&dist_headers, &statuses))
            .max(self.printer.compute_table_width(&dist_headers, &priorities));

        self.printer.render_table(
            "Statistics",
            &["METRIC", "VALUE"],
            &summary,
            None,
            Some(width),
            out,
        )?;
        self.printer
            .render_table("By status", &dist_headers, &statuses, None, Some(width), out)?;
        self.printer.render_table(
            "By priority",
            &dist_headers,
            &priorities,
            None,
            Some(width),
            out,
        )
    }

    pub fn display_stats(&self, report: &AnalyticsReport) {
        let _ = self.render_stats(report, &mut io::stdout());
    }
}
