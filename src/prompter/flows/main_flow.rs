use crate::arg::arg_parse_strategy::CommandArgParser;
use crate::command::command_parser::CommandParser;
use crate::command::manual::ManualCatalog;
use crate::core::context::AppContext;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::prompter::models::{Flow, FlowCtrl};
use crate::ui::ansi::{FG_LIGHT_GRAY, STYLE_RESET};
use crate::ui::chrome::UiChrome;

/// The command shell: one command line per input.
pub struct MainFlow<'a> {
    ctx: &'a mut AppContext,
    arg_parser: CommandArgParser,
    command_parser: CommandParser,
    chrome: UiChrome,
    logger: Logger,
}

/// Where a command line gave up.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Arguments,
    Resolution,
    Execution,
}

/// A command line split into its verb and raw words.
struct InputLine<'l> {
    text: &'l str,
    verb: &'l str,
    words: Vec<String>,
}

impl<'l> InputLine<'l> {
    fn split(text: &'l str) -> Self {
        let mut parts = text.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        Self {
            text,
            verb,
            words: parts.map(str::to_string).collect(),
        }
    }

    fn headline(&self, stage: Stage) -> String {
        match stage {
            Stage::Arguments => format!("Argument parsing failed for '{}'.", self.text),
            Stage::Resolution => format!("Command resolution failed for '{}'.", self.verb),
            Stage::Execution => format!("Command execution failed for '{}'.", self.verb),
        }
    }
}

impl<'a> MainFlow<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let logger = ctx.logger.clone();
        Self {
            ctx,
            arg_parser: CommandArgParser::new(),
            command_parser: CommandParser::new(),
            chrome: UiChrome::new(),
            logger,
        }
    }

    fn print_startup(&mut self) {
        if self.ctx.startup_displayed {
            return;
        }
        self.chrome.print_banner();
        println!();
        println!("Use 'man <topic>' for command-specific details, 'exit' to quit.");
        println!("Available topics: {}", ManualCatalog::new().topics().join(", "));
        println!();
        for (label, path) in [
            ("Config", &self.ctx.config_path),
            ("Saves", &self.ctx.saves_dir),
            ("Logs", &self.ctx.logs_dir),
        ] {
            println!("{label} path: {}", path.display());
        }
        println!();
        self.ctx.startup_displayed = true;
    }

    fn print_status(&mut self) {
        let now = self.ctx.now();
        self.ctx.marker.refresh(now);
        let line = self.chrome.format_status_line(
            self.ctx.view.current_view(),
            &self.ctx.view.label(),
            &self.ctx.marker.label(),
            self.ctx.store.selected(),
        );
        println!("{FG_LIGHT_GRAY}{line}{STYLE_RESET}");
    }

    /// Parse, resolve and run one line. Failures are reported, never raised.
    fn dispatch(&mut self, line: &InputLine<'_>) {
        let args = match self.arg_parser.parse(line.verb, &line.words) {
            Ok(args) => args,
            Err(err) => return self.report(line, Stage::Arguments, &err),
        };
        let cmd = match self.command_parser.parse(line.verb, &args) {
            Ok(cmd) => cmd,
            Err(err) => return self.report(line, Stage::Resolution, &err),
        };
        // `log` edits the log itself; recording it would be noise.
        if !line.verb.eq_ignore_ascii_case("log") {
            self.logger
                .info(format!("Command run: {}", line.text), LogTarget::FileOnly);
        }
        if let Err(err) = cmd.execute(&mut *self.ctx) {
            self.report(line, Stage::Execution, &err);
        }
    }

    /// Usage blocks go to the console only; the log file keeps the first line.
    fn report(&self, line: &InputLine<'_>, stage: Stage, err: &Error) {
        let headline = line.headline(stage);
        let text = err.to_string();
        match text.split_once("\nUsage:") {
            Some((head, usage)) => {
                self.logger.error(
                    format!("{headline} {head}\nUsage:{usage}"),
                    LogTarget::ConsoleOnly,
                );
                self.logger
                    .error(format!("{headline} {}", head.trim()), LogTarget::FileOnly);
            }
            None => self
                .logger
                .error(format!("{headline} {text}"), LogTarget::ConsoleAndFile),
        }
    }
}

impl<'a> Flow for MainFlow<'a> {
    fn render(&mut self) -> Result<()> {
        self.print_startup();
        self.print_status();
        self.chrome.print_prompt("> ");
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        self.chrome.close_prompt();
        let line = InputLine::split(input.trim());
        if line.verb.is_empty() {
            return Ok(FlowCtrl::Continue);
        }
        if line.text.eq_ignore_ascii_case("exit") {
            return Ok(FlowCtrl::Finish);
        }
        self.dispatch(&line);
        Ok(FlowCtrl::Continue)
    }
}
