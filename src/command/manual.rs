use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display as DisplayDerive, EnumIter as EnumIterDerive, EnumString};

use crate::command::block_spec::block::BlockSpec;
use crate::command::block_spec::core::ArgSchema;
use crate::core::types::{BlockCommand, TypeHelpCommand};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, DisplayDerive, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ManualTopic {
    General,
    Add,
    #[strum(serialize = "mod", to_string = "mod")]
    Modify,
    #[strum(serialize = "del", to_string = "del")]
    Delete,
    Move,
    Resize,
    Place,
    Select,
    Sync,
    View,
    Filter,
    Slots,
    Stats,
    Config,
    Log,
    Save,
    Read,
    Man,
    Date,
    Time,
    Colors,
}

impl ManualTopic {
    pub fn try_from(input: &str) -> Result<Self> {
        Self::from_str(input.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unsupported manual topic: '{}'. Valid topics: {}",
                input.trim(),
                valid_csv::<ManualTopic>()
            ))
        })
    }

    fn block_command(self) -> Option<BlockCommand> {
        match self {
            ManualTopic::Add => Some(BlockCommand::Add),
            ManualTopic::Modify => Some(BlockCommand::Modify),
            ManualTopic::Delete => Some(BlockCommand::Delete),
            ManualTopic::Move => Some(BlockCommand::Move),
            ManualTopic::Resize => Some(BlockCommand::Resize),
            ManualTopic::Place => Some(BlockCommand::Place),
            ManualTopic::Select => Some(BlockCommand::Select),
            ManualTopic::Sync => Some(BlockCommand::Sync),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ManualSection {
    title: String,
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ManualPage {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPage {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_section(
            "NAME",
            &[format!("{} - {}", self.name, self.summary)],
            &mut out,
        );
        for section in &self.sections {
            self.write_section(&section.title, &section.body, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_section(&self, title: &str, lines: &[String], out: &mut String) {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        for line in lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

pub struct ManualPageBuilder {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPageBuilder {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, title: &str, body: Vec<String>) -> Self {
        self.sections.push(ManualSection {
            title: title.to_string(),
            body,
        });
        self
    }

    pub fn build(self) -> ManualPage {
        ManualPage {
            name: self.name,
            summary: self.summary,
            sections: self.sections,
        }
    }
}

#[derive(Default)]
pub struct ManualCatalog;

impl ManualCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn page_for(&self, topic: Option<&str>) -> Result<ManualPage> {
        let topic = match topic {
            None => ManualTopic::General,
            Some(name) => ManualTopic::try_from(name)?,
        };
        Ok(self.build_page(topic))
    }

    pub fn topics(&self) -> Vec<String> {
        ManualTopic::iter().map(|t| t.to_string()).collect()
    }

    fn build_page(&self, topic: ManualTopic) -> ManualPage {
        if let Some(command) = topic.block_command() {
            return self.block_page(command);
        }
        match topic {
            ManualTopic::View => self.simple_page(
                "view",
                "Navigate the day, week and month views.",
                vec![
                    "view [day|week|month]".to_string(),
                    "next | prev | today".to_string(),
                    "pick <date>".to_string(),
                    "show".to_string(),
                ],
                vec![
                    "next and prev step one day, week or month depending on the view.".to_string(),
                    "Month steps keep the day of month, clamped to the month's last day.".to_string(),
                    "pick in month view opens that day in day view.".to_string(),
                    "show draws the view with the filtered blocks and the current-time line."
                        .to_string(),
                ],
            ),
            ManualTopic::Filter => self.simple_page(
                "filter",
                "Choose which blocks the views show.",
                vec![
                    "filter [status...] [#category...] [+tag...] [<from> <to>]".to_string(),
                    "filter reset".to_string(),
                ],
                vec![
                    "Each kind given replaces that part of the filter; others are kept.".to_string(),
                    "Statuses default to pending and in-progress.".to_string(),
                    "A block passes when it matches every non-empty part.".to_string(),
                ],
            ),
            ManualTopic::Slots => self.simple_page(
                "slots",
                "Show the 48 half-hour slots of a day.",
                vec!["slots [date]".to_string()],
                vec![
                    "A slot is busy when a block lying entirely inside the day overlaps it."
                        .to_string(),
                    "Defaults to the day in view.".to_string(),
                ],
            ),
            ManualTopic::Stats => self.simple_page(
                "stats",
                "Summarize every block.",
                vec!["stats".to_string()],
                vec![
                    "Totals, completion rate, today's and this week's blocks.".to_string(),
                    "The week starts on WEEK_START.".to_string(),
                ],
            ),
            ManualTopic::Config => self.simple_page(
                "config",
                "View or edit configuration values.",
                vec!["config".to_string(), "config <KEY|ID> [value]".to_string()],
                vec![
                    "With no arguments lists every item.".to_string(),
                    "With a value, validates it and writes the config file.".to_string(),
                ],
            ),
            ManualTopic::Log => self.simple_page(
                "log",
                "Print the current session log to the console.",
                vec!["log".to_string()],
                vec![
                    "Shows the session log file contents if it exists.".to_string(),
                    "Does not create a log file when one is missing.".to_string(),
                ],
            ),
            ManualTopic::Save => self.simple_page(
                "save",
                "Save every block to a file.",
                vec!["save \"<name>\"".to_string()],
                vec!["Writes to <saves dir>/<name>.json.".to_string()],
            ),
            ManualTopic::Read => self.simple_page(
                "read",
                "Replace the blocks with a saved file.",
                vec!["read \"<name|path>\"".to_string()],
                vec![
                    "A bare name is looked up in the saves directory.".to_string(),
                    "Nothing changes unless every block in the file is valid.".to_string(),
                ],
            ),
            ManualTopic::Man => self.simple_page(
                "man",
                "Show manual pages for commands and topics.",
                vec!["man [topic]".to_string()],
                vec![
                    format!("Topics: {}", self.topics().join(", ")),
                    "Use 'man' with no topic for the general manual.".to_string(),
                ],
            ),
            ManualTopic::Date => self.type_help_page(TypeHelpCommand::Date),
            ManualTopic::Time => self.type_help_page(TypeHelpCommand::Time),
            ManualTopic::Colors => self.type_help_page(TypeHelpCommand::Colors),
            _ => self.general_page(),
        }
    }

    fn general_page(&self) -> ManualPage {
        ManualPageBuilder::new("blockgrid", "Time-block calendar in the terminal.")
            .section("SYNOPSIS", vec!["<command> [args]".to_string()])
            .section("COMMANDS", general_command_lines())
            .section(
                "TOPICS",
                vec![
                    "Use 'man <topic>' for command-specific details.".to_string(),
                    format!("Available topics: {}", self.topics().join(", ")),
                ],
            )
            .build()
    }

    fn simple_page(
        &self,
        name: &str,
        summary: &str,
        synopsis: Vec<String>,
        description: Vec<String>,
    ) -> ManualPage {
        ManualPageBuilder::new(name, summary)
            .section("SYNOPSIS", synopsis)
            .section("DESCRIPTION", description)
            .build()
    }

    fn type_help_page(&self, kind: TypeHelpCommand) -> ManualPage {
        ManualPageBuilder::new(kind.to_string(), "Type helper command.")
            .section("SYNOPSIS", vec![kind.to_string()])
            .section("DESCRIPTION", vec![kind.usage()])
            .build()
    }

    fn block_page(&self, command: BlockCommand) -> ManualPage {
        let spec = BlockSpec::new();
        let usage: Vec<String> = spec
            .arg_schema()
            .patterns_for(command)
            .into_iter()
            .flat_map(|pid| {
                let text = format!("{command} {pid}");
                text.lines().map(str::to_string).collect::<Vec<_>>()
            })
            .collect();

        ManualPageBuilder::new(command.to_string(), block_summary(command))
            .section("SYNOPSIS", usage)
            .section("SEE ALSO", vec!["view".to_string(), "filter".to_string()])
            .build()
    }
}

fn block_summary(command: BlockCommand) -> &'static str {
    match command {
        BlockCommand::Add => "Create a time block. With no arguments, list every block.",
        BlockCommand::Modify => "Edit fields of a block.",
        BlockCommand::Delete => "Delete a block.",
        BlockCommand::Move => "Drag a block to another hour row.",
        BlockCommand::Resize => "Drag the start or end edge of a block.",
        BlockCommand::Place => "Click an empty slot to create a block there.",
        BlockCommand::Select => "Select a block or clear the selection.",
        BlockCommand::Sync => "Push a block to the external calendar.",
    }
}

fn general_command_lines() -> Vec<String> {
    vec![
        "add \"<title>\" <time> [minutes] [date] ...  # Add a block".to_string(),
        "mod <id> [fields]                          # Modify a block".to_string(),
        "del <id>                                   # Delete a block".to_string(),
        "move <id> <hour> <offsetPx> [date]         # Drag and drop a block".to_string(),
        "resize <id> start|end <deltaPx>...         # Drag a block edge".to_string(),
        "place <hour> <offsetPx> [date]             # Click a slot".to_string(),
        "select [id]                                # Select a block".to_string(),
        "sync <id>                                  # Push to the external calendar".to_string(),
        "view | next | prev | today | pick | show   # Navigate and draw".to_string(),
        "slots [date]                               # Free and busy slots".to_string(),
        "stats                                      # Analytics".to_string(),
        "filter ... | filter reset                  # Narrow visible blocks".to_string(),
        "config [KEY value]                         # View or edit config".to_string(),
        "save \"<name>\" | read \"<name>\"              # Save or load blocks".to_string(),
        "log                                        # Print the session log".to_string(),
        "man [topic]                                # Show manual pages".to_string(),
        "date | time | colors                       # Type helper commands".to_string(),
    ]
}
