use std::collections::HashMap;

use crate::arg::arg_parser::ArgParser;
use crate::arg::args::{Arg, FlagArg, NameArg, SingleTokenArg};
use crate::errors::Result;

pub trait ArgParseStrategy {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>>;
}

pub struct StandardArgParser {
    parser: ArgParser,
}

impl StandardArgParser {
    pub fn new() -> Self {
        Self {
            parser: ArgParser::new(),
        }
    }
}

impl ArgParseStrategy for StandardArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        self.parser.parse(raw)
    }
}

/// `man <topic words>`: the whole tail is one topic.
pub struct ManArgParser;

impl ArgParseStrategy for ManArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        if let Some(flag) = leading_flag(raw) {
            return Ok(vec![flag]);
        }
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let joined = raw.join(" ");
        Ok(vec![Arg::Name(strip_wrapping_quotes(&joined))])
    }
}

/// `config [KEY [value words]]`: values stay raw strings so each config
/// item validates its own format.
pub struct ConfigArgParser;

impl ArgParseStrategy for ConfigArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        if let Some(flag) = leading_flag(raw) {
            return Ok(vec![flag]);
        }
        let Some((key, rest)) = raw.split_first() else {
            return Ok(Vec::new());
        };
        let mut out = vec![Arg::Name(key.trim().to_string())];
        if !rest.is_empty() {
            out.push(Arg::Name(strip_wrapping_quotes(&rest.join(" "))));
        }
        Ok(out)
    }
}

pub struct CommandArgParser {
    default: StandardArgParser,
    overrides: HashMap<String, Box<dyn ArgParseStrategy>>,
}

impl Default for CommandArgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandArgParser {
    pub fn new() -> Self {
        let mut overrides: HashMap<String, Box<dyn ArgParseStrategy>> = HashMap::new();
        overrides.insert("man".to_string(), Box::new(ManArgParser));
        overrides.insert("config".to_string(), Box::new(ConfigArgParser));
        Self {
            default: StandardArgParser::new(),
            overrides,
        }
    }

    pub fn parse(&self, command: &str, raw: &[String]) -> Result<Vec<Arg>> {
        let key = command.trim().to_ascii_lowercase();
        if let Some(parser) = self.overrides.get(&key) {
            parser.parse(raw)
        } else {
            self.default.parse(raw)
        }
    }
}

fn leading_flag(raw: &[String]) -> Option<Arg> {
    match raw {
        [only] if FlagArg::accepts(only) => FlagArg::new(only).ok(),
        _ => None,
    }
}

fn strip_wrapping_quotes(value: &str) -> String {
    let trimmed = value.trim();
    if let Ok(Arg::Name(name)) = NameArg::new(trimmed) {
        return name;
    }
    trimmed.to_string()
}
