use crate::arg::args::Arg;
use crate::command::command_resolver::{
    BlockResolver, CommandResolver, GlobalResolver, TypeHelpResolver, ViewResolver,
};
use crate::command::commands::CommandDyn;
use crate::errors::{Error, Result};

/// Routes a verb to the first resolver family that claims it.
pub struct CommandParser {
    families: [Box<dyn CommandResolver>; 4],
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            // First match wins.
            families: [
                Box::new(BlockResolver),
                Box::new(ViewResolver),
                Box::new(GlobalResolver),
                Box::new(TypeHelpResolver),
            ],
        }
    }

    pub fn parse<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        self.families
            .iter()
            .find(|family| family.can_resolve(command))
            .ok_or_else(|| Error::UnknownCommand(command.to_string()))?
            .resolve(command, args)
    }
}
