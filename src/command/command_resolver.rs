use crate::arg::args::Arg;
use crate::command::commands::{
    BlockActionCommand, CommandDyn, ConfigCommand, FilterCommand, LogCommand, ManCommand,
    ReadCommand, SaveCommand, SlotsCommand, StatsCommand, ViewNavCommand,
};
use crate::core::types::{BlockCommand, GlobalCommand, TypeHelpCommand, ViewCommand};
use crate::errors::Result;

pub trait CommandResolver {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>>;
}

/// `add`, `mod`, `del`, `move`, `resize`, `place`, `select`, `sync`.
pub struct BlockResolver;

impl CommandResolver for BlockResolver {
    fn can_resolve(&self, command: &str) -> bool {
        BlockCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let action = BlockCommand::try_from(command)?;
        Ok(Box::new(BlockActionCommand::new(action, args)))
    }
}

pub struct ViewResolver;

impl CommandResolver for ViewResolver {
    fn can_resolve(&self, command: &str) -> bool {
        ViewCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command = ViewCommand::try_from(command)?;
        Ok(Box::new(ViewNavCommand::new(command, args)))
    }
}

pub struct GlobalResolver;

impl CommandResolver for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        GlobalCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command_type = GlobalCommand::try_from(command)?;
        match command_type {
            GlobalCommand::Slots => Ok(Box::new(SlotsCommand::new(args))),
            GlobalCommand::Stats => Ok(Box::new(StatsCommand::new(args))),
            GlobalCommand::Filter => Ok(Box::new(FilterCommand::new(args))),
            GlobalCommand::Config => Ok(Box::new(ConfigCommand::new(args))),
            GlobalCommand::Log => Ok(Box::new(LogCommand::new(args))),
            GlobalCommand::Save => Ok(Box::new(SaveCommand::new(args))),
            GlobalCommand::Read => Ok(Box::new(ReadCommand::new(args))),
            GlobalCommand::Man => Ok(Box::new(ManCommand::new(args))),
        }
    }
}

pub struct TypeHelpResolver;

impl CommandResolver for TypeHelpResolver {
    fn can_resolve(&self, command: &str) -> bool {
        TypeHelpCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command_type = TypeHelpCommand::try_from(command)?;
        Ok(Box::new(crate::command::commands::TypeHelpCommand::new(
            args,
            command_type,
        )))
    }
}
