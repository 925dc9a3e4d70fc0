use super::args::*;
use crate::errors::{Error, Result};

pub struct ArgParser {
    factories: Vec<Box<dyn ArgFactory>>,
}

impl Default for ArgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgParser {
    /// Factories are tried in order; the first that can start a token wins.
    pub fn new() -> Self {
        Self {
            factories: vec![
                Box::new(MultiTokenFactory::<NameArg>::new()),
                Box::new(SingleTokenFactory::<FlagArg>::new()),
                Box::new(SingleTokenFactory::<IntArg>::new()),
                Box::new(SingleTokenFactory::<DecimalArg>::new()),
                Box::new(SingleTokenFactory::<StatusArg>::new()),
                Box::new(SingleTokenFactory::<PriorityArg>::new()),
                Box::new(SingleTokenFactory::<EdgeArg>::new()),
                Box::new(SingleTokenFactory::<ViewArg>::new()),
                Box::new(SingleTokenFactory::<CategoryArg>::new()),
                Box::new(SingleTokenFactory::<TagArg>::new()),
                Box::new(SingleTokenFactory::<TimeArg>::new()),
                Box::new(SingleTokenFactory::<DateArg>::new()),
                Box::new(SingleTokenFactory::<WordArg>::new()),
            ],
        }
    }

    pub fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        let mut ts = TokenStream::new(raw);
        let mut out = Vec::new();

        while !ts.eof() {
            let tok = ts.peek()?.to_string();
            let Some(factory) = self.factories.iter().find(|f| f.can_start(&tok)) else {
                return Err(Error::Parse(format!(
                    "Unrecognized argument: '{}'. If this is a title or description, wrap it in quotes.",
                    tok
                )));
            };
            out.push(factory.parse(&mut ts)?);
        }
        Ok(out)
    }
}
