use crate::errors::Result;
use crate::prompter::models::{Flow, FlowCtrl};
use std::io::{self, BufRead};

/// Feeds a `Flow` one trimmed line at a time. Stops when the flow says so
/// or the input runs dry; quitting on `exit` is the flow's call.
#[derive(Debug, Default, Clone)]
pub struct Prompter;

impl Prompter {
    pub fn new() -> Self {
        Self
    }

    pub fn run<F: Flow>(&self, flow: F) -> Result<()> {
        self.run_with_reader(flow, io::stdin().lock())
    }

    pub fn run_with_reader<F: Flow, R: BufRead>(&self, mut flow: F, reader: R) -> Result<()> {
        let mut lines = reader.lines();
        loop {
            flow.render()?;
            let Some(line) = lines.next().transpose()? else {
                // Ctrl-D leaves the cursor on the prompt row.
                println!();
                return Ok(());
            };
            if flow.handle_input(line.trim())? == FlowCtrl::Finish {
                return Ok(());
            }
        }
    }
}
