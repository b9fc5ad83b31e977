use std::fmt::Display;
use std::io::Write;

use crate::grammar::{Production, Symbol};

#[derive(Debug, PartialEq, Clone)]
pub enum Action {
    Move,
    // `None` when an `Empty` on the stack is popped
    Reduction(Option<Production>),
    Accept,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move => write!(f, "move"),
            Action::Reduction(_) => write!(f, "reduction"),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// One step of the driver.
#[derive(Debug, PartialEq, Clone)]
pub struct TraceRecord {
    pub seq: usize,
    // Stack top before the step
    pub top: Symbol,
    // Value of the token under the cursor
    pub current: String,
    pub action: Action,
}

pub trait TraceSink {
    fn record(&mut self, record: TraceRecord) -> std::io::Result<()>;
}

impl TraceSink for Vec<TraceRecord> {
    fn record(&mut self, record: TraceRecord) -> std::io::Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes one aligned line per step.
pub struct TextTrace<W: Write> {
    out: W,
    // Name the production applied by each reduction
    productions: bool,
}

impl<W: Write> TextTrace<W> {
    pub fn new(out: W, productions: bool) -> Self {
        TextTrace { out, productions }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format(&self, record: &TraceRecord) -> String {
        let action = match (&record.action, self.productions) {
            (Action::Reduction(Some(production)), true) => format!("reduction {}", production),
            (Action::Reduction(None), true) => format!("reduction {}", Symbol::Empty),
            (action, _) => action.to_string(),
        };
        format!("{:<5}[top: {:<15}] [current: {:<10}]  {}", record.seq, record.top.to_string(), record.current, action)
    }
}

impl<W: Write> TraceSink for TextTrace<W> {
    fn record(&mut self, record: TraceRecord) -> std::io::Result<()> {
        let line = self.format(&record);
        writeln!(self.out, "{}", line)
    }
}
