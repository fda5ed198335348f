//! Operator echo of every relayed record

use super::RecordSink;
use crate::error::Result;
use crate::record::Record;
use std::io::{self, Stdout, Write};

/// Prints each record as a text line
///
/// Runs first in the fan-out so data flow stays visible even when the
/// network or filesystem sinks are failing.
pub struct ConsoleEcho<W: Write + Send = Stdout> {
    out: W,
}

impl ConsoleEcho<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleEcho<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> RecordSink for ConsoleEcho<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn accept(&mut self, record: &Record) -> Result<()> {
        writeln!(self.out, "{}", record.to_string_lossy())?;
        self.out.flush()?;
        Ok(())
    }
}
