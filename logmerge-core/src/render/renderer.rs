use crate::entry::Span;
use crate::merge::Record;
use std::io::{self, BufWriter, Write};

/// Writes flushed records as `<pad>[alias] <line>`, one output line per entry line.
pub struct Renderer<W: Write> {
    out: BufWriter<W>,

    // Aliases are right-justified to this many chars.
    alias_width: usize,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, alias_width: usize) -> Self {
        Self {
            out: BufWriter::new(writer),
            alias_width,
        }
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        let normal = &record.palette.normal;
        let pad = self.alias_width.saturating_sub(record.alias.chars().count());
        let alias = normal(&record.alias);

        for line in &record.lines {
            write!(self.out, "{:pad$}[{alias}] ", "")?;
            for span in line {
                match span {
                    Span::Plain(text) => self.out.write_all(normal(text).as_bytes())?,
                    Span::Marked { rendered, .. } => self.out.write_all(rendered.as_bytes())?,
                }
            }
            self.out.write_all(b"\n")?;
        }

        Ok(())
    }

    /// Flush everything written so far and hand the sink back.
    pub fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|error| error.into_error())
    }
}
