//! Framed output stream around a byte sink.
//!
//! The run produces a `[` line, then every extracted object on its own
//! line followed by a literal comma, then a `]` line.  A non-empty run
//! therefore ends with a dangling comma before the closing bracket.
//! That framing predates this implementation and downstream consumers
//! post-process it; it must not be corrected here.
use std::io::Write;

use marcxchange::Record;

use crate::extract;

pub struct SeriesStream<W: Write> {
    sink: W,
    records_in: usize,
    objects_out: usize,
}

impl<W: Write> SeriesStream<W> {
    /// Open the stream and emit the leading bracket.
    pub fn begin(mut sink: W) -> Result<Self, String> {
        writeln!(sink, "[").map_err(|e| format!("Error writing output: {e}"))?;

        Ok(SeriesStream {
            sink,
            records_in: 0,
            objects_out: 0,
        })
    }

    /// Extract one record and emit each of its objects, comma
    /// terminated, in document order.
    pub fn write_record(&mut self, record: &Record) -> Result<(), String> {
        for obj in extract::extract(record) {
            writeln!(self.sink, "{},", obj.dump())
                .map_err(|e| format!("Error writing output: {e}"))?;
            self.objects_out += 1;
        }

        self.records_in += 1;
        Ok(())
    }

    /// Emit the closing bracket, flush the sink, and return the
    /// (records read, objects written) totals for the run.
    pub fn finish(mut self) -> Result<(usize, usize), String> {
        writeln!(self.sink, "]").map_err(|e| format!("Error writing output: {e}"))?;

        self.sink
            .flush()
            .map_err(|e| format!("Error flushing output: {e}"))?;

        Ok((self.records_in, self.objects_out))
    }
}
