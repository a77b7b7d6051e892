use std::io::{self, Write};

/// Destination of the formatted text. Implementations must not lose writes
/// that returned `Ok`; flushing is left to whoever owns the sink.
pub trait Sink {
    fn emit(&mut self, text: &str) -> io::Result<()>;

    fn emit_char(&mut self, c: char) -> io::Result<()>;
}

impl<W: Write> Sink for W {
    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }

    fn emit_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0; 4];
        self.write_all(c.encode_utf8(&mut buf).as_bytes())
    }
}
