//! Line-at-a-time text source

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Yields one logical line at a time from a byte source
///
/// Line terminators (`\n` or `\r\n`) are removed and invalid UTF-8 is
/// replaced rather than rejected. The sequence ends at end of input; a read
/// error after opening also ends it, so a truncated source just looks short.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    done: bool,
}

impl LineReader<BufReader<File>> {
    /// Open a file for line reading
    ///
    /// The first read happens here, so a path that opens but cannot be read
    /// (a directory, for one) fails now rather than looking empty later.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        reader.fill_buf()?;
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Read the next line, `None` at end of input
    pub fn read_line(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(String::from_utf8_lossy(&self.buf).into_owned())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Read error, treating as end of input");
                self.done = true;
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.read_line()
    }
}
