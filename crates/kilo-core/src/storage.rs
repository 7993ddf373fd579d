//! Loading and saving buffers as plain text.
//!
//! One row per line, bytes passed through unchanged. Loading strips a single trailing `'\n'` or
//! `'\r'` from each line; saving truncates the file and writes every row followed by `'\n'`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use kilo_lang::SyntaxRegistry;

use crate::buffer::Buffer;
use crate::error::KiloError;

impl Buffer {
    /// Open `path`, selecting a syntax from `registry` by file name.
    ///
    /// A missing file opens as an empty document; any other read failure is an error.
    pub fn open(
        path: impl AsRef<Path>,
        registry: &SyntaxRegistry,
        tab_stop: usize,
    ) -> Result<Self, KiloError> {
        let path = path.as_ref();
        let mut buffer = Buffer::with_tab_stop(tab_stop);
        buffer.set_filename(path);

        match File::open(path) {
            Ok(file) => {
                buffer
                    .load(BufReader::new(file))
                    .map_err(|source| KiloError::Open {
                        path: path.to_path_buf(),
                        source,
                    })?;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "new file");
            }
            Err(source) => {
                return Err(KiloError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        buffer.set_syntax(registry.select(&path.to_string_lossy()));
        buffer.mark_clean();
        tracing::debug!(path = %path.display(), rows = buffer.len(), "opened");
        Ok(buffer)
    }

    /// Append every line of `reader` as a row.
    pub fn load(&mut self, mut reader: impl BufRead) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            if matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            self.insert_row(self.len(), &line);
        }
    }

    /// Write the buffer to its file, truncating it first.
    ///
    /// Returns the number of bytes written. The dirty counter is reset only on success.
    pub fn save(&mut self) -> Result<usize, KiloError> {
        let path = self.filename().ok_or(KiloError::NoFileName)?.to_path_buf();
        let bytes = self.serialize();

        let written = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .and_then(|mut file| {
                file.set_len(bytes.len() as u64)?;
                file.write_all(&bytes)?;
                file.flush()
            });

        match written {
            Ok(()) => {
                self.mark_clean();
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved");
                Ok(bytes.len())
            }
            Err(source) => {
                tracing::warn!(path = %path.display(), error = %source, "save failed");
                Err(KiloError::Save { path, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_strips_one_terminator_per_line() {
        let mut buffer = Buffer::new();
        buffer.load(&b"a\r\nb\n\nc\r"[..]).unwrap();
        let rows: Vec<&[u8]> = buffer.rows().iter().map(|r| r.chars()).collect();
        assert_eq!(rows, [b"a\r".as_slice(), b"b", b"", b"c"]);
    }

    #[test]
    fn test_save_without_file_name() {
        let mut buffer = Buffer::from_lines(["x"], None);
        buffer.insert_char(0, 0, b'y');
        assert!(matches!(buffer.save(), Err(KiloError::NoFileName)));
        assert!(buffer.is_dirty());
    }
}
