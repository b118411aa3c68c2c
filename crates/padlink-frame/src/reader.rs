use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// One logical line, delimited by a line-feed or a length limit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    /// The raw bytes, including the terminating line-feed when present.
    pub bytes: Bytes,
    /// Set when the length limit was hit before a line-feed appeared.
    pub truncated: bool,
}

/// Reads logical lines from any `Read` stream.
///
/// Handles partial reads internally — a marker split across two underlying
/// reads is still assembled into one line. Concatenating the bytes of every
/// returned line reproduces the input stream exactly.
pub struct LineReader<T> {
    inner: T,
    buf: BytesMut,
    eof: bool,
}

impl<T: Read> LineReader<T> {
    /// Create a new line reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            eof: false,
        }
    }

    /// Read the next line (blocking), emitting at most `max_len` bytes.
    ///
    /// A line ends at the first line-feed (inclusive) or at `max_len` bytes
    /// (exclusive of any terminator, `truncated` set). Returns `Ok(None)` at
    /// end of stream, and keeps returning it on subsequent calls.
    pub fn read_line(&mut self, max_len: usize) -> Result<Option<Line>> {
        assert!(max_len > 0, "line length limit must be non-zero");

        loop {
            if let Some(line) = self.split_line(max_len) {
                return Ok(Some(line));
            }

            if self.eof {
                // Trailing bytes with no terminator still belong to the
                // caller; hand them out before reporting end of stream.
                if self.buf.is_empty() {
                    return Ok(None);
                }
                tracing::debug!(len = self.buf.len(), "stream ended without terminator");
                let bytes = self.buf.split().freeze();
                return Ok(Some(Line {
                    bytes,
                    truncated: true,
                }));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                self.eof = true;
                continue;
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    fn split_line(&mut self, max_len: usize) -> Option<Line> {
        let window = max_len.min(self.buf.len());
        if let Some(pos) = self.buf[..window].iter().position(|&b| b == b'\n') {
            return Some(Line {
                bytes: self.buf.split_to(pos + 1).freeze(),
                truncated: false,
            });
        }

        if self.buf.len() >= max_len {
            return Some(Line {
                bytes: self.buf.split_to(max_len).freeze(),
                truncated: true,
            });
        }

        None
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const LIMIT: usize = 64;

    fn collect_lines(reader: &mut LineReader<impl Read>, max_len: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line(max_len).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn reads_single_line() {
        let mut reader = LineReader::new(Cursor::new(b"hello\n".to_vec()));
        let line = reader.read_line(LIMIT).unwrap().unwrap();

        assert_eq!(line.bytes.as_ref(), b"hello\n");
        assert!(!line.truncated);
    }

    #[test]
    fn reads_multiple_lines_from_one_chunk() {
        let mut reader = LineReader::new(Cursor::new(b"one\ntwo\nthree\n".to_vec()));
        let lines = collect_lines(&mut reader, LIMIT);

        let bytes: Vec<&[u8]> = lines.iter().map(|l| l.bytes.as_ref()).collect();
        assert_eq!(bytes, vec![b"one\n".as_ref(), b"two\n", b"three\n"]);
        assert!(lines.iter().all(|l| !l.truncated));
    }

    #[test]
    fn eof_is_sticky() {
        let mut reader = LineReader::new(Cursor::new(b"last\n".to_vec()));
        assert!(reader.read_line(LIMIT).unwrap().is_some());
        assert!(reader.read_line(LIMIT).unwrap().is_none());
        assert!(reader.read_line(LIMIT).unwrap().is_none());
    }

    #[test]
    fn unterminated_tail_is_emitted_before_eof() {
        let mut reader = LineReader::new(Cursor::new(b"full\nrest".to_vec()));

        let first = reader.read_line(LIMIT).unwrap().unwrap();
        assert_eq!(first.bytes.as_ref(), b"full\n");

        let tail = reader.read_line(LIMIT).unwrap().unwrap();
        assert_eq!(tail.bytes.as_ref(), b"rest");
        assert!(tail.truncated);

        assert!(reader.read_line(LIMIT).unwrap().is_none());
    }

    #[test]
    fn long_line_splits_into_truncated_continuations() {
        // A line longer than the limit arrives as truncated pieces followed
        // by one terminated piece; concatenation equals the original.
        let line = [vec![b'x'; 150], vec![b'\n']].concat();
        let mut reader = LineReader::new(Cursor::new(line.clone()));
        let lines = collect_lines(&mut reader, LIMIT);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].truncated);
        assert!(lines[1].truncated);
        assert!(!lines[2].truncated);

        let reassembled: Vec<u8> = lines.iter().flat_map(|l| l.bytes.to_vec()).collect();
        assert_eq!(reassembled, line);
    }

    #[test]
    fn marker_straddling_reads_is_assembled() {
        let reader = ByteByByteReader {
            bytes: "☉3☉\n".as_bytes().to_vec(),
            pos: 0,
        };
        let mut reader = LineReader::new(reader);

        let line = reader.read_line(LIMIT).unwrap().unwrap();
        assert_eq!(line.bytes.as_ref(), "☉3☉\n".as_bytes());
        assert!(!line.truncated);
    }

    #[test]
    fn chunk_invariance() {
        // Arbitrary read splits must yield identical lines to reading the
        // whole stream at once.
        let stream = b"first\nsecond line\n\nunterminated".to_vec();

        let mut whole = LineReader::new(Cursor::new(stream.clone()));
        let expected = collect_lines(&mut whole, LIMIT);

        for chunk_size in 1..8 {
            let reader = ChunkedReader {
                bytes: stream.clone(),
                pos: 0,
                chunk_size,
            };
            let mut split = LineReader::new(reader);
            let got = collect_lines(&mut split, LIMIT);
            assert_eq!(got, expected, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn empty_stream_is_immediate_eof() {
        let mut reader = LineReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.read_line(LIMIT).unwrap().is_none());
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            state: 0,
            bytes: b"ok\n".to_vec(),
            pos: 0,
        };
        let mut reader = LineReader::new(reader);

        let line = reader.read_line(LIMIT).unwrap().unwrap();
        assert_eq!(line.bytes.as_ref(), b"ok\n");
    }

    #[test]
    fn read_error_is_fatal() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(ErrorKind::BrokenPipe))
            }
        }

        let mut reader = LineReader::new(FailingReader);
        let err = reader.read_line(LIMIT).unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct ChunkedReader {
        bytes: Vec<u8>,
        pos: usize,
        chunk_size: usize,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos)
                .min(self.chunk_size)
                .min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct InterruptedThenData {
        state: u8,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.state == 0 {
                self.state = 1;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
