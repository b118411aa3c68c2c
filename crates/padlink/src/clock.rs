//! The clock-driven bridge variant.
//!
//! No markers here: a free-running timer increments a shared counter, and
//! any readable activity from the consumer means "ready for the next value".

use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Timer period for the shared counter (16 ticks per second).
pub const TICK_INTERVAL: Duration = Duration::from_micros(62_500);

/// Start the free-running ticker. The counter wraps monotonically; Relaxed
/// increments are enough since it is a single contended word.
pub fn spawn_ticker(counter: Arc<AtomicU32>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(TICK_INTERVAL);
        counter.fetch_add(1, Ordering::Relaxed);
    })
}

/// Run the clock loop: one counter value eagerly at startup, then one per
/// detected consumer-read event, until the consumer closes its stream.
pub fn run_clock<R, W>(
    mut activity: R,
    mut replies: W,
    counter: &AtomicU32,
) -> std::io::Result<()>
where
    R: Read,
    W: Write,
{
    write_counter(&mut replies, counter)?;

    let mut buf = [0u8; 256];
    loop {
        match activity.read(&mut buf) {
            Ok(0) => {
                tracing::info!("consumer closed the clock stream");
                return Ok(());
            }
            Ok(_) => write_counter(&mut replies, counter)?,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

fn write_counter(replies: &mut impl Write, counter: &AtomicU32) -> std::io::Result<()> {
    let value = counter.load(Ordering::Relaxed);

    let mut frame = [0u8; 5];
    frame[..4].copy_from_slice(&value.to_le_bytes());
    frame[4] = b'\n';

    replies.write_all(&frame)?;
    replies.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn writes_one_value_eagerly_at_startup() {
        let counter = AtomicU32::new(7);
        let mut replies = Vec::new();

        run_clock(Cursor::new(Vec::<u8>::new()), &mut replies, &counter).unwrap();

        assert_eq!(replies, [7, 0, 0, 0, b'\n']);
    }

    #[test]
    fn any_consumer_activity_triggers_a_value() {
        let counter = AtomicU32::new(0x01020304);
        let mut replies = Vec::new();

        // One read event: a single byte of activity.
        run_clock(Cursor::new(vec![b'x']), &mut replies, &counter).unwrap();

        assert_eq!(replies.len(), 10);
        assert_eq!(&replies[5..9], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(replies[9], b'\n');
    }

    #[test]
    fn ticker_wraps_through_the_counter_boundary() {
        let counter = Arc::new(AtomicU32::new(u32::MAX));
        let _ticker = spawn_ticker(Arc::clone(&counter));

        thread::sleep(TICK_INTERVAL * 4);
        let wrapped = counter.load(Ordering::Relaxed);
        assert!(wrapped < 64, "counter should wrap past zero, got {wrapped}");

        // The wrapped value goes out on the wire like any other.
        let mut replies = Vec::new();
        run_clock(Cursor::new(Vec::<u8>::new()), &mut replies, &counter).unwrap();
        let value = u32::from_le_bytes(replies[..4].try_into().unwrap());
        assert!(value < 64);
        assert_eq!(replies[4], b'\n');
    }

    #[test]
    fn ticker_advances_the_shared_counter() {
        let counter = Arc::new(AtomicU32::new(0));
        let _ticker = spawn_ticker(Arc::clone(&counter));

        thread::sleep(TICK_INTERVAL * 4);
        assert!(counter.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn write_failure_is_fatal() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let counter = AtomicU32::new(0);
        let err = run_clock(Cursor::new(Vec::<u8>::new()), FailingWriter, &counter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }
}
