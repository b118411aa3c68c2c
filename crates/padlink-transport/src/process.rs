use std::os::unix::process::CommandExt;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

use tracing::{debug, info};

use crate::error::{ChannelError, Result};

/// The stream pair wired to a spawned consumer's standard streams.
///
/// Requests flow out of the consumer's stdout; encoded snapshots flow back
/// into its stdin. The consumer's stderr stays on the operator's terminal.
#[derive(Debug)]
pub struct ConsumerChannel {
    pub requests: ChildStdout,
    pub replies: ChildStdin,
}

/// A spawned consumer process.
///
/// Dropping it closes the reply end (signalling EOF to the consumer) and
/// reaps the child, so no process or pipe outlives any exit path.
#[derive(Debug)]
pub struct ConsumerProcess {
    child: Child,
}

impl ConsumerProcess {
    /// Spawn `argv` with stdin/stdout rewired to fresh pipes.
    pub fn spawn(argv: &[String]) -> Result<(Self, ConsumerChannel)> {
        let (program, args) = argv.split_first().ok_or(ChannelError::EmptyCommand)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());

        // The Rust runtime ignores SIGPIPE process-wide and children inherit
        // that disposition. The consumer must see the default so it dies
        // quietly when its reader goes away.
        unsafe {
            command.pre_exec(|| {
                // SAFETY: signal() is async-signal-safe and nothing here
                // allocates between fork and exec.
                if libc::signal(libc::SIGPIPE, libc::SIG_DFL) == libc::SIG_ERR {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }

        let mut child = command.spawn().map_err(|source| ChannelError::Spawn {
            program: program.clone(),
            source,
        })?;

        let replies = child.stdin.take().ok_or(ChannelError::MissingStdio)?;
        let requests = child.stdout.take().ok_or(ChannelError::MissingStdio)?;

        info!(program = %program, pid = child.id(), "consumer spawned");

        Ok((Self { child }, ConsumerChannel { requests, replies }))
    }

    /// Process id of the consumer.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Wait for the consumer to exit (blocking).
    pub fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait()?;
        debug!(pid = self.child.id(), %status, "consumer exited");
        Ok(status)
    }
}

impl Drop for ConsumerProcess {
    fn drop(&mut self) {
        // Child::wait caches the status, so this is a no-op after an
        // explicit wait(). The channel ends are owned by the caller and are
        // already closed by the time the process handle drops.
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        let err = ConsumerProcess::spawn(&[]).unwrap_err();
        assert!(matches!(err, ChannelError::EmptyCommand));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let argv = vec!["/nonexistent/padlink-consumer".to_owned()];
        let err = ConsumerProcess::spawn(&argv).unwrap_err();
        assert!(matches!(err, ChannelError::Spawn { .. }));
    }

    #[test]
    fn spawned_consumer_round_trips_bytes() {
        let argv = vec!["cat".to_owned()];
        let (mut consumer, mut channel) = ConsumerProcess::spawn(&argv).unwrap();

        channel.replies.write_all(b"ping\n").unwrap();
        drop(channel.replies);

        let mut echoed = String::new();
        channel.requests.read_to_string(&mut echoed).unwrap();
        assert_eq!(echoed, "ping\n");

        let status = consumer.wait().unwrap();
        assert!(status.success());
    }

    #[test]
    fn drop_reaps_the_consumer() {
        let argv = vec!["true".to_owned()];
        let (consumer, channel) = ConsumerProcess::spawn(&argv).unwrap();
        drop(channel);
        // Must not leave a zombie or panic.
        drop(consumer);
    }
}
