/*!
 * PTY Execution
 * Fork on a pseudo-terminal, relay standard streams, enforce the
 * wall-clock timeout, reap the child
 */

use super::signals;
use super::types::{CommandOutcome, ExecError, ExecResult};
use log::{debug, trace, warn};
use nix::errno::Errno;
use nix::libc;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::pty::openpty;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execvp, fork, setsid, ForkResult, Pid};
use std::ffi::CString;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::time::{Duration, Instant};

/// Relay transfers at most this many bytes per read.
pub const RELAY_BUFFER_SIZE: usize = 4096;

/// Multiplex-wait tick; the timeout check runs at this granularity.
const RELAY_TICK_MS: u16 = 1000;

/// Runs one admitted invocation under a pseudo-terminal.
///
/// Not re-entrant: at most one child session exists at any time, tracked
/// through the process-global pid slot that the signal handler reads.
pub struct PtyExecutor {
    timeout: Duration,
}

impl PtyExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fork the program on a PTY, relay standard input and the master
    /// until EOF, child exit, or timeout, then reap.
    pub fn execute(&self, program: &str, args: &[String]) -> ExecResult<CommandOutcome> {
        let stdin = io::stdin();
        self.execute_with_input(program, args, stdin.as_fd())
    }

    fn execute_with_input(
        &self,
        program: &str,
        args: &[String],
        input: BorrowedFd<'_>,
    ) -> ExecResult<CommandOutcome> {
        let program_cstr = CString::new(program)
            .map_err(|_| ExecError::InvalidCommand(program.to_string()))?;
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program_cstr.clone());
        for arg in args {
            argv.push(
                CString::new(arg.as_str())
                    .map_err(|_| ExecError::InvalidCommand(arg.clone()))?,
            );
        }

        let pty = openpty(None, None).map_err(ExecError::PtyAllocation)?;

        // SAFETY: the child performs only async-signal-safe operations
        // (setsid, ioctl, dup2, execvp) before replacing its image, and
        // every failure path ends in _exit.
        match unsafe { fork() }.map_err(ExecError::Fork)? {
            ForkResult::Child => exec_child(pty.master, pty.slave, &program_cstr, &argv),
            ForkResult::Parent { child } => {
                debug!("Spawned child PID {} for {}", child, program);
                drop(pty.slave);
                signals::set_current_child(child.as_raw());

                let timed_out = self.relay(input, &pty.master, child);
                let outcome = reap(child, timed_out);
                signals::clear_current_child();
                outcome
            }
        }
    }

    /// Bidirectional relay between `input`/stdout and the PTY master.
    /// Returns whether the wall-clock timeout fired.
    fn relay(&self, input: BorrowedFd<'_>, master: &OwnedFd, child: Pid) -> bool {
        let start = Instant::now();
        let mut buf = [0u8; RELAY_BUFFER_SIZE];
        let mut stdout = io::stdout();

        while signals::is_running() {
            let (input_ready, master_ready, tick) = {
                let mut fds = [
                    PollFd::new(input, PollFlags::POLLIN),
                    PollFd::new(master.as_fd(), PollFlags::POLLIN),
                ];
                match poll(&mut fds, PollTimeout::from(RELAY_TICK_MS)) {
                    Err(Errno::EINTR) => continue,
                    Err(e) => {
                        warn!("Relay wait failed: {}", e);
                        break;
                    }
                    Ok(0) => (false, false, true),
                    Ok(_) => (readable(&fds[0]), readable(&fds[1]), false),
                }
            };

            if tick {
                if start.elapsed() > self.timeout {
                    warn!("Command timed out after {} seconds.", self.timeout.as_secs());
                    let _ = kill(child, Signal::SIGTERM);
                    return true;
                }
                continue;
            }

            if input_ready {
                match read_fd(input, &mut buf) {
                    Ok(0) => {
                        debug!("Operator input closed, ending relay");
                        break;
                    }
                    Ok(n) => {
                        if write_all_fd(master.as_fd(), &buf[..n]).is_err() {
                            break;
                        }
                        trace!("User input: {}", String::from_utf8_lossy(&buf[..n]));
                    }
                    Err(Errno::EINTR) => continue,
                    Err(e) => {
                        debug!("Input read failed: {}", e);
                        break;
                    }
                }
            }

            if master_ready {
                match read_fd(master.as_fd(), &mut buf) {
                    Ok(0) => {
                        debug!("Child closed the pty");
                        break;
                    }
                    Ok(n) => {
                        if stdout
                            .write_all(&buf[..n])
                            .and_then(|_| stdout.flush())
                            .is_err()
                        {
                            break;
                        }
                        trace!("Command output: {}", String::from_utf8_lossy(&buf[..n]));
                    }
                    Err(Errno::EINTR) => continue,
                    // EIO is the normal end-of-session on Linux ptys
                    Err(e) => {
                        debug!("Master read ended: {}", e);
                        break;
                    }
                }
            }
        }
        false
    }
}

fn readable(fd: &PollFd) -> bool {
    fd.revents().is_some_and(|r| {
        r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR)
    })
}

/// Child side: attach the slave as the controlling terminal on the
/// standard descriptors and replace the image. Never returns; every
/// failure path ends in `_exit(1)` so no forked copy of the shell can
/// keep running.
fn exec_child(master: OwnedFd, slave: OwnedFd, program: &CString, argv: &[CString]) -> ! {
    drop(master);

    if setsid().is_err() {
        // SAFETY: _exit is async-signal-safe and safe in a forked child.
        unsafe { libc::_exit(1) };
    }

    let slave_fd = slave.as_raw_fd();
    // SAFETY: standard pty setup between fork and exec on valid fds.
    unsafe {
        libc::ioctl(slave_fd, libc::c_ulong::from(libc::TIOCSCTTY), 0);
        if libc::dup2(slave_fd, libc::STDIN_FILENO) < 0
            || libc::dup2(slave_fd, libc::STDOUT_FILENO) < 0
            || libc::dup2(slave_fd, libc::STDERR_FILENO) < 0
        {
            libc::_exit(1);
        }
    }
    if slave_fd > libc::STDERR_FILENO {
        drop(slave);
    } else {
        std::mem::forget(slave);
    }

    let _ = execvp(program, argv);
    // Image replacement failed; the parent observes the status via reap.
    // SAFETY: _exit is async-signal-safe and safe in a forked child.
    unsafe { libc::_exit(1) };
}

/// Blocking reap; maps the wait status to an outcome.
fn reap(child: Pid, timed_out: bool) -> ExecResult<CommandOutcome> {
    loop {
        match waitpid(child, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("Child PID {} exited with code {}", child, code);
                return Ok(if timed_out {
                    CommandOutcome::TimedOut
                } else {
                    CommandOutcome::Exited(code)
                });
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!("Child PID {} terminated by {:?}", child, signal);
                return Ok(if timed_out {
                    CommandOutcome::TimedOut
                } else {
                    CommandOutcome::Signaled(signal)
                });
            }
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Wait(e)),
        }
    }
}

fn read_fd(fd: BorrowedFd<'_>, buf: &mut [u8]) -> Result<usize, Errno> {
    // SAFETY: reading into a valid buffer from a valid fd.
    let n = unsafe {
        libc::read(
            fd.as_raw_fd(),
            buf.as_mut_ptr().cast::<libc::c_void>(),
            buf.len(),
        )
    };
    if n < 0 {
        Err(Errno::last())
    } else {
        Ok(n as usize)
    }
}

fn write_all_fd(fd: BorrowedFd<'_>, mut buf: &[u8]) -> Result<(), Errno> {
    while !buf.is_empty() {
        // SAFETY: writing from a valid buffer to a valid fd.
        let n = unsafe {
            libc::write(
                fd.as_raw_fd(),
                buf.as_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };
        if n < 0 {
            let errno = Errno::last();
            if errno == Errno::EINTR {
                continue;
            }
            return Err(errno);
        }
        buf = &buf[n as usize..];
    }
    Ok(())
}
