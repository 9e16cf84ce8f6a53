//! Platform "spawn detached" capability.
//!
//! Children get null stdio and their own process group (unix: a new session
//! via `setsid`; windows: `CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW`), so
//! they neither share the service's terminal nor die with it. The spawn call
//! returns once the OS has created the process.

use crate::launch::CommandSpec;
use std::io;
use std::process::{Child, Command, Stdio};

/// Starts a process from a command spec without waiting on it and returns
/// its pid.
pub trait Spawner: Send + Sync {
    fn spawn_detached(&self, spec: &CommandSpec) -> io::Result<u32>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn_detached(&self, spec: &CommandSpec) -> io::Result<u32> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut command);

        let child = command.spawn()?;
        let pid = child.id();
        release(child);
        Ok(pid)
    }
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: runs in the forked child before exec; setsid is
    // async-signal-safe and touches no state shared with the parent.
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// Give up ownership of `child`.
///
/// On unix an exited child stays a zombie until someone waits on it, so a
/// throwaway thread does the wait. The exit status is discarded.
#[cfg(unix)]
fn release(mut child: Child) {
    let pid = child.id();
    let reaper = std::thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || {
            let _ = child.wait();
        });
    if let Err(err) = reaper {
        tracing::debug!(pid, error = %err, "could not start reaper thread");
    }
}

#[cfg(not(unix))]
fn release(child: Child) {
    drop(child);
}

impl<S: Spawner + ?Sized> Spawner for std::sync::Arc<S> {
    fn spawn_detached(&self, spec: &CommandSpec) -> io::Result<u32> {
        (**self).spawn_detached(spec)
    }
}
