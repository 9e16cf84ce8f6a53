#![cfg(unix)]

// Real detached launches through the OS spawner.
mod support;

use anyhow::Result;
use game_launcher::{Catalog, Dispatcher, Entry, LaunchError, launch};
use std::thread;
use std::time::{Duration, Instant};
use support::{wait_for_contents, write_script};
use tempfile::TempDir;

#[test]
fn launched_command_receives_split_arguments() -> Result<()> {
    let temp = TempDir::new()?;
    let marker = temp.path().join("marker");
    let script = write_script(temp.path(), "game.sh", "echo \"$2 $3\" > \"$1\"")?;
    let catalog = Catalog::from_entries(vec![Entry::new(
        "Marker",
        format!("{}   {}  --level\t7", script.display(), marker.display()),
    )]);

    let started = launch(&catalog, 0)?;
    assert!(started.pid > 0);
    assert_eq!(started.title, "Marker");
    let contents = wait_for_contents(&marker, Duration::from_secs(5));
    assert_eq!(contents.as_deref(), Some("--level 7\n"));
    Ok(())
}

#[test]
fn launch_does_not_wait_for_the_child() -> Result<()> {
    let catalog = Catalog::from_entries(vec![Entry::new("Sleeper", "sleep 5")]);
    let begin = Instant::now();
    let started = launch(&catalog, 0)?;
    assert!(
        begin.elapsed() < Duration::from_secs(2),
        "launch blocked for {:?}",
        begin.elapsed()
    );
    kill(started.pid);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn child_leads_its_own_session() -> Result<()> {
    let catalog = Catalog::from_entries(vec![Entry::new("Sleeper", "sleep 5")]);
    let started = launch(&catalog, 0)?;
    let stat = std::fs::read_to_string(format!("/proc/{}/stat", started.pid))?;
    kill(started.pid);

    // Fields after the parenthesised command name: state ppid pgrp session.
    let after_comm = stat.rsplit_once(')').map(|(_, rest)| rest).unwrap_or("");
    let fields: Vec<&str> = after_comm.split_whitespace().collect();
    let pid = started.pid.to_string();
    assert_eq!(fields.get(2), Some(&pid.as_str()), "process group");
    assert_eq!(fields.get(3), Some(&pid.as_str()), "session");
    Ok(())
}

#[test]
fn missing_executable_is_a_spawn_error() {
    let temp = TempDir::new().expect("temp dir");
    let program = temp.path().join("not-installed");
    let catalog = Catalog::from_entries(vec![Entry::new(
        "Ghost",
        format!("{} --fullscreen", program.display()),
    )]);

    match launch(&catalog, 0) {
        Err(LaunchError::Spawn { program: reported, source }) => {
            assert_eq!(reported, program.display().to_string());
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected spawn error, got {other:?}"),
    }
}

#[test]
fn whitespace_command_and_unknown_id_are_rejected() {
    let catalog = Catalog::from_entries(vec![Entry::new("Nothing", " \t\n ")]);
    assert!(matches!(
        launch(&catalog, 0),
        Err(LaunchError::EmptyCommand { .. })
    ));
    assert!(matches!(launch(&catalog, 1), Err(LaunchError::NotFound(1))));
    assert!(matches!(
        launch(&catalog, usize::MAX),
        Err(LaunchError::NotFound(_))
    ));
}

#[test]
fn concurrent_launches_are_independent() -> Result<()> {
    let catalog = Catalog::from_entries(vec![
        Entry::new("First", "sleep 4"),
        Entry::new("Second", "sleep 4"),
    ]);
    let dispatcher = Dispatcher::new();
    let begin = Instant::now();

    let pids = thread::scope(|scope| {
        let handles: Vec<_> = [0, 1]
            .into_iter()
            .map(|id| {
                let catalog = &catalog;
                let dispatcher = &dispatcher;
                scope.spawn(move || dispatcher.launch(catalog, id))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("launch thread"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    assert!(begin.elapsed() < Duration::from_secs(3));
    let titles: Vec<_> = pids.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
    assert_ne!(pids[0].pid, pids[1].pid);
    for started in &pids {
        kill(started.pid);
    }
    Ok(())
}

fn kill(pid: u32) {
    // SAFETY: plain syscall on a pid this test just started.
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGKILL);
    }
}
