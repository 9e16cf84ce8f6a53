//! Launch dispatch: launch id → command → detached process.
//!
//! Resolution and spawning are split so a caller holding the catalog behind a
//! lock can resolve a [`LaunchPlan`], drop the guard, and only then start the
//! process. Nothing here waits on, tracks or retries a launched process.

pub mod detach;

pub use detach::{OsSpawner, Spawner};

use crate::catalog::{Catalog, LaunchId};
use std::io;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no entry with launch id {0}")]
    NotFound(LaunchId),
    #[error("entry '{title}' has an empty launch command")]
    EmptyCommand { title: String },
    #[error("failed to start process '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Program plus arguments, split from an entry's `exec` string.
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Split `command` on whitespace; `None` when there are no tokens.
    ///
    /// There is no quoting or escaping: `"my game.exe"` is two tokens, so an
    /// argument or path containing spaces cannot be expressed.
    pub fn parse(command: &str) -> Option<Self> {
        let mut tokens = command.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Everything needed to start one entry, detached from the catalog.
pub struct LaunchPlan {
    pub launch_id: LaunchId,
    pub title: String,
    pub command: CommandSpec,
}

impl LaunchPlan {
    pub fn resolve(catalog: &Catalog, id: LaunchId) -> Result<Self, LaunchError> {
        let entry = catalog.entry(id).ok_or(LaunchError::NotFound(id))?;
        let command = CommandSpec::parse(&entry.exec).ok_or_else(|| LaunchError::EmptyCommand {
            title: entry.title.clone(),
        })?;
        Ok(Self {
            launch_id: id,
            title: entry.title.clone(),
            command,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A process the OS reported as started. Informational only.
pub struct Started {
    pub launch_id: LaunchId,
    pub title: String,
    pub pid: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Dispatcher<S = OsSpawner> {
    spawner: S,
}

impl Dispatcher<OsSpawner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Spawner> Dispatcher<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Resolve `id` in `catalog` and start it.
    pub fn launch(&self, catalog: &Catalog, id: LaunchId) -> Result<Started, LaunchError> {
        let plan = LaunchPlan::resolve(catalog, id)?;
        self.spawn(plan)
    }

    /// Start an already resolved plan and return as soon as the OS confirms.
    pub fn spawn(&self, plan: LaunchPlan) -> Result<Started, LaunchError> {
        let pid = self
            .spawner
            .spawn_detached(&plan.command)
            .map_err(|source| LaunchError::Spawn {
                program: plan.command.program.clone(),
                source,
            })?;
        info!(title = %plan.title, pid, program = %plan.command.program, "started detached process");
        Ok(Started {
            launch_id: plan.launch_id,
            title: plan.title,
            pid,
        })
    }
}

/// Launch `id` from `catalog` with the platform's detached spawner.
pub fn launch(catalog: &Catalog, id: LaunchId) -> Result<Started, LaunchError> {
    Dispatcher::new().launch(catalog, id)
}
