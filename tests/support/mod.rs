#![allow(dead_code)]

// Shared fixtures: catalog files, executable scripts, a fake spawner and a
// live test server with a raw HTTP client.

use anyhow::Result;
use game_launcher::{AppState, Catalog, CommandSpec, Entry, Spawner, build_router, load_templates};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::{NamedTempFile, TempDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub fn write_catalog(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn write_raw_catalog(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn titles(catalog: &Catalog) -> Vec<&str> {
    catalog.entries().iter().map(|e| e.title.as_str()).collect()
}

pub fn category_names(catalog: &Catalog) -> Vec<&str> {
    catalog
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("The Avengers", "avengers --windowed"),
        Entry::new("Zelda", "zelda"),
        Entry::new("an Odyssey", "odyssey"),
    ]
}

#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)?;
    Ok(path)
}

/// Poll until `path` holds non-empty contents or `timeout` passes.
pub fn wait_for_contents(path: &Path, timeout: Duration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(contents) = fs::read_to_string(path) {
            if !contents.is_empty() {
                return Some(contents);
            }
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    None
}

/// Records every spawn; programs named `missing-game` fail like an absent
/// executable would.
#[derive(Default)]
pub struct FakeSpawner {
    pub spawned: Mutex<Vec<CommandSpec>>,
}

impl FakeSpawner {
    pub fn programs(&self) -> Vec<String> {
        self.spawned
            .lock()
            .unwrap()
            .iter()
            .map(|spec| spec.program.clone())
            .collect()
    }
}

impl Spawner for FakeSpawner {
    fn spawn_detached(&self, spec: &CommandSpec) -> io::Result<u32> {
        if spec.program == "missing-game" {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }
        let mut spawned = self.spawned.lock().unwrap();
        spawned.push(spec.clone());
        Ok(1000 + spawned.len() as u32)
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub spawner: Arc<FakeSpawner>,
    pub static_dir: TempDir,
}

/// Serve `entries` on an ephemeral port with a fake spawner and an empty
/// static directory (so the bundled page is used).
pub async fn start_server(entries: Vec<Entry>) -> TestServer {
    let static_dir = TempDir::new().expect("static dir");
    let templates = load_templates(static_dir.path()).expect("templates");
    let spawner = Arc::new(FakeSpawner::default());
    let state = AppState::new(
        Catalog::from_entries(entries),
        templates,
        static_dir.path().to_path_buf(),
    )
    .with_spawner(spawner.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    TestServer {
        addr,
        spawner,
        static_dir,
    }
}

pub async fn send_raw(addr: SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}
