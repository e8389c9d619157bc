//! Headless main-process shell.
//!
//! Runs the [`Dispatcher`] against an in-memory store and a virtual window,
//! speaking the request/response contract as JSON lines:
//!
//! ```text
//! stdin  ──▶ reader thread ──mpsc──▶ main loop ──▶ Dispatcher ──▶ stdout
//!                                        │
//!                                        └─ recv_timeout(next debounce) → tick
//! ```
//!
//! Every non-blank input line yields exactly one output line, including lines
//! that are not valid UTF-8. Debounced resizes that
//! settle between inputs produce an extra `window` line when applied.
//!
//! # Usage
//!
//! ```text
//! boostfocus [CONFIG.toml] < requests.jsonl
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use boostfocus::observability::init_tracing;
use boostfocus::{Config, Dispatcher, MemoryTodoStore, Response, VirtualWindow};

/// Poll interval while no resize is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

fn write_line(out: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(out, "{line}")?;
    out.flush()
}

fn write_response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    let line = serde_json::to_string(response).map_err(io::Error::other)?;
    write_line(out, &line)
}

fn run(config: &Config) -> io::Result<()> {
    let window = VirtualWindow::new(config.initial_window, config.work_area);
    let mut dispatcher = Dispatcher::new(
        Box::new(MemoryTodoStore::default()),
        Box::new(window),
        config.focus.clone(),
    );

    let (tx, rx) = mpsc::channel::<io::Result<Vec<u8>>>();
    thread::spawn(move || {
        let mut input = io::stdin().lock();
        loop {
            // raw bytes: UTF-8 is checked per request by the dispatcher
            let mut line = Vec::new();
            match input.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(Ok(line)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let wait = dispatcher
            .next_deadline()
            .map_or(IDLE_WAIT, |due| due.saturating_duration_since(Instant::now()));

        match rx.recv_timeout(wait) {
            Ok(line) => {
                let line = line?;
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                let reply = dispatcher
                    .handle_bytes(&line, Instant::now())
                    .map_err(io::Error::other)?;
                write_line(&mut out, &reply)?;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(response) = dispatcher.tick(Instant::now()) {
                    write_response(&mut out, &response)?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // input closed: apply a resize that was still settling
    if let Some(due) = dispatcher.next_deadline() {
        thread::sleep(due.saturating_duration_since(Instant::now()));
        if let Some(response) = dispatcher.tick(Instant::now()) {
            write_response(&mut out, &response)?;
        }
    }

    tracing::debug!("input closed, shutting down");
    Ok(())
}

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("boostfocus: {e}");
            return ExitCode::from(2);
        }
    };

    init_tracing(&config);
    tracing::debug!(config = ?config, "starting headless shell");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell terminated");
            eprintln!("boostfocus: {e}");
            ExitCode::FAILURE
        }
    }
}
