//! Phase-tagged progress output for scenario tests.
//!
//! Output goes to stderr (shown with `--nocapture`) and is silenced when
//! `TEST_LOG_QUIET` is set.
#![allow(dead_code)]

use std::time::Instant;

pub struct TestLogger {
    name: String,
    started: Instant,
    quiet: bool,
}

impl TestLogger {
    pub fn new(name: &str) -> Self {
        let logger = Self {
            name: name.to_string(),
            started: Instant::now(),
            quiet: std::env::var_os("TEST_LOG_QUIET").is_some(),
        };
        logger.emit("start", "");
        logger
    }

    fn emit(&self, tag: &str, detail: &str) {
        if !self.quiet {
            eprintln!(
                "[{:>7.3}s] {} {tag} {detail}",
                self.started.elapsed().as_secs_f64(),
                self.name
            );
        }
    }

    pub fn phase(&self, phase: &str) {
        self.emit("phase", phase);
    }

    pub fn http_request(&self, method: &str, url: &str) {
        self.emit("http", &format!("{method} {url}"));
    }

    pub fn info(&self, message: &str) {
        self.emit("info", message);
    }

    pub fn finish_ok(&self) {
        self.emit("ok", "");
    }
}
