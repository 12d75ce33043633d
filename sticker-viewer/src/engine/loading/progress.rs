use bevy::prelude::*;

/// Observable progress of one preload run. Reset at the start of each run;
/// the log survives a failed run so the enter screen can show what happened.
#[derive(Resource, Default)]
pub struct PreloadProgress {
    pub completed: usize,
    pub total: usize,
    pub log: Vec<String>,
}

impl PreloadProgress {
    pub fn reset(&mut self) {
        self.completed = 0;
        self.total = 0;
        self.log.clear();
    }

    /// Appends a timestamped, UI-visible log line.
    pub fn push_log(&mut self, message: &str) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log.push(format!("{stamp}  {message}"));
    }

    /// Count of log lines containing a needle, used by the orchestrator tests.
    pub fn lines_matching(&self, needle: &str) -> usize {
        self.log.iter().filter(|l| l.contains(needle)).count()
    }
}
