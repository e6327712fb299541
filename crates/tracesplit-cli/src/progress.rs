//! Single-line progress on stderr, rewritten in place with `\r`.

use std::io::IsTerminal;

pub struct ProgressLine {
    label: &'static str,
    last_pct: Option<u32>,
    enabled: bool,
    /// A partial line is on screen and has not been ended yet.
    open: bool,
}

impl ProgressLine {
    pub fn new(label: &'static str) -> Self {
        Self::with_output(label, std::io::stderr().is_terminal())
    }

    fn with_output(label: &'static str, enabled: bool) -> Self {
        Self {
            label,
            last_pct: None,
            enabled,
            open: false,
        }
    }

    /// Redraw when the whole-percent value changes; finish the line at 100%.
    pub fn update(&mut self, done: usize, total: usize) {
        if !self.enabled || total == 0 {
            return;
        }
        let pct = percent(done, total);
        if self.last_pct == Some(pct) {
            return;
        }
        self.last_pct = Some(pct);
        eprint!("\r  {} {done}/{total} ({pct}%)", self.label);
        self.open = true;
        if done >= total {
            self.finish();
        }
    }

    /// End a partially drawn line so later output starts on a fresh one.
    pub fn finish(&mut self) {
        if self.open {
            eprintln!();
            self.open = false;
        }
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        self.finish();
    }
}

fn percent(done: usize, total: usize) -> u32 {
    (done.min(total) as u64 * 100 / total as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_floored_and_capped() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(5, 3), 100);
        assert_eq!(percent(0, 7), 0);
    }

    #[test]
    fn partial_line_stays_open_until_finished() {
        let mut progress = ProgressLine::with_output("Test", true);
        progress.update(1, 4);
        assert!(progress.open);
        progress.finish();
        assert!(!progress.open);
    }

    #[test]
    fn complete_line_is_closed() {
        let mut progress = ProgressLine::with_output("Test", true);
        progress.update(2, 4);
        progress.update(4, 4);
        assert!(!progress.open);
    }

    #[test]
    fn disabled_line_never_opens() {
        let mut progress = ProgressLine::with_output("Test", false);
        progress.update(1, 4);
        assert!(!progress.open);
    }
}
