pub mod line;
pub mod terminal;

use tracing::debug;

use crate::config::env::{EnvParser, EnvVars};

/// Which view to drive the controller with
#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    Line,      // Plain stdin/stdout for pipes and CI
    Terminal,  // Full-screen view for interactive terminals
}

impl UiMode {
    pub fn detect() -> Self {
        if EnvParser::is_present(EnvVars::FORCE_LINE_UI) {
            debug!("UI Mode: Line (forced by {})", EnvVars::FORCE_LINE_UI);
            return UiMode::Line;
        }

        let has_ci = EnvParser::is_present(EnvVars::CI);
        let stdin_tty = atty::is(atty::Stream::Stdin);
        let stdout_tty = atty::is(atty::Stream::Stdout);

        debug!("UI Mode detection - CI: {}, stdin TTY: {}, stdout TTY: {}",
               has_ci, stdin_tty, stdout_tty);

        if has_ci || !stdin_tty || !stdout_tty {
            UiMode::Line
        } else {
            UiMode::Terminal
        }
    }
}
