//! Drain report rendering for the command line

use crate::app::error::AppResult;
use crate::notifications::api::DrainMode;
use colored::Colorize;
use serde::Serialize;

/// What a single CLI run observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrainReport {
    pub mode: DrainMode,
    /// Items handed to the callback, in order
    pub drained: Vec<String>,
    /// Pending count right before the drain was requested
    pub pending_before: usize,
    /// Pending count immediately after the drain call returned
    pub pending_after_call: usize,
    /// Pending count once the drain completed
    pub pending_after_drain: usize,
    pub total_processed: u64,
}

impl DrainReport {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable report; colour is governed by `colored`'s global override
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for item in &self.drained {
            out.push_str(&format!("{} {}\n", "✓".green(), item));
        }

        out.push_str(&format!(
            "{} {} drain processed {} item{}\n",
            "Summary:".bold(),
            self.mode,
            self.drained.len(),
            if self.drained.len() == 1 { "" } else { "s" }
        ));
        out.push_str(&format!(
            "  pending: {} before, {} after call, {} after drain\n",
            self.pending_before, self.pending_after_call, self.pending_after_drain
        ));
        out.push_str(&format!("  total processed: {}\n", self.total_processed));
        out
    }
}
