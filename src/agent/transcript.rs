//! Transcript Module
//! Collects prompt/response turns and persists the finished analysis as
//! text, with a raw-response backup written first.

use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const RULER: &str =
    "================================================================================";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

struct Turn {
    section: String,
    prompt: String,
    reply: String,
    timestamp: String,
}

/// Conversation history for one partner's report run.
pub struct Transcript {
    partner_id: i64,
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(partner_id: i64) -> Self {
        Self {
            partner_id,
            turns: Vec::new(),
        }
    }

    pub fn push(&mut self, section: &str, prompt: &str, reply: &str) {
        self.turns.push(Turn {
            section: section.to_string(),
            prompt: prompt.to_string(),
            reply: reply.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        });
    }

    /// Raw assistant responses, one section per block, written to
    /// `<output>/backup/` before the report itself.
    pub fn write_backup(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        let backup_dir = output_dir.join("backup");
        fs::create_dir_all(&backup_dir)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let path = backup_dir.join(format!(
            "backup_responses_{}_{timestamp}.txt",
            self.partner_id
        ));
        let mut file = File::create(&path)?;
        for turn in &self.turns {
            writeln!(file, "\n=== {} at {} ===", turn.section, turn.timestamp)?;
            writeln!(file, "{}", turn.reply)?;
            writeln!(file, "\n{RULER}\n")?;
        }
        Ok(path)
    }

    /// The full analysis: generation header, the initial summary as sent,
    /// then each section's assistant reply.
    pub fn write_report(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(output_dir)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let path = output_dir.join(format!(
            "partner_{}_analysis_{timestamp}.txt",
            self.partner_id
        ));
        let mut file = File::create(&path)?;

        writeln!(file, "Analysis for Partner {}", self.partner_id)?;
        writeln!(file, "Generated on: {timestamp}")?;
        writeln!(file, "{RULER}\n")?;

        if let Some(first) = self.turns.first() {
            writeln!(file, "=== Initial Summary ===\n")?;
            writeln!(file, "{}", first.prompt)?;
            writeln!(file, "\n{RULER}\n")?;
        }

        for turn in self.turns.iter().skip(1) {
            writeln!(file, "=== {} ===\n", turn.section)?;
            writeln!(file, "{}", turn.reply)?;
            writeln!(file, "\n{RULER}\n")?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Transcript {
        let mut t = Transcript::new(7);
        t.push("Initial Summary", "summary prompt text", "noted");
        t.push("Strength Analysis", "strengths prompt", "**Strength** reply");
        t
    }

    #[test]
    fn report_leads_with_the_summary_then_assistant_replies() {
        let dir = tempdir().unwrap();
        let path = sample().write_report(dir.path()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Analysis for Partner 7\n"));
        assert!(text.contains("=== Initial Summary ===\n\nsummary prompt text"));
        assert!(text.contains("=== Strength Analysis ===\n\n**Strength** reply"));
        // the first turn's reply is not part of the report body
        assert!(!text.contains("noted"));
    }

    #[test]
    fn backup_keeps_every_raw_reply() {
        let dir = tempdir().unwrap();
        let path = sample().write_backup(dir.path()).unwrap();

        assert!(path.starts_with(dir.path().join("backup")));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("=== Initial Summary at "));
        assert!(text.contains("noted"));
        assert!(text.contains("**Strength** reply"));
    }
}
