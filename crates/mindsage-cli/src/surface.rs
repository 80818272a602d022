use mindsage::LoadState;
use mindsage::view::{JournalView, Panel, RenderSurface};
use std::io::{self, Write};

/// Writes journal views as plain text.
pub(crate) struct TerminalSurface<W> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_panel(&mut self, panel: &Panel) -> io::Result<()> {
        match panel {
            Panel::RiskAlert(message) => writeln!(self.out, "!! {message}"),
            Panel::Error(err) => writeln!(self.out, "error: {err}"),
            Panel::Analyzing => writeln!(self.out, "Analyzing..."),
            Panel::Analysis {
                dominant_emotion,
                activity_suggestion,
                insights,
                stale,
            } => {
                let marker = if *stale { " (earlier analysis)" } else { "" };
                writeln!(self.out, "Dominant emotion: {dominant_emotion}{marker}")?;
                writeln!(self.out, "Suggestion: {activity_suggestion}")?;
                writeln!(self.out, "Insights: {insights}")
            }
            Panel::Loading => writeln!(self.out, "Loading entries..."),
            Panel::Entries(entries) if entries.is_empty() => writeln!(self.out, "No journal entries yet."),
            Panel::Entries(entries) => {
                for entry in entries {
                    let emotion = entry.dominant_emotion.as_ref().map_or("-", |emotion| emotion.as_str());
                    writeln!(
                        self.out,
                        "{}  {emotion:<11} {}",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.content
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn render(&mut self, view: &JournalView) {
        // Entries are only shown once a fetch was attempted.
        let show_entries = view.load_state != LoadState::Idle;
        for panel in view.panels() {
            if matches!(panel, Panel::Entries(_)) && !show_entries {
                continue;
            }
            if let Err(err) = self.write_panel(&panel) {
                tracing::warn!(error = %err, "Failed to write to terminal");
                return;
            }
        }
    }
}
