//! Per-file progress bar driven by batch progress events.

use indicatif::{ProgressBar, ProgressStyle};

use fmi_extract::ProgressEvent;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Renders [`ProgressEvent`]s; a disabled instance ignores them.
pub struct ReportProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ReportProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    pub fn handle(&mut self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::Started { total } => {
                if self.enabled {
                    let bar = ProgressBar::new(total as u64);
                    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
                        bar.set_style(style.progress_chars("=>-"));
                    }
                    self.bar = Some(bar);
                }
            }
            ProgressEvent::Processed { report_id, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(report_id.to_string());
                    bar.inc(1);
                }
            }
            ProgressEvent::Skipped { report_id, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(format!("{report_id} (excluded)"));
                    bar.inc(1);
                }
            }
            ProgressEvent::Finished { reports } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_with_message(format!("{reports} reports"));
                }
            }
        }
    }

    /// Clear a bar left open by a failed batch.
    pub fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}
