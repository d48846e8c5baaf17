//! Colored terminal output for render progress.

use std::path::Path;

use console::{Style, Term};
use themegen_renderer::{RenderReport, Rendered};

/// Terminal output formatter. Everything goes to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print the template every variant is rendered from.
    pub(crate) fn template(&self, path: &Path) {
        self.line(&format!("Template: {}", path.display()));
    }

    /// Print a variant heading (cyan bold).
    pub(crate) fn variant(&self, name: &str) {
        self.styled(&self.cyan_bold, name);
    }

    /// Report a written output file (green).
    pub(crate) fn written(&self, name: &str, report: &RenderReport) {
        self.styled(
            &self.green,
            &format!(
                "{name}: wrote {} ({} rules, {} replacements, {} bytes)",
                report.output.display(),
                report.rules,
                report.replacements,
                report.bytes_written
            ),
        );
    }

    /// Report an in-memory render that was not written.
    pub(crate) fn rendered(&self, name: &str, output: &Path, rendered: &Rendered) {
        self.line(&format!(
            "{name}: {} rules, {} replacements, would write {} bytes to {}",
            rendered.rules,
            rendered.stats.replacements,
            rendered.text.len(),
            output.display()
        ));
    }

    /// Warn about substitution targets the template never contained (yellow).
    pub(crate) fn unmatched(&self, name: &str, targets: &[String]) {
        for target in targets {
            self.styled(
                &self.yellow,
                &format!("{name}: target '{target}' not found in template"),
            );
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
