use console::style;
use std::io::Write;

/// Styled terminal output for command handlers
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<14} {}", style(format!("{}:", label)).dim(), value);
    }

    /// Generated coach text, printed as-is
    pub fn body(&self, text: &str) {
        println!("\n{}\n", text.trim_end());
    }

    pub fn prompt(&self, label: &str) {
        print!("{} ", style(label).cyan().bold());
        let _ = std::io::stdout().flush();
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
