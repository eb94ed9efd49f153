//! Text output formatting with colors.

use marketcart_core::{CartEntry, CartState};

use super::json::MutationOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the cart as one line per entry plus a footer.
    pub fn format_cart(&self, state: &CartState) -> String {
        if state.is_empty() {
            return self.dim("Cart is empty");
        }

        let mut lines = Vec::with_capacity(state.len() + 2);
        lines.push(self.bold("Cart"));
        for entry in state {
            lines.push(self.format_entry(entry));
        }
        lines.push(self.dim(&format!(
            "{} line(s), {} item(s)",
            state.len(),
            state.total_quantity()
        )));
        lines.join("\n")
    }

    /// Formats one cart line: `  3 × Coffee Mug (42)  12.50`.
    pub fn format_entry(&self, entry: &CartEntry) -> String {
        format!(
            "{:>3} × {} ({})  {:.2}",
            entry.quantity,
            entry.title,
            self.dim(&entry.id),
            entry.price
        )
    }

    /// Formats the result of a mutation.
    pub fn format_mutation(&self, outcome: &MutationOutput) -> String {
        let quantity = outcome
            .quantity
            .map_or_else(|| "not in cart".to_string(), |q| format!("quantity {q}"));

        if outcome.changed {
            format!("{} {} ({})", self.green("✓"), outcome.id, quantity)
        } else {
            format!(
                "{} {} unchanged ({})",
                self.yellow("•"),
                outcome.id,
                quantity
            )
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
