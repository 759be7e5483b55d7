//! Output formatting for the CLI.

use cart_store::cart::Cart;
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart as a table, or as JSON in JSON mode.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(&CartView::from(cart));
            return;
        }

        if cart.is_empty() {
            self.info("Cart is empty.");
            return;
        }

        const WIDTHS: [usize; 5] = [6, 40, 10, 6, 10];
        self.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &WIDTHS);
        for product in cart {
            let id = product.id.to_string();
            let title = truncate(&product.title, WIDTHS[1]);
            let price = format_price(product.price);
            let amount = product.amount.to_string();
            let total = format_price(product.line_total());
            self.table_row(&[&id, &title, &price, &amount, &total], &WIDTHS);
        }
        println!();
        self.kv("items", &cart.item_count().to_string());
        self.kv("subtotal", &style(format_price(cart.subtotal())).bold().to_string());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// JSON shape printed by `cart show --json`.
#[derive(serde::Serialize)]
struct CartView<'a> {
    items: &'a Cart,
    item_count: i64,
    subtotal: f64,
}

impl<'a> From<&'a Cart> for CartView<'a> {
    fn from(cart: &'a Cart) -> Self {
        Self {
            items: cart,
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Format a price in reais.
pub fn format_price(value: f64) -> String {
    format!("R$ {:.2}", value)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(179.9), "R$ 179.90");
        assert_eq!(format_price(0.0), "R$ 0.00");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Tênis", 10), "Tênis");
        assert_eq!(truncate("Tênis de Caminhada", 6), "Tênis…");
    }

    #[test]
    fn test_cart_view_totals() {
        use cart_store::catalog::Product;

        let cart = Cart::new()
            .with_added(Product::new(1, "a", 10.0, "i"))
            .with_added(Product::new(1, "a", 10.0, "i"));
        let value = serde_json::to_value(CartView::from(&cart)).unwrap();
        assert_eq!(value["item_count"], 2);
        assert_eq!(value["subtotal"], 20.0);
        assert_eq!(value["items"][0]["amount"], 2);
    }
}
