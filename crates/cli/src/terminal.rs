//! Terminal output.
//!
//! All stdout writes go through here; logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Write;

use pocket_shop_core::Product;
use pocket_shop_storefront::notify::{Notification, NotificationKind, Notifier};

/// Notifier that prints notifications as boxed messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        println!("{}", format_notification(notification));
    }
}

/// Format a notification for the terminal.
///
/// Advisories are framed so they stand out from the product list.
pub fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Confirmation => {
            format!("✔ {}: {}", notification.title, notification.message)
        }
        NotificationKind::Advisory => {
            let rule = "!".repeat(40);
            format!(
                "{rule}\n! {}\n! {}\n{rule}",
                notification.title, notification.message
            )
        }
    }
}

/// Format the cart contents, one numbered line per product.
pub fn format_cart(cart: &[Product]) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = format!("Cart ({} item(s)):", cart.len());
    for (i, product) in cart.iter().enumerate() {
        out.push_str(&format!("\n  {}. {} ({})", i + 1, product.title, product.price));
    }
    out
}

/// Print a block of text.
pub fn print(text: &str) {
    println!("{text}");
}

/// Print the input prompt without a newline.
pub fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Print an error for the user.
pub fn error(message: &str) {
    eprintln!("error: {message}");
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pocket_shop_core::Price;

    use super::*;

    #[test]
    fn test_format_confirmation() {
        let text = format_notification(&Notification::added_to_cart("Phone X"));
        assert_eq!(text, "✔ Added to Cart: Phone X has been added to your cart.");
    }

    #[test]
    fn test_format_advisory_is_framed() {
        let text = format_notification(&Notification::cart_empty());
        assert!(text.starts_with("!!!!"));
        assert!(text.contains("! Cart is empty"));
        assert!(text.ends_with("!!!!"));
    }

    #[test]
    fn test_format_cart() {
        assert_eq!(format_cart(&[]), "Your cart is empty.");

        let cart = vec![
            Product::new(1, "Phone X").with_price(Price::from_str("549").unwrap_or_default()),
            Product::new(2, "Phone Y"),
        ];
        let text = format_cart(&cart);
        assert!(text.starts_with("Cart (2 item(s)):"));
        assert!(text.contains("1. Phone X ($549.00)"));
        assert!(text.contains("2. Phone Y ($0.00)"));
    }
}
