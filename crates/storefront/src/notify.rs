//! User-facing notifications.
//!
//! Presenting a notification is up to the front-end; components only build a
//! [`Notification`] and hand it to a [`Notifier`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::info;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Something the user did worked.
    Confirmation,
    /// The user must act before continuing; shown as a blocking prompt.
    Advisory,
}

/// A titled message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    /// A confirmation notification.
    #[must_use]
    pub fn confirmation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Confirmation,
            title: title.into(),
            message: message.into(),
        }
    }

    /// An advisory (blocking) notification.
    #[must_use]
    pub fn advisory(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Advisory,
            title: title.into(),
            message: message.into(),
        }
    }

    /// "<title> has been added to your cart."
    #[must_use]
    pub fn added_to_cart(product_title: &str) -> Self {
        Self::confirmation(
            "Added to Cart",
            format!("{product_title} has been added to your cart."),
        )
    }

    /// Shown when an order is attempted with nothing in the cart.
    #[must_use]
    pub fn cart_empty() -> Self {
        Self::advisory(
            "Cart is empty",
            "Please add products to your cart before placing an order.",
        )
    }

    /// Shown after an order of `item_count` products.
    #[must_use]
    pub fn order_placed(item_count: usize) -> Self {
        Self::confirmation(
            "Order Placed",
            format!("Your order of {item_count} item(s) has been placed successfully!"),
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Presents notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            kind = ?notification.kind,
            title = %notification.title,
            message = %notification.message,
            "Notification"
        );
    }
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
