//! Interactive storefront screen.
//!
//! # Usage
//!
//! ```bash
//! pocket-shop browse
//! > search phone
//! > add 1
//! > order
//! ```
//!
//! The catalog loads in the background; commands can be typed while it is
//! loading. When a load lands, the list is redrawn.

use std::sync::Arc;

use pocket_shop_storefront::catalog::CatalogClient;
use pocket_shop_storefront::config::StorefrontConfig;
use pocket_shop_storefront::error::Result;
use pocket_shop_storefront::notify::Notifier;
use pocket_shop_storefront::screen::ScreenController;
use pocket_shop_storefront::store::Store;
use pocket_shop_storefront::view::CatalogView;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::terminal::{self, TerminalNotifier};

const HELP: &str = "\
Commands:
  search <text>   filter products by title or description
  search          clear the filter
  add <n>         add product number <n> to the cart
  cart            show the cart
  clear           empty the cart
  order           place the order
  reload          fetch the catalog again
  list            redraw the product list
  help            show this help
  quit            leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Add(usize),
    Cart,
    Clear,
    Order,
    Reload,
    List,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Everything after `search ` is the query, spaces included.
///
/// # Errors
///
/// Returns a message for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    let command = match word.to_lowercase().as_str() {
        "search" | "s" | "/" => Command::Search(rest.to_string()),
        "add" | "a" => {
            let position = rest
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("usage: add <n> (got '{}')", rest.trim()))?;
            Command::Add(position)
        }
        "cart" => Command::Cart,
        "clear" => Command::Clear,
        "order" => Command::Order,
        "reload" => Command::Reload,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

/// Run the interactive screen until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the screen cannot be rendered.
pub async fn run(config: &StorefrontConfig) -> Result<()> {
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let store = Store::new();
    let screen = ScreenController::new(
        CatalogClient::new(&config.catalog)?,
        store.clone(),
        Arc::clone(&notifier),
    );
    let mut view = CatalogView::new(store.clone(), notifier);

    let mut changes = store.subscribe();
    let mut shown_catalog = store.catalog();

    terminal::print(HELP);
    terminal::print("Loading products...");
    let mounting = screen.clone();
    tokio::spawn(async move { mounting.mount().await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    terminal::prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => execute(command, &screen, &mut view)?,
                    Err(message) => terminal::error(&message),
                }
                terminal::prompt();
            }
            Ok(()) = changes.changed() => {
                let catalog = store.catalog();
                if !Arc::ptr_eq(&catalog, &shown_catalog) {
                    debug!(count = catalog.len(), "Catalog changed, redrawing");
                    shown_catalog = catalog;
                    terminal::print("");
                    draw(&screen, &mut view)?;
                    terminal::prompt();
                }
            }
        }
    }

    screen.unmount();
    Ok(())
}

fn execute(
    command: Command,
    screen: &ScreenController<CatalogClient>,
    view: &mut CatalogView,
) -> Result<()> {
    match command {
        Command::Search(query) => {
            view.set_query(query);
            draw(screen, view)?;
        }
        Command::Add(position) => {
            if view.add_to_cart(position).is_none() {
                terminal::error(&format!("no product #{position} in the list"));
            }
            terminal::print(&screen.footer());
        }
        Command::Cart => {
            terminal::print(&terminal::format_cart(&screen.store().cart()));
            terminal::print(&screen.footer());
        }
        Command::Clear => {
            screen.clear_cart();
            terminal::print("Cart cleared.");
            terminal::print(&screen.footer());
        }
        Command::Order => {
            screen.place_order();
            terminal::print(&screen.footer());
        }
        Command::Reload => {
            terminal::print("Reloading products...");
            drop(screen.spawn_reload());
        }
        Command::List => draw(screen, view)?,
        Command::Help => terminal::print(HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn draw(screen: &ScreenController<CatalogClient>, view: &mut CatalogView) -> Result<()> {
    terminal::print(&view.render()?);
    terminal::print(&screen.footer());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \r\n"), Ok(None));
    }

    #[test]
    fn test_search_keeps_query_verbatim() {
        assert_eq!(
            parse_command("search phone"),
            Ok(Some(Command::Search("phone".to_string())))
        );
        assert_eq!(
            parse_command("search  Phone X "),
            Ok(Some(Command::Search(" Phone X ".to_string())))
        );
        assert_eq!(parse_command("search"), Ok(Some(Command::Search(String::new()))));
    }

    #[test]
    fn test_add_requires_number() {
        assert_eq!(parse_command("add 3"), Ok(Some(Command::Add(3))));
        assert_eq!(parse_command("ADD  12 "), Ok(Some(Command::Add(12))));
        assert!(parse_command("add").is_err());
        assert!(parse_command("add three").is_err());
    }

    #[test]
    fn test_simple_commands_and_aliases() {
        assert_eq!(parse_command("order"), Ok(Some(Command::Order)));
        assert_eq!(parse_command("cart"), Ok(Some(Command::Cart)));
        assert_eq!(parse_command("reload"), Ok(Some(Command::Reload)));
        assert_eq!(parse_command("ls"), Ok(Some(Command::List)));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("checkout").unwrap_err();
        assert!(err.contains("checkout"));
    }
}
