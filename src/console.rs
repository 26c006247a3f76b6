//! Interactive terminal session - maps operator commands onto composer
//! transitions.
//!
//! This is the operator-facing layer: every command validates through the
//! composer, prints a ✅/❌ acknowledgment, and leaves the composer state visible
//! via `items` and `products`. Errors are shown verbatim and never swallowed;
//! diagnostic copies go to tracing.

use crate::{
    api::SalesApi,
    core::{Composer, CustomerMode, money},
    errors::Result,
};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt as _, BufReader};

/// Whether the session keeps reading commands after a handled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    /// Keep reading commands
    Continue,
    /// End the session
    Quit,
}

/// Runs the interactive session until `quit` or end of input.
pub async fn run<A: SalesApi>(api: &A, composer: &mut Composer) -> Result<()> {
    println!("SalesDesk - new sale");
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("sale> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if handle_line(api, composer, &line).await == SessionControl::Quit {
            break;
        }
    }
    Ok(())
}

/// Handles one command line against the composer. Split out from [`run`] so the
/// command surface is testable without a terminal.
pub async fn handle_line<A: SalesApi>(
    api: &A,
    composer: &mut Composer,
    line: &str,
) -> SessionControl {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return SessionControl::Continue;
    };

    match command {
        "help" => print_help(),
        "ping" => match api.health_check().await {
            Ok(()) => println!("✅ Backend is reachable"),
            Err(e) => println!("❌ Backend unreachable: {e}"),
        },
        "products" => print_products(composer),
        "customers" => print_customers(composer),
        "select" => match tokens.next().map(str::parse::<u64>) {
            Some(Ok(id)) if composer.catalog().product(id).is_some() => {
                composer.select_product(Some(id));
                println!("✅ Selected product {id}");
            }
            Some(Ok(id)) => println!("❌ Unknown product: {id}. Use `products` to see the list."),
            _ => println!("❌ Usage: select <product-id>"),
        },
        "qty" => match tokens.next().map(str::parse::<i64>) {
            Some(Ok(quantity)) => {
                composer.set_quantity(quantity);
                println!("✅ Quantity set to {quantity}");
            }
            _ => println!("❌ Usage: qty <quantity>"),
        },
        "add" => {
            // `add <id> <qty>` is shorthand for select + qty + add
            if let Some(id_token) = tokens.next() {
                let (Ok(id), Some(Ok(quantity))) =
                    (id_token.parse::<u64>(), tokens.next().map(str::parse::<i64>))
                else {
                    println!("❌ Usage: add [<product-id> <quantity>]");
                    return SessionControl::Continue;
                };
                composer.select_product(Some(id));
                composer.set_quantity(quantity);
            }
            add_staged_item(composer);
        }
        "items" => print_items(composer),
        "remove" => match tokens.next().map(str::parse::<usize>) {
            Some(Ok(position)) if position >= 1 => {
                match composer.remove_line_item(position - 1) {
                    Ok(removed) => println!("✅ Removed '{}'", removed.product_name),
                    Err(e) => println!("❌ {e}"),
                }
            }
            _ => println!("❌ Usage: remove <item-number>"),
        },
        "customer" => handle_customer(composer, &mut tokens),
        "submit" => match composer.submit(api).await {
            Ok(receipt) => println!(
                "✅ Sale completed successfully for {}! Order {} ({} items, total {})",
                receipt.customer,
                receipt.order_id,
                receipt.item_count,
                money::format_amount(receipt.total)
            ),
            Err(e) => {
                tracing::error!("Error creating sale: {e}");
                println!("❌ Error: {e}");
            }
        },
        "cancel" => {
            composer.reset();
            println!("✅ Sale discarded");
        }
        "quit" | "exit" => return SessionControl::Quit,
        other => println!("❌ Unknown command '{other}'. Type `help` for the list."),
    }
    SessionControl::Continue
}

fn add_staged_item(composer: &mut Composer) {
    match composer.add_line_item() {
        Ok(item) => {
            let product_id = item.product_id;
            println!(
                "✅ Added {} x {} ({} each, subtotal {})",
                item.quantity,
                item.product_name,
                money::format_amount(item.unit_price),
                money::format_amount(item.subtotal)
            );
            let staged = composer.staged_quantity(product_id);
            let available = composer.catalog().available_quantity(product_id);
            if staged > available {
                println!(
                    "⚠️ {staged} units staged across this sale but only {available} in stock; \
                     the backend may reject the excess"
                );
            }
        }
        Err(e) => println!("❌ {e}"),
    }
}

fn handle_customer<'a>(composer: &mut Composer, tokens: &mut impl Iterator<Item = &'a str>) {
    match tokens.next() {
        Some("registered") => match tokens.next().map(str::parse::<u64>) {
            Some(Ok(id)) => {
                if let Some(supplier) = composer.catalog().supplier(id) {
                    let name = supplier.name.clone();
                    composer.set_customer_mode(CustomerMode::Registered);
                    composer.select_supplier(Some(id));
                    println!("✅ Customer set to registered customer '{name}'");
                } else {
                    println!("❌ Unknown customer: {id}. Use `customers` to see the list.");
                }
            }
            _ => println!("❌ Usage: customer registered <supplier-id>"),
        },
        Some("regular") => {
            let name = tokens.collect::<Vec<_>>().join(" ");
            if name.trim().is_empty() {
                println!("❌ Usage: customer regular <name>");
            } else {
                composer.set_customer_mode(CustomerMode::Regular);
                composer.set_customer_name(name.trim());
                println!("✅ Customer set to '{}'", name.trim());
            }
        }
        _ => println!("❌ Usage: customer registered <supplier-id> | customer regular <name>"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  products                          list products with availability");
    println!("  customers                         list registered customers");
    println!("  select <product-id>               stage a product");
    println!("  qty <quantity>                    stage a quantity (default 1)");
    println!("  add [<product-id> <quantity>]     add the staged (or given) line item");
    println!("  items                             show the order so far");
    println!("  remove <item-number>              remove a line item");
    println!("  customer registered <id>          sell to a registered customer");
    println!("  customer regular <name>           sell to a walk-in customer");
    println!("  submit                            create the order and its items");
    println!("  cancel                            discard the sale");
    println!("  ping                              check the backend");
    println!("  quit                              leave");
}

fn print_products(composer: &Composer) {
    let catalog = composer.catalog();
    if catalog.products.is_empty() {
        println!("No products available (catalog empty or backend unreachable)");
        return;
    }
    for product in &catalog.products {
        let available = catalog.available_quantity(product.product_id);
        if available == 0 {
            println!(
                "  [{}] {} - {} (OUT OF STOCK)",
                product.product_id, product.name, product.unit_price
            );
        } else {
            println!(
                "  [{}] {} - {} ({available} available)",
                product.product_id, product.name, product.unit_price
            );
        }
    }
}

fn print_customers(composer: &Composer) {
    let suppliers = &composer.catalog().suppliers;
    if suppliers.is_empty() {
        println!("No registered customers");
        return;
    }
    for supplier in suppliers {
        println!("  [{}] {}", supplier.supplier_id, supplier.name);
    }
}

fn print_items(composer: &Composer) {
    if composer.line_items().is_empty() {
        println!("No items yet");
        return;
    }
    println!(
        "  {:<3} {:<24} {:>8} {:>12} {:>12}",
        "#", "Product", "Qty", "Unit Price", "Subtotal"
    );
    for (position, item) in composer.line_items().iter().enumerate() {
        println!(
            "  {:<3} {:<24} {:>8} {:>12} {:>12}",
            position + 1,
            item.product_name,
            item.quantity,
            money::format_amount(item.unit_price),
            money::format_amount(item.subtotal)
        );
    }
    println!(
        "  {:<3} {:<24} {:>8} {:>12} {:>12}",
        "",
        "Total",
        "",
        "",
        money::format_amount(composer.total())
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::Composer, test_utils::*};

    #[tokio::test]
    async fn test_add_shorthand_stages_and_adds() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());

        let control = handle_line(&api, &mut composer, "add 1 3").await;
        assert_eq!(control, SessionControl::Continue);
        assert_eq!(composer.line_items().len(), 1);
        assert_eq!(composer.line_items()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_select_rejects_unknown_product_without_staging() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());

        handle_line(&api, &mut composer, "select 99").await;
        assert_eq!(composer.selected_product_id(), None);
    }

    #[tokio::test]
    async fn test_customer_commands_switch_modes() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());

        handle_line(&api, &mut composer, "customer registered 4").await;
        assert_eq!(composer.customer_mode(), CustomerMode::Registered);
        assert_eq!(composer.selected_supplier_id(), Some(4));

        handle_line(&api, &mut composer, "customer regular Maria Santos").await;
        assert_eq!(composer.customer_mode(), CustomerMode::Regular);
        assert_eq!(composer.customer_name(), "Maria Santos");
    }

    #[tokio::test]
    async fn test_customer_registered_rejects_unknown_supplier() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());

        handle_line(&api, &mut composer, "customer registered 999").await;
        assert_eq!(composer.selected_supplier_id(), None);
    }

    #[tokio::test]
    async fn test_remove_is_one_based() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());
        handle_line(&api, &mut composer, "add 1 2").await;

        handle_line(&api, &mut composer, "remove 1").await;
        assert!(composer.line_items().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_items() {
        let api = MockSalesApi::new().with_order_failure();
        let mut composer = Composer::new(widget_catalog());
        handle_line(&api, &mut composer, "add 1 2").await;
        handle_line(&api, &mut composer, "customer registered 4").await;

        handle_line(&api, &mut composer, "submit").await;
        assert_eq!(composer.line_items().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_success_resets_and_records() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());
        handle_line(&api, &mut composer, "add 1 2").await;
        handle_line(&api, &mut composer, "customer regular Walk-in").await;

        handle_line(&api, &mut composer, "submit").await;
        assert!(composer.line_items().is_empty());
        assert_eq!(api.orders_created(), 1);
        assert_eq!(api.items_created(), 1);
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());
        assert_eq!(
            handle_line(&api, &mut composer, "quit").await,
            SessionControl::Quit
        );
    }

    #[tokio::test]
    async fn test_cancel_discards_sale() {
        let api = MockSalesApi::new();
        let mut composer = Composer::new(widget_catalog());
        handle_line(&api, &mut composer, "add 1 2").await;

        handle_line(&api, &mut composer, "cancel").await;
        assert!(composer.line_items().is_empty());
    }
}
