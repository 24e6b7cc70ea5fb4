//! Walk an order desk through create, list, edit, report and delete
//!
//! Run with `RUST_LOG=order_desk=debug` to see the engine's events.

use anyhow::Result;
use order_desk::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "demos/order_desk/desk.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("order_desk=info")),
        )
        .init();

    println!("📦 Order Desk Example\n");

    let config = DeskConfig::from_yaml_file(CONFIG_PATH)?;
    let store = InMemoryStore::from_config(&config);
    let desk = OrderDesk::new(Arc::new(store.clone()), Arc::new(store)).with_config(&config);

    println!("🛒 Items on offer:");
    for item in desk.available_items().await? {
        println!("   {} - {} ({} in stock)", item.product_name, item.price, item.quantity_available);
    }

    println!("\n📝 Creating orders...\n");
    let requests = [
        OrderRequest::new("Ada Lovelace").line(1, 2).line(3, 10),
        OrderRequest::new("Grace Hopper").line(2, 1).blank_line(1),
        OrderRequest::new("Alan Turing").line(2, 5),
        OrderRequest::new("Edsger Dijkstra"),
    ];

    let mut created = Vec::new();
    for request in &requests {
        let response = desk.create_order(request).await?;
        println!("{}\n", response.message);
        if let Some(order_id) = response.order_id {
            created.push(order_id);
        }
    }

    match desk.create_order(&OrderRequest::new("")).await {
        Ok(_) => println!("❌ Blank customer name was accepted"),
        Err(err) => println!("⚠️  {}\n", err),
    }

    println!("📋 Listing page 1:");
    let listing = desk.list_orders(&ListingQuery::default()).await?;
    for order in &listing.orders {
        println!(
            "   #{} {} [{}] total {}",
            order.order_id,
            order.customer_name,
            order.status,
            order.total_amount()
        );
    }
    println!("   pages: {:?}\n", listing.pages);

    if let Some(&first) = created.first() {
        println!("✏️  Editing order {}...", first);
        let edit = desk
            .edit_order(first, &OrderRequest::new("Ada King").line(1, 1))
            .await?;
        println!("{}\n", edit.message);
    }

    for selector in [1, 2, 3] {
        let response = desk.generate_report(selector).await?;
        let label = response.reports.get(&selector).copied().unwrap_or("Unknown report");
        println!("📊 {}:", label);
        println!("{}\n", serde_json::to_string_pretty(&response.report)?);
    }

    if let Some(&last) = created.last() {
        let confirmation = desk.confirm_delete(last).await?;
        println!("🗑️  {}", confirmation.message);
        let deleted = desk.delete_order(last).await?;
        println!("{}", deleted.message);
    }

    Ok(())
}
