mod cursor;
mod discovery;
mod feed;
mod integration;
mod inventory;
mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cursor::in_memory::InMemoryCursorStore;
use crate::cursor::{AdvancePolicy, CursorStore};
use crate::discovery::RemoteResource;
use crate::feed::hal_feed::HalEventFeed;
use crate::feed::{EventFeed, ORDER_COMPLETED, PRODUCTS_ADDED};
use crate::integration::catalog::CatalogIntegration;
use crate::integration::orders::OrdersIntegration;
use crate::inventory::in_memory::InMemoryInventory;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Delay between polling ticks, per stream.
    #[arg(long, default_value_t = 5000)]
    pub poll_interval_ms: u64,

    #[arg(long, default_value = "localhost")]
    pub catalog_host: String,

    #[arg(long, default_value_t = 7070)]
    pub catalog_port: u16,

    #[arg(long, default_value = "localhost")]
    pub orders_host: String,

    #[arg(long, default_value_t = 7072)]
    pub orders_port: u16,

    /// What happens when an event publishes older than the stored cursor.
    #[arg(long, value_enum, default_value = "last-processed")]
    pub cursor_policy: AdvancePolicy,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("inventory_sync=debug".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let feed: Arc<dyn EventFeed> = Arc::new(
        HalEventFeed::new()
            .register(
                PRODUCTS_ADDED,
                RemoteResource::new(
                    "catalog",
                    &args.catalog_host,
                    args.catalog_port,
                    false,
                    "events",
                ),
            )
            .register(
                ORDER_COMPLETED,
                RemoteResource::new(
                    "orders",
                    &args.orders_host,
                    args.orders_port,
                    false,
                    "events",
                ),
            ),
    );

    let inventory = Arc::new(InMemoryInventory::default());
    let cursors: Arc<dyn CursorStore> = Arc::new(InMemoryCursorStore::default());

    let catalog = CatalogIntegration::new(
        feed.clone(),
        inventory,
        cursors.clone(),
        args.cursor_policy,
    );
    let orders = OrdersIntegration::new(feed, cursors, args.cursor_policy);

    let interval = Duration::from_millis(args.poll_interval_ms);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            if let Err(error) = catalog.run_once().await {
                error!("catalog integration tick failed: {error:?}");
            }
        }
    });

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            if let Err(error) = orders.run_once().await {
                error!("orders integration tick failed: {error:?}");
            }
        }
    });

    info!(
        interval_ms = args.poll_interval_ms,
        policy = %args.cursor_policy,
        "inventory sync running"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    Ok(())
}
