//! Basic trading example demonstrating the Nord Trade SDK.
//!
//! This example shows how to:
//! 1. Initialize the client with a wallet keypair
//! 2. Open a session
//! 3. Place a limit order
//! 4. Replace it atomically
//! 5. Cancel the replacement
//! 6. Revoke the session

use nord_trade_sdk::proto::atomic_subaction_result_kind::Inner;
use nord_trade_sdk::{
    AtomicSubaction, ClientConfig, MarketScale, NordClient, NordKeypair, OrderParams, Side,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("=== Nord Trade SDK Example ===\n");

    // Load keypair - you can use any of these methods:
    // 1. From file (64-byte JSON array)
    // let wallet = NordKeypair::from_file("./my_keypair.json")?;

    // 2. Generate a new random keypair (for testing)
    let wallet = NordKeypair::generate();

    println!("Wallet: {}\n", wallet.pubkey_string());

    // Set NORD_WEB_SERVER_URL env var to override the endpoint
    let config = ClientConfig::default();
    let mut client = NordClient::new(wallet, config)?;

    // === Step 1: Open a session ===
    println!("1. Creating session...");
    let session = client.create_session(None).await?;
    println!("   Session id: {}\n", session.result.session_id);

    // === Step 2: Place a limit order ===
    let scale = MarketScale {
        price_decimals: 2,
        size_decimals: 3,
    };
    let order = OrderParams {
        market_id: 0,
        scale,
        side: Side::Buy,
        price: Decimal::new(18550, 2),
        size: Decimal::new(1, 1),
        ..Default::default()
    };

    println!("2. Placing order: {} {} @ {}", order.side, order.size, order.price);
    let placed = client.place_order(&order, None).await?;
    let Some(order_id) = placed.result.order_id() else {
        println!("   Order filled immediately: {}\n", placed.result.filled_size());
        client.revoke_session().await?;
        return Ok(());
    };
    println!("   Resting as order {}\n", order_id);

    // === Step 3: Replace it atomically ===
    println!("3. Replacing order {} in one atomic action...", order_id);
    let replacement = OrderParams {
        price: Decimal::new(18500, 2),
        ..order
    };
    let batch = [
        AtomicSubaction::Cancel { order_id },
        AtomicSubaction::Place(replacement),
    ];
    let replaced = client.atomic(None, &batch).await?;
    println!("   {} sub-results\n", replaced.result.results.len());

    // === Step 4: Cancel the replacement if it rests ===
    if let Some(Inner::PlaceOrderResult(result)) =
        replaced.result.results.get(1).and_then(|r| r.inner.as_ref())
    {
        if let Some(new_id) = result.order_id() {
            println!("4. Cancelling order {}...", new_id);
            let cancelled = client.cancel_order(new_id, None).await?;
            println!("   Cancelled in action {}\n", cancelled.action_id);
        }
    }

    // === Step 5: Revoke the session ===
    println!("5. Revoking session...");
    client.revoke_session().await?;
    println!("   Done.");

    Ok(())
}
