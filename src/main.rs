//! Walks a seller and a buyer through one listing: register, list, buy, cancel.

use property_market::config::MarketConfig;
use property_market::lifecycle::{setup_tracing, MarketSystem};
use property_market::model::{PropertyCreate, Registration};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

fn registration(username: &str, name: &str) -> Registration {
    Registration {
        username: username.to_string(),
        password: format!("{username}-demo-password"),
        name: name.to_string(),
        email: format!("{username}@example.com"),
        phone: "555-0100".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = MarketConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting property market");
    let system = MarketSystem::new(config);

    let span = tracing::info_span!("registration");
    let (seller, buyer, late_buyer) = async {
        let seller = system.accounts.register(registration("asha", "Asha Rao")).await?;
        let buyer = system.accounts.register(registration("ben", "Ben Okafor")).await?;
        let late_buyer = system.accounts.register(registration("chen", "Chen Wei")).await?;
        Ok::<_, property_market::user_actor::UserError>((seller, buyer, late_buyer))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("listing");
    let property_id = async {
        info!("Creating listing");
        system
            .properties
            .create_listing(PropertyCreate {
                title: "Two-bed flat near the park".to_string(),
                description: "Sunny, third floor, lift".to_string(),
                price: Decimal::new(245_000, 0),
                address: "14 Lake Road".to_string(),
                city: "Pune".to_string(),
                zip_code: "411001".to_string(),
                country: "India".to_string(),
                bedrooms: 2,
                bathrooms: 1,
                area: Decimal::new(850, 0),
                image_url: None,
                seller_id: seller.user_id.clone(),
                locality_id: None,
            })
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let snapshot = system
        .properties
        .fetch_current(&property_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("listing {property_id} vanished"))?;

    let span = tracing::info_span!("purchase");
    let purchase = async {
        info!("Buyer purchasing listing");
        system.purchases.purchase(&snapshot, &buyer.user_id).await
    }
    .instrument(span)
    .await;

    match purchase {
        Ok(transaction_id) => {
            info!(%transaction_id, "Purchase succeeded");

            // This snapshot predates the sale and still shows the listing as available.
            match system.purchases.purchase(&snapshot, &late_buyer.user_id).await {
                Ok(_) => error!("Listing sold twice"),
                Err(e) => info!(error = %e, "Second purchase rejected"),
            }

            let span = tracing::info_span!("cancellation");
            let cancelled = system.purchases.cancel(&transaction_id).instrument(span).await;
            match cancelled {
                Ok(()) => info!(%transaction_id, "Transaction cancelled, listing available again"),
                Err(e) => error!(error = %e, "Cancellation failed"),
            }

            let history = system
                .purchases
                .list_transactions_for_user(&buyer.user_id)
                .await
                .map_err(|e| e.to_string())?;
            for t in &history {
                info!(id = %t.id, status = %t.status, price = %t.price, "Buyer history");
            }
        }
        Err(e) => error!(error = %e, "Purchase failed"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
