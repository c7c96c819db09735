use std::io;

use telnyx::{ApiKey, Brand, BrandOptions, EntityType, TelnyxClient, Vertical};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("TELNYX_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_API_KEY environment variable is required",
        )
    })?;
    let email = std::env::var("TELNYX_BRAND_EMAIL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_BRAND_EMAIL environment variable is required",
        )
    })?;
    let display_name =
        std::env::var("TELNYX_BRAND_NAME").unwrap_or_else(|_| "Example Brand".to_owned());

    let client = TelnyxClient::new(ApiKey::new(api_key)?)?;
    let brand = Brand::with(
        "US",
        display_name,
        email,
        EntityType::PrivateProfit,
        Vertical::Technology,
        BrandOptions {
            mock: Some(true),
            ..Default::default()
        },
    )?;

    let created = client.create_brand(&brand).await?;
    println!(
        "brand_id: {:?}, identity_status: {:?}, created_at: {:?}",
        created.brand_id(),
        created.identity_status(),
        created.created_at().map(|at| at.as_str())
    );

    Ok(())
}
