use std::io;

use telnyx::{ApiKey, DetailRecord, DetailRecordsParams, TelnyxClient};

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
    let record_type =
        std::env::var("TELNYX_RECORD_TYPE").unwrap_or_else(|_| "messaging".to_owned());

    let client = TelnyxClient::new(ApiKey::new(api_key)?)?;
    let params = DetailRecordsParams {
        record_type: Some(record_type),
        page_size: Some(20),
        ..Default::default()
    };

    let response = client.search_detail_records(&params).await?;
    for record in response.data() {
        match record {
            DetailRecord::Message(message) => {
                println!("message id: {:?}, parts: {:?}", message.id(), message.parts());
            }
            DetailRecord::Conference(conference) => {
                println!(
                    "conference: {:?}, participants: {:?}",
                    conference.name(),
                    conference.participant_count()
                );
            }
            DetailRecord::Amd(amd) => {
                println!("amd feature: {:?}", amd.feature());
            }
        }
    }
    if let Some(meta) = response.meta() {
        println!("total_results: {:?}", meta.total_results());
    }

    Ok(())
}
