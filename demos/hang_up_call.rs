use std::io;

use telnyx::{ApiKey, ResourceId, TelnyxClient, TexmlCallUpdate};

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
    let account_sid = std::env::var("TELNYX_ACCOUNT_SID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_ACCOUNT_SID environment variable is required",
        )
    })?;
    let call_sid = std::env::var("TELNYX_CALL_SID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELNYX_CALL_SID environment variable is required",
        )
    })?;

    let client = TelnyxClient::new(ApiKey::new(api_key)?)?;
    let update = match std::env::var("TELNYX_REDIRECT_URL") {
        Ok(url) => TexmlCallUpdate::redirect(url, None)?,
        Err(_) => TexmlCallUpdate::hang_up()?,
    };

    let call = client
        .update_texml_call(
            &ResourceId::new(account_sid)?,
            &ResourceId::new(call_sid)?,
            &update,
        )
        .await?;
    println!("call_sid: {:?}, status: {:?}", call.call_sid(), call.status());

    Ok(())
}
