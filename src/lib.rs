//! Typed models and client for the Telnyx v2 REST API.
//!
//! Request and response bodies are typed models built on a small mapping
//! engine ([`model`]): each model carries field descriptors, JSON payloads are
//! coerced into them with path-aware errors, and polymorphic payloads are
//! resolved into typed union variants. A thin async client ([`client`]) sends
//! the models and decodes the replies.
//!
//! ```rust,no_run
//! use telnyx::{ApiKey, Brand, BrandOptions, EntityType, TelnyxClient, Vertical};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telnyx::TelnyxError> {
//!     let client = TelnyxClient::new(ApiKey::new("KEY...")?)?;
//!     let brand = Brand::with(
//!         "US",
//!         "Acme",
//!         "ops@acme.test",
//!         EntityType::PrivateProfit,
//!         Vertical::Technology,
//!         BrandOptions::default(),
//!     )?;
//!     let created = client.create_brand(&brand).await?;
//!     println!("{:?}", created.brand_id());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod model;
pub mod resources;

pub use client::{TelnyxClient, TelnyxClientBuilder, TelnyxError};
pub use domain::{ApiKey, PhoneNumber, ResourceId, ValidationError};
pub use model::{Model, ModelError, Union, WireDateTime, WireEnum};
pub use resources::{
    Brand, BrandListResponse, BrandOptions, DetailRecord, DetailRecordsParams,
    DetailRecordsResponse, EntityType, ListBrandsParams, NumberOrder, NumberOrderOptions,
    NumberOrderResponse, PhoneNumberResponse, PortingOrderResponse, TexmlCall, TexmlCallUpdate,
    Vertical,
};
