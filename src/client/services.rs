//! Per-resource service methods. Each one is path construction plus the
//! model round trip in [`TelnyxClient::execute`].

use reqwest::Method;

use super::{TelnyxClient, TelnyxError, query_pairs};
use crate::domain::ResourceId;
use crate::model::{Model, Union};
use crate::resources::{
    Brand, BrandListResponse, DetailRecordsParams, DetailRecordsResponse, ListBrandsParams,
    NumberOrder, NumberOrderResponse, PhoneNumberResponse, PortingOrderResponse, TexmlCall,
    TexmlCallUpdate,
};

impl TelnyxClient {
    /// Register a 10DLC brand.
    ///
    /// Errors:
    /// - [`TelnyxError::Model`] when `brand` lacks a required field (nothing is sent),
    /// - [`TelnyxError::Api`] when the API rejects the registration.
    pub async fn create_brand(&self, brand: &Brand) -> Result<Brand, TelnyxError> {
        let body = brand.to_payload()?;
        self.execute(Method::POST, &["10dlc", "brand"], Vec::new(), Some(body))
            .await
    }

    pub async fn list_brands(
        &self,
        params: &ListBrandsParams,
    ) -> Result<BrandListResponse, TelnyxError> {
        self.execute(Method::GET, &["10dlc", "brand"], query_pairs(params)?, None)
            .await
    }

    pub async fn retrieve_phone_number(
        &self,
        id: &ResourceId,
    ) -> Result<PhoneNumberResponse, TelnyxError> {
        self.execute(
            Method::GET,
            &["phone_numbers", id.as_str()],
            Vec::new(),
            None,
        )
        .await
    }

    /// Order phone numbers.
    pub async fn create_number_order(
        &self,
        order: &NumberOrder,
    ) -> Result<NumberOrderResponse, TelnyxError> {
        let body = order.to_payload()?;
        self.execute(Method::POST, &["number_orders"], Vec::new(), Some(body))
            .await
    }

    pub async fn retrieve_porting_order(
        &self,
        id: &ResourceId,
    ) -> Result<PortingOrderResponse, TelnyxError> {
        self.execute(
            Method::GET,
            &["porting_orders", id.as_str()],
            Vec::new(),
            None,
        )
        .await
    }

    /// Search usage detail records; entries come back as [`crate::resources::DetailRecord`]s.
    pub async fn search_detail_records(
        &self,
        params: &DetailRecordsParams,
    ) -> Result<DetailRecordsResponse, TelnyxError> {
        self.execute(Method::GET, &["detail_records"], query_pairs(params)?, None)
            .await
    }

    /// Hang up or redirect a live TeXML call.
    pub async fn update_texml_call(
        &self,
        account_sid: &ResourceId,
        call_sid: &ResourceId,
        update: &TexmlCallUpdate,
    ) -> Result<TexmlCall, TelnyxError> {
        let body = update.to_payload()?;
        self.execute(
            Method::POST,
            &[
                "texml",
                "Accounts",
                account_sid.as_str(),
                "Calls",
                call_sid.as_str(),
            ],
            Vec::new(),
            Some(body),
        )
        .await
    }
}
