//! API resources: request and response models built on [`crate::model`].

mod brand;
mod common;
mod detail_record;
mod number_order;
mod phone_number;
mod porting_order;
mod texml;

pub use brand::{
    Brand, BrandIdentityStatus, BrandListResponse, BrandOptions, BrandRecord, EntityType,
    ListBrandsParams, Vertical,
};
pub use common::{ApiError, ApiErrorResponse, PaginationMeta};
pub use detail_record::{
    AmdDetailRecord, AmdFeature, ConferenceDetailRecord, DetailRecord, DetailRecordsParams,
    DetailRecordsResponse, MessageDetailRecord,
};
pub use number_order::{
    NumberOrder, NumberOrderOptions, NumberOrderResponse, NumberOrderStatus, OrderedNumber,
};
pub use phone_number::{PhoneNumberRecord, PhoneNumberResponse, PhoneNumberStatus};
pub use porting_order::{
    PortingOrder, PortingOrderResponse, PortingOrderStatus, PortingOrderStatusDetail,
    PortingOrderStatusValue,
};
pub use texml::{
    CallUpdateStatus, HttpMethod, TexmlCall, TexmlCallStatus, TexmlCallUpdate, UpdateCallStatus,
    UpdateCallUrl,
};
