//! Usage detail records. The search endpoint returns a mixed list whose
//! entries are told apart by `record_type`.

use serde::Serialize;

use super::common::PaginationMeta;
use crate::model::{FieldDescriptor, FieldKind, WireDateTime, sdk_model, sdk_union, wire_enum};

wire_enum! {
    pub enum AmdFeature {
        MachineDetection => "machine_detection",
        PremiumMachineDetection => "premium_machine_detection",
    }
}

sdk_model! {
    pub struct MessageDetailRecord as "MessageDetailRecord" {
        FieldDescriptor::required("record_type", "record_type", FieldKind::string()),
        FieldDescriptor::optional("id", "id", FieldKind::string()),
        FieldDescriptor::optional("direction", "direction", FieldKind::string()),
        FieldDescriptor::optional("message_type", "message_type", FieldKind::string()),
        FieldDescriptor::optional("status", "status", FieldKind::string()),
        FieldDescriptor::optional("parts", "parts", FieldKind::integer()),
        FieldDescriptor::optional("cost", "cost", FieldKind::string()),
        FieldDescriptor::optional("currency", "currency", FieldKind::string()),
        FieldDescriptor::optional("sent_at", "sent_at", FieldKind::Date),
        FieldDescriptor::optional("tags", "tags", FieldKind::string_list()),
    }
}

impl MessageDetailRecord {
    pub fn id(&self) -> Option<&str> {
        self.inner.get_str("id")
    }

    pub fn parts(&self) -> Option<i64> {
        self.inner.get_i64("parts")
    }

    pub fn sent_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("sent_at")
    }
}

sdk_model! {
    pub struct ConferenceDetailRecord as "ConferenceDetailRecord" {
        FieldDescriptor::required("record_type", "record_type", FieldKind::string()),
        FieldDescriptor::optional("id", "id", FieldKind::string()),
        FieldDescriptor::optional("name", "name", FieldKind::string()),
        FieldDescriptor::optional("participant_count", "participant_count", FieldKind::integer()),
        FieldDescriptor::optional("duration_sec", "duration_sec", FieldKind::integer()),
        FieldDescriptor::optional("cost", "cost", FieldKind::string()),
        FieldDescriptor::optional("currency", "currency", FieldKind::string()),
        FieldDescriptor::optional("started_at", "started_at", FieldKind::Date),
        FieldDescriptor::optional("ended_at", "ended_at", FieldKind::Date),
    }
}

impl ConferenceDetailRecord {
    pub fn name(&self) -> Option<&str> {
        self.inner.get_str("name")
    }

    pub fn participant_count(&self) -> Option<i64> {
        self.inner.get_i64("participant_count")
    }
}

sdk_model! {
    /// Answering machine detection usage.
    pub struct AmdDetailRecord as "AmdDetailRecord" {
        FieldDescriptor::required("record_type", "record_type", FieldKind::string()),
        FieldDescriptor::optional("id", "id", FieldKind::string()),
        FieldDescriptor::optional("feature", "feature", FieldKind::enumeration::<AmdFeature>()),
        FieldDescriptor::optional("call_control_id", "call_control_id", FieldKind::string()),
        FieldDescriptor::optional("cost", "cost", FieldKind::string()),
        FieldDescriptor::optional("currency", "currency", FieldKind::string()),
        FieldDescriptor::optional("invoked_at", "invoked_at", FieldKind::Date),
    }
}

impl AmdDetailRecord {
    pub fn feature(&self) -> Option<AmdFeature> {
        self.inner.get_enum("feature")
    }

    pub fn invoked_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("invoked_at")
    }
}

sdk_union! {
    /// One entry of a detail record search.
    pub enum DetailRecord as "DetailRecord" tagged by "record_type" {
        Message(MessageDetailRecord) => "message_detail_record",
        Conference(ConferenceDetailRecord) => "conference_detail_record",
        Amd(AmdDetailRecord) => "amd_detail_record",
    }
}

sdk_model! {
    pub struct DetailRecordsResponse as "DetailRecordsResponse" {
        FieldDescriptor::required("data", "data", FieldKind::variant_list::<DetailRecord>()),
        FieldDescriptor::optional("meta", "meta", FieldKind::model::<PaginationMeta>()),
    }
}

impl DetailRecordsResponse {
    pub fn data(&self) -> Vec<DetailRecord> {
        self.inner.get_variants("data").unwrap_or_default()
    }

    pub fn meta(&self) -> Option<PaginationMeta> {
        self.inner.get_model("meta")
    }
}

/// Query parameters of the detail record search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetailRecordsParams {
    #[serde(rename = "filter[record_type]", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(rename = "filter[date_range]", skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(rename = "page[number]", skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(rename = "page[size]", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}
