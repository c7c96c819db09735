use crate::model::{FieldDescriptor, FieldKind, WireDateTime, sdk_model, wire_enum};

wire_enum! {
    pub enum PhoneNumberStatus {
        PurchasePending => "purchase-pending",
        PurchaseFailed => "purchase-failed",
        PortPending => "port-pending",
        Active => "active",
        Deleted => "deleted",
        PortFailed => "port-failed",
        EmergencyOnly => "emergency-only",
        PortedOut => "ported-out",
        PortOutPending => "port-out-pending",
    }
}

sdk_model! {
    /// A phone number owned by the account.
    pub struct PhoneNumberRecord as "PhoneNumberRecord" {
        FieldDescriptor::required("id", "id", FieldKind::string()),
        FieldDescriptor::optional("record_type", "record_type", FieldKind::string()),
        FieldDescriptor::required("phone_number", "phone_number", FieldKind::string()),
        FieldDescriptor::optional("status", "status", FieldKind::enumeration::<PhoneNumberStatus>()),
        FieldDescriptor::optional("tags", "tags", FieldKind::string_list()),
        FieldDescriptor::optional("connection_id", "connection_id", FieldKind::string()),
        FieldDescriptor::optional("billing_group_id", "billing_group_id", FieldKind::string()),
        FieldDescriptor::optional("customer_reference", "customer_reference", FieldKind::string()),
        FieldDescriptor::optional("emergency_enabled", "emergency_enabled", FieldKind::boolean()),
        FieldDescriptor::optional("purchased_at", "purchased_at", FieldKind::Date),
        FieldDescriptor::optional("created_at", "created_at", FieldKind::Date),
        FieldDescriptor::optional("updated_at", "updated_at", FieldKind::Date),
    }
}

impl PhoneNumberRecord {
    pub fn id(&self) -> Option<&str> {
        self.inner.get_str("id")
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.inner.get_str("phone_number")
    }

    pub fn status(&self) -> Option<PhoneNumberStatus> {
        self.inner.get_enum("status")
    }

    pub fn tags(&self) -> Vec<&str> {
        self.inner.get_strs("tags").unwrap_or_default()
    }

    pub fn billing_group_id(&self) -> Option<&str> {
        self.inner.get_str("billing_group_id")
    }

    pub fn emergency_enabled(&self) -> Option<bool> {
        self.inner.get_bool("emergency_enabled")
    }

    pub fn purchased_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("purchased_at")
    }
}

sdk_model! {
    pub struct PhoneNumberResponse as "PhoneNumberResponse" {
        FieldDescriptor::required("data", "data", FieldKind::model::<PhoneNumberRecord>()),
    }
}

impl PhoneNumberResponse {
    pub fn data(&self) -> Option<PhoneNumberRecord> {
        self.inner.get_model("data")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{FieldErrorKind, Model};

    #[test]
    fn phone_number_response_decodes_nested_record() {
        let response = PhoneNumberResponse::parse_str(
            r#"{
                "data": {
                    "id": "1293384261075731499",
                    "record_type": "phone_number",
                    "phone_number": "+19705555098",
                    "status": "active",
                    "tags": ["tag_1", "tag_2"],
                    "billing_group_id": "86f58db9-0fe3-4adc-9d1f-46e66e6e9323",
                    "emergency_enabled": true,
                    "purchased_at": "2019-10-23T18:10:00.000Z",
                    "created_at": "2019-10-23T18:10:00.000Z"
                }
            }"#,
        )
        .unwrap();

        let record = response.data().unwrap();
        assert_eq!(record.id(), Some("1293384261075731499"));
        assert_eq!(record.status(), Some(PhoneNumberStatus::Active));
        assert_eq!(record.tags(), vec!["tag_1", "tag_2"]);
        assert_eq!(record.emergency_enabled(), Some(true));
        assert_eq!(
            record.purchased_at().map(WireDateTime::as_str),
            Some("2019-10-23T18:10:00.000Z")
        );
    }

    #[test]
    fn nested_failures_are_prefixed_with_data() {
        let err = PhoneNumberResponse::parse(&json!({
            "data": {
                "id": "1",
                "phone_number": 19705555098_i64,
                "status": "sold",
                "created_at": "2019-13-40"
            }
        }))
        .unwrap_err();
        let coercion = err.as_coercion().unwrap();
        assert_eq!(
            coercion.paths(),
            vec!["data.phone_number", "data.status", "data.created_at"]
        );
        assert!(matches!(
            coercion.failure_at("data.created_at").unwrap().kind,
            FieldErrorKind::DateParse { .. }
        ));
    }

    #[test]
    fn malformed_json_is_reported_as_json_error() {
        let err = PhoneNumberResponse::parse_str("{\"data\": ").unwrap_err();
        assert!(matches!(err, crate::model::ModelError::Json(_)));
    }
}
