use serde_json::{Map, Value};

use crate::model::{FieldDescriptor, FieldKind, WireDateTime, sdk_model, wire_enum};

wire_enum! {
    pub enum PortingOrderStatusValue {
        Draft => "draft",
        InProcess => "in-process",
        Submitted => "submitted",
        Exception => "exception",
        FocDateConfirmed => "foc-date-confirmed",
        CancelPending => "cancel-pending",
        Ported => "ported",
        Cancelled => "cancelled",
    }
}

sdk_model! {
    pub struct PortingOrderStatusDetail as "PortingOrderStatusDetail" {
        FieldDescriptor::optional("code", "code", FieldKind::string()),
        FieldDescriptor::optional("description", "description", FieldKind::string()),
    }
}

impl PortingOrderStatusDetail {
    pub fn code(&self) -> Option<&str> {
        self.inner.get_str("code")
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.get_str("description")
    }
}

sdk_model! {
    pub struct PortingOrderStatus as "PortingOrderStatus" {
        FieldDescriptor::required("value", "value", FieldKind::enumeration::<PortingOrderStatusValue>()),
        FieldDescriptor::optional(
            "details",
            "details",
            FieldKind::model_list::<PortingOrderStatusDetail>(),
        ),
    }
}

impl PortingOrderStatus {
    pub fn value(&self) -> Option<PortingOrderStatusValue> {
        self.inner.get_enum("value")
    }

    pub fn details(&self) -> Vec<PortingOrderStatusDetail> {
        self.inner.get_models("details").unwrap_or_default()
    }
}

sdk_model! {
    pub struct PortingOrder as "PortingOrder" {
        FieldDescriptor::required("id", "id", FieldKind::string()),
        FieldDescriptor::optional("record_type", "record_type", FieldKind::string()),
        FieldDescriptor::required("status", "status", FieldKind::model::<PortingOrderStatus>()),
        FieldDescriptor::optional("phone_numbers", "phone_numbers", FieldKind::string_list()),
        FieldDescriptor::optional("support_key", "support_key", FieldKind::string()),
        FieldDescriptor::optional("parent_support_key", "parent_support_key", FieldKind::string()),
        FieldDescriptor::optional("customer_reference", "customer_reference", FieldKind::string()),
        FieldDescriptor::optional("old_service_provider_ocn", "old_service_provider_ocn", FieldKind::string()),
        FieldDescriptor::optional("requirements_met", "requirements_met", FieldKind::boolean()),
        FieldDescriptor::optional("misc", "misc", FieldKind::MapOfMixed),
        FieldDescriptor::optional("created_at", "created_at", FieldKind::Date),
        FieldDescriptor::optional("updated_at", "updated_at", FieldKind::Date),
    }
}

impl PortingOrder {
    pub fn id(&self) -> Option<&str> {
        self.inner.get_str("id")
    }

    pub fn status(&self) -> Option<PortingOrderStatus> {
        self.inner.get_model("status")
    }

    pub fn phone_numbers(&self) -> Vec<&str> {
        self.inner.get_strs("phone_numbers").unwrap_or_default()
    }

    pub fn support_key(&self) -> Option<&str> {
        self.inner.get_str("support_key")
    }

    pub fn requirements_met(&self) -> Option<bool> {
        self.inner.get_bool("requirements_met")
    }

    /// Free-form attributes; passed through as received.
    pub fn misc(&self) -> Option<&Map<String, Value>> {
        self.inner.get_map("misc")
    }

    pub fn updated_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("updated_at")
    }
}

sdk_model! {
    pub struct PortingOrderResponse as "PortingOrderResponse" {
        FieldDescriptor::required("data", "data", FieldKind::model::<PortingOrder>()),
        FieldDescriptor::optional("meta", "meta", FieldKind::MapOfMixed),
    }
}

impl PortingOrderResponse {
    pub fn data(&self) -> Option<PortingOrder> {
        self.inner.get_model("data")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{FieldValue, Model};

    fn order_payload() -> Value {
        json!({
            "data": {
                "id": "eef10fb8-f3df-4c67-97c5-e18179723222",
                "record_type": "porting_order",
                "status": {
                    "value": "exception",
                    "details": [
                        {"code": "ACCOUNT_NUMBER_MISMATCH", "description": "Account number mismatch"}
                    ]
                },
                "phone_numbers": ["+13035550000", "+13035550001"],
                "support_key": "sr_a12345",
                "parent_support_key": null,
                "requirements_met": false,
                "misc": {"type": "full", "remaining_numbers_action": null},
                "updated_at": "2021-03-19T10:07:15.527000Z"
            },
            "meta": {"phone_numbers_url": "/porting_phone_numbers?filter[porting_order_id]=eef10fb8"}
        })
    }

    #[test]
    fn porting_order_decodes_nested_status() {
        let order = PortingOrderResponse::parse(&order_payload())
            .unwrap()
            .data()
            .unwrap();
        let status = order.status().unwrap();
        assert_eq!(status.value(), Some(PortingOrderStatusValue::Exception));
        assert_eq!(
            status.details()[0].code(),
            Some("ACCOUNT_NUMBER_MISMATCH")
        );
        assert_eq!(order.phone_numbers(), vec!["+13035550000", "+13035550001"]);
        assert_eq!(order.requirements_met(), Some(false));
        assert_eq!(order.misc().map(Map::len), Some(2));
        assert_eq!(
            order.instance().get("parent_support_key"),
            Some(&FieldValue::Null)
        );
    }

    #[test]
    fn porting_order_round_trips_with_nulls() {
        let payload = order_payload();
        let response = PortingOrderResponse::parse(&payload).unwrap();
        assert_eq!(response.to_payload().unwrap(), payload);
    }

    #[test]
    fn nested_status_value_is_required() {
        let mut payload = order_payload();
        payload["data"]["status"] = json!({"details": []});
        let err = PortingOrderResponse::parse(&payload).unwrap_err();
        assert_eq!(err.as_coercion().unwrap().paths(), vec!["data.status.value"]);
    }
}
