use crate::domain::PhoneNumber;
use crate::model::{
    FieldDescriptor, FieldKind, Model, ModelError, WireDateTime, sdk_model, wire_enum,
};

wire_enum! {
    pub enum NumberOrderStatus {
        Pending => "pending",
        Success => "success",
        Failure => "failure",
    }
}

sdk_model! {
    /// One number inside a number order.
    pub struct OrderedNumber as "OrderedNumber" {
        FieldDescriptor::optional("id", "id", FieldKind::string()),
        FieldDescriptor::required("phone_number", "phone_number", FieldKind::string()),
        FieldDescriptor::optional("status", "status", FieldKind::enumeration::<NumberOrderStatus>()),
        FieldDescriptor::optional("record_type", "record_type", FieldKind::string()),
    }
}

impl OrderedNumber {
    pub fn phone_number(&self) -> Option<&str> {
        self.inner.get_str("phone_number")
    }

    pub fn status(&self) -> Option<NumberOrderStatus> {
        self.inner.get_enum("status")
    }
}

sdk_model! {
    pub struct NumberOrder as "NumberOrder" {
        FieldDescriptor::optional("id", "id", FieldKind::string()),
        FieldDescriptor::required("phone_numbers", "phone_numbers", FieldKind::model_list::<OrderedNumber>()),
        FieldDescriptor::optional("phone_numbers_count", "phone_numbers_count", FieldKind::integer()),
        FieldDescriptor::optional("status", "status", FieldKind::enumeration::<NumberOrderStatus>()),
        FieldDescriptor::optional("connection_id", "connection_id", FieldKind::string()),
        FieldDescriptor::optional("messaging_profile_id", "messaging_profile_id", FieldKind::string()),
        FieldDescriptor::optional("billing_group_id", "billing_group_id", FieldKind::string()),
        FieldDescriptor::optional("customer_reference", "customer_reference", FieldKind::string()),
        FieldDescriptor::optional("created_at", "created_at", FieldKind::Date),
        FieldDescriptor::optional("updated_at", "updated_at", FieldKind::Date),
    }
}

/// Optional fields accepted by [`NumberOrder::with`].
#[derive(Debug, Clone, Default)]
pub struct NumberOrderOptions {
    pub connection_id: Option<String>,
    pub messaging_profile_id: Option<String>,
    pub billing_group_id: Option<String>,
    pub customer_reference: Option<String>,
}

impl NumberOrder {
    /// Build an order for `phone_numbers`, sent in E.164 form.
    pub fn with(
        phone_numbers: Vec<PhoneNumber>,
        options: NumberOrderOptions,
    ) -> Result<Self, ModelError> {
        let mut entries = Vec::with_capacity(phone_numbers.len());
        for number in &phone_numbers {
            let mut entry = OrderedNumber::empty()?;
            entry.inner.put("phone_number", number.e164());
            entries.push(entry);
        }

        let mut order = Self::empty()?;
        order.inner.put_models("phone_numbers", entries);
        let references = [
            ("connection_id", options.connection_id),
            ("messaging_profile_id", options.messaging_profile_id),
            ("billing_group_id", options.billing_group_id),
            ("customer_reference", options.customer_reference),
        ];
        for (field, value) in references {
            if let Some(value) = value {
                order.inner.put(field, value);
            }
        }

        order.validate()?;
        Ok(order)
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.get_str("id")
    }

    pub fn phone_numbers(&self) -> Vec<OrderedNumber> {
        self.inner.get_models("phone_numbers").unwrap_or_default()
    }

    pub fn status(&self) -> Option<NumberOrderStatus> {
        self.inner.get_enum("status")
    }

    pub fn created_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("created_at")
    }
}

sdk_model! {
    pub struct NumberOrderResponse as "NumberOrderResponse" {
        FieldDescriptor::required("data", "data", FieldKind::model::<NumberOrder>()),
    }
}

impl NumberOrderResponse {
    pub fn data(&self) -> Option<NumberOrder> {
        self.inner.get_model("data")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn order_request_carries_numbers_in_e164() {
        let numbers = vec![
            PhoneNumber::parse(None, "+1 (970) 555-5098").unwrap(),
            PhoneNumber::parse(Some(phonenumber::country::Id::US), "312 555 0123").unwrap(),
        ];
        let order = NumberOrder::with(
            numbers,
            NumberOrderOptions {
                connection_id: Some("1234".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            order.to_payload().unwrap(),
            json!({
                "phone_numbers": [
                    {"phone_number": "+19705555098"},
                    {"phone_number": "+13125550123"}
                ],
                "connection_id": "1234"
            })
        );
    }

    #[test]
    fn order_response_decodes_status_and_numbers() {
        let response = NumberOrderResponse::parse(&json!({
            "data": {
                "id": "12ade33a-21c0-473b-b055-b3c836e1c292",
                "record_type": "number_order",
                "phone_numbers": [
                    {"id": "dc8e4d67", "phone_number": "+19705555098", "status": "success"}
                ],
                "phone_numbers_count": 1,
                "status": "pending",
                "created_at": "2018-01-01T00:00:00.000000Z"
            }
        }))
        .unwrap();

        let order = response.data().unwrap();
        assert_eq!(order.status(), Some(NumberOrderStatus::Pending));
        let numbers = order.phone_numbers();
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].status(), Some(NumberOrderStatus::Success));
        assert_eq!(order.instance().extra().get("record_type"), Some(&json!("number_order")));
    }

    #[test]
    fn order_without_numbers_list_is_incomplete() {
        let order = NumberOrder::empty().unwrap();
        let err = order.validate().unwrap_err();
        assert_eq!(err.as_coercion().unwrap().paths(), vec!["phone_numbers"]);
    }
}
