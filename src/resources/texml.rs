//! TeXML call control. Wire names on this API family are PascalCase.

use crate::model::{
    FieldDescriptor, FieldKind, Model, ModelError, sdk_model, sdk_union, wire_enum,
};

wire_enum! {
    /// Terminal state requested for a live call.
    pub enum CallUpdateStatus {
        Completed => "completed",
        Canceled => "canceled",
    }
}

wire_enum! {
    pub enum HttpMethod {
        Get => "GET",
        Post => "POST",
    }
}

wire_enum! {
    pub enum TexmlCallStatus {
        Queued => "queued",
        Ringing => "ringing",
        InProgress => "in-progress",
        Canceled => "canceled",
        Completed => "completed",
        Busy => "busy",
        Failed => "failed",
        NoAnswer => "no-answer",
    }
}

sdk_model! {
    pub struct UpdateCallStatus as "UpdateCallStatus" {
        FieldDescriptor::required("status", "Status", FieldKind::enumeration::<CallUpdateStatus>()),
    }
}

sdk_model! {
    pub struct UpdateCallUrl as "UpdateCallUrl" {
        FieldDescriptor::required("url", "Url", FieldKind::string()),
        FieldDescriptor::optional("method", "Method", FieldKind::enumeration::<HttpMethod>()),
        FieldDescriptor::optional("fallback_url", "FallbackUrl", FieldKind::string()),
        FieldDescriptor::optional("status_callback", "StatusCallback", FieldKind::string()),
        FieldDescriptor::optional(
            "status_callback_method",
            "StatusCallbackMethod",
            FieldKind::enumeration::<HttpMethod>(),
        ),
    }
}

impl UpdateCallUrl {
    pub fn url(&self) -> Option<&str> {
        self.inner.get_str("url")
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.inner.get_enum("method")
    }

    pub fn set_fallback_url(&mut self, url: impl Into<String>) {
        self.inner.put("fallback_url", url.into());
    }

    pub fn set_status_callback(&mut self, url: impl Into<String>, method: Option<HttpMethod>) {
        self.inner.put("status_callback", url.into());
        if let Some(method) = method {
            self.inner.put_enum("status_callback_method", method);
        }
    }
}

sdk_union! {
    /// Body of a call update: either end the call or point it at new TeXML.
    pub enum TexmlCallUpdate as "TexmlCallUpdate" {
        Status(UpdateCallStatus),
        Url(UpdateCallUrl),
    }
}

impl TexmlCallUpdate {
    /// End the call.
    pub fn hang_up() -> Result<Self, ModelError> {
        Self::status(CallUpdateStatus::Completed)
    }

    pub fn status(status: CallUpdateStatus) -> Result<Self, ModelError> {
        let mut body = UpdateCallStatus::empty()?;
        body.inner.put_enum("status", status);
        body.validate()?;
        Ok(Self::Status(body))
    }

    /// Fetch new TeXML instructions from `url`.
    pub fn redirect(
        url: impl Into<String>,
        method: Option<HttpMethod>,
    ) -> Result<Self, ModelError> {
        let mut body = UpdateCallUrl::empty()?;
        body.inner.put("url", url.into());
        if let Some(method) = method {
            body.inner.put_enum("method", method);
        }
        body.validate()?;
        Ok(Self::Url(body))
    }
}

sdk_model! {
    pub struct TexmlCall as "TexmlCall" {
        FieldDescriptor::optional("account_sid", "account_sid", FieldKind::string()),
        FieldDescriptor::optional("call_sid", "call_sid", FieldKind::string()),
        FieldDescriptor::optional("from", "from", FieldKind::string()),
        FieldDescriptor::optional("to", "to", FieldKind::string()),
        FieldDescriptor::optional("status", "status", FieldKind::enumeration::<TexmlCallStatus>()),
        FieldDescriptor::optional("direction", "direction", FieldKind::string()),
        FieldDescriptor::optional("duration", "duration", FieldKind::string()),
        FieldDescriptor::optional("start_time", "start_time", FieldKind::string()),
        FieldDescriptor::optional("end_time", "end_time", FieldKind::string()),
        FieldDescriptor::optional("uri", "uri", FieldKind::string()),
    }
}

impl TexmlCall {
    pub fn call_sid(&self) -> Option<&str> {
        self.inner.get_str("call_sid")
    }

    pub fn status(&self) -> Option<TexmlCallStatus> {
        self.inner.get_enum("status")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{Union, WireEnum};

    #[test]
    fn update_bodies_encode_pascal_case() {
        assert_eq!(
            TexmlCallUpdate::hang_up().unwrap().to_payload().unwrap(),
            json!({"Status": "completed"})
        );
        assert_eq!(
            TexmlCallUpdate::redirect("https://example.com/texml.xml", Some(HttpMethod::Post))
                .unwrap()
                .to_payload()
                .unwrap(),
            json!({"Url": "https://example.com/texml.xml", "Method": "POST"})
        );
    }

    #[test]
    fn structural_union_picks_the_shape_that_fits() {
        let payload = json!({"Url": "https://example.com/a", "Method": "GET"});
        let update = TexmlCallUpdate::parse(&payload).unwrap();
        let TexmlCallUpdate::Url(body) = &update else {
            panic!("expected url update, got {update:?}");
        };
        assert_eq!(body.method(), Some(HttpMethod::Get));

        let update = TexmlCallUpdate::parse(&json!({"Status": "canceled"})).unwrap();
        assert!(matches!(update, TexmlCallUpdate::Status(_)));
    }

    #[test]
    fn unmatched_update_lists_both_shapes() {
        let err = TexmlCallUpdate::parse(&json!({"Status": "paused"})).unwrap_err();
        let ModelError::NoMatchingVariant(err) = err else {
            panic!("expected no-match, got {err:?}");
        };
        assert_eq!(err.tag, None);
        assert_eq!(err.attempted(), vec!["UpdateCallStatus", "UpdateCallUrl"]);
        assert_eq!(err.attempts[0].error.paths(), vec!["Status"]);
        assert_eq!(err.attempts[1].error.paths(), vec!["Url"]);
    }

    #[test]
    fn call_response_decodes_status() {
        let call = TexmlCall::parse(&json!({
            "account_sid": "61bf923e-5e4d-4595-a110-56190ea18a1b",
            "call_sid": "v3:KBnLO0ZK3DhKM5s7bE9VT2xVUw",
            "status": "in-progress",
            "start_time": "Thu, 15 Jun 2023 09:56:45 +0000"
        }))
        .unwrap();
        assert_eq!(call.status(), Some(TexmlCallStatus::InProgress));
        assert_eq!(call.status().map(WireEnum::as_wire), Some("in-progress"));
    }
}
