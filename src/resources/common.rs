use crate::model::{FieldDescriptor, FieldKind, sdk_model};

sdk_model! {
    /// Page counters returned next to list payloads.
    pub struct PaginationMeta as "PaginationMeta" {
        FieldDescriptor::optional("page_number", "page_number", FieldKind::integer()),
        FieldDescriptor::optional("page_size", "page_size", FieldKind::integer()),
        FieldDescriptor::optional("total_pages", "total_pages", FieldKind::integer()),
        FieldDescriptor::optional("total_results", "total_results", FieldKind::integer()),
    }
}

impl PaginationMeta {
    pub fn page_number(&self) -> Option<i64> {
        self.inner.get_i64("page_number")
    }

    pub fn page_size(&self) -> Option<i64> {
        self.inner.get_i64("page_size")
    }

    pub fn total_pages(&self) -> Option<i64> {
        self.inner.get_i64("total_pages")
    }

    pub fn total_results(&self) -> Option<i64> {
        self.inner.get_i64("total_results")
    }
}

sdk_model! {
    /// One entry of the API's `errors` document.
    pub struct ApiError as "ApiError" {
        FieldDescriptor::optional("code", "code", FieldKind::string()),
        FieldDescriptor::required("title", "title", FieldKind::string()),
        FieldDescriptor::optional("detail", "detail", FieldKind::string()),
        FieldDescriptor::optional("source", "source", FieldKind::MapOfMixed),
        FieldDescriptor::optional("meta", "meta", FieldKind::MapOfMixed),
    }
}

impl ApiError {
    pub fn code(&self) -> Option<&str> {
        self.inner.get_str("code")
    }

    pub fn title(&self) -> Option<&str> {
        self.inner.get_str("title")
    }

    pub fn detail(&self) -> Option<&str> {
        self.inner.get_str("detail")
    }

    /// JSON pointer to the offending request field, when the API names one.
    pub fn pointer(&self) -> Option<&str> {
        self.inner
            .get_map("source")
            .and_then(|source| source.get("pointer"))
            .and_then(|pointer| pointer.as_str())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = self.code() {
            write!(f, "[{code}] ")?;
        }
        f.write_str(self.title().unwrap_or("unknown error"))?;
        if let Some(detail) = self.detail() {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

sdk_model! {
    pub struct ApiErrorResponse as "ApiErrorResponse" {
        FieldDescriptor::required("errors", "errors", FieldKind::model_list::<ApiError>()),
    }
}

impl ApiErrorResponse {
    pub fn errors(&self) -> Vec<ApiError> {
        self.inner.get_models("errors").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Model;

    #[test]
    fn error_document_decodes_every_entry() {
        let response = ApiErrorResponse::parse(&json!({
            "errors": [
                {
                    "code": "10015",
                    "title": "Invalid sorting value",
                    "detail": "The value provided for sorting is not valid.",
                    "source": {"pointer": "/sort"}
                },
                {"title": "Bad request"}
            ]
        }))
        .unwrap();

        let errors = response.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].pointer(), Some("/sort"));
        assert_eq!(
            errors[0].to_string(),
            "[10015] Invalid sorting value: The value provided for sorting is not valid."
        );
        assert_eq!(errors[1].to_string(), "Bad request");
    }

    #[test]
    fn error_document_requires_titles() {
        let err = ApiErrorResponse::parse(&json!({"errors": [{"code": "1"}]})).unwrap_err();
        assert_eq!(err.as_coercion().unwrap().paths(), vec!["errors[0].title"]);
    }

    #[test]
    fn pagination_meta_reads_counters() {
        let meta = PaginationMeta::parse(&json!({
            "page_number": 2,
            "page_size": 25,
            "total_pages": 4,
            "total_results": 80
        }))
        .unwrap();
        assert_eq!(meta.page_number(), Some(2));
        assert_eq!(meta.total_results(), Some(80));
    }
}
