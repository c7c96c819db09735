//! 10DLC brand registration.

use serde::Serialize;

use crate::domain::PhoneNumber;
use crate::model::{
    FieldDescriptor, FieldKind, Model, ModelError, WireDateTime, sdk_model, wire_enum,
};

wire_enum! {
    pub enum EntityType {
        PrivateProfit => "PRIVATE_PROFIT",
        PublicProfit => "PUBLIC_PROFIT",
        NonProfit => "NON_PROFIT",
        SoleProprietor => "SOLE_PROPRIETOR",
        Government => "GOVERNMENT",
    }
}

wire_enum! {
    pub enum Vertical {
        RealEstate => "REAL_ESTATE",
        Healthcare => "HEALTHCARE",
        Energy => "ENERGY",
        Entertainment => "ENTERTAINMENT",
        Retail => "RETAIL",
        Agriculture => "AGRICULTURE",
        Insurance => "INSURANCE",
        Education => "EDUCATION",
        Hospitality => "HOSPITALITY",
        Financial => "FINANCIAL",
        Gambling => "GAMBLING",
        Construction => "CONSTRUCTION",
        Ngo => "NGO",
        Manufacturing => "MANUFACTURING",
        Government => "GOVERNMENT",
        Technology => "TECHNOLOGY",
        Communication => "COMMUNICATION",
    }
}

wire_enum! {
    /// Identity verification state of a brand.
    pub enum BrandIdentityStatus {
        Verified => "VERIFIED",
        Unverified => "UNVERIFIED",
        SelfDeclared => "SELF_DECLARED",
        VettedVerified => "VETTED_VERIFIED",
    }
}

sdk_model! {
    /// A 10DLC brand. Wire names are camelCase on this API family.
    pub struct Brand as "Brand" {
        FieldDescriptor::optional("brand_id", "brandId", FieldKind::string()),
        FieldDescriptor::required("country", "country", FieldKind::string()),
        FieldDescriptor::required("display_name", "displayName", FieldKind::string()),
        FieldDescriptor::required("email", "email", FieldKind::string()),
        FieldDescriptor::required("entity_type", "entityType", FieldKind::enumeration::<EntityType>()),
        FieldDescriptor::required("vertical", "vertical", FieldKind::enumeration::<Vertical>()),
        FieldDescriptor::optional("company_name", "companyName", FieldKind::string()),
        FieldDescriptor::optional("ein", "ein", FieldKind::string()),
        FieldDescriptor::optional("phone", "phone", FieldKind::string()),
        FieldDescriptor::optional("street", "street", FieldKind::string()),
        FieldDescriptor::optional("city", "city", FieldKind::string()),
        FieldDescriptor::optional("state", "state", FieldKind::string()),
        FieldDescriptor::optional("postal_code", "postalCode", FieldKind::string()),
        FieldDescriptor::optional("website", "website", FieldKind::string()),
        FieldDescriptor::optional(
            "identity_status",
            "identityStatus",
            FieldKind::enumeration::<BrandIdentityStatus>(),
        ),
        FieldDescriptor::optional("mock", "mock", FieldKind::boolean()),
        FieldDescriptor::optional("created_at", "createdAt", FieldKind::Date),
        FieldDescriptor::optional("updated_at", "updatedAt", FieldKind::Date),
    }
}

/// Optional fields accepted by [`Brand::with`].
#[derive(Debug, Clone, Default)]
pub struct BrandOptions {
    pub company_name: Option<String>,
    pub ein: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub website: Option<String>,
    /// Register a mock brand that is never sent to the carrier registry.
    pub mock: Option<bool>,
}

impl Brand {
    /// Build a complete brand registration request.
    pub fn with(
        country: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        entity_type: EntityType,
        vertical: Vertical,
        options: BrandOptions,
    ) -> Result<Self, ModelError> {
        let mut brand = Self::empty()?;
        brand.set_country(country);
        brand.set_display_name(display_name);
        brand.set_email(email);
        brand.set_entity_type(entity_type);
        brand.set_vertical(vertical);

        let BrandOptions {
            company_name,
            ein,
            phone,
            street,
            city,
            state,
            postal_code,
            website,
            mock,
        } = options;
        let strings = [
            ("company_name", company_name),
            ("ein", ein),
            ("phone", phone.map(|p| p.e164().to_owned())),
            ("street", street),
            ("city", city),
            ("state", state),
            ("postal_code", postal_code),
            ("website", website),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                brand.inner.put(field, value);
            }
        }
        if let Some(mock) = mock {
            brand.inner.put("mock", mock);
        }

        brand.validate()?;
        Ok(brand)
    }

    pub fn brand_id(&self) -> Option<&str> {
        self.inner.get_str("brand_id")
    }

    pub fn country(&self) -> Option<&str> {
        self.inner.get_str("country")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.inner.get_str("display_name")
    }

    pub fn email(&self) -> Option<&str> {
        self.inner.get_str("email")
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.inner.get_enum("entity_type")
    }

    pub fn vertical(&self) -> Option<Vertical> {
        self.inner.get_enum("vertical")
    }

    pub fn city(&self) -> Option<&str> {
        self.inner.get_str("city")
    }

    pub fn identity_status(&self) -> Option<BrandIdentityStatus> {
        self.inner.get_enum("identity_status")
    }

    pub fn created_at(&self) -> Option<&WireDateTime> {
        self.inner.get_date("created_at")
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.inner.put("country", country.into());
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.inner.put("display_name", display_name.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.inner.put("email", email.into());
    }

    pub fn set_entity_type(&mut self, entity_type: EntityType) {
        self.inner.put_enum("entity_type", entity_type);
    }

    pub fn set_vertical(&mut self, vertical: Vertical) {
        self.inner.put_enum("vertical", vertical);
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.inner.put("city", city.into());
    }
}

sdk_model! {
    /// Brand summary as it appears in list responses.
    pub struct BrandRecord as "BrandRecord" {
        FieldDescriptor::optional("brand_id", "brandID", FieldKind::string()),
        FieldDescriptor::optional(
            "status",
            "status",
            FieldKind::enumeration::<BrandIdentityStatus>(),
        ),
        FieldDescriptor::optional("display_name", "displayName", FieldKind::string()),
        FieldDescriptor::optional("entity_type", "entityType", FieldKind::enumeration::<EntityType>()),
        FieldDescriptor::optional("created_at", "createdAt", FieldKind::Date),
    }
}

impl BrandRecord {
    pub fn brand_id(&self) -> Option<&str> {
        self.inner.get_str("brand_id")
    }

    pub fn status(&self) -> Option<BrandIdentityStatus> {
        self.inner.get_enum("status")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.inner.get_str("display_name")
    }
}

sdk_model! {
    pub struct BrandListResponse as "BrandListResponse" {
        FieldDescriptor::required("records", "records", FieldKind::model_list::<BrandRecord>()),
        FieldDescriptor::optional("page", "page", FieldKind::integer()),
        FieldDescriptor::optional("total_records", "totalRecords", FieldKind::integer()),
    }
}

impl BrandListResponse {
    /// Records in response order.
    pub fn records(&self) -> Vec<BrandRecord> {
        self.inner.get_models("records").unwrap_or_default()
    }

    pub fn page(&self) -> Option<i64> {
        self.inner.get_i64("page")
    }

    pub fn total_records(&self) -> Option<i64> {
        self.inner.get_i64("total_records")
    }
}

/// Query parameters of the brand list endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBrandsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
