//! Polymorphic fields: pick which of several model types a payload is.
//!
//! A discriminator tag, when present and known, decides alone. Otherwise every
//! candidate is tried in declared order and the first clean decode wins.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use super::Model;
use super::coerce;
use super::descriptor::ModelRef;
use super::error::{
    CoercionError, FieldError, FieldPath, ModelError, NoMatchingVariantError, SchemaError,
    VariantAttempt,
};
use super::instance::ModelInstance;
use super::registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub model: ModelRef,
    /// Literal discriminator value selecting this variant.
    pub tag: Option<&'static str>,
}

/// Ordered candidate set of one union type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDescriptor {
    name: &'static str,
    type_id: Option<TypeId>,
    discriminator: Option<&'static str>,
    variants: Vec<VariantDescriptor>,
}

impl UnionDescriptor {
    pub fn builder(name: &'static str) -> UnionDescriptorBuilder {
        UnionDescriptorBuilder {
            name,
            type_id: None,
            discriminator: None,
            variants: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The union type this descriptor was registered for.
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Wire key carrying the variant tag, if the union has one.
    pub fn discriminator(&self) -> Option<&'static str> {
        self.discriminator
    }

    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct UnionDescriptorBuilder {
    name: &'static str,
    type_id: Option<TypeId>,
    discriminator: Option<&'static str>,
    variants: Vec<VariantDescriptor>,
}

impl UnionDescriptorBuilder {
    pub(crate) fn owned_by(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    pub fn discriminator(mut self, wire_key: &'static str) -> Self {
        self.discriminator = Some(wire_key);
        self
    }

    /// Add an untagged candidate, tried only structurally.
    pub fn variant<T: Model>(mut self) -> Self {
        self.variants.push(VariantDescriptor {
            model: ModelRef::of::<T>(),
            tag: None,
        });
        self
    }

    /// Add a candidate selected by discriminator value `tag`.
    pub fn tagged<T: Model>(mut self, tag: &'static str) -> Self {
        self.variants.push(VariantDescriptor {
            model: ModelRef::of::<T>(),
            tag: Some(tag),
        });
        self
    }

    pub fn build(self) -> Result<UnionDescriptor, SchemaError> {
        if self.variants.is_empty() {
            return Err(SchemaError::EmptyUnion { union: self.name });
        }
        let mut tags = HashSet::new();
        let mut models = HashSet::new();
        for variant in &self.variants {
            if !models.insert(variant.model.type_id()) {
                return Err(SchemaError::DuplicateVariant {
                    union: self.name,
                    variant: variant.model.name(),
                });
            }
            let Some(tag) = variant.tag else {
                continue;
            };
            if !tags.insert(tag) {
                return Err(SchemaError::DuplicateVariantTag {
                    union: self.name,
                    tag,
                });
            }
        }
        Ok(UnionDescriptor {
            name: self.name,
            type_id: self.type_id,
            discriminator: self.discriminator,
            variants: self.variants,
        })
    }
}

/// How a variant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Tag,
    Structural,
    /// Built from a typed union value rather than decoded.
    Direct,
}

/// A payload decoded as one candidate of a union.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    union: &'static str,
    union_type: Option<TypeId>,
    index: usize,
    model: ModelRef,
    resolution: Resolution,
    instance: ModelInstance,
}

impl ResolvedVariant {
    pub fn union(&self) -> &'static str {
        self.union
    }

    /// Type of the union whose descriptor produced this variant.
    pub fn union_type(&self) -> Option<TypeId> {
        self.union_type
    }

    /// Position of the chosen candidate in declared order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Model name of the chosen candidate.
    pub fn variant(&self) -> &'static str {
        self.model.name()
    }

    /// Whether the chosen candidate is model type `T`.
    pub fn is<T: Model>(&self) -> bool {
        self.model.type_id() == TypeId::of::<T>()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.instance
    }

    pub fn into_instance(self) -> ModelInstance {
        self.instance
    }

    pub fn into_model<T: Model>(self) -> T {
        T::from_instance(self.instance)
    }
}

pub(crate) enum Unresolved {
    /// The tag picked a candidate and the payload does not fit it.
    Tagged {
        variant: &'static str,
        failures: Vec<FieldError>,
    },
    NoMatch(NoMatchingVariantError),
}

/// Resolve `payload` against `descriptor` at the payload root.
pub fn resolve(
    descriptor: &UnionDescriptor,
    payload: &Value,
) -> Result<ResolvedVariant, ModelError> {
    match resolve_at(descriptor, payload, &FieldPath::root())? {
        Ok(resolved) => Ok(resolved),
        Err(Unresolved::Tagged { variant, failures }) => {
            Err(CoercionError::new(variant, failures).into())
        }
        Err(Unresolved::NoMatch(err)) => Err(err.into()),
    }
}

pub(crate) fn resolve_at(
    descriptor: &UnionDescriptor,
    payload: &Value,
    path: &FieldPath,
) -> Result<Result<ResolvedVariant, Unresolved>, SchemaError> {
    let tag = descriptor
        .discriminator
        .and_then(|key| payload.get(key))
        .and_then(Value::as_str);

    if let Some(tag) = tag {
        let tagged = descriptor
            .variants
            .iter()
            .enumerate()
            .find(|(_, v)| v.tag == Some(tag));
        if let Some((index, variant)) = tagged {
            let schema = variant.model.schema()?;
            let mut failures = Vec::new();
            return Ok(
                match coerce::decode_model(&schema, payload, path, &mut failures)? {
                    Some(instance) => {
                        tracing::debug!(
                            union = descriptor.name,
                            variant = variant.model.name(),
                            tag,
                            "resolved union variant by tag"
                        );
                        Ok(resolved(descriptor, index, variant, Resolution::Tag, instance))
                    }
                    None => Err(Unresolved::Tagged {
                        variant: variant.model.name(),
                        failures,
                    }),
                },
            );
        }
        tracing::debug!(
            union = descriptor.name,
            tag,
            "unknown union tag, trying variants structurally"
        );
    }

    let mut attempts = Vec::with_capacity(descriptor.variants.len());
    for (index, variant) in descriptor.variants.iter().enumerate() {
        let schema = variant.model.schema()?;
        let mut failures = Vec::new();
        match coerce::decode_model(&schema, payload, path, &mut failures)? {
            Some(instance) => {
                tracing::debug!(
                    union = descriptor.name,
                    variant = variant.model.name(),
                    rejected = attempts.len(),
                    "resolved union variant structurally"
                );
                return Ok(Ok(resolved(
                    descriptor,
                    index,
                    variant,
                    Resolution::Structural,
                    instance,
                )));
            }
            None => attempts.push(VariantAttempt {
                variant: variant.model.name(),
                error: CoercionError::new(variant.model.name(), failures),
            }),
        }
    }

    Ok(Err(Unresolved::NoMatch(NoMatchingVariantError {
        union: descriptor.name,
        tag: tag.map(str::to_owned),
        attempts,
    })))
}

fn resolved(
    descriptor: &UnionDescriptor,
    index: usize,
    variant: &VariantDescriptor,
    resolution: Resolution,
    instance: ModelInstance,
) -> ResolvedVariant {
    ResolvedVariant {
        union: descriptor.name,
        union_type: descriptor.type_id,
        index,
        model: variant.model,
        resolution,
        instance,
    }
}

/// A closed sum of model types decoded through [`resolve`].
pub trait Union: Sized + 'static {
    const NAME: &'static str;

    fn describe(builder: UnionDescriptorBuilder) -> UnionDescriptorBuilder;

    /// Map a resolved candidate onto its arm; `None` if no arm holds that model.
    fn from_resolved(resolved: ResolvedVariant) -> Option<Self>;

    fn instance(&self) -> &ModelInstance;
    fn into_instance(self) -> ModelInstance;

    fn descriptor() -> Result<Arc<UnionDescriptor>, SchemaError> {
        registry::union_descriptor::<Self>()
    }

    fn parse(payload: &Value) -> Result<Self, ModelError> {
        let descriptor = Self::descriptor()?;
        let resolved = resolve(&descriptor, payload)?;
        let variant = resolved.variant();
        Self::from_resolved(resolved).ok_or_else(|| {
            SchemaError::UnmappedVariant {
                union: Self::NAME,
                variant,
            }
            .into()
        })
    }

    fn parse_str(payload: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::parse(&value)
    }

    fn to_payload(&self) -> Result<Value, ModelError> {
        coerce::encode(self.instance())
    }

    /// Wrap this value as the resolved variant its arm stands for.
    fn into_resolved(self) -> Result<ResolvedVariant, SchemaError> {
        let descriptor = Self::descriptor()?;
        let instance = self.into_instance();
        let found = descriptor
            .variants
            .iter()
            .enumerate()
            .find(|(_, v)| instance.schema().describes(&v.model));
        let Some((index, variant)) = found else {
            return Err(SchemaError::UnmappedVariant {
                union: Self::NAME,
                variant: instance.schema().name(),
            });
        };
        Ok(resolved(
            &descriptor,
            index,
            variant,
            Resolution::Direct,
            instance,
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{
        FieldDescriptor, FieldErrorKind, FieldKind, FieldValue, sdk_model, sdk_union,
    };

    sdk_model! {
        struct Sms as "Sms" {
            FieldDescriptor::required("kind", "kind", FieldKind::string()),
            FieldDescriptor::required("text", "text", FieldKind::string()),
        }
    }

    sdk_model! {
        struct Call as "Call" {
            FieldDescriptor::required("kind", "kind", FieldKind::string()),
            FieldDescriptor::required("duration", "duration", FieldKind::integer()),
        }
    }

    sdk_model! {
        struct Loose as "Loose" {
            FieldDescriptor::optional("text", "text", FieldKind::string()),
        }
    }

    sdk_union! {
        enum Event as "Event" tagged by "kind" {
            Sms(Sms) => "sms",
            Call(Call) => "call",
        }
    }

    sdk_union! {
        enum Shape as "Shape" {
            Sms(Sms),
            Loose(Loose),
        }
    }

    sdk_union! {
        enum Overlapping as "Overlapping" {
            Loose(Loose),
            Sms(Sms),
        }
    }

    sdk_model! {
        struct Timeline as "Timeline" {
            FieldDescriptor::optional("events", "events", FieldKind::variant_list::<Event>()),
            FieldDescriptor::optional("latest", "latest", FieldKind::variant::<Event>()),
        }
    }

    mod brands {
        use crate::model::{FieldDescriptor, FieldKind, sdk_model};

        sdk_model! {
            pub struct Record as "Record" {
                FieldDescriptor::required("brand_id", "brandId", FieldKind::string()),
            }
        }
    }

    mod campaigns {
        use crate::model::{FieldDescriptor, FieldKind, sdk_model};

        sdk_model! {
            pub struct Record as "Record" {
                FieldDescriptor::required("campaign_id", "campaignId", FieldKind::string()),
            }
        }
    }

    sdk_union! {
        enum Registration as "Registration" {
            Brand(brands::Record),
            Campaign(campaigns::Record),
        }
    }

    sdk_model! {
        struct Holder as "Holder" {
            FieldDescriptor::optional("brand", "brand", FieldKind::model::<brands::Record>()),
        }
    }

    // Declares Call as a candidate but has no arm for it.
    #[derive(Debug)]
    enum SmsOnly {
        Sms(Sms),
    }

    impl Union for SmsOnly {
        const NAME: &'static str = "SmsOnly";

        fn describe(builder: UnionDescriptorBuilder) -> UnionDescriptorBuilder {
            builder.variant::<Sms>().variant::<Call>()
        }

        fn from_resolved(resolved: ResolvedVariant) -> Option<Self> {
            resolved.is::<Sms>().then(|| Self::Sms(resolved.into_model()))
        }

        fn instance(&self) -> &ModelInstance {
            match self {
                Self::Sms(sms) => sms.instance(),
            }
        }

        fn into_instance(self) -> ModelInstance {
            match self {
                Self::Sms(sms) => sms.into_instance(),
            }
        }
    }

    #[test]
    fn tag_selects_the_variant() {
        let event = Event::parse(&json!({"kind": "call", "duration": 30})).unwrap();
        let Event::Call(call) = &event else {
            panic!("expected call, got {event:?}");
        };
        assert_eq!(call.inner.get_i64("duration"), Some(30));

        let resolved = resolve(
            &Event::descriptor().unwrap(),
            &json!({"kind": "sms", "text": "hi"}),
        )
        .unwrap();
        assert_eq!(resolved.resolution(), Resolution::Tag);
        assert_eq!(resolved.variant(), "Sms");
        assert_eq!(resolved.index(), 0);
    }

    #[test]
    fn matched_tag_with_invalid_body_does_not_fall_back() {
        // Valid as Sms structurally, but the tag says Call.
        let err = Event::parse(&json!({"kind": "call", "text": "hi"})).unwrap_err();
        let coercion = err.as_coercion().unwrap();
        assert_eq!(coercion.model(), "Call");
        assert_eq!(coercion.paths(), vec!["duration"]);
    }

    #[test]
    fn unknown_tag_falls_back_to_structural_match() {
        let resolved = resolve(
            &Event::descriptor().unwrap(),
            &json!({"kind": "fax", "duration": 5}),
        )
        .unwrap();
        assert_eq!(resolved.resolution(), Resolution::Structural);
        assert_eq!(resolved.variant(), "Call");
    }

    #[test]
    fn no_match_lists_every_attempt() {
        let err = Event::parse(&json!({"kind": "fax"})).unwrap_err();
        let ModelError::NoMatchingVariant(err) = err else {
            panic!("expected no-match, got {err:?}");
        };
        assert_eq!(err.union, "Event");
        assert_eq!(err.tag.as_deref(), Some("fax"));
        assert_eq!(err.attempted(), vec!["Sms", "Call"]);
        assert_eq!(err.attempts[0].error.paths(), vec!["text"]);
        assert_eq!(err.attempts[1].error.paths(), vec!["duration"]);
    }

    #[test]
    fn structural_resolution_prefers_declared_order() {
        let payload = json!({"kind": "sms", "text": "hi"});
        assert!(matches!(Shape::parse(&payload).unwrap(), Shape::Sms(_)));
        assert!(matches!(
            Overlapping::parse(&payload).unwrap(),
            Overlapping::Loose(_)
        ));
        for _ in 0..3 {
            assert!(matches!(Shape::parse(&payload).unwrap(), Shape::Sms(_)));
        }
        assert!(matches!(
            Shape::parse(&json!({"text": "only"})).unwrap(),
            Shape::Loose(_)
        ));
    }

    #[test]
    fn variant_lists_report_failures_under_their_index() {
        let err = Timeline::parse(&json!({
            "events": [
                {"kind": "sms", "text": "a"},
                {"kind": "call", "duration": "long"},
                {"kind": "fax"}
            ]
        }))
        .unwrap_err();
        let coercion = err.as_coercion().unwrap();
        assert_eq!(coercion.paths(), vec!["events[1].duration", "events[2]"]);
        let failure = coercion.failure_at("events[2]").unwrap();
        let FieldErrorKind::NoMatchingVariant(no_match) = &failure.kind else {
            panic!("expected no-match at events[2]");
        };
        assert_eq!(no_match.attempted(), vec!["Sms", "Call"]);

        let timeline = Timeline::parse(&json!({"events": [{"kind": "sms", "text": "a"}]})).unwrap();
        let events = timeline.inner.get_variants::<Event>("events").unwrap();
        assert!(matches!(events.as_slice(), [Event::Sms(_)]));
        assert_eq!(
            timeline.to_payload().unwrap(),
            json!({"events": [{"kind": "sms", "text": "a"}]})
        );
    }

    #[test]
    fn same_named_models_map_to_their_own_arms() {
        let registration = Registration::parse(&json!({"campaignId": "c1"})).unwrap();
        let Registration::Campaign(campaign) = &registration else {
            panic!("expected campaign, got {registration:?}");
        };
        assert_eq!(campaign.instance().get_str("campaign_id"), Some("c1"));
        assert!(matches!(
            Registration::parse(&json!({"brandId": "b1"})).unwrap(),
            Registration::Brand(_)
        ));

        let brand = brands::Record::empty().unwrap();
        let campaign = campaigns::Record::empty().unwrap();
        assert_ne!(brand.instance(), campaign.instance());

        let mut holder = Holder::empty().unwrap();
        let err = holder
            .inner
            .set("brand", campaign.into_instance())
            .unwrap_err();
        assert!(matches!(err.kind, FieldErrorKind::TypeMismatch { .. }));
        holder.inner.set("brand", brand.into_instance()).unwrap();
    }

    #[test]
    fn unmapped_candidate_is_a_schema_error() {
        let err = SmsOnly::parse(&json!({"kind": "call", "duration": 1})).unwrap_err();
        assert!(matches!(
            err,
            ModelError::Schema(SchemaError::UnmappedVariant {
                union: "SmsOnly",
                variant: "Call"
            })
        ));
        assert!(matches!(
            SmsOnly::parse(&json!({"kind": "sms", "text": "hi"})).unwrap(),
            SmsOnly::Sms(_)
        ));
    }

    #[test]
    fn typed_variants_can_be_set_incrementally() {
        let sms = Event::parse(&json!({"kind": "sms", "text": "a"})).unwrap();
        let call = Event::parse(&json!({"kind": "call", "duration": 3})).unwrap();

        let mut timeline = Timeline::empty().unwrap();
        timeline
            .inner
            .set_variants("events", vec![sms.clone(), call])
            .unwrap();
        timeline.inner.set_variant("latest", sms).unwrap();
        assert_eq!(
            timeline.to_payload().unwrap(),
            json!({
                "events": [{"kind": "sms", "text": "a"}, {"kind": "call", "duration": 3}],
                "latest": {"kind": "sms", "text": "a"}
            })
        );
        let events = timeline.inner.get_variants::<Event>("events").unwrap();
        assert!(matches!(events.as_slice(), [Event::Sms(_), Event::Call(_)]));
        let Some(FieldValue::Variant(latest)) = timeline.inner.get("latest") else {
            panic!("latest is not a variant");
        };
        assert_eq!(latest.resolution(), Resolution::Direct);
        assert_eq!(latest.index(), 0);

        let other = Shape::parse(&json!({"text": "x"})).unwrap();
        let err = timeline.inner.set_variant("latest", other).unwrap_err();
        assert_eq!(err.as_coercion().unwrap().paths(), vec!["latest"]);
    }

    #[test]
    fn union_payload_round_trips() {
        let payload = json!({"kind": "call", "duration": 12, "extra": [1]});
        let event = Event::parse(&payload).unwrap();
        assert_eq!(event.to_payload().unwrap(), payload);
        assert_eq!(serde_json::to_value(&event).unwrap(), payload);
        let back: Event = serde_json::from_value(payload).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn invalid_registrations_are_rejected() {
        assert_eq!(
            UnionDescriptor::builder("Empty").build().unwrap_err(),
            SchemaError::EmptyUnion { union: "Empty" }
        );
        assert_eq!(
            UnionDescriptor::builder("Twice")
                .discriminator("kind")
                .tagged::<Sms>("x")
                .tagged::<Call>("x")
                .build()
                .unwrap_err(),
            SchemaError::DuplicateVariantTag {
                union: "Twice",
                tag: "x"
            }
        );
        assert_eq!(
            UnionDescriptor::builder("Again")
                .variant::<Sms>()
                .variant::<Sms>()
                .build()
                .unwrap_err(),
            SchemaError::DuplicateVariant {
                union: "Again",
                variant: "Sms"
            }
        );
    }

    #[test]
    fn descriptor_is_cached_per_union() {
        let first = Event::descriptor().unwrap();
        let second = Event::descriptor().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.discriminator(), Some("kind"));
        assert_eq!(
            first.variants().iter().map(|v| v.tag).collect::<Vec<_>>(),
            vec![Some("sms"), Some("call")]
        );
    }
}
