//! Declaration macros for closed enums, models and unions.

/// Declare a closed string enum with its wire values.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::model::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VALUES: &'static [&'static str] = &[$($wire),+];

            fn as_wire(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            fn from_wire(value: &str) -> ::std::option::Option<Self> {
                match value {
                    $( $wire => ::std::option::Option::Some(Self::$variant), )+
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::model::WireEnum::as_wire(*self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($crate::model::WireEnum::as_wire(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::model::WireEnum>::from_wire(&value).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::unknown_variant(
                        &value,
                        <Self as $crate::model::WireEnum>::VALUES,
                    )
                })
            }
        }
    };
}

/// Declare a model: a newtype over [`ModelInstance`](crate::model::ModelInstance)
/// with its field descriptors in wire order.
macro_rules! sdk_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $model_name:literal {
            $( $field:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            inner: $crate::model::ModelInstance,
        }

        impl $crate::model::Model for $name {
            const NAME: &'static str = $model_name;

            fn describe() -> ::std::vec::Vec<$crate::model::FieldDescriptor> {
                ::std::vec![$($field),*]
            }

            fn from_instance(instance: $crate::model::ModelInstance) -> Self {
                Self { inner: instance }
            }

            fn instance(&self) -> &$crate::model::ModelInstance {
                &self.inner
            }

            fn instance_mut(&mut self) -> &mut $crate::model::ModelInstance {
                &mut self.inner
            }

            fn into_instance(self) -> $crate::model::ModelInstance {
                self.inner
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize(&self.inner, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let payload = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::model::Model>::parse(&payload)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

/// Declare a union as an enum with one arm per model.
///
/// `tagged by "key"` unions map each arm to a discriminator value; the others
/// are resolved structurally in arm order.
macro_rules! sdk_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $union_name:literal tagged by $key:literal {
            $( $(#[$vmeta:meta])* $arm:ident($model:ty) => $tag:literal ),+ $(,)?
        }
    ) => {
        $crate::model::sdk_union!(@define
            [$(#[$meta])*] $vis $name, $union_name,
            |builder: $crate::model::UnionDescriptorBuilder| {
                builder.discriminator($key)$(.tagged::<$model>($tag))+
            },
            $( [$(#[$vmeta])*] $arm($model) ),+
        );
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $union_name:literal {
            $( $(#[$vmeta:meta])* $arm:ident($model:ty) ),+ $(,)?
        }
    ) => {
        $crate::model::sdk_union!(@define
            [$(#[$meta])*] $vis $name, $union_name,
            |builder: $crate::model::UnionDescriptorBuilder| {
                builder$(.variant::<$model>())+
            },
            $( [$(#[$vmeta])*] $arm($model) ),+
        );
    };
    (@define
        [$(#[$meta:meta])*] $vis:vis $name:ident, $union_name:literal, $describe:expr,
        $( [$(#[$vmeta:meta])*] $arm:ident($model:ty) ),+
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $arm($model) ),+
        }

        impl $crate::model::Union for $name {
            const NAME: &'static str = $union_name;

            fn describe(
                builder: $crate::model::UnionDescriptorBuilder,
            ) -> $crate::model::UnionDescriptorBuilder {
                ($describe)(builder)
            }

            fn from_resolved(
                resolved: $crate::model::ResolvedVariant,
            ) -> ::std::option::Option<Self> {
                $(
                    if resolved.is::<$model>() {
                        return ::std::option::Option::Some(Self::$arm(resolved.into_model()));
                    }
                )+
                ::std::option::Option::None
            }

            fn instance(&self) -> &$crate::model::ModelInstance {
                match self {
                    $( Self::$arm(model) => $crate::model::Model::instance(model), )+
                }
            }

            fn into_instance(self) -> $crate::model::ModelInstance {
                match self {
                    $( Self::$arm(model) => $crate::model::Model::into_instance(model), )+
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize($crate::model::Union::instance(self), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let payload = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::model::Union>::parse(&payload)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use {sdk_model, sdk_union, wire_enum};
