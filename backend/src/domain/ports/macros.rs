//! `define_port_error!`: repository error enums with a `thiserror` message and
//! a snake_case constructor per variant.
//!
//! Every variant carries named fields. Constructors take each field as
//! `impl Into<T>`, so `RecipeRepositoryError::query(err.to_string())` and
//! `UserPersistenceError::duplicate_email("cook@example.com")` both read
//! naturally at adapter call sites.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
