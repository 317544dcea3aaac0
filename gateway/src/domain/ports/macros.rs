//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `snake_case` constructor accepting `impl Into<_>` for
//! its fields, and the enum gains a `kind()` label suitable for log fields
//! and metric labels. Fields may carry their own doc comments.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
                } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Stable `snake_case` label naming the variant.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $( Self::$variant { .. } => stringify!([<$variant:snake>]), )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for generated constructors and labels.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "unreachable",
            Rejected {
                /// Status reported by the peer.
                status: u16,
            } => "rejected with {status}",
            Garbled { message: String, offset: usize } => "garbled at {offset}: {message}",
        }
    }

    #[test]
    fn unit_constructor_builds_variant() {
        assert_eq!(SamplePortError::unreachable(), SamplePortError::Unreachable);
    }

    #[test]
    fn constructors_accept_into_for_fields() {
        let err = SamplePortError::garbled("bad byte", 7_usize);
        assert_eq!(err.to_string(), "garbled at 7: bad byte");
        assert_eq!(SamplePortError::rejected(422_u16).to_string(), "rejected with 422");
    }

    #[test]
    fn kind_is_snake_case_variant_name() {
        assert_eq!(SamplePortError::Unreachable.kind(), "unreachable");
        assert_eq!(SamplePortError::rejected(500_u16).kind(), "rejected");
        assert_eq!(SamplePortError::garbled("x", 0_usize).kind(), "garbled");
    }
}
