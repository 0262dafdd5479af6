//! Typed identifiers.
//!
//! Every record gets its own newtype around a UUID string, so a `PropertyId` can never be
//! passed where a `UserId` is expected. Ids that arrive from a mirror are accepted verbatim.

/// Defines `<Name>Id` with uuid generation, `Display`, and string conversions.
macro_rules! entity_id {
    ($name:ident) => {
        paste::paste! {
            #[doc = "Identifier of a `" $name "` record."]
            #[derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                ::serde::Serialize,
                ::serde::Deserialize
            )]
            #[serde(transparent)]
            pub struct [<$name Id>](String);

            impl [<$name Id>] {
                /// A fresh random id.
                pub fn generate() -> Self {
                    Self(::uuid::Uuid::new_v4().to_string())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn is_empty(&self) -> bool {
                    self.0.trim().is_empty()
                }
            }

            impl ::std::fmt::Display for [<$name Id>] {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for [<$name Id>] {
                fn from(id: String) -> Self {
                    Self(id)
                }
            }

            impl From<&str> for [<$name Id>] {
                fn from(id: &str) -> Self {
                    Self(id.to_string())
                }
            }
        }
    };
}

entity_id!(Property);
entity_id!(Transaction);
entity_id!(User);
entity_id!(Locality);
entity_id!(LocalityReview);
entity_id!(Service);
entity_id!(ServiceReview);
entity_id!(ServiceBooking);
