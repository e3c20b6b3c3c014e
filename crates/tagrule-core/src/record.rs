//! # Record Introspection
//!
//! The engine never looks inside a caller's type on its own. A type opts in
//! by implementing [`Record`], listing its fields in declaration order with
//! their validation tag, visibility and current value.
//!
//! ```
//! use tagrule_core::{Field, Record};
//!
//! struct User {
//!     name: String,
//!     age: i64,
//!     roles: Vec<String>,
//! }
//!
//! impl Record for User {
//!     fn fields(&self) -> Option<Vec<Field<'_>>> {
//!         Some(vec![
//!             Field::new("Name", &self.name).tag("len:5"),
//!             Field::new("Age", self.age).tag("range:18,65"),
//!             Field::new("Roles", &self.roles).tag("in:admin,user"),
//!         ])
//!     }
//! }
//!
//! let user = User { name: "alice".into(), age: 30, roles: vec!["user".into()] };
//! assert!(tagrule_core::validate(&user).is_ok());
//! ```

use std::borrow::Cow;

use crate::kind::FieldKind;

/// A value that can be validated field by field.
pub trait Record {
    /// The record's fields in declaration order, or `None` when the value is
    /// not record-shaped.
    fn fields(&self) -> Option<Vec<Field<'_>>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        (**self).fields()
    }
}

macro_rules! not_a_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn fields(&self) -> Option<Vec<Field<'_>>> {
                    None
                }
            }
        )*
    };
}

not_a_record!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, f32, f64, str, String, ());

impl<T> Record for [T] {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        None
    }
}

impl<T> Record for Vec<T> {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        None
    }
}

impl<T> Record for Option<T> {
    fn fields(&self) -> Option<Vec<Field<'_>>> {
        None
    }
}

/// Whether a field may carry a validation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible to callers; tags are honoured.
    #[default]
    Public,
    /// Internal; a tag on such a field is itself a violation.
    Private,
}

/// Current value of a field, tagged with its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A single integer.
    Integer(i64),
    /// A single string.
    String(&'a str),
    /// A list of integers.
    IntegerList(Cow<'a, [i64]>),
    /// A list of strings.
    StringList(Vec<&'a str>),
    /// A field whose declared type is none of the four kinds.
    Unsupported {
        /// The declared type name, for diagnostics.
        type_name: Cow<'a, str>,
    },
    /// A dynamically typed value that does not have the declared kind.
    Mismatched {
        /// The declared kind.
        expected: FieldKind,
        /// Short description of what was found instead.
        found: &'static str,
    },
}

impl<'a> FieldValue<'a> {
    /// The field kind this value carries, if it is one of the four kinds.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::String(_) => Some(FieldKind::String),
            Self::IntegerList(_) => Some(FieldKind::IntegerList),
            Self::StringList(_) => Some(FieldKind::StringList),
            Self::Unsupported { .. } | Self::Mismatched { .. } => None,
        }
    }

    /// Mark a field of a type the engine does not understand.
    pub fn unsupported(type_name: impl Into<Cow<'a, str>>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::String(v)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(v: &'a String) -> Self {
        Self::String(v.as_str())
    }
}

impl<'a> From<&'a [i64]> for FieldValue<'a> {
    fn from(v: &'a [i64]) -> Self {
        Self::IntegerList(Cow::Borrowed(v))
    }
}

impl<'a> From<&'a Vec<i64>> for FieldValue<'a> {
    fn from(v: &'a Vec<i64>) -> Self {
        Self::IntegerList(Cow::Borrowed(v.as_slice()))
    }
}

impl From<Vec<i64>> for FieldValue<'_> {
    fn from(v: Vec<i64>) -> Self {
        Self::IntegerList(Cow::Owned(v))
    }
}

impl<'a> From<&'a [String]> for FieldValue<'a> {
    fn from(v: &'a [String]) -> Self {
        Self::StringList(v.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for FieldValue<'a> {
    fn from(v: &'a Vec<String>) -> Self {
        Self::from(v.as_slice())
    }
}

impl<'a> From<Vec<&'a str>> for FieldValue<'a> {
    fn from(v: Vec<&'a str>) -> Self {
        Self::StringList(v)
    }
}

/// One field as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field name, used in violation messages.
    pub name: Cow<'a, str>,
    /// Validation tag, if any.
    pub tag: Option<&'a str>,
    /// Visibility of the field.
    pub visibility: Visibility,
    /// Current value.
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// A public, untagged field.
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<FieldValue<'a>>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            visibility: Visibility::Public,
            value: value.into(),
        }
    }

    /// Attach a validation tag.
    pub fn tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Whether the field is publicly visible.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
