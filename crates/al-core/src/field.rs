use std::error::Error as StdError;
use std::fmt;

/// Key used by [`Field::error`].
pub const ERROR_KEY: &str = "error";

/// Tag identifying which payload a [`Field`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Int,
    Bool,
    ByteString,
    Interface,
    Error,
    NamedError,
}

/// Payload of a [`Field`], one variant per kind.
///
/// New kinds may be added; adapters outside this crate must keep a wildcard
/// arm that renders the value through its [`Display`](fmt::Display) impl.
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum FieldValue<'f> {
    String(&'f str),
    Int(i64),
    Bool(bool),
    /// Pre-formed content (e.g. raw JSON) that must not be escaped.
    ByteString(&'f [u8]),
    /// Arbitrary value, rendered by the backend.
    Any(&'f dyn fmt::Debug),
    Error(&'f (dyn StdError + 'static)),
    NamedError(&'f (dyn StdError + 'static)),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Int(_) => FieldKind::Int,
            Self::Bool(_) => FieldKind::Bool,
            Self::ByteString(_) => FieldKind::ByteString,
            Self::Any(_) => FieldKind::Interface,
            Self::Error(_) => FieldKind::Error,
            Self::NamedError(_) => FieldKind::NamedError,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::ByteString(b) => f
                .debug_tuple("ByteString")
                .field(&String::from_utf8_lossy(b))
                .finish(),
            Self::Any(v) => f.debug_tuple("Any").field(v).finish(),
            Self::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Self::NamedError(e) => f.debug_tuple("NamedError").field(e).finish(),
        }
    }
}

/// Opaque rendering, used by adapters for kinds they have no dedicated
/// capability for.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::ByteString(b) => f.write_str(&String::from_utf8_lossy(b)),
            Self::Any(v) => write!(f, "{v:?}"),
            Self::Error(e) | Self::NamedError(e) => write!(f, "{e}"),
        }
    }
}

/// Integer types accepted by [`Field::int`].
///
/// Every type widens to `i64`. `u64` and `usize` values above `i64::MAX`
/// saturate at `i64::MAX`.
pub trait FieldInt: Copy {
    fn to_i64(self) -> i64;
}

macro_rules! lossless_field_int {
    ($($ty:ty),*) => {$(
        impl FieldInt for $ty {
            #[inline]
            fn to_i64(self) -> i64 {
                i64::from(self)
            }
        }
    )*};
}

lossless_field_int!(i8, i16, i32, i64, u8, u16, u32);

impl FieldInt for isize {
    #[inline]
    fn to_i64(self) -> i64 {
        i64::try_from(self).unwrap_or(if self < 0 { i64::MIN } else { i64::MAX })
    }
}

impl FieldInt for u64 {
    #[inline]
    fn to_i64(self) -> i64 {
        i64::try_from(self).unwrap_or(i64::MAX)
    }
}

impl FieldInt for usize {
    #[inline]
    fn to_i64(self) -> i64 {
        i64::try_from(self).unwrap_or(i64::MAX)
    }
}

/// One structured key/value attribute attached to a log record.
///
/// Fields borrow their key and payload; building one never allocates and
/// never fails. The constructors are the only way to obtain a `Field`, so the
/// key of an [`FieldKind::Error`] field is always [`ERROR_KEY`].
///
/// ```
/// use al_core::{Field, FieldKind};
///
/// let f = Field::bool("cached", true);
/// assert_eq!(f.kind(), FieldKind::Bool);
/// assert_eq!(f.int_value(), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Field<'f> {
    key: &'f str,
    value: FieldValue<'f>,
}

impl<'f> Field<'f> {
    pub fn string(key: &'f str, value: &'f str) -> Self {
        Self {
            key,
            value: FieldValue::String(value),
        }
    }

    /// Integer field; the value is widened to `i64` (see [`FieldInt`]).
    pub fn int(key: &'f str, value: impl FieldInt) -> Self {
        Self {
            key,
            value: FieldValue::Int(value.to_i64()),
        }
    }

    pub fn bool(key: &'f str, value: bool) -> Self {
        Self {
            key,
            value: FieldValue::Bool(value),
        }
    }

    /// Raw bytes the backend embeds as-is instead of escaping them.
    pub fn byte_string(key: &'f str, value: &'f [u8]) -> Self {
        Self {
            key,
            value: FieldValue::ByteString(value),
        }
    }

    pub fn any(key: &'f str, value: &'f dyn fmt::Debug) -> Self {
        Self {
            key,
            value: FieldValue::Any(value),
        }
    }

    /// Error field under the fixed key `"error"`.
    pub fn error(err: &'f (dyn StdError + 'static)) -> Self {
        Self {
            key: ERROR_KEY,
            value: FieldValue::Error(err),
        }
    }

    pub fn named_error(key: &'f str, err: &'f (dyn StdError + 'static)) -> Self {
        Self {
            key,
            value: FieldValue::NamedError(err),
        }
    }

    pub fn key(&self) -> &'f str {
        self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    pub fn value(&self) -> &FieldValue<'f> {
        &self.value
    }

    /// Integer view of the payload. Booleans read as `1` and `0`.
    pub fn int_value(&self) -> Option<i64> {
        match self.value {
            FieldValue::Int(i) => Some(i),
            FieldValue::Bool(b) => Some(i64::from(b)),
            _ => None,
        }
    }

    pub fn str_value(&self) -> Option<&'f str> {
        match self.value {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn bytes_value(&self) -> Option<&'f [u8]> {
        match self.value {
            FieldValue::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn error_value(&self) -> Option<&'f (dyn StdError + 'static)> {
        match self.value {
            FieldValue::Error(e) | FieldValue::NamedError(e) => Some(e),
            _ => None,
        }
    }
}
