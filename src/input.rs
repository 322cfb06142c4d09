//! Untyped input values
//!
//! Everything a caller hands to a val is an [`Input`]: a small dynamic value
//! model covering scalars, sequences, string-keyed maps and opaque host
//! objects. Vals never mutate their input; they only inspect it.
//!
//! # Examples
//!
//! ```
//! use sluice::Input;
//!
//! let raw = Input::from(vec![1, 2, 3]);
//! assert!(raw.is_iterable());
//! assert_eq!(raw.elements().map(|e| e.count()), Some(3));
//!
//! assert!(Input::from("5").loose_eq(&Input::from(5)));
//! assert!(!Input::from("5").strict_eq(&Input::from(5)));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A host object carried inside an [`Input`].
///
/// Objects are opaque to the vals except for three capabilities: a type
/// identity, a subtype test, and an optional text rendering.
///
/// # Example
///
/// ```
/// use sluice::{Input, Object};
///
/// #[derive(Debug)]
/// struct Email(String);
///
/// impl Object for Email {
///     fn type_name(&self) -> &'static str {
///         "Email"
///     }
///
///     fn is_a(&self, type_name: &str) -> bool {
///         type_name == "Email" || type_name == "Contact"
///     }
///
///     fn to_text(&self) -> Option<String> {
///         Some(self.0.clone())
///     }
/// }
///
/// let input = Input::object(Email("a@b.c".into()));
/// assert_eq!(input.to_text().as_deref(), Some("a@b.c"));
/// ```
pub trait Object: fmt::Debug + Send + Sync {
    /// The concrete type identity of this object.
    fn type_name(&self) -> &'static str;

    /// Whether this object is an instance of, or implements, `type_name`.
    fn is_a(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }

    /// Text rendering, if the object has one.
    fn to_text(&self) -> Option<String> {
        None
    }
}

/// A raw, untyped value submitted for validation.
#[derive(Debug, Clone, Default)]
pub enum Input {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
    /// Ordered sequence
    List(Vec<Input>),
    /// String-keyed map; iterates over its values
    Map(BTreeMap<String, Input>),
    /// Opaque host object
    Object(Arc<dyn Object>),
}

impl Input {
    /// Wrap a host object.
    pub fn object<O: Object + 'static>(object: O) -> Self {
        Input::Object(Arc::new(object))
    }

    /// Short label for the shape of this value, used in messages.
    ///
    /// Objects report their own type name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Input::Null => "null",
            Input::Bool(_) => "bool",
            Input::Int(_) => "int",
            Input::Float(_) => "float",
            Input::Str(_) => "string",
            Input::List(_) => "list",
            Input::Map(_) => "map",
            Input::Object(o) => o.type_name(),
        }
    }

    /// Check whether this is `Input::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Input::Null)
    }

    /// Lists and maps are iterable; nothing else is.
    pub fn is_iterable(&self) -> bool {
        matches!(self, Input::List(_) | Input::Map(_))
    }

    /// Iterate the elements of a list, or the values of a map.
    ///
    /// Returns `None` when the input is not iterable.
    pub fn elements(&self) -> Option<Box<dyn Iterator<Item = &Input> + '_>> {
        match self {
            Input::List(items) => Some(Box::new(items.iter())),
            Input::Map(entries) => Some(Box::new(entries.values())),
            _ => None,
        }
    }

    /// Text of a string or of an object that can render itself.
    ///
    /// Numbers and booleans are *not* stringable: use [`Input::coerce_text`]
    /// for primitive string coercion.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Input::Str(s) => Some(s.clone()),
            Input::Object(o) => o.to_text(),
            _ => None,
        }
    }

    /// Primitive coercion to text for strings, integers, floats and booleans.
    ///
    /// `true` renders as `"1"` and `false` as the empty string. Objects,
    /// containers and null do not coerce.
    pub fn coerce_text(&self) -> Option<String> {
        match self {
            Input::Str(s) => Some(s.clone()),
            Input::Int(i) => Some(i.to_string()),
            Input::Float(f) => Some(f.to_string()),
            Input::Bool(true) => Some("1".to_string()),
            Input::Bool(false) => Some(String::new()),
            _ => None,
        }
    }

    /// Truthiness used by loose comparison.
    pub fn truthy(&self) -> bool {
        match self {
            Input::Null => false,
            Input::Bool(b) => *b,
            Input::Int(i) => *i != 0,
            Input::Float(f) => *f != 0.0,
            Input::Str(s) => !s.is_empty() && s != "0",
            Input::List(items) => !items.is_empty(),
            Input::Map(entries) => !entries.is_empty(),
            Input::Object(_) => true,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Input::Int(i) => Some(*i as f64),
            Input::Float(f) => Some(*f),
            Input::Str(s) => {
                let s = s.trim();
                if is_decimal_notation(s) {
                    s.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Type-strict equality: same shape and same value.
    ///
    /// Objects are equal only when they are the same allocation.
    pub fn strict_eq(&self, other: &Input) -> bool {
        match (self, other) {
            (Input::Null, Input::Null) => true,
            (Input::Bool(a), Input::Bool(b)) => a == b,
            (Input::Int(a), Input::Int(b)) => a == b,
            (Input::Float(a), Input::Float(b)) => a == b,
            (Input::Str(a), Input::Str(b)) => a == b,
            (Input::List(a), Input::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Input::Map(a), Input::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.strict_eq(w)))
            }
            (Input::Object(a), Input::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Loose equality.
    ///
    /// Numbers compare by numeric value across int, float and numeric
    /// strings. A boolean on either side compares by truthiness. Null equals
    /// the empty string and any other falsy value, but not `"0"`.
    pub fn loose_eq(&self, other: &Input) -> bool {
        match (self, other) {
            (Input::Bool(_), _) | (_, Input::Bool(_)) => self.truthy() == other.truthy(),
            (Input::Null, Input::Null) => true,
            (Input::Null, Input::Str(s)) | (Input::Str(s), Input::Null) => s.is_empty(),
            (Input::Null, x) | (x, Input::Null) => !x.truthy(),
            (Input::Int(a), Input::Int(b)) => a == b,
            (Input::Str(a), Input::Str(b)) if a == b => true,
            (
                Input::Int(_) | Input::Float(_) | Input::Str(_),
                Input::Int(_) | Input::Float(_) | Input::Str(_),
            ) => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            (Input::List(a), Input::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Input::Map(a), Input::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.loose_eq(w)))
            }
            (Input::Object(a), Input::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Digits, signs, point and exponent only; "inf" and "nan" stay text.
fn is_decimal_notation(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Null => write!(f, "null"),
            Input::Bool(b) => write!(f, "{}", b),
            Input::Int(i) => write!(f, "{}", i),
            Input::Float(x) => write!(f, "{}", x),
            Input::Str(s) => write!(f, "\"{}\"", s),
            Input::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Input::Map(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Input::Object(o) => write!(f, "<{}>", o.type_name()),
        }
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Input {
                fn from(value: $t) -> Self {
                    Input::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider unsigned values that do not fit an int become floats.
macro_rules! impl_from_wide_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Input {
                fn from(value: $t) -> Self {
                    i64::try_from(value).map_or(Input::Float(value as f64), Input::Int)
                }
            }
        )+
    };
}

impl_from_wide_unsigned!(u64, usize);

impl From<f32> for Input {
    fn from(value: f32) -> Self {
        Input::Float(f64::from(value))
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Float(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Str(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Str(value)
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(values: Vec<T>) -> Self {
        Input::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input>> From<BTreeMap<String, T>> for Input {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Input::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Null, Into::into)
    }
}

impl From<Arc<dyn Object>> for Input {
    fn from(object: Arc<dyn Object>) -> Self {
        Input::Object(object)
    }
}

impl<T: Into<Input>> FromIterator<T> for Input {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Input::List(iter.into_iter().map(Into::into).collect())
    }
}
