//! Cell values and their declared type hierarchy.
//!
//! Rules are registered against a [`ValueType`] and match every value whose
//! runtime type is that type or one of its descendants. Value types are plain
//! data: statics linked to their parent, compared by address.
//!
//! ```
//! use horizon_cells::value::{CellValue, INTEGER, NUMBER, OBJECT, STRING};
//!
//! let value = CellValue::from(42);
//! assert!(std::ptr::eq(value.value_type(), &INTEGER));
//! assert!(NUMBER.is_ancestor_of(value.value_type()));
//! assert!(OBJECT.is_ancestor_of(value.value_type()));
//! assert!(!STRING.is_ancestor_of(value.value_type()));
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Converts editor text into a typed value; `None` when the text is not valid.
pub type Parser = fn(&str) -> Option<CellValue>;

/// A node in the value type hierarchy.
///
/// Declare custom types as statics so that their address is stable:
///
/// ```
/// use horizon_cells::value::{ValueType, NUMBER};
///
/// static SPEED: ValueType = ValueType::derived("Speed", &NUMBER);
/// assert!(NUMBER.is_ancestor_of(&SPEED));
/// assert!(!SPEED.is_ancestor_of(&NUMBER));
/// ```
pub struct ValueType {
    name: &'static str,
    parent: Option<&'static ValueType>,
    parser: Option<Parser>,
}

impl ValueType {
    /// A type without parent. Only [`OBJECT`] should normally be a root.
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            parser: None,
        }
    }

    /// A type derived from `parent`.
    pub const fn derived(name: &'static str, parent: &'static ValueType) -> Self {
        Self {
            name,
            parent: Some(parent),
            parser: None,
        }
    }

    /// Attach a text parser, used by editors to convert text back to values.
    pub const fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Gets the type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Gets the parent type.
    pub fn parent(&self) -> Option<&'static ValueType> {
        self.parent
    }

    /// Returns `true` if this type is `other` or one of its ancestors.
    pub fn is_ancestor_of(&self, other: &ValueType) -> bool {
        let mut current = Some(other);
        while let Some(ty) = current {
            if std::ptr::eq(self, ty) {
                return true;
            }
            current = ty.parent;
        }
        false
    }

    /// Parse `text` into a value of this type.
    ///
    /// Types without a parser of their own use the closest ancestor parser
    /// that exists below the root.
    pub fn parse(&self, text: &str) -> Option<CellValue> {
        self.parser().and_then(|parser| parser(text))
    }

    /// The parser used by [`parse`](Self::parse), if any.
    pub fn parser(&self) -> Option<Parser> {
        let mut current = Some(self);
        while let Some(ty) = current {
            if let Some(parser) = ty.parser {
                return Some(parser);
            }
            current = ty.parent;
        }
        None
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self, state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueType")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|p| p.name))
            .finish()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn parse_integer(text: &str) -> Option<CellValue> {
    text.trim().parse::<i64>().ok().map(CellValue::Int)
}

fn parse_double(text: &str) -> Option<CellValue> {
    text.trim().parse::<f64>().ok().map(CellValue::Float)
}

fn parse_string(text: &str) -> Option<CellValue> {
    Some(CellValue::String(text.to_owned()))
}

fn parse_boolean(text: &str) -> Option<CellValue> {
    Some(CellValue::Bool(text.trim().eq_ignore_ascii_case("true")))
}

/// The universal type; every value, including an absent one, is an `Object`.
pub static OBJECT: ValueType = ValueType::root("Object");
/// Abstract numeric type.
pub static NUMBER: ValueType = ValueType::derived("Number", &OBJECT);
/// 64-bit signed integers.
pub static INTEGER: ValueType = ValueType::derived("Integer", &NUMBER).with_parser(parse_integer);
/// 64-bit floats.
pub static DOUBLE: ValueType = ValueType::derived("Double", &NUMBER).with_parser(parse_double);
/// Text.
pub static STRING: ValueType = ValueType::derived("String", &OBJECT).with_parser(parse_string);
/// Booleans.
pub static BOOLEAN: ValueType = ValueType::derived("Boolean", &OBJECT).with_parser(parse_boolean);

/// A caller-defined value that can live in a cell.
pub trait CustomValue: Any + fmt::Debug + fmt::Display {
    /// The declared runtime type of this value.
    fn value_type(&self) -> &'static ValueType;

    /// Equality with another custom value. Defaults to identity.
    fn eq_value(&self, other: &dyn CustomValue) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn CustomValue)
    }
}

/// The value shown in, or edited through, a cell.
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    /// No value.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Custom(Rc<dyn CustomValue>),
}

impl CellValue {
    /// Wrap a custom value.
    pub fn custom(value: impl CustomValue) -> Self {
        CellValue::Custom(Rc::new(value))
    }

    /// The runtime type. Absent values are [`OBJECT`].
    pub fn value_type(&self) -> &'static ValueType {
        match self {
            CellValue::None => &OBJECT,
            CellValue::Bool(_) => &BOOLEAN,
            CellValue::Int(_) => &INTEGER,
            CellValue::Float(_) => &DOUBLE,
            CellValue::String(_) => &STRING,
            CellValue::Custom(custom) => custom.value_type(),
        }
    }

    /// Returns `true` if there is no value.
    pub fn is_none(&self) -> bool {
        matches!(self, CellValue::None)
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast a custom value.
    pub fn downcast_ref<T: CustomValue>(&self) -> Option<&T> {
        match self {
            CellValue::Custom(custom) => {
                let any: &dyn Any = custom.as_ref();
                any.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// The display text of the value; empty when absent.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::None => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::String(s) => f.write_str(s),
            CellValue::Custom(custom) => write!(f, "{custom}"),
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::None, CellValue::None) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a == b,
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Custom(a), CellValue::Custom(b)) => a.eq_value(b.as_ref()),
            _ => false,
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::None, Into::into)
    }
}
