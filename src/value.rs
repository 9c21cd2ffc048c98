use ::chrono::NaiveDateTime;
use ::itertools::Itertools;
use ::std::cmp::Ordering;
use ::std::fmt;

/// A value taken by a record for an ordering expression, or bound into a predicate.
///
/// `List` only appears as the single bound parameter of a membership term.
#[derive(Clone, Debug, Deserialize, From, IsVariant, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Value {
    /// Values of the same kind compare naturally, integers and floats compare
    /// numerically, everything else is unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(lhs), Self::Bool(rhs)) => lhs.partial_cmp(rhs),
            (Self::Int(lhs), Self::Int(rhs)) => lhs.partial_cmp(rhs),
            (Self::Float(lhs), Self::Float(rhs)) => lhs.partial_cmp(rhs),
            (Self::Int(lhs), Self::Float(rhs)) => (*lhs as f64).partial_cmp(rhs),
            (Self::Float(lhs), Self::Int(rhs)) => lhs.partial_cmp(&(*rhs as f64)),
            (Self::Text(lhs), Self::Text(rhs)) => lhs.partial_cmp(rhs),
            (Self::Timestamp(lhs), Self::Timestamp(rhs)) => lhs.partial_cmp(rhs),
            (Self::List(lhs), Self::List(rhs)) => lhs.iter().partial_cmp(rhs.iter()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Timestamp(value) => write!(f, "{value}"),
            Self::List(values) => write!(f, "[{}]", values.iter().join(", ")),
        }
    }
}
