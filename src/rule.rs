use crate::{Error, Result, Side, Value};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, IsVariant, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Direction {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Comparison operator selecting values on `side` of an anchor value.
    pub(crate) fn operator(self, side: Side, strict: bool) -> CompareOp {
        match (self, side, strict) {
            (Self::Asc, Side::Before, true) | (Self::Desc, Side::After, true) => CompareOp::Lt,
            (Self::Asc, Side::After, true) | (Self::Desc, Side::Before, true) => CompareOp::Gt,
            (Self::Asc, Side::Before, false) | (Self::Desc, Side::After, false) => CompareOp::LtEq,
            (Self::Asc, Side::After, false) | (Self::Desc, Side::Before, false) => CompareOp::GtEq,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<")]
    Lt,
    #[display("<=")]
    LtEq,
    #[display(">")]
    Gt,
    #[display(">=")]
    GtEq,
}

impl CompareOp {
    pub fn test(self, lhs: &Value, rhs: &Value) -> bool {
        let Some(ordering) = lhs.partial_cmp(rhs) else {
            return false;
        };
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Lt => ordering.is_lt(),
            Self::LtEq => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::GtEq => ordering.is_ge(),
        }
    }
}

/// One expression's contribution to a [`SeekOrder`](crate::SeekOrder).
///
/// `Natural` rules order by the values themselves. `Enumerated` rules order by
/// each value's position in `ranks`.
#[derive(Clone, Debug, Deserialize, IsVariant, PartialEq, Serialize)]
pub enum OrderingRule {
    Natural {
        expression: String,
        direction: Direction,
        unique: bool,
    },
    Enumerated {
        expression: String,
        direction: Direction,
        unique: bool,
        ranks: Vec<Value>,
    },
}

impl OrderingRule {
    pub fn natural(expression: impl Into<String>) -> Self {
        Self::Natural {
            expression: expression.into(),
            direction: Direction::Asc,
            unique: false,
        }
    }

    pub fn enumerated<V: Into<Value>>(expression: impl Into<String>, ranks: impl IntoIterator<Item = V>) -> Self {
        Self::Enumerated {
            expression: expression.into(),
            direction: Direction::Asc,
            unique: false,
            ranks: ranks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn direction(mut self, value: Direction) -> Self {
        match &mut self {
            Self::Natural { direction, .. } | Self::Enumerated { direction, .. } => *direction = value,
        }
        self
    }

    pub fn asc(self) -> Self {
        self.direction(Direction::Asc)
    }

    pub fn desc(self) -> Self {
        self.direction(Direction::Desc)
    }

    pub fn unique(mut self) -> Self {
        match &mut self {
            Self::Natural { unique, .. } | Self::Enumerated { unique, .. } => *unique = true,
        }
        self
    }

    pub fn expression(&self) -> &str {
        match self {
            Self::Natural { expression, .. } | Self::Enumerated { expression, .. } => expression,
        }
    }

    pub fn get_direction(&self) -> Direction {
        match self {
            Self::Natural { direction, .. } | Self::Enumerated { direction, .. } => *direction,
        }
    }

    pub fn is_unique(&self) -> bool {
        match self {
            Self::Natural { unique, .. } | Self::Enumerated { unique, .. } => *unique,
        }
    }

    pub fn ranks(&self) -> Option<&[Value]> {
        match self {
            Self::Natural { .. } => None,
            Self::Enumerated { ranks, .. } => Some(ranks),
        }
    }

    /// Position of `value` in the enumeration, `None` for natural rules.
    pub fn rank(&self, value: &Value) -> Result<Option<usize>> {
        match self {
            Self::Natural { .. } => Ok(None),
            Self::Enumerated { expression, ranks, .. } => match ranks.iter().position(|rank| rank == value) {
                Some(pos) => Ok(Some(pos)),
                None => Err(Error::UnknownEnumValue {
                    expression: expression.clone(),
                    value: value.clone(),
                }),
            },
        }
    }

    /// Enumerated values lying on `side` of `value`, nearest last for `Before`
    /// and nearest first for `After` when ascending. A non-strict side also
    /// contains `value` itself. Natural rules have no finite side.
    pub fn enum_side(&self, value: &Value, side: Side, strict: bool) -> Result<Option<&[Value]>> {
        let (Some(ranks), Some(pos)) = (self.ranks(), self.rank(value)?) else {
            return Ok(None);
        };
        let lower = match (self.get_direction(), side) {
            (Direction::Asc, Side::Before) | (Direction::Desc, Side::After) => true,
            (Direction::Asc, Side::After) | (Direction::Desc, Side::Before) => false,
        };
        Ok(Some(match (lower, strict) {
            (true, true) => &ranks[..pos],
            (true, false) => &ranks[..=pos],
            (false, true) => &ranks[pos + 1..],
            (false, false) => &ranks[pos..],
        }))
    }
}
