use crate::{CompareOp, Predicate, Record, Result, Value};

/// The structure of a seek predicate.
///
/// Rendering follows SQL precedence (`AND` binds tighter than `OR`), so
/// `Or([a, And([b, c])])` renders `a OR b AND c` and [`Clause::matches`]
/// evaluates exactly what a database would for the rendered fragment.
#[derive(Clone, Debug, IsVariant, PartialEq)]
pub enum Clause {
    Identity,
    Compare {
        expression: String,
        op: CompareOp,
        value: Value,
    },
    In {
        expression: String,
        values: Vec<Value>,
    },
    And(Vec<Clause>),
    Or(Vec<Clause>),
}

impl Clause {
    pub fn compare(expression: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self::Compare {
            expression: expression.into(),
            op,
            value,
        }
    }

    /// `expr = v` for one value, `expr IN (...)` for several, identity for none.
    pub fn any_of(expression: impl Into<String>, values: &[Value]) -> Self {
        match values {
            [] => Self::Identity,
            [value] => Self::compare(expression, CompareOp::Eq, value.clone()),
            values => Self::In {
                expression: expression.into(),
                values: values.to_vec(),
            },
        }
    }

    /// Conjunction of the non-identity `clauses`; a single survivor is returned as is.
    pub fn and(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::connect(clauses, Self::And)
    }

    /// Disjunction of the non-identity `clauses`; a single survivor is returned as is.
    pub fn or(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::connect(clauses, Self::Or)
    }

    fn connect(clauses: impl IntoIterator<Item = Clause>, variant: fn(Vec<Clause>) -> Self) -> Self {
        let mut clauses: Vec<_> = clauses.into_iter().filter(|clause| !clause.is_identity()).collect();
        match clauses.len() {
            0 => Self::Identity,
            1 => clauses.remove(0),
            _ => variant(clauses),
        }
    }

    fn is_compound(&self) -> bool {
        self.is_and() || self.is_or()
    }

    pub fn to_predicate(&self) -> Predicate {
        match self {
            Self::Identity => Predicate::IDENTITY,
            Self::Compare { expression, op, value } => {
                Predicate::new(format!("{expression} {op} ?"), vec![value.clone()])
            }
            Self::In { expression, values } => {
                Predicate::new(format!("{expression} IN (?)"), vec![Value::List(values.clone())])
            }
            Self::And(clauses) => Predicate::and(clauses.iter().enumerate().map(|(i, clause)| {
                let predicate = clause.to_predicate();
                // the leading operand only needs grouping when it is a disjunction
                match (i, clause) {
                    (0, Self::Or(_)) => predicate.parenthesized(),
                    (0, _) => predicate,
                    _ if clause.is_compound() => predicate.parenthesized(),
                    _ => predicate,
                }
            })),
            Self::Or(clauses) => Predicate::or(clauses.iter().map(|clause| match clause {
                Self::Or(_) => clause.to_predicate().parenthesized(),
                _ => clause.to_predicate(),
            })),
        }
    }

    /// Evaluates the clause against `record`; identity matches everything.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> Result<bool> {
        Ok(match self {
            Self::Identity => true,
            Self::Compare { expression, op, value } => op.test(&record.require(expression)?, value),
            Self::In { expression, values } => values.contains(&record.require(expression)?),
            Self::And(clauses) => {
                for clause in clauses {
                    if !clause.matches(record)? {
                        return Ok(false);
                    }
                }
                true
            }
            Self::Or(clauses) => {
                for clause in clauses {
                    if clause.matches(record)? {
                        return Ok(true);
                    }
                }
                false
            }
        })
    }
}

impl From<Clause> for Predicate {
    fn from(clause: Clause) -> Self {
        clause.to_predicate()
    }
}
