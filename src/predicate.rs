use crate::Value;

#[derive(Clone, Copy, Debug, Display, Eq, Hash, IsVariant, PartialEq)]
pub enum Connective {
    #[display("AND")]
    And,
    #[display("OR")]
    Or,
}

/// A query fragment with `?` placeholders and the values bound to them, in
/// placeholder order.
///
/// A membership term (`expr IN (?)`) binds one [`Value::List`] which the
/// consumer expands.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Predicate {
    fragment: String,
    parameters: Vec<Value>,
}

impl Predicate {
    /// The empty predicate, neutral for both [`Predicate::and`] and [`Predicate::or`].
    pub const IDENTITY: Predicate = Predicate {
        fragment: String::new(),
        parameters: Vec::new(),
    };

    pub fn new(fragment: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            fragment: fragment.into(),
            parameters,
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn is_identity(&self) -> bool {
        self.fragment.is_empty()
    }

    /// Joins the non-identity `terms` with `connective`.
    pub fn join(connective: Connective, terms: impl IntoIterator<Item = Predicate>) -> Self {
        let (fragments, parameters): (Vec<_>, Vec<_>) = terms
            .into_iter()
            .filter(|term| !term.is_identity())
            .map(|term| (term.fragment, term.parameters))
            .unzip();
        Self {
            fragment: fragments.join(&format!(" {connective} ")),
            parameters: parameters.into_iter().flatten().collect(),
        }
    }

    pub fn and(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Self::join(Connective::And, terms)
    }

    pub fn or(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Self::join(Connective::Or, terms)
    }

    pub fn parenthesized(self) -> Self {
        if self.is_identity() {
            return self;
        }
        Self {
            fragment: format!("({})", self.fragment),
            parameters: self.parameters,
        }
    }
}
