use crate::{Error, OrderingRule, Result, Value};
use ::itertools::Itertools;

/// A validated sequence of [`OrderingRule`]s defining a total order.
///
/// Built once and shared; every anchor and predicate borrows from it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "Vec<OrderingRule>", into = "Vec<OrderingRule>")]
pub struct SeekOrder {
    rules: Vec<OrderingRule>,
}

/// A parametrized `ORDER BY` body matching a [`SeekOrder`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OrderBy {
    fragment: String,
    parameters: Vec<Value>,
}

impl OrderBy {
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }
}

impl SeekOrder {
    /// Rejects orders that cannot define a total order: no rules, a last rule
    /// that is not unique, or an empty or repeating enumeration.
    pub fn new(rules: impl IntoIterator<Item = OrderingRule>) -> Result<Self> {
        let rules = rules.into_iter().collect_vec();
        let last = rules.last().ok_or(Error::EmptyOrder)?;
        if !last.is_unique() {
            return Err(Error::NonUniqueLastRule {
                expression: last.expression().to_owned(),
            });
        }
        for rule in &rules {
            let Some(ranks) = rule.ranks() else { continue };
            if ranks.is_empty() {
                return Err(Error::EmptyEnumeration {
                    expression: rule.expression().to_owned(),
                });
            }
            for (pos, rank) in ranks.iter().enumerate() {
                if ranks[..pos].contains(rank) {
                    return Err(Error::DuplicateEnumValue {
                        expression: rule.expression().to_owned(),
                        value: rank.clone(),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Skips validation. An empty order matches every record on both sides.
    pub fn unchecked(rules: impl IntoIterator<Item = OrderingRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[OrderingRule] {
        &self.rules
    }

    /// Renders the `ORDER BY` body, every direction flipped when `reverse`.
    ///
    /// Enumerated rules order by rank:
    /// `CASE priority WHEN ? THEN 0 WHEN ? THEN 1 END ASC`.
    pub fn order_by(&self, reverse: bool) -> OrderBy {
        let mut parameters = Vec::new();
        let fragment = self
            .rules
            .iter()
            .map(|rule| {
                let direction = if reverse {
                    rule.get_direction().reverse()
                } else {
                    rule.get_direction()
                };
                match rule.ranks() {
                    None => format!("{} {direction}", rule.expression()),
                    Some(ranks) => {
                        parameters.extend(ranks.iter().cloned());
                        let whens = (0..ranks.len()).map(|rank| format!("WHEN ? THEN {rank}")).join(" ");
                        format!("CASE {} {whens} END {direction}", rule.expression())
                    }
                }
            })
            .join(", ");
        OrderBy { fragment, parameters }
    }
}

impl TryFrom<Vec<OrderingRule>> for SeekOrder {
    type Error = Error;

    fn try_from(rules: Vec<OrderingRule>) -> Result<Self> {
        Self::new(rules)
    }
}

impl From<SeekOrder> for Vec<OrderingRule> {
    fn from(order: SeekOrder) -> Self {
        order.rules
    }
}
