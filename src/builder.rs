use crate::{Anchor, Clause, CompareOp, OrderingRule, Predicate, Record, Result, Side};

/// Builds the condition matching every record strictly before or strictly
/// after an [`Anchor`].
///
/// For an order `a, b, c` the result reads as a lexicographic comparison:
///
/// ```text
/// a < ? OR a = ? AND (b < ? OR b = ? AND c < ?)
/// ```
///
/// and, with [`wrap_top_level_or`](crate::wrap_top_level_or) on, the leading
/// condition is repeated in non-strict form to give the planner a range:
///
/// ```text
/// a <= ? AND (a < ? OR a = ? AND (b < ? OR b = ? AND c < ?))
/// ```
pub struct PredicateBuilder<'a, R: ?Sized> {
    anchor: Anchor<'a, R>,
    wrap_top_level_or: Option<bool>,
}

impl<'a, R: Record + ?Sized> PredicateBuilder<'a, R> {
    pub fn new(anchor: Anchor<'a, R>) -> Self {
        Self {
            anchor,
            wrap_top_level_or: None,
        }
    }

    /// Overrides the global [`wrap_top_level_or`](crate::wrap_top_level_or) switch.
    pub fn wrap_top_level_or(mut self, enabled: bool) -> Self {
        self.wrap_top_level_or = Some(enabled);
        self
    }

    pub fn build(&self, side: Side) -> Result<Predicate> {
        let predicate = self.build_clause(side)?.to_predicate();
        ::tracing::debug!(
            %side,
            fragment = %predicate.fragment(),
            parameters = predicate.parameters().len(),
            "built seek predicate"
        );
        Ok(predicate)
    }

    pub fn build_clause(&self, side: Side) -> Result<Clause> {
        let rules = self.anchor.order().rules();
        let mut pairs = Vec::with_capacity(rules.len());
        for rule in rules {
            let pair: Vec<Clause> = [self.side_term(rule, side, true)?, self.tie_term(rule)?]
                .into_iter()
                .filter(|term| !term.is_identity())
                .collect();
            pairs.push(pair);
        }

        let redundant = if self.wrap_top_level_or.unwrap_or_else(crate::wrap_top_level_or) {
            self.redundant_term(&pairs, side)?
        } else {
            None
        };

        let clause = fold_terms(pairs);
        Ok(match redundant {
            Some(redundant) => Clause::and([redundant, clause]),
            None => clause,
        })
    }

    /// Values of `rule` lying on `side` of the anchor's value.
    fn side_term(&self, rule: &OrderingRule, side: Side, strict: bool) -> Result<Clause> {
        let value = self.anchor.value_of(rule)?;
        Ok(match rule {
            OrderingRule::Natural {
                expression, direction, ..
            } => Clause::compare(expression, direction.operator(side, strict), value),
            OrderingRule::Enumerated {
                expression,
                unique,
                ranks,
                ..
            } => {
                let values = rule.enum_side(&value, side, strict)?.unwrap_or_default();
                // every enumerated value is on this side: no selectivity left
                if *unique && values.len() == ranks.len() {
                    Clause::Identity
                } else {
                    Clause::any_of(expression, values)
                }
            }
        })
    }

    fn tie_term(&self, rule: &OrderingRule) -> Result<Clause> {
        if rule.is_unique() {
            return Ok(Clause::Identity);
        }
        Ok(Clause::compare(rule.expression(), CompareOp::Eq, self.anchor.value_of(rule)?))
    }

    /// The non-strict side term of the first constraining rule, when the
    /// predicate opens with `side OR tie AND ...` and the non-strict form
    /// actually differs.
    fn redundant_term(&self, pairs: &[Vec<Clause>], side: Side) -> Result<Option<Clause>> {
        let Some(pos) = pairs.iter().position(|pair| !pair.is_empty()) else {
            return Ok(None);
        };
        let [strict, _tie] = pairs[pos].as_slice() else {
            return Ok(None);
        };
        let redundant = self.side_term(&self.anchor.order().rules()[pos], side, false)?;
        if redundant.is_identity() || &redundant == strict {
            return Ok(None);
        }
        Ok(Some(redundant))
    }
}

/// Right fold of per-rule term pairs: `[T1, T2, T3]` becomes
/// `T1 AND (T2 AND T3)` read with SQL precedence, so that a pair
/// `[side, tie]` nests as `side OR tie AND (rest)`.
fn fold_terms(pairs: Vec<Vec<Clause>>) -> Clause {
    pairs.into_iter().rev().fold(Clause::Identity, nest)
}

fn nest(rest: Clause, mut pair: Vec<Clause>) -> Clause {
    if rest.is_identity() {
        return Clause::or(pair);
    }
    match pair.pop() {
        None => rest,
        Some(last) => {
            pair.push(Clause::and([last, rest]));
            Clause::or(pair)
        }
    }
}
