use crate::{Anchor, Clause, Direction, Error, OrderingRule, PredicateBuilder, Record, Result, SeekOrder, SeekPage, Side, Value};
use ::std::cmp::Ordering;

/// Applies seek predicates to an in-memory record set sorted by a [`SeekOrder`].
///
/// This is the reference consumer of the predicates [`PredicateBuilder`]
/// produces: records are selected by evaluating the built [`Clause`], never by
/// position, so what a scope returns is what a database would return for the
/// rendered fragment with the matching `ORDER BY`.
pub struct Scope<'a, R> {
    order: &'a SeekOrder,
    records: Vec<&'a R>,
    wrap_top_level_or: Option<bool>,
}

impl<'a, R: Record> Scope<'a, R> {
    /// Sorts `records` by `order`. Fails when a record lacks an ordering value
    /// or the values of one expression cannot all be ordered against each other.
    pub fn new(order: &'a SeekOrder, records: &'a [R]) -> Result<Self> {
        let mut keyed = Vec::with_capacity(records.len());
        for record in records {
            keyed.push((sort_key(order, record)?, record));
        }
        for (pos, rule) in order.rules().iter().enumerate() {
            unify_keys(rule, pos, &mut keyed)?;
        }
        keyed.sort_by(|(lhs, _), (rhs, _)| compare_keys(order, lhs, rhs));
        Ok(Self {
            order,
            records: keyed.into_iter().map(|(_, record)| record).collect(),
            wrap_top_level_or: None,
        })
    }

    /// Overrides the global [`wrap_top_level_or`](crate::wrap_top_level_or)
    /// switch for every predicate this scope builds.
    pub fn wrap_top_level_or(mut self, enabled: bool) -> Self {
        self.wrap_top_level_or = Some(enabled);
        self
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// All records in order.
    pub fn items(&self) -> &[&'a R] {
        &self.records
    }

    pub fn clause(&self, anchor: &R, side: Side) -> Result<Clause> {
        let builder = PredicateBuilder::new(Anchor::new(self.order, anchor));
        match self.wrap_top_level_or {
            Some(enabled) => builder.wrap_top_level_or(enabled).build_clause(side),
            None => builder.build_clause(side),
        }
    }

    /// Records on `side` of `anchor`, in scope order.
    pub fn items_on(&self, anchor: &R, side: Side) -> Result<Vec<&'a R>> {
        let clause = self.clause(anchor, side)?;
        let mut items = Vec::new();
        for record in &self.records {
            if clause.matches(*record)? {
                items.push(*record);
            }
        }
        ::tracing::trace!(%side, matched = items.len(), total = self.records.len(), "applied seek clause");
        Ok(items)
    }

    pub fn items_before(&self, anchor: &R) -> Result<Vec<&'a R>> {
        self.items_on(anchor, Side::Before)
    }

    pub fn items_after(&self, anchor: &R) -> Result<Vec<&'a R>> {
        self.items_on(anchor, Side::After)
    }

    /// The record right after `anchor`. When `looping`, the last record is
    /// followed by the first one.
    pub fn next_item(&self, anchor: &R, looping: bool) -> Result<Option<&'a R>> {
        let next = self.items_after(anchor)?.first().copied();
        Ok(match (next, looping) {
            (None, true) => self.records.first().copied(),
            (next, _) => next,
        })
    }

    /// The record right before `anchor`: the first one in reverse order. When
    /// `looping`, the first record is preceded by the last one.
    pub fn prev_item(&self, anchor: &R, looping: bool) -> Result<Option<&'a R>> {
        let prev = self.items_before(anchor)?.last().copied();
        Ok(match (prev, looping) {
            (None, true) => self.records.last().copied(),
            (prev, _) => prev,
        })
    }

    /// Up to `page.count` records adjacent to `anchor` on `page.side`, nearest first.
    pub fn page(&self, anchor: &R, page: SeekPage) -> Result<Vec<&'a R>> {
        page.validate()?;
        let mut items = self.items_on(anchor, page.side)?;
        if page.side.is_before() {
            items.reverse();
        }
        items.truncate(page.count as usize);
        Ok(items)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum KeyKind {
    Bool,
    Number,
    Text,
    Timestamp,
}

fn key_kind(value: &Value) -> Option<KeyKind> {
    match value {
        Value::Bool(_) => Some(KeyKind::Bool),
        Value::Int(_) => Some(KeyKind::Number),
        Value::Float(value) if !value.is_nan() => Some(KeyKind::Number),
        Value::Text(_) => Some(KeyKind::Text),
        Value::Timestamp(_) => Some(KeyKind::Timestamp),
        Value::Float(_) | Value::List(_) => None,
    }
}

/// One value per rule: the rank for enumerated rules, the record's own value otherwise.
fn sort_key<R: Record>(order: &SeekOrder, record: &R) -> Result<Vec<Value>> {
    order
        .rules()
        .iter()
        .map(|rule| {
            let value = record.require(rule.expression())?;
            Ok(match rule.rank(&value)? {
                Some(rank) => Value::Int(rank as i64),
                None => value,
            })
        })
        .collect()
}

/// Checks that the keys at `pos` share one kind, widening integers to floats
/// when both appear, so that `sort_by` sees a total order.
fn unify_keys<R>(rule: &OrderingRule, pos: usize, keyed: &mut [(Vec<Value>, &R)]) -> Result<()> {
    let incomparable = || Error::Incomparable {
        expression: rule.expression().to_owned(),
    };
    let mut kind = None;
    for (key, _) in keyed.iter() {
        let found = key_kind(&key[pos]).ok_or_else(incomparable)?;
        if *kind.get_or_insert(found) != found {
            return Err(incomparable());
        }
    }
    if keyed.iter().any(|(key, _)| key[pos].is_float()) {
        for (key, _) in keyed.iter_mut() {
            let widened = match key[pos] {
                Value::Int(value) => Value::Float(value as f64),
                _ => continue,
            };
            key[pos] = widened;
        }
    }
    Ok(())
}

fn compare_keys(order: &SeekOrder, lhs: &[Value], rhs: &[Value]) -> Ordering {
    order
        .rules()
        .iter()
        .zip(lhs.iter().zip(rhs))
        .map(|(rule, (lhs, rhs))| {
            let ordering = lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal);
            match rule.get_direction() {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::std::collections::BTreeMap;

    fn post(created_at: i64, id: i64) -> BTreeMap<String, Value> {
        BTreeMap::from([("created_at".to_owned(), created_at.into()), ("id".to_owned(), id.into())])
    }

    fn ids(records: &[&BTreeMap<String, Value>]) -> Vec<i64> {
        records
            .iter()
            .map(|record| match record.get("id") {
                Some(Value::Int(id)) => *id,
                other => panic!("unexpected id {other:?}"),
            })
            .collect()
    }

    fn order() -> SeekOrder {
        SeekOrder::new(vec![
            OrderingRule::natural("created_at").desc(),
            OrderingRule::natural("id").desc().unique(),
        ])
        .unwrap()
    }

    fn posts() -> Vec<BTreeMap<String, Value>> {
        vec![post(1, 1), post(3, 2), post(3, 3), post(2, 4), post(5, 5)]
    }

    #[test]
    fn sorts_records_by_order() {
        let order = order();
        let posts = posts();
        let scope = Scope::new(&order, &posts).unwrap();
        assert_eq!(ids(scope.items()), vec![5, 3, 2, 4, 1]);
        assert_eq!(scope.count(), 5);
    }

    #[test]
    fn selects_both_sides_of_an_anchor() {
        let order = order();
        let posts = posts();
        let scope = Scope::new(&order, &posts).unwrap();
        let anchor = post(3, 2);
        assert_eq!(ids(&scope.items_before(&anchor).unwrap()), vec![5, 3]);
        assert_eq!(ids(&scope.items_after(&anchor).unwrap()), vec![4, 1]);
    }

    #[test]
    fn steps_to_neighbours() {
        let order = order();
        let posts = posts();
        let scope = Scope::new(&order, &posts).unwrap();
        assert_eq!(ids(&[scope.next_item(&post(3, 3), false).unwrap().unwrap()]), vec![2]);
        assert_eq!(ids(&[scope.prev_item(&post(3, 2), false).unwrap().unwrap()]), vec![3]);
        assert!(scope.next_item(&post(1, 1), false).unwrap().is_none());
        assert_eq!(ids(&[scope.next_item(&post(1, 1), true).unwrap().unwrap()]), vec![5]);
        assert_eq!(ids(&[scope.prev_item(&post(5, 5), true).unwrap().unwrap()]), vec![1]);
    }

    #[test]
    fn a_lone_record_loops_onto_itself() {
        let order = order();
        let posts = vec![post(1, 1)];
        let scope = Scope::new(&order, &posts).unwrap();
        assert_eq!(ids(&[scope.next_item(&post(1, 1), true).unwrap().unwrap()]), vec![1]);
        assert!(scope.prev_item(&post(1, 1), false).unwrap().is_none());
    }

    #[test]
    fn pages_nearest_first() {
        let order = order();
        let posts = posts();
        let scope = Scope::new(&order, &posts).unwrap();
        let anchor = post(2, 4);
        assert_eq!(ids(&scope.page(&anchor, SeekPage::before(2)).unwrap()), vec![2, 3]);
        assert_eq!(ids(&scope.page(&anchor, SeekPage::after(2)).unwrap()), vec![1]);
    }

    #[test]
    fn unsortable_records_are_rejected() {
        let order = order();
        let posts = vec![post(1, 1), BTreeMap::from([("id".to_owned(), Value::Int(2))])];
        assert_eq!(
            Scope::new(&order, &posts).err(),
            Some(Error::MissingValue {
                expression: "created_at".into()
            })
        );
    }

    fn scored(id: i64, score: Value) -> BTreeMap<String, Value> {
        BTreeMap::from([("score".to_owned(), score), ("id".to_owned(), id.into())])
    }

    fn by_score() -> SeekOrder {
        SeekOrder::new(vec![OrderingRule::natural("score"), OrderingRule::natural("id").unique()]).unwrap()
    }

    #[test]
    fn nan_scores_are_incomparable() {
        let order = by_score();
        let rows = (1..=30)
            .map(|id| {
                let score = if id % 7 == 0 { Value::Float(f64::NAN) } else { Value::Int(id % 5) };
                scored(id, score)
            })
            .collect::<Vec<_>>();
        assert_eq!(
            Scope::new(&order, &rows).err(),
            Some(Error::Incomparable {
                expression: "score".into()
            })
        );
    }

    #[test]
    fn mixed_kind_scores_are_incomparable() {
        let order = by_score();
        let rows = (1..=30)
            .map(|id| {
                let score = if id % 4 == 0 { Value::from("high") } else { Value::Int(id) };
                scored(id, score)
            })
            .collect::<Vec<_>>();
        assert_eq!(
            Scope::new(&order, &rows).err(),
            Some(Error::Incomparable {
                expression: "score".into()
            })
        );
    }

    #[test]
    fn integer_and_float_scores_sort_together() {
        let order = by_score();
        let rows = vec![
            scored(1, Value::Float(2.5)),
            scored(2, Value::Int(1)),
            scored(3, Value::Int(3)),
            scored(4, Value::Float(-0.5)),
        ];
        let scope = Scope::new(&order, &rows).unwrap();
        assert_eq!(ids(scope.items()), vec![4, 2, 1, 3]);
    }
}
