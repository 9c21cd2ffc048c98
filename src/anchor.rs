use crate::{Error, OrderingRule, Result, SeekOrder, Value};
use ::std::collections::{BTreeMap, HashMap};

/// Exposes a record's values for ordering expressions.
pub trait Record {
    fn value_of(&self, expression: &str) -> Option<Value>;

    fn require(&self, expression: &str) -> Result<Value> {
        self.value_of(expression).ok_or_else(|| Error::MissingValue {
            expression: expression.to_owned(),
        })
    }
}

impl Record for BTreeMap<String, Value> {
    fn value_of(&self, expression: &str) -> Option<Value> {
        self.get(expression).cloned()
    }
}

impl Record for HashMap<String, Value> {
    fn value_of(&self, expression: &str) -> Option<Value> {
        self.get(expression).cloned()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn value_of(&self, expression: &str) -> Option<Value> {
        (**self).value_of(expression)
    }
}

/// One record bound to an order: the pagination boundary.
pub struct Anchor<'a, R: ?Sized> {
    order: &'a SeekOrder,
    record: &'a R,
}

impl<R: ?Sized> Clone for Anchor<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Anchor<'_, R> {}

impl<'a, R: Record + ?Sized> Anchor<'a, R> {
    pub fn new(order: &'a SeekOrder, record: &'a R) -> Self {
        Self { order, record }
    }

    pub fn order(&self) -> &'a SeekOrder {
        self.order
    }

    pub fn record(&self) -> &'a R {
        self.record
    }

    /// The anchor's value for `rule`'s expression.
    pub fn value_of(&self, rule: &OrderingRule) -> Result<Value> {
        self.record.require(rule.expression())
    }
}
