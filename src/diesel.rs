use crate::{OrderBy, Predicate, Value};
use ::chrono::NaiveDateTime;
use ::diesel::backend::Backend;
use ::diesel::expression::expression_types::NotSelectable;
use ::diesel::expression::{is_aggregate, ValidGrouping};
use ::diesel::query_builder::*;
use ::diesel::serialize::ToSql;
use ::diesel::sql_types::{BigInt, Bool, Double, HasSqlType, Text, Timestamp};
use ::diesel::{AppearsOnTable, Expression, QueryResult, SelectableExpression};

static IDENTITY_SQL: &str = "1 = 1";

/// Backends able to bind every [`Value`] kind.
pub trait SeekBackend:
    Backend
    + HasSqlType<Bool>
    + HasSqlType<BigInt>
    + HasSqlType<Double>
    + HasSqlType<Text>
    + HasSqlType<Timestamp>
where
    bool: ToSql<Bool, Self>,
    i64: ToSql<BigInt, Self>,
    f64: ToSql<Double, Self>,
    String: ToSql<Text, Self>,
    NaiveDateTime: ToSql<Timestamp, Self>,
{
}

impl<DB> SeekBackend for DB
where
    DB: Backend
        + HasSqlType<Bool>
        + HasSqlType<BigInt>
        + HasSqlType<Double>
        + HasSqlType<Text>
        + HasSqlType<Timestamp>,
    bool: ToSql<Bool, DB>,
    i64: ToSql<BigInt, DB>,
    f64: ToSql<Double, DB>,
    String: ToSql<Text, DB>,
    NaiveDateTime: ToSql<Timestamp, DB>,
{
}

/// Pushes `fragment`, replacing each `?` with the next parameter. Lists expand
/// to comma separated binds, so `expr IN (?)` becomes `expr IN ($1, $2)`.
fn walk_parametrized<'b, DB>(fragment: &str, parameters: &'b [Value], pass: &mut AstPass<'_, 'b, DB>) -> QueryResult<()>
where
    DB: SeekBackend,
    bool: ToSql<Bool, DB>,
    i64: ToSql<BigInt, DB>,
    f64: ToSql<Double, DB>,
    String: ToSql<Text, DB>,
    NaiveDateTime: ToSql<Timestamp, DB>,
{
    let mut parameters = parameters.iter();
    for (i, chunk) in fragment.split('?').enumerate() {
        if i > 0 {
            let value = parameters.next().ok_or_else(|| {
                ::diesel::result::Error::QueryBuilderError("seek fragment has more placeholders than parameters".into())
            })?;
            push_value(value, pass)?;
        }
        pass.push_sql(chunk);
    }
    if parameters.next().is_some() {
        return Err(::diesel::result::Error::QueryBuilderError(
            "seek fragment has fewer placeholders than parameters".into(),
        ));
    }
    Ok(())
}

fn push_value<'b, DB>(value: &'b Value, pass: &mut AstPass<'_, 'b, DB>) -> QueryResult<()>
where
    DB: SeekBackend,
    bool: ToSql<Bool, DB>,
    i64: ToSql<BigInt, DB>,
    f64: ToSql<Double, DB>,
    String: ToSql<Text, DB>,
    NaiveDateTime: ToSql<Timestamp, DB>,
{
    match value {
        Value::Bool(value) => pass.push_bind_param::<Bool, _>(value),
        Value::Int(value) => pass.push_bind_param::<BigInt, _>(value),
        Value::Float(value) => pass.push_bind_param::<Double, _>(value),
        Value::Text(value) => pass.push_bind_param::<Text, _>(value),
        Value::Timestamp(value) => pass.push_bind_param::<Timestamp, _>(value),
        Value::List(values) => {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    pass.push_sql(", ");
                }
                push_value(value, pass)?;
            }
            Ok(())
        }
    }
}

impl<DB> QueryFragment<DB> for Predicate
where
    DB: SeekBackend,
    bool: ToSql<Bool, DB>,
    i64: ToSql<BigInt, DB>,
    f64: ToSql<Double, DB>,
    String: ToSql<Text, DB>,
    NaiveDateTime: ToSql<Timestamp, DB>,
{
    fn walk_ast<'b>(&'b self, mut pass: AstPass<'_, 'b, DB>) -> QueryResult<()> {
        pass.unsafe_to_cache_prepared();
        if self.is_identity() {
            pass.push_sql(IDENTITY_SQL);
            return Ok(());
        }
        walk_parametrized(self.fragment(), self.parameters(), &mut pass)
    }
}

impl<DB> QueryFragment<DB> for OrderBy
where
    DB: SeekBackend,
    bool: ToSql<Bool, DB>,
    i64: ToSql<BigInt, DB>,
    f64: ToSql<Double, DB>,
    String: ToSql<Text, DB>,
    NaiveDateTime: ToSql<Timestamp, DB>,
{
    fn walk_ast<'b>(&'b self, mut pass: AstPass<'_, 'b, DB>) -> QueryResult<()> {
        pass.unsafe_to_cache_prepared();
        walk_parametrized(self.fragment(), self.parameters(), &mut pass)
    }
}

macro_rules! raw_expression {
    ($ty:ty, $sql_type:ty) => {
        impl QueryId for $ty {
            type QueryId = ();
            const HAS_STATIC_QUERY_ID: bool = false;
        }

        impl Expression for $ty {
            type SqlType = $sql_type;
        }

        impl<QS> AppearsOnTable<QS> for $ty {}

        impl<QS> SelectableExpression<QS> for $ty {}

        impl<GB> ValidGrouping<GB> for $ty {
            type IsAggregate = is_aggregate::Never;
        }
    };
}

raw_expression!(Predicate, Bool);
raw_expression!(OrderBy, NotSelectable);
