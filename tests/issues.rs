use ::chrono::{Duration, NaiveDate, NaiveDateTime};
use ::pretty_assertions::assert_eq;
use ::seek_order::{Anchor, OrderingRule, PredicateBuilder, Record, Scope, SeekOrder, Side, Value};

#[derive(Clone, Debug, PartialEq)]
struct Issue {
    id: i64,
    priority: &'static str,
    votes: i64,
    suspicious_votes: i64,
    updated_at: NaiveDateTime,
}

impl Record for Issue {
    fn value_of(&self, expression: &str) -> Option<Value> {
        match expression {
            "id" => Some(self.id.into()),
            "priority" => Some(self.priority.into()),
            "(votes - suspicious_votes)" => Some((self.votes - self.suspicious_votes).into()),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

fn display_order() -> SeekOrder {
    SeekOrder::new(vec![
        OrderingRule::enumerated("priority", ["high", "medium", "low"]),
        OrderingRule::natural("(votes - suspicious_votes)").desc(),
        OrderingRule::natural("updated_at").desc(),
        OrderingRule::natural("id").desc().unique(),
    ])
    .unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2014, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

/// Rows listed in display order; ids are assigned in reverse so that the
/// `id DESC` tie-breaker agrees with the listing.
fn issues(rows: &[(&'static str, i64, i64, NaiveDateTime)]) -> Vec<Issue> {
    let len = rows.len() as i64;
    rows.iter()
        .enumerate()
        .map(|(i, &(priority, votes, suspicious_votes, updated_at))| Issue {
            id: len - i as i64,
            priority,
            votes,
            suspicious_votes,
            updated_at,
        })
        .collect()
}

fn datasets() -> Vec<Vec<Issue>> {
    let t = now();
    let day = Duration::days(1);
    vec![
        issues(&[
            ("high", 5, 0, t),
            ("high", 5, 1, t),
            ("high", 5, 1, t - day),
            ("medium", 10, 0, t),
            ("medium", 10, 5, t),
            ("low", 30, 0, t + day),
        ]),
        issues(&[
            ("high", 5, 0, t),
            ("high", 5, 1, t),
            ("high", 5, 1, t - day),
            ("low", 30, 0, t + day),
        ]),
        issues(&[("high", 5, 1, t - day), ("low", 30, 0, t + day)]),
        issues(&[("medium", 5, 1, t - day)]),
    ]
}

#[test]
fn orders_datasets_and_steps_through_them() {
    let order = display_order();
    for (i, dataset) in datasets().iter().enumerate() {
        let scope = Scope::new(&order, dataset).unwrap();
        let sorted: Vec<Issue> = scope.items().iter().map(|issue| (*issue).clone()).collect();
        assert_eq!(&sorted, dataset, "dataset {i} is not in display order");

        for pair in dataset.chunks(2) {
            let prev = &pair[0];
            let cur = pair.get(1).unwrap_or(&dataset[0]);
            assert_eq!(scope.next_item(prev, true).unwrap(), Some(cur), "dataset {i}");
            assert_eq!(scope.prev_item(cur, true).unwrap(), Some(prev), "dataset {i}");
            assert_eq!(scope.count(), dataset.len());
            let before = scope.items_before(cur).unwrap().len();
            let after = scope.items_after(cur).unwrap().len();
            assert_eq!(before + 1 + after, scope.count(), "dataset {i}");
        }
    }
}

#[test]
fn adjacent_issues_round_trip() {
    let order = display_order();
    for dataset in datasets() {
        let scope = Scope::new(&order, &dataset).unwrap();
        for issue in &dataset {
            if let Some(next) = scope.next_item(issue, false).unwrap() {
                assert_eq!(scope.prev_item(next, false).unwrap(), Some(issue));
            }
        }
    }
}

#[test]
fn more_valid_votes_rank_first() {
    let order = display_order();
    let t = now();
    let dataset = issues(&[("high", 5, 0, t), ("high", 5, 1, t), ("medium", 10, 0, t)]);
    let (x, y) = (&dataset[0], &dataset[1]);

    let after_x = PredicateBuilder::new(Anchor::new(&order, x)).build_clause(Side::After).unwrap();
    assert!(after_x.matches(y).unwrap());
    assert!(!after_x.matches(x).unwrap());

    let before_y = PredicateBuilder::new(Anchor::new(&order, y)).build_clause(Side::Before).unwrap();
    assert!(before_y.matches(x).unwrap());

    let after_y = PredicateBuilder::new(Anchor::new(&order, y)).build_clause(Side::After).unwrap();
    assert!(!after_y.matches(x).unwrap());
    assert!(after_y.matches(&dataset[2]).unwrap());
}

#[test]
fn renders_issue_predicate_with_index_hint() {
    let order = display_order();
    let t = now();
    let dataset = issues(&[("medium", 5, 0, t)]);
    let predicate = PredicateBuilder::new(Anchor::new(&order, &dataset[0]))
        .wrap_top_level_or(true)
        .build(Side::Before)
        .unwrap();
    assert_eq!(
        predicate.fragment(),
        "priority IN (?) AND (priority = ? OR priority = ? AND \
         ((votes - suspicious_votes) > ? OR (votes - suspicious_votes) = ? AND \
         (updated_at > ? OR updated_at = ? AND id > ?)))"
    );
    assert_eq!(
        predicate.parameters(),
        vec![
            Value::List(vec!["high".into(), "medium".into()]),
            "high".into(),
            "medium".into(),
            5.into(),
            5.into(),
            t.into(),
            t.into(),
            1.into(),
        ]
    );
}
