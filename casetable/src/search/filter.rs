//! Case-insensitive substring filter over string fields.

use crate::model::Row;

/// Returns `true` if any string field of `row` contains `query`, ignoring case.
///
/// Only string-typed fields are inspected. Numbers, nulls and nested records
/// never match, even if their display text would. An empty query matches
/// every row. The query is used as given; it is not trimmed.
pub fn matches(row: &Row, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    contains_lowered(row, &query.to_lowercase())
}

/// Rows matching `query`, in input order.
///
/// # Example
///
/// ```
/// use casetable::model::Row;
/// use casetable::search::filter;
///
/// let rows = vec![
///     Row::with_id("1").set("name", "Alpha"),
///     Row::with_id("2").set("name", "Beta"),
/// ];
/// let found = filter(&rows, "ALP");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id(), Some("1"));
/// ```
pub fn filter<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    filter_indices(rows, query)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}

/// Positions of the rows matching `query`, in ascending order.
pub fn filter_indices(rows: &[Row], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| contains_lowered(row, &needle))
        .map(|(index, _)| index)
        .collect()
}

fn contains_lowered(row: &Row, needle: &str) -> bool {
    row.string_values()
        .any(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::Value;

    fn clients() -> Vec<Row> {
        vec![
            Row::with_id("1").set("name", "Alpha").set("address", "Karachi"),
            Row::with_id("2").set("name", "Beta").set("address", Value::Null),
            Row::with_id("3")
                .set("name", "Gamma")
                .set("case_count", 12i64)
                .set("client", Row::new().set("name", "Alpha Holdings")),
        ]
    }

    #[test]
    fn test_case_insensitive_match() {
        let rows = clients();
        let ids: Vec<_> = filter(&rows, "alp").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![Some("1")]);
    }

    #[test]
    fn test_matches_any_string_field() {
        let rows = clients();
        let ids: Vec<_> = filter(&rows, "KARA").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![Some("1")]);
    }

    #[test]
    fn test_non_string_fields_are_not_searched() {
        let rows = clients();
        assert!(filter(&rows, "12").is_empty());
        assert!(filter(&rows, "holdings").is_empty());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let rows = clients();
        assert!(filter(&rows, " alpha").is_empty());
        assert_eq!(filter(&rows, "a ").len(), 0);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let row = Row::with_id("x").set("name", "Same");
        let rows = vec![row.clone(), Row::new().set("name", "Other"), row];
        let found = filter(&rows, "same");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_indices(&rows, "same"), vec![0, 2]);
    }

    fn arb_row() -> impl Strategy<Value = Row> {
        (
            proptest::option::of("[a-zA-Z ]{0,8}"),
            proptest::option::of("[a-zA-Z]{0,6}"),
            any::<i64>(),
        )
            .prop_map(|(name, court, fee)| {
                Row::new()
                    .set("name", Value::from(name))
                    .set("court_name", Value::from(court))
                    .set("fee", fee)
            })
    }

    proptest! {
        #[test]
        fn prop_empty_query_is_identity(rows in proptest::collection::vec(arb_row(), 0..20)) {
            let found = filter(&rows, "");
            prop_assert_eq!(found.len(), rows.len());
            for (a, b) in found.iter().zip(rows.iter()) {
                prop_assert!(std::ptr::eq(*a, b));
            }
        }

        #[test]
        fn prop_filter_partitions_rows(
            rows in proptest::collection::vec(arb_row(), 0..20),
            query in "[a-zA-Z]{1,3}",
        ) {
            let kept = filter_indices(&rows, &query);
            let needle = query.to_lowercase();
            for (index, row) in rows.iter().enumerate() {
                let has_match = row
                    .string_values()
                    .any(|v| v.to_lowercase().contains(&needle));
                prop_assert_eq!(kept.contains(&index), has_match);
            }
        }
    }
}
