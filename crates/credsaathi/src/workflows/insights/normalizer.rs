use serde::Serialize;
use serde_json::Value;

/// Normalized rendering of an arbitrary report value.
///
/// `Value` is already the closed tagged union over scalar, sequence, and
/// mapping, so the match below is exhaustive by construction: no input
/// shape can escape to a runtime failure, and the recursion terminates on
/// any finite value because each step descends strictly into children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Rendered {
    /// A scalar (or a joined run of scalar siblings) in string form.
    Text(String),
    /// One row per mapping key, in insertion order.
    Rows(Vec<ReportRow>),
    /// A sequence that mixes scalar runs and nested mappings.
    Items(Vec<Rendered>),
}

/// One labelled row of a normalized mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub value: Rendered,
}

impl Rendered {
    /// Flat text content, if this rendering is a single text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<&[ReportRow]> {
        match self {
            Rendered::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

/// Total recursive normalization of any JSON value into labelled rows.
///
/// Scalars render to their string form. Sequences join runs of scalar
/// siblings with `", "` and recurse into mapping elements. Mappings produce
/// one row per key in insertion order, with underscores in the key replaced
/// by spaces; the label rule re-applies at every depth.
pub fn normalize(value: &Value) -> Rendered {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Rendered::Text(scalar_text(value))
        }
        Value::Array(items) => normalize_sequence(items),
        Value::Object(map) => Rendered::Rows(
            map.iter()
                .map(|(key, child)| ReportRow {
                    label: display_label(key),
                    value: normalize(child),
                })
                .collect(),
        ),
    }
}

/// Mapping keys become labels with underscores replaced by spaces.
pub fn display_label(key: &str) -> String {
    key.replace('_', " ")
}

fn normalize_sequence(items: &[Value]) -> Rendered {
    let mut chunks: Vec<Rendered> = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for item in items {
        match item {
            Value::Object(_) => {
                if !run.is_empty() {
                    chunks.push(Rendered::Text(run.join(", ")));
                    run.clear();
                }
                chunks.push(normalize(item));
            }
            // Nested sequences render as their compact JSON form, like any
            // other non-mapping element.
            other => run.push(scalar_text(other)),
        }
    }

    if chunks.is_empty() {
        return Rendered::Text(run.join(", "));
    }
    if !run.is_empty() {
        chunks.push(Rendered::Text(run.join(", ")));
    }
    if chunks.len() == 1 {
        return chunks.remove(0);
    }
    Rendered::Items(chunks)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_mapping_yields_labelled_rows() {
        let rendered = normalize(&json!({ "foo_bar": 1, "baz": [1, 2, 3] }));
        let rows = rendered.rows().expect("mapping renders to rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "foo bar");
        assert_eq!(rows[0].value.as_text(), Some("1"));
        assert_eq!(rows[1].label, "baz");
        assert_eq!(rows[1].value.as_text(), Some("1, 2, 3"));
    }

    #[test]
    fn labels_are_reformatted_at_every_depth() {
        let rendered = normalize(&json!({ "a": { "b_c": 5 } }));
        let rows = rendered.rows().expect("rows");
        assert_eq!(rows[0].label, "a");
        let nested = rows[0].value.rows().expect("nested rows");
        assert_eq!(nested[0].label, "b c");
        assert_eq!(nested[0].value.as_text(), Some("5"));
    }

    #[test]
    fn deep_nesting_neither_crashes_nor_truncates() {
        let rendered = normalize(&json!({
            "l1": { "l2": { "l3": { "l4_key": "leaf" } } }
        }));
        let l1 = rendered.rows().expect("l1")[0].value.rows().expect("l2");
        let l2 = l1[0].value.rows().expect("l3");
        let l3 = l2[0].value.rows().expect("l4");
        assert_eq!(l3[0].label, "l4 key");
        assert_eq!(l3[0].value.as_text(), Some("leaf"));
    }

    #[test]
    fn mapping_key_order_is_preserved() {
        let rendered = normalize(&json!({
            "zeta": 1, "alpha": 2, "mid_point": 3
        }));
        let labels: Vec<&str> = rendered
            .rows()
            .expect("rows")
            .iter()
            .map(|row| row.label.as_str())
            .collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid point"]);
    }

    #[test]
    fn sequence_of_mappings_recurses_per_element() {
        let rendered = normalize(&json!([
            { "feature": "income" },
            { "feature": "savings" }
        ]));
        match rendered {
            Rendered::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].rows().expect("rows")[0].value.as_text(), Some("income"));
                assert_eq!(items[1].rows().expect("rows")[0].value.as_text(), Some("savings"));
            }
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[test]
    fn mixed_sequence_keeps_positional_order() {
        let rendered = normalize(&json!(["a", "b", { "k": 1 }, "c"]));
        match rendered {
            Rendered::Items(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].as_text(), Some("a, b"));
                assert!(items[1].rows().is_some());
                assert_eq!(items[2].as_text(), Some("c"));
            }
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[test]
    fn scalars_and_oddities_degrade_to_text() {
        assert_eq!(normalize(&json!(null)).as_text(), Some("null"));
        assert_eq!(normalize(&json!(true)).as_text(), Some("true"));
        assert_eq!(normalize(&json!(4.5)).as_text(), Some("4.5"));
        assert_eq!(normalize(&json!([])).as_text(), Some(""));
        // A sequence inside a sequence renders as its JSON form.
        assert_eq!(normalize(&json!([[1, 2], 3])).as_text(), Some("[1,2], 3"));
    }

    #[test]
    fn empty_mapping_is_an_empty_table() {
        let rendered = normalize(&json!({}));
        assert_eq!(rendered.rows().map(<[ReportRow]>::len), Some(0));
    }
}
