//! Property tests for path round-trip and snapshot non-mutation through
//! the form handle.

use proptest::prelude::*;
use serde_json::{Value, json};

use formant_form::{FormApi, FormOptions};
use formant_path::Segment;

fn segments_strategy() -> impl Strategy<Value = Vec<Segment>> {
    let segment = prop_oneof![
        "[a-z][a-z0-9_]{0,7}".prop_map(Segment::Key),
        (0usize..4).prop_map(Segment::Index),
    ];
    prop::collection::vec(segment, 1..5)
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => out.push_str(&format!("[{index}]")),
        }
    }
    out
}

fn scaffold(segments: &[Segment], leaf: Value) -> Value {
    segments.iter().rev().fold(leaf, |acc, segment| match segment {
        Segment::Key(key) => json!({ key.clone(): acc }),
        Segment::Index(index) => {
            let mut items = vec![Value::Null; *index];
            items.push(acc);
            Value::Array(items)
        }
    })
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        "[a-zA-Z ]{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn write_then_read_round_trips(
        segments in segments_strategy(),
        leaf in leaf_strategy(),
    ) {
        let path = render(&segments);
        let form: FormApi<Value> = FormApi::new(
            FormOptions::new().default_values(scaffold(&segments, json!("seed"))),
        );

        form.set_field_value(&path, leaf.clone()).expect("write along scaffold");
        prop_assert_eq!(form.get_field_value(&path).expect("read back"), Some(leaf));
    }

    #[test]
    fn old_snapshot_survives_writes(
        segments in segments_strategy(),
        leaf in leaf_strategy(),
    ) {
        let path = render(&segments);
        let initial = scaffold(&segments, json!("seed"));
        let form: FormApi<Value> = FormApi::new(
            FormOptions::new().default_values(initial.clone()),
        );

        let before = form.values();
        form.set_field_value(&path, leaf.clone()).expect("write along scaffold");

        // The captured snapshot still matches the original tree.
        prop_assert_eq!(&before, &initial);
        // And the live tree now differs at the written path whenever the
        // value actually changed.
        if leaf != json!("seed") {
            prop_assert_ne!(form.values(), initial);
        }
    }

    #[test]
    fn strict_read_distinguishes_absent_from_empty(
        key in "[a-z][a-z0-9_]{0,7}",
        empty in prop_oneof![
            Just(json!(0)),
            Just(json!(false)),
            Just(json!("")),
        ],
    ) {
        let form: FormApi<Value> = FormApi::new(
            FormOptions::new().default_values(json!({ key.clone(): empty.clone() })),
        );

        // Present-but-empty resolves.
        prop_assert_eq!(form.get_field_value_strict(&key).expect("present"), empty);

        // A sibling that was never written is absent in both modes.
        let missing = format!("{key}_missing");
        prop_assert_eq!(form.get_field_value(&missing).expect("no error"), None);
        prop_assert!(form.get_field_value_strict(&missing).is_err());
    }
}
