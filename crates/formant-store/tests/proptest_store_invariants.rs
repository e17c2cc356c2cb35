//! Property tests for version and notification invariants.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use formant_store::Store;

proptest! {
    #[test]
    fn version_counts_applied_changes(values in prop::collection::vec(0i32..4, 0..32)) {
        let store = Store::new(|| 0i32);
        let notified = Rc::new(Cell::new(0u64));
        let n = Rc::clone(&notified);
        let _sub = store.subscribe(move |_| n.set(n.get() + 1));

        let mut expected = 0u64;
        let mut current = 0i32;
        for v in values {
            if v != current {
                expected += 1;
                current = v;
            }
            store.set(v);
        }

        prop_assert_eq!(store.version(), expected);
        prop_assert_eq!(notified.get(), expected);
        prop_assert_eq!(store.get(), current);
    }

    #[test]
    fn watch_fires_iff_selected_slice_changes(
        pairs in prop::collection::vec((0i32..3, 0i32..3), 0..32),
    ) {
        let store = Store::new(|| (0i32, 0i32));
        let fires = Rc::new(Cell::new(0u64));
        let f = Rc::clone(&fires);
        let _sub = store.watch(|s| s.0, move |_| f.set(f.get() + 1));

        let mut last_first = 0i32;
        let mut expected = 0u64;
        for (a, b) in pairs {
            store.set((a, b));
            if a != last_first {
                expected += 1;
                last_first = a;
            }
        }

        prop_assert_eq!(fires.get(), expected);
    }
}
