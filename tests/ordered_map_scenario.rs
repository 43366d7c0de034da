// ==============================================
// END-TO-END ORDERED MAP SCENARIOS (integration)
// ==============================================
//
// Drives the public API the way a caller would: push, mutate through the
// lookup handle, pop from the tail, and branch on each error variant.

use ordkit::prelude::*;

// ==============================================
// Reference Walkthrough
// ==============================================

#[test]
fn terry_gary_jim_walkthrough() {
    let mut map: OrderedMap<String, i32> = OrderedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);

    map.push_back("Terry".into(), 52).unwrap();
    map.push_back("Gary".into(), 10).unwrap();
    map.push_back("Jim".into(), 34).unwrap();
    assert_eq!(map.len(), 3);

    assert_eq!(map.get("Terry"), Ok(&52));
    assert_eq!(map.get("Gary"), Ok(&10));
    assert_eq!(map.get("Jim"), Ok(&34));

    *map.get_mut("Terry").unwrap() = 53;
    *map.get_mut("Gary").unwrap() = 11;
    *map.get_mut("Jim").unwrap() = 35;

    let lines: Vec<String> = map.iter().map(|(k, v)| format!("{k}:{v}")).collect();
    assert_eq!(lines, ["Terry:53", "Gary:11", "Jim:35"]);

    map.pop_back().unwrap();
    map.pop_back().unwrap();
    let lines: Vec<String> = map.iter().map(|(k, v)| format!("{k}:{v}")).collect();
    assert_eq!(lines, ["Terry:53"]);

    map.pop_back().unwrap();
    assert!(map.is_empty());

    // Duplicate insertion
    map.push_back("Terry".into(), 42).unwrap();
    let err = map.push_back("Terry".into(), 101).unwrap_err();
    assert_eq!(err, OrderedMapError::DuplicateKey);
    assert_eq!(err.to_string(), "unable to push_back existing key");
    assert_eq!(map.get("Terry"), Ok(&42));

    // Missing key
    let err = map.get("Barry").unwrap_err();
    assert_eq!(err, OrderedMapError::KeyNotFound);
    assert_eq!(err.to_string(), "key not found");

    map.check_invariants().unwrap();
}

// ==============================================
// Error Propagation
// ==============================================

fn load_pairs(
    map: &mut OrderedMap<&'static str, u32>,
    pairs: &[(&'static str, u32)],
) -> Result<usize, OrderedMapError> {
    for &(k, v) in pairs {
        map.push_back(k, v)?;
    }
    Ok(map.len())
}

#[test]
fn errors_propagate_with_question_mark() {
    let mut map = OrderedMap::new();
    assert_eq!(load_pairs(&mut map, &[("a", 1), ("b", 2)]), Ok(2));
    assert_eq!(
        load_pairs(&mut map, &[("c", 3), ("a", 9)]),
        Err(OrderedMapError::DuplicateKey)
    );
    // "c" went in before the duplicate stopped the load
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn errors_convert_into_boxed_error() {
    fn drain_one(map: &mut OrderedMap<u8, u8>) -> Result<u8, Box<dyn std::error::Error>> {
        let (_, v) = map.pop_back()?;
        Ok(v)
    }

    let mut map = OrderedMap::new();
    map.push_back(1, 10).unwrap();
    assert_eq!(drain_one(&mut map).unwrap(), 10);

    let err = drain_one(&mut map).unwrap_err();
    assert_eq!(err.to_string(), "unable to pop_back from an empty map");
}

#[test]
fn callers_can_branch_on_every_variant() {
    let mut map: OrderedMap<u32, u32> = OrderedMap::new();
    let outcomes = [
        map.pop_back().map(|_| ()),
        map.push_back(1, 1),
        map.push_back(1, 2),
        map.get(&7).map(|_| ()),
    ];

    let labels: Vec<&str> = outcomes
        .iter()
        .map(|res| match res {
            Ok(()) => "ok",
            Err(OrderedMapError::DuplicateKey) => "duplicate",
            Err(OrderedMapError::KeyNotFound) => "missing",
            Err(OrderedMapError::EmptyContainer) => "empty",
        })
        .collect();
    assert_eq!(labels, ["empty", "ok", "duplicate", "missing"]);
}

#[test]
fn batch_load_is_all_or_nothing() {
    let mut map = OrderedMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    let before = map.clone();

    let err = map.try_extend([("c", 3), ("d", 4), ("b", 9)]).unwrap_err();
    assert_eq!(err, OrderedMapError::DuplicateKey);
    assert_eq!(map, before);
    map.check_invariants().unwrap();

    let err = OrderedMap::try_from_iter([("x", 1), ("x", 2)]).unwrap_err();
    assert_eq!(err, OrderedMapError::DuplicateKey);
}

// ==============================================
// Typical Uses
// ==============================================

#[test]
fn event_log_unwinds_in_reverse() {
    let mut log: OrderedMap<u64, &str> = OrderedMap::new();
    for (seq, event) in [(1, "open"), (2, "write"), (3, "flush")] {
        log.push_back(seq, event).unwrap();
    }

    let mut undone = Vec::new();
    while let Ok((_, event)) = log.pop_back() {
        undone.push(event);
    }
    assert_eq!(undone, ["flush", "write", "open"]);
}

#[test]
fn scoped_bindings_shadow_by_rejection() {
    // Nested scopes push bindings and pop them on exit; re-binding the same
    // name inside one map is an error the caller must handle.
    let mut scope: OrderedMap<&str, i64> = OrderedMap::new();
    scope.push_back("x", 1).unwrap();
    scope.push_back("y", 2).unwrap();

    assert!(scope.push_back("x", 3).is_err());

    let mark = scope.len();
    scope.push_back("z", 4).unwrap();
    while scope.len() > mark {
        scope.pop_back().unwrap();
    }
    assert_eq!(format!("{:?}", scope), r#"{"x": 1, "y": 2}"#);
}
