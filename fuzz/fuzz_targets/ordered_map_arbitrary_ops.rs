#![no_main]

use libfuzzer_sys::fuzz_target;
use ordkit::ds::OrderedMap;
use ordkit::error::OrderedMapError;

// Fuzz arbitrary operation sequences on OrderedMap
//
// Runs random sequences of push_back, pop_back, get, get_mut and positional
// reads against a Vec model, checking results and invariants after each step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut map: OrderedMap<u8, u32> = OrderedMap::new();
    let mut model: Vec<(u8, u32)> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let key = data[idx + 1] % 64;
        let value = (u32::from(data[idx]) << 8) | u32::from(data[idx + 1]);

        match op {
            0 | 1 => {
                // Push
                let res = map.push_back(key, value);
                if model.iter().any(|(k, _)| *k == key) {
                    assert_eq!(res, Err(OrderedMapError::DuplicateKey));
                } else {
                    assert_eq!(res, Ok(()));
                    model.push((key, value));
                }
            }
            2 => {
                // Pop
                let expected = model.pop().ok_or(OrderedMapError::EmptyContainer);
                assert_eq!(map.pop_back(), expected);
            }
            3 => {
                // Lookup
                let expected = model
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v)
                    .ok_or(OrderedMapError::KeyNotFound);
                assert_eq!(map.get(&key), expected);
            }
            4 => {
                // Mutate through handle
                if let Ok(v) = map.get_mut(&key) {
                    *v = v.wrapping_add(1);
                    let slot = model.iter_mut().find(|(k, _)| *k == key).unwrap();
                    slot.1 = slot.1.wrapping_add(1);
                } else {
                    assert!(!model.iter().any(|(k, _)| *k == key));
                }
            }
            5 => {
                // Positional reads
                let position = usize::from(key) % (model.len() + 1);
                let expected = model.get(position).map(|(k, v)| (k, v));
                assert_eq!(map.get_index(position), expected);
                assert_eq!(map.back(), model.last().map(|(k, v)| (k, v)));
            }
            _ => unreachable!(),
        }

        assert_eq!(map.len(), model.len());
        assert_eq!(map.is_empty(), model.is_empty());
        assert!(map.check_invariants().is_ok());

        idx += 2;
    }

    let seen: Vec<(u8, u32)> = map.into_iter().collect();
    assert_eq!(seen, model);
});
