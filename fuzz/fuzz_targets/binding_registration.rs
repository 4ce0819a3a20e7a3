#![no_main]

use autowire::{Container, DiError, Strategy};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use std::sync::Arc;

// Each input line is an operation: `+id=value` registers a transient literal,
// `*id=value` a singleton, `?id` resolves.
fuzz_target!(|data: &[u8]| {
    let Ok(script) = std::str::from_utf8(data) else {
        return;
    };

    let container = Container::new();
    let mut expected: HashMap<String, String> = HashMap::new();

    for line in script.lines().take(64) {
        let (op, rest) = match line.char_indices().nth(1) {
            Some((split, _)) => line.split_at(split),
            None => continue,
        };
        match op {
            "+" | "*" => {
                let Some((id, value)) = rest.split_once('=') else {
                    continue;
                };
                container.register(id, Strategy::value(value.to_string()), op == "*");
                expected.insert(id.to_string(), value.to_string());
            }
            "?" => match (container.get::<String>(rest), expected.get(rest)) {
                (Ok(value), Some(want)) => assert_eq!(value.as_str(), want),
                (Err(DiError::NotFound(id)), None) => assert_eq!(id, rest),
                (other, want) => panic!("unexpected {:?} for {:?} (wanted {:?})", other.map(|_| ()), rest, want),
            },
            _ => {}
        }
    }

    assert_eq!(container.len(), expected.len());
    for (id, want) in &expected {
        let a = container.get::<String>(id).unwrap();
        assert_eq!(a.as_str(), want);
        if container.descriptors().iter().any(|d| d.identifier() == id && d.is_singleton()) {
            let b = container.get::<String>(id).unwrap();
            assert!(Arc::ptr_eq(&a, &b));
        }
    }
});
