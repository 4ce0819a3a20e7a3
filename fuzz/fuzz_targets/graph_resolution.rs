#![no_main]

use autowire::{Container, ContainerConfig, DiError, Strategy};
use libfuzzer_sys::fuzz_target;

const MAX_DEPTH: usize = 64;

// Builds a graph of up to 8 bindings where each factory resolves the
// bindings picked out by the input bytes. Cycles are expected and must
// surface as `DepthExceeded`, never as a hang or a stack overflow.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let container = Container::builder()
        .config(ContainerConfig::default().with_max_depth(MAX_DEPTH))
        .build();

    let nodes = (data[0] % 8) as usize + 1;
    for (node, edges) in data[1..].chunks(2).take(nodes).enumerate() {
        let deps: Vec<String> = edges
            .iter()
            .filter(|b| **b % 4 != 0)
            .map(|b| format!("n{}", *b as usize % (nodes + 2)))
            .collect();
        let singleton = edges.first().is_some_and(|b| b & 0x80 != 0);

        container.register(
            format!("n{}", node),
            Strategy::factory(move |c| {
                let mut total = 1u64;
                for dep in &deps {
                    total = total.saturating_add(*c.get::<u64>(dep)?);
                }
                Ok(total)
            }),
            singleton,
        );
    }

    for node in 0..nodes + 2 {
        let id = format!("n{}", node);
        match container.get::<u64>(&id) {
            Ok(total) => assert!(*total >= 1),
            Err(DiError::NotFound(_)) | Err(DiError::DepthExceeded(MAX_DEPTH)) => {}
            Err(other) => panic!("unexpected error for {}: {}", id, other),
        }
    }
});
