mod common;

use std::sync::Arc;
use std::thread;

use og_serial::{Graph, Object, Value};

use common::*;

#[test]
fn one_serializer_many_threads() {
    let serializer = Arc::new(json());

    let mut graph = Graph::new();
    let items: Vec<Value> = (0..8).map(|i| car(&mut graph, i).into()).collect();
    let list = graph.insert(Object::Sequence(items));
    let root = Value::from(list);

    let expected = serializer.serialize(&graph, &root, VEHICLES).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let serializer = &serializer;
                let graph = &graph;
                let root = &root;
                s.spawn(move || {
                    let bytes = serializer.serialize(graph, root, VEHICLES).unwrap();
                    let decoded = serializer.deserialize(&bytes, VEHICLES).unwrap();
                    // Eight cars, each with four wheels and a wheel list, plus the outer list.
                    assert_eq!(decoded.graph.len(), 8 * 6 + 1);
                    bytes
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
