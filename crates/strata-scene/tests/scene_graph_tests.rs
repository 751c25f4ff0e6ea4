// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use proptest::prelude::*;
use strata_scene::{
    EdgeAttributes, EdgeKey, NodeAttributes, NodePayload, NodeSymbol, SceneGraph, Vec3,
};

#[test]
fn attributes_deserialize_from_json() {
    let json = r#"{
        "position": [1.0, 2.0, 3.0],
        "orientation": [0.0, 0.0, 0.0, 1.0],
        "payload": { "Semantic": {
            "name": "chair",
            "color": { "r": 10, "g": 20, "b": 30 },
            "bounding_box": {
                "dimensions": [1.0, 1.0, 1.0],
                "center": [1.0, 2.0, 3.0],
                "rotation": [0.0, 0.0, 0.0, 1.0]
            },
            "semantic_label": 4
        } }
    }"#;
    let attrs: NodeAttributes = serde_json::from_str(json).unwrap();
    assert_eq!(attrs.position, Vec3::new(1.0, 2.0, 3.0));
    let semantic = attrs.semantic_attributes().unwrap();
    assert_eq!(semantic.name, "chair");
    assert_eq!(semantic.semantic_label, 4);
    assert!(matches!(attrs.payload, NodePayload::Semantic(_)));
}

#[test]
fn dynamic_trajectory_links_consecutive_nodes() {
    let mut graph = SceneGraph::new([2]);
    let mut ids = Vec::new();
    for i in 0..4 {
        let id = graph
            .insert_dynamic_node(2, 'a', NodeAttributes::generic(Vec3::X * i as f32), true)
            .unwrap();
        ids.push(id);
    }
    let layer = graph.dynamic_layer(2, 'a').unwrap();
    assert_eq!(layer.num_nodes(), 4);
    assert_eq!(layer.edges().len(), 3);
    assert_eq!(ids[3], NodeSymbol::new('a', 3).id());
    assert_eq!(graph.node(ids[2]).unwrap().position(), Vec3::X * 2.0);
}

#[test]
fn edges_to_unknown_nodes_are_rejected_without_side_effects() {
    let mut graph = SceneGraph::new([1]);
    graph.insert_node(1, 1, NodeAttributes::default()).unwrap();
    assert!(graph.insert_edge(1, 2, EdgeAttributes::default()).is_err());
    assert_eq!(graph.layer(1).unwrap().num_edges(), 0);
    assert_eq!(graph.interlayer_edges().count(), 0);
}

proptest! {
    #[test]
    fn edge_key_orders_endpoints(a in any::<u64>(), b in any::<u64>()) {
        let key = EdgeKey::new(a, b);
        prop_assert!(key.first() <= key.second());
        prop_assert_eq!(key, EdgeKey::new(b, a));
    }

    #[test]
    fn symbol_round_trips_category_and_index(index in 0u64..(1 << 56)) {
        let symbol = NodeSymbol::new('p', index);
        prop_assert_eq!(symbol.category(), 'p');
        prop_assert_eq!(symbol.index(), index);
    }
}
