// Host-side tests for tour files and the marker wire format.

use std::time::Duration;
use tour_core::*;

#[test]
fn bundled_apartment_loads() {
    let config = TourConfig::apartment().expect("bundled tour parses");
    assert_eq!(config.title.as_deref(), Some("Visualizzatore di appartamenti 3d"));
    assert_eq!(config.start, "Soggiorno");
    assert_eq!(config.options().marker_swap_delay, Duration::from_millis(1000));

    let graph = config.build_graph().expect("bundled tour is valid");
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.start_room().image, "livingroom.jpeg");
    for name in ["Soggiorno", "Cucina", "Ripostiglio", "Camera da letto", "Bagno"] {
        assert!(graph.contains(name), "missing {name}");
    }
}

#[test]
fn overlays_are_appended_to_every_room() {
    let graph = TourConfig::apartment()
        .and_then(|c| c.build_graph())
        .expect("bundled tour is valid");
    for room in graph.rooms() {
        let logo = room.markers.last().expect("room has markers");
        assert_eq!(logo.id, "company-logo");
        assert!(!logo.is_navigation());
        assert_eq!(logo.visual, Some(MarkerVisual::Image("logo.png".to_string())));
        assert_eq!(logo.size, Some(MarkerSize { width: 300, height: 300 }));
        assert!((logo.position.pitch() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}

#[test]
fn marker_fields_are_read_from_payload_schema() {
    let text = r#"{
        "start": "livingRoom",
        "rooms": {
            "livingRoom": {
                "image": "livingroom.jpeg",
                "caption": "Living room",
                "markers": [
                    {
                        "id": "to-bath",
                        "position": { "yaw": "-10deg", "pitch": 0 },
                        "html": "<b>&rarr;</b>",
                        "tooltip": "Bathroom",
                        "data": { "target": "bathroom" }
                    }
                ]
            },
            "bathroom": { "image": "bathroom.jpeg" }
        }
    }"#;
    let config = TourConfig::from_json(text).expect("valid json");
    assert_eq!(config.marker_swap_delay_ms, DEFAULT_MARKER_SWAP_DELAY_MS);
    assert!(config.overlays.is_empty());

    let graph = config.build_graph().expect("valid graph");
    let living = graph.get("livingRoom").expect("room exists");
    assert_eq!(living.label(), "Living room");
    let marker = living.marker("to-bath").expect("marker exists");
    assert_eq!(marker.target.as_ref().map(|t| t.as_str()), Some("bathroom"));
    assert_eq!(marker.tooltip.as_deref(), Some("Bathroom"));
    assert_eq!(marker.visual, Some(MarkerVisual::Html("<b>&rarr;</b>".to_string())));
    assert!((marker.position.yaw().to_degrees() - 350.0).abs() < 1e-3);
    assert!(graph.get("bathroom").map(|r| r.markers.is_empty()).unwrap_or(false));
}

#[test]
fn custom_delay_is_honoured() {
    let text = r#"{ "start": "a", "markerSwapDelayMs": 250, "rooms": { "a": { "image": "a.jpeg" } } }"#;
    let controller = TourConfig::from_json(text)
        .and_then(|c| c.build_controller())
        .expect("valid tour");
    assert_eq!(controller.options().marker_swap_delay, Duration::from_millis(250));
}

#[test]
fn dangling_target_in_file_is_rejected() {
    let text = r#"{
        "start": "a",
        "rooms": {
            "a": { "image": "a.jpeg", "markers": [
                { "id": "x", "position": { "yaw": 0, "pitch": 0 }, "data": { "target": "b" } }
            ] }
        }
    }"#;
    let err = TourConfig::from_json(text).and_then(|c| c.build_graph()).err();
    assert!(matches!(err, Some(TourError::DanglingTarget { .. })));
}

#[test]
fn room_defined_twice_in_file_is_rejected() {
    let text = r#"{
        "start": "a",
        "rooms": {
            "a": { "image": "first.jpeg" },
            "b": { "image": "b.jpeg" },
            "a": { "image": "second.jpeg" }
        }
    }"#;
    let config = TourConfig::from_json(text).expect("duplicate keys still parse");
    assert_eq!(config.rooms.len(), 3);
    assert_eq!(config.rooms.get("a").map(|r| r.image.as_str()), Some("first.jpeg"));
    match config.build_graph().err() {
        Some(TourError::DuplicateRoom(id)) => assert_eq!(id.as_str(), "a"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rooms_keep_file_order() {
    let text = r#"{
        "start": "Soggiorno",
        "rooms": {
            "Soggiorno": { "image": "livingroom.jpeg" },
            "Cucina": { "image": "kitchen.jpeg" },
            "Bagno": { "image": "bathroom.jpeg" }
        }
    }"#;
    let graph = TourConfig::from_json(text)
        .and_then(|c| c.build_graph())
        .expect("valid tour");
    let names: Vec<&str> = graph.rooms().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(names, ["Soggiorno", "Cucina", "Bagno"]);

    let apartment = TourConfig::apartment()
        .and_then(|c| c.build_graph())
        .expect("bundled tour is valid");
    assert_eq!(apartment.rooms()[0].id.as_str(), "Soggiorno");
}

#[test]
fn overlay_colliding_with_room_marker_is_rejected() {
    let text = r#"{
        "start": "a",
        "overlays": [ { "id": "logo", "position": { "yaw": 0, "pitch": "-90deg" }, "image": "logo.png" } ],
        "rooms": {
            "a": { "image": "a.jpeg", "markers": [
                { "id": "logo", "position": { "yaw": 0, "pitch": 0 }, "image": "other.png" }
            ] }
        }
    }"#;
    let err = TourConfig::from_json(text).and_then(|c| c.build_graph()).err();
    assert!(matches!(err, Some(TourError::DuplicateMarker { .. })));
}

#[test]
fn malformed_json_and_angles_are_errors() {
    assert!(matches!(
        TourConfig::from_json("{ not json").err(),
        Some(TourError::Config(_))
    ));

    let text = r#"{ "start": "a", "rooms": { "a": { "image": "a.jpeg", "markers": [
        { "id": "x", "position": { "yaw": "north", "pitch": 0 } }
    ] } } }"#;
    let err = TourConfig::from_json(text).and_then(|c| c.build_graph()).err();
    assert!(matches!(err, Some(TourError::InvalidAngle(_))));
}

#[test]
fn wire_config_keeps_navigation_payload() {
    let marker = Marker::new("to-kitchen", SphericalPosition::from_degrees(50.0, 0.0))
        .with_image("kitchen.jpeg")
        .with_size(100, 100)
        .with_tooltip("Vai in Cucina")
        .with_target("Cucina");
    let json = serde_json::to_value(MarkerConfig::from(&marker)).expect("serializes");
    assert_eq!(json["id"], "to-kitchen");
    assert_eq!(json["image"], "kitchen.jpeg");
    assert_eq!(json["data"]["target"], "Cucina");
    assert_eq!(json["size"]["width"], 100);
    assert!(json.get("html").is_none());
    let yaw = json["position"]["yaw"].as_f64().expect("yaw in radians");
    assert!((yaw - 50f64.to_radians()).abs() < 1e-5);

    let deco = Marker::new("logo", SphericalPosition::default()).with_image("logo.png");
    let json = serde_json::to_value(MarkerConfig::from(&deco)).expect("serializes");
    assert!(json.get("data").is_none());
    assert!(json.get("tooltip").is_none());
}

#[test]
fn wire_config_reads_back_to_same_marker() {
    let marker = Marker::new("to-bath", SphericalPosition::from_degrees(130.0, 5.0))
        .with_html("→")
        .with_target("Bagno");
    let back = MarkerConfig::from(&marker).to_marker().expect("valid");
    assert_eq!(back, marker);
}
