// Host-side tests for room graph construction and validation.

use tour_core::*;

fn pos() -> SphericalPosition {
    SphericalPosition::from_degrees(0.0, 0.0)
}

fn two_rooms() -> Vec<Room> {
    vec![
        Room::new("livingRoom", "livingroom.jpeg")
            .with_marker(Marker::new("to-bath", pos()).with_target("bathroom")),
        Room::new("bathroom", "bathroom.jpeg")
            .with_marker(Marker::new("to-living", pos()).with_target("livingRoom")),
    ]
}

#[test]
fn valid_graph_keeps_room_order_and_start() {
    let graph = RoomGraph::new("livingRoom", two_rooms()).expect("valid graph");
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.start().as_str(), "livingRoom");
    assert_eq!(graph.start_room().image, "livingroom.jpeg");
    let names: Vec<&str> = graph.rooms().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(names, ["livingRoom", "bathroom"]);
    assert!(graph.contains("bathroom"));
    assert!(!graph.contains("kitchen"));
    assert_eq!(graph.index_of("bathroom"), Some(1));
    assert_eq!(graph.get("bathroom").map(|r| r.markers.len()), Some(1));
}

#[test]
fn empty_graph_is_rejected() {
    let err = RoomGraph::new("livingRoom", Vec::new()).err();
    assert!(matches!(err, Some(TourError::EmptyTour)));
}

#[test]
fn unknown_start_room_is_rejected() {
    let err = RoomGraph::new("attic", two_rooms()).err();
    match err {
        Some(TourError::UnknownStartRoom(id)) => assert_eq!(id.as_str(), "attic"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn dangling_target_is_rejected_at_construction() {
    let rooms = vec![Room::new("livingRoom", "livingroom.jpeg")
        .with_marker(Marker::new("to-garden", pos()).with_target("garden"))];
    match RoomGraph::new("livingRoom", rooms).err() {
        Some(TourError::DanglingTarget {
            room,
            marker,
            target,
        }) => {
            assert_eq!(room.as_str(), "livingRoom");
            assert_eq!(marker, "to-garden");
            assert_eq!(target.as_str(), "garden");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn duplicate_room_and_marker_ids_are_rejected() {
    let mut rooms = two_rooms();
    rooms.push(Room::new("bathroom", "other.jpeg"));
    assert!(matches!(
        RoomGraph::new("livingRoom", rooms).err(),
        Some(TourError::DuplicateRoom(_))
    ));

    let rooms = vec![Room::new("hall", "hall.jpeg")
        .with_marker(Marker::new("logo", pos()))
        .with_marker(Marker::new("logo", pos()))];
    assert!(matches!(
        RoomGraph::new("hall", rooms).err(),
        Some(TourError::DuplicateMarker { .. })
    ));
}

#[test]
fn same_marker_id_may_repeat_across_rooms() {
    let rooms = vec![
        Room::new("a", "a.jpeg")
            .with_marker(Marker::new("logo", pos()))
            .with_marker(Marker::new("next", pos()).with_target("b")),
        Room::new("b", "b.jpeg").with_marker(Marker::new("logo", pos())),
    ];
    assert!(RoomGraph::new("a", rooms).is_ok());
}

#[test]
fn every_target_resolves_in_bundled_apartment() {
    // Closure property: each navigation payload names a room of the graph.
    let graph = TourConfig::apartment()
        .and_then(|c| c.build_graph())
        .expect("bundled tour is valid");
    for room in graph.rooms() {
        for marker in &room.markers {
            if let Some(target) = &marker.target {
                assert!(
                    graph.contains(target.as_str()),
                    "{}::{} -> {}",
                    room.id,
                    marker.id,
                    target
                );
            }
        }
    }
    assert!(graph.unreachable_from_start().is_empty());
}

#[test]
fn unreachable_rooms_are_reported() {
    let mut rooms = two_rooms();
    rooms.push(
        Room::new("attic", "attic.jpeg")
            .with_marker(Marker::new("down", pos()).with_target("bathroom")),
    );
    let graph = RoomGraph::new("livingRoom", rooms).expect("valid graph");
    let orphans: Vec<&str> = graph
        .unreachable_from_start()
        .into_iter()
        .map(|r| r.as_str())
        .collect();
    assert_eq!(orphans, ["attic"]);
}

#[test]
fn room_label_falls_back_to_name() {
    let plain = Room::new("Cucina", "kitchen.jpeg");
    assert_eq!(plain.label(), "Cucina");
    let captioned = Room::new("Cucina", "kitchen.jpeg").with_caption("Kitchen");
    assert_eq!(captioned.label(), "Kitchen");
}

#[test]
fn marker_selection_carries_target_only_for_navigation_markers() {
    let nav = Marker::new("to-bath", pos()).with_target("bathroom");
    let deco = Marker::new("logo", pos()).with_image("logo.png");
    assert!(nav.is_navigation());
    assert!(!deco.is_navigation());
    assert_eq!(nav.selection().target.as_deref(), Some("bathroom"));
    assert_eq!(deco.selection().target, None);
    assert_eq!(deco.selection().marker_id, "logo");
}

#[test]
fn markers_in_view_are_sorted_by_distance() {
    let room = Room::new("hall", "hall.jpeg")
        .with_marker(Marker::new("far-left", SphericalPosition::from_degrees(320.0, 0.0)))
        .with_marker(Marker::new("behind", SphericalPosition::from_degrees(180.0, 0.0)))
        .with_marker(Marker::new("near", SphericalPosition::from_degrees(5.0, 0.0)))
        .with_marker(Marker::new("floor", SphericalPosition::from_degrees(0.0, -90.0)));
    let look = SphericalPosition::from_degrees(0.0, 0.0);
    let seen: Vec<&str> = markers_in_view(&room.markers, &look, 100f32.to_radians())
        .into_iter()
        .map(|(m, _)| m.id.as_str())
        .collect();
    assert_eq!(seen, ["near", "far-left"]);

    let all = markers_in_view(&room.markers, &look, std::f32::consts::TAU);
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().map(|(m, _)| m.id.as_str()), Some("behind"));
}
