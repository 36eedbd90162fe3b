//! Tests for the layout model, its JSON shape and invariant checks

#[cfg(test)]
mod tests {
    use floorgen::spatial::geometry::Rect;
    use floorgen::spatial::layout::{
        Layout, LayoutViolation, RoomKind, RoomProgram, STAIRS_KEY, find_violation,
        validate_layout,
    };

    fn attached_layout() -> Layout {
        let mut layout = Layout::new();
        layout.insert("Bedroom", Rect::new(0, 0, 4, 4));
        layout.insert("Washroom", Rect::new(4, 0, 2, 2));
        layout.insert("Kitchen", Rect::new(10, 10, 3, 3));
        layout
    }

    // Tests room kinds are derived from substrings of the label
    // Verified by matching labels exactly instead of by substring
    #[test]
    fn test_room_kind_classification() {
        assert_eq!(RoomKind::of("Bedroom_2"), RoomKind::Bedroom);
        assert_eq!(RoomKind::of("Washroom_1"), RoomKind::Washroom);
        assert_eq!(RoomKind::of("Kitchen"), RoomKind::Kitchen);
        assert_eq!(RoomKind::of("Garage"), RoomKind::Garage);
        assert_eq!(RoomKind::of("Study"), RoomKind::Other);
    }

    // Tests the stairs key is kept apart from rooms
    // Verified by inserting every key into the room map
    #[test]
    fn test_stairs_key_routed_to_stairs_slot() {
        let mut layout = attached_layout();
        layout.insert(STAIRS_KEY, Rect::new(100, 120, 15, 15));

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.stairs(), Some(&Rect::new(100, 120, 15, 15)));
        assert!(layout.labels().all(|label| label != STAIRS_KEY));
        assert!(layout.without_stairs().stairs().is_none());
    }

    // Tests the JSON form is a flat label-to-rectangle object including stairs
    // Verified by serialising the struct fields directly
    #[test]
    fn test_json_shape_includes_stairs() {
        let mut layout = attached_layout();
        layout.set_stairs(Rect::new(40, 50, 15, 15));

        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["Stairs"]["x"], 40);
        assert_eq!(json["Bedroom"]["width"], 4);

        let restored: Layout = serde_json::from_value(json).unwrap();
        assert_eq!(restored, layout);
    }

    // Tests fitness area excludes the stairs marker
    // Verified by adding the stairs area to the total
    #[test]
    fn test_total_area_ignores_stairs() {
        let mut layout = attached_layout();
        let before = layout.total_area();
        layout.set_stairs(Rect::new(0, 0, 15, 15));
        assert_eq!(before, 16 + 4 + 9);
        assert_eq!(layout.total_area(), before);
    }

    // Tests default program labels and numbering
    // Verified by numbering single rooms
    #[test]
    fn test_room_program_labels() {
        assert_eq!(
            RoomProgram::default().labels(),
            vec!["Garage", "Kitchen", "Bedroom_1", "Bedroom_2", "Washroom"]
        );
        let single = RoomProgram {
            bedrooms: 1,
            washrooms: 0,
            kitchen: false,
            garage: false,
        };
        assert_eq!(single.labels(), vec!["Bedroom"]);
    }

    // Tests a well-formed attached layout passes validation
    // Verified by requiring two attached bedrooms per washroom
    #[test]
    fn test_valid_layout_passes() {
        assert_eq!(find_violation(&attached_layout(), 20, 20, true), None);
        assert!(validate_layout(&attached_layout(), 20, 20, false).is_ok());
    }

    // Tests each invariant is reported
    // Verified by skipping the bounds check
    #[test]
    fn test_violations_reported() {
        let mut overlapping = attached_layout();
        overlapping.insert("Garage", Rect::new(11, 11, 4, 4));
        assert!(matches!(
            find_violation(&overlapping, 20, 20, false),
            Some(LayoutViolation::Overlap(_, _))
        ));

        let mut outside = attached_layout();
        outside.insert("Garage", Rect::new(17, 0, 4, 4));
        assert_eq!(
            find_violation(&outside, 20, 20, false),
            Some(LayoutViolation::OutOfBounds("Garage".to_string()))
        );

        let mut bedrooms = Layout::new();
        bedrooms.insert("Bedroom_1", Rect::new(0, 0, 4, 4));
        bedrooms.insert("Bedroom_2", Rect::new(4, 1, 4, 4));
        assert!(matches!(
            validate_layout(&bedrooms, 20, 20, false),
            Err(LayoutViolation::AdjacentBedrooms(_, _))
        ));
    }

    // Tests washroom attachment rules only apply in attached mode
    // Verified by ignoring the attached flag
    #[test]
    fn test_detached_washroom() {
        let mut layout = attached_layout();
        layout.insert("Washroom", Rect::new(15, 0, 2, 2));
        assert_eq!(find_violation(&layout, 20, 20, false), None);
        assert_eq!(
            find_violation(&layout, 20, 20, true),
            Some(LayoutViolation::DetachedWashroom("Washroom".to_string()))
        );
    }

    // Tests a bedroom may host only one attached washroom
    // Verified by not counting hosts
    #[test]
    fn test_shared_bedroom() {
        let mut layout = attached_layout();
        layout.insert("Washroom_2", Rect::new(0, 4, 2, 2));
        assert_eq!(
            find_violation(&layout, 20, 20, true),
            Some(LayoutViolation::SharedBedroom("Bedroom".to_string()))
        );
    }
}
