//! Tests for constrained construction of the initial population

#[cfg(test)]
mod tests {
    use floorgen::FloorplanError;
    use floorgen::algorithm::evolution::GeneratorConfig;
    use floorgen::algorithm::population::{
        build_candidate, initialize_population, place_adjacent_to_bedroom, size_range,
    };
    use floorgen::spatial::geometry::{Rect, overlap};
    use floorgen::spatial::layout::{Layout, RoomKind, find_violation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn config(rooms: &[&str], attached: bool) -> GeneratorConfig {
        GeneratorConfig {
            attached_washroom: attached,
            ..GeneratorConfig::with_rooms(rooms.iter().map(|r| (*r).to_string()).collect())
        }
    }

    // Tests every initial layout holds all rooms and no violations
    // Verified by skipping the overlap rejection in placement
    #[test]
    fn test_population_is_valid() {
        let config = config(&["Garage", "Kitchen", "Bedroom", "Washroom"], false);
        let mut rng = StdRng::seed_from_u64(42);
        let population = initialize_population(&config, &mut rng).unwrap();

        assert_eq!(population.len(), config.population_size);
        for layout in &population {
            assert_eq!(layout.len(), 4);
            assert_eq!(find_violation(layout, 20, 20, false), None);
        }
    }

    // Tests room sizes stay inside their kind's range
    // Verified by drawing every room from the general range
    #[test]
    fn test_sizes_follow_room_kind() {
        let config = config(&["Kitchen", "Bedroom", "Washroom", "Study"], false);
        let mut rng = StdRng::seed_from_u64(3);
        let population = initialize_population(&config, &mut rng).unwrap();

        for layout in &population {
            for (label, rect) in layout.rooms() {
                let range = size_range(RoomKind::of(label));
                assert!(range.contains(&rect.width), "{label} width {}", rect.width);
                assert!(range.contains(&rect.height), "{label} height {}", rect.height);
            }
        }
    }

    // Tests attached mode pins each washroom to a bedroom wall
    // Verified by returning the random washroom position unchanged
    #[test]
    fn test_attached_washrooms() {
        let config = config(&["Bedroom_1", "Bedroom_2", "Washroom_1", "Washroom_2"], true);
        let mut rng = StdRng::seed_from_u64(11);
        let population = initialize_population(&config, &mut rng).unwrap();

        for layout in &population {
            assert_eq!(find_violation(layout, 20, 20, true), None);
        }
    }

    // Tests an impossible program exhausts the candidate cap with an error
    // Verified by looping without a global cap
    #[test]
    fn test_infeasible_configuration() {
        let rooms: Vec<String> = (1..=12).map(|i| format!("Garage_{i}")).collect();
        let config = GeneratorConfig {
            max_candidates: 25,
            ..GeneratorConfig::with_rooms(rooms)
        };
        let mut rng = StdRng::seed_from_u64(42);
        let err = initialize_population(&config, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::InfeasibleConfiguration { attempts: 25, .. }
        ));
    }

    // Tests a candidate is rejected when a room cannot be placed
    // Verified by inserting unplaceable rooms at the origin
    #[test]
    fn test_candidate_fails_when_room_cannot_fit() {
        let config = GeneratorConfig {
            canvas_width: 6,
            canvas_height: 6,
            ..config(&["Garage", "Kitchen"], false)
        };
        let order = config.rooms.clone();
        let mut rng = StdRng::seed_from_u64(5);
        let candidates = (0..20)
            .filter_map(|_| build_candidate(&config, &order, &mut rng))
            .count();
        assert_eq!(candidates, 0);
    }

    // Tests adjacency placement tries the left side first and records the bedroom
    // Verified by trying the right side first
    #[test]
    fn test_place_adjacent_left_first() {
        let mut layout = Layout::new();
        layout.insert("Bedroom", Rect::new(5, 5, 4, 4));
        let mut attached = BTreeSet::new();
        let washroom = Rect::new(0, 0, 2, 3);

        let slot = place_adjacent_to_bedroom(&layout, &mut attached, &washroom, 20, 20);
        assert_eq!(slot, Some(Rect::new(3, 5, 2, 3)));
        assert!(attached.contains("Bedroom"));

        let again = place_adjacent_to_bedroom(&layout, &mut attached, &washroom, 20, 20);
        assert_eq!(again, None);
    }

    // Tests blocked and off-canvas slots are skipped
    // Verified by accepting slots with negative coordinates
    #[test]
    fn test_place_adjacent_skips_blocked_sides() {
        let mut layout = Layout::new();
        layout.insert("Bedroom", Rect::new(0, 0, 4, 4));
        layout.insert("Kitchen", Rect::new(4, 0, 3, 3));
        let mut attached = BTreeSet::new();
        let washroom = Rect::new(0, 0, 2, 2);

        let slot = place_adjacent_to_bedroom(&layout, &mut attached, &washroom, 20, 20).unwrap();
        assert_eq!(slot, Rect::new(0, 4, 2, 2));
        assert!(layout.rooms().all(|(_, placed)| !overlap(&slot, placed)));
    }
}
