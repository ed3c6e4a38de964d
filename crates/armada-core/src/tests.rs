#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::commands::PlayerCommand;
    use crate::error::SimError;
    use crate::faction::{default_roster, Faction, FactionId, FactionRegistry};
    use crate::grid::{chebyshev_ring, grid_to_world, world_to_grid};
    use crate::types::{GridCell, SimTime, UnitId, WorldPos};

    // ---- Grid mapping ----

    #[test]
    fn test_grid_round_trip() {
        for x in -60..=60 {
            for y in -60..=60 {
                for elevation in [0.0, 0.5, 1.0, -3.25] {
                    let cell = GridCell::new(x, y);
                    let world = grid_to_world(cell, elevation);
                    assert_eq!(world_to_grid(world), cell);
                    assert_eq!(world.y, elevation);
                }
            }
        }
    }

    #[test]
    fn test_world_to_grid_rounds_to_nearest() {
        assert_eq!(
            world_to_grid(WorldPos::new(2.4, 7.0, -3.6)),
            GridCell::new(2, -4)
        );
        assert_eq!(
            world_to_grid(WorldPos::new(-0.49, 100.0, 0.51)),
            GridCell::new(0, 1)
        );
    }

    #[test]
    fn test_grid_y_maps_to_world_z() {
        let world = grid_to_world(GridCell::new(3, -8), 1.0);
        assert_eq!(world, WorldPos::new(3.0, 1.0, -8.0));
    }

    #[test]
    fn test_chebyshev_ring_scan_order() {
        let ring: Vec<GridCell> = chebyshev_ring(GridCell::new(0, 0), 1).collect();
        let expected = vec![
            GridCell::new(-1, -1),
            GridCell::new(-1, 0),
            GridCell::new(-1, 1),
            GridCell::new(0, -1),
            GridCell::new(0, 1),
            GridCell::new(1, -1),
            GridCell::new(1, 0),
            GridCell::new(1, 1),
        ];
        assert_eq!(ring, expected);
    }

    #[test]
    fn test_offset_saturates_at_lattice_bounds() {
        let corner = GridCell::new(i32::MAX, i32::MIN);
        assert_eq!(corner.offset(5, -5), corner);
        assert_eq!(corner.offset(-1, 1), GridCell::new(i32::MAX - 1, i32::MIN + 1));
    }

    #[test]
    fn test_chebyshev_ring_sizes_and_distance() {
        let center = GridCell::new(4, -2);
        assert_eq!(chebyshev_ring(center, 0).collect::<Vec<_>>(), vec![center]);
        for r in 1..=5u32 {
            let cells: Vec<GridCell> = chebyshev_ring(center, r).collect();
            assert_eq!(cells.len(), (8 * r) as usize);
            assert!(cells.iter().all(|c| c.chebyshev_distance(center) == r));
        }
    }

    // ---- Factions ----

    #[test]
    fn test_default_roster_has_one_player_three_ai() {
        let registry = FactionRegistry::default();
        assert_eq!(registry.list().len(), 4);
        assert_eq!(registry.player().id, FactionId::from("player"));
        assert!(!registry.player().auto_controlled);
        assert_eq!(registry.non_player().count(), 3);
        assert!(registry.non_player().all(|f| f.auto_controlled));
    }

    #[test]
    fn test_get_faction() {
        let registry = FactionRegistry::default();
        let beta = registry.get(&FactionId::from("beta")).unwrap();
        assert_eq!(beta.name, "Beta Coalition");
        assert_eq!(beta.css_color(), "#2ecc71");

        let missing = registry.get(&FactionId::from("delta"));
        assert_eq!(
            missing.unwrap_err(),
            SimError::FactionNotFound(FactionId::from("delta"))
        );
    }

    #[test]
    fn test_is_player_faction() {
        let registry = FactionRegistry::default();
        assert!(registry.is_player(&FactionId::from("player")));
        assert!(!registry.is_player(&FactionId::from("alpha")));
    }

    #[test]
    fn test_random_non_player_never_returns_player() {
        let registry = FactionRegistry::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let faction = registry.random_non_player(&mut rng).unwrap();
            assert!(!registry.is_player(&faction.id));
            seen.insert(faction.id.clone());
        }
        assert_eq!(seen.len(), 3, "all AI factions should be drawn");
    }

    #[test]
    fn test_random_non_player_with_only_player() {
        let registry = FactionRegistry::new(
            vec![Faction::new("solo", "Solo", 0xffffff, false)],
            FactionId::from("solo"),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(registry.random_non_player(&mut rng).is_none());
    }

    #[test]
    fn test_registry_rejects_bad_rosters() {
        let unknown_player = FactionRegistry::new(default_roster(), FactionId::from("nobody"));
        assert!(matches!(unknown_player, Err(SimError::FactionNotFound(_))));

        let mut doubled = default_roster();
        doubled.push(Faction::new("alpha", "Alpha Again", 0, true));
        let duplicate = FactionRegistry::new(doubled, FactionId::from("player"));
        assert!(matches!(duplicate, Err(SimError::DuplicateFaction(_))));
    }

    #[test]
    fn test_toggle_auto_controlled() {
        let mut registry = FactionRegistry::default();
        let alpha = FactionId::from("alpha");
        registry.set_auto_controlled(&alpha, false).unwrap();
        assert_eq!(
            registry.auto_controlled_ids(),
            vec![FactionId::from("beta"), FactionId::from("gamma")]
        );
        registry.set_auto_controlled(&FactionId::from("player"), true).unwrap();
        assert_eq!(registry.auto_controlled_ids().len(), 3);
        assert!(registry
            .set_auto_controlled(&FactionId::from("omega"), true)
            .is_err());
    }

    // ---- Wire formats ----

    #[test]
    fn test_player_command_json_shape() {
        let cmd = PlayerCommand::MoveShip {
            ship: UnitId(4),
            cell: GridCell::new(-2, 9),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "MoveShip");
        assert_eq!(json["ship"], 4);
        assert_eq!(json["cell"]["x"], -2);

        let back: PlayerCommand =
            serde_json::from_str(r#"{"type":"SelectMoveTarget","cell":{"x":3,"y":4}}"#).unwrap();
        assert_eq!(
            back,
            PlayerCommand::SelectMoveTarget {
                cell: GridCell::new(3, 4)
            }
        );
    }

    #[test]
    fn test_faction_deserializes_without_ai_flag() {
        let faction: Faction =
            serde_json::from_str(r#"{"id":"delta","name":"Delta League","color":255}"#).unwrap();
        assert_eq!(faction.id, FactionId::from("delta"));
        assert!(!faction.auto_controlled);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        time.advance(-1.0);
        assert_eq!(time.frame, 3);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }
}
