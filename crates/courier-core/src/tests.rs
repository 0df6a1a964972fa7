#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::MissionCommand;
    use crate::config::{MissionConfig, SpawnConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::MissionEvent;
    use crate::state::{format_clock, format_progress, HudView, MissionView};
    use crate::types::{planar_distance, PickupId, SimTime};

    // ---- Config ----

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: MissionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MissionConfig::default());
        assert_eq!(config.target_packages, TARGET_PACKAGES);
        assert_eq!(config.spawn.max_active, MAX_ACTIVE_PICKUPS);
        assert_eq!(config.spawn.kinds.len(), 3);
        assert_eq!(config.reset_policy, ResetPolicy::Loop);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let json = r#"{
            "target_packages": 3,
            "reset_policy": "terminate",
            "spawn": { "radius": 8.0, "kinds": ["Rare"] }
        }"#;
        let config: MissionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.target_packages, 3);
        assert_eq!(config.reset_policy, ResetPolicy::Terminate);
        assert_eq!(config.spawn.radius, 8.0);
        assert_eq!(config.spawn.kinds, vec![PickupKind::Rare]);
        assert_eq!(config.spawn.min_separation, MIN_PICKUP_SEPARATION);
        assert_eq!(config.time_limit_secs, MISSION_TIME_LIMIT_SECS);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(MissionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_delay() {
        let config = MissionConfig {
            start_delay_secs: -1.0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "start_delay_secs"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = MissionConfig {
            spawn: SpawnConfig {
                max_attempts: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "spawn.max_attempts"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_nan_radius() {
        let config = MissionConfig {
            spawn: SpawnConfig {
                radius: f32::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_empty_kinds() {
        // An empty kind set is a runtime no-op, not a config error.
        let config = MissionConfig {
            spawn: SpawnConfig {
                kinds: Vec::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("courier-core-does-not-exist.json");
        assert!(matches!(
            MissionConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_and_validation_errors() {
        let dir = std::env::temp_dir();

        let bad_json = dir.join(format!("courier-core-bad-{}.json", std::process::id()));
        std::fs::write(&bad_json, "{ not json").unwrap();
        assert!(matches!(
            MissionConfig::load(&bad_json),
            Err(ConfigError::Parse { .. })
        ));

        let invalid = dir.join(format!("courier-core-invalid-{}.json", std::process::id()));
        std::fs::write(&invalid, r#"{ "time_limit_secs": -5.0 }"#).unwrap();
        assert!(matches!(
            MissionConfig::load(&invalid),
            Err(ConfigError::Invalid { field: "time_limit_secs", .. })
        ));

        let good = dir.join(format!("courier-core-good-{}.json", std::process::id()));
        std::fs::write(&good, r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(MissionConfig::load(&good).unwrap().seed, 7);

        for path in [bad_json, invalid, good] {
            let _ = std::fs::remove_file(path);
        }
    }

    // ---- HUD helpers ----

    #[test]
    fn test_time_band_thresholds() {
        assert_eq!(TimeBand::from_remaining(300.0), TimeBand::Normal);
        assert_eq!(TimeBand::from_remaining(60.5), TimeBand::Normal);
        assert_eq!(TimeBand::from_remaining(60.0), TimeBand::Low);
        assert_eq!(TimeBand::from_remaining(30.5), TimeBand::Low);
        assert_eq!(TimeBand::from_remaining(30.0), TimeBand::Critical);
        assert_eq!(TimeBand::from_remaining(0.0), TimeBand::Critical);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(300.0), "05:00");
        assert_eq!(format_clock(154.9), "02:34");
        assert_eq!(format_clock(0.4), "00:00");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_hud_view_from_mission() {
        let mission = MissionView {
            delivered: 12,
            target: 10,
            elapsed_secs: 275.0,
            time_limit_secs: 300.0,
            time_remaining_secs: 25.0,
        };
        let hud = HudView::from_mission(&mission);
        // Over-delivery is reported as-is.
        assert_eq!(hud.progress_text, "12/10 Packages");
        assert_eq!(hud.time_text, "00:25");
        assert_eq!(hud.time_band, TimeBand::Critical);
        assert_eq!(format_progress(0, 3), "0/3 Packages");
    }

    // ---- Types ----

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 100.0, 4.0);
        assert!((planar_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_sim_time_variable_dt() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!MissionPhase::Starting.is_terminal());
        assert!(!MissionPhase::Active.is_terminal());
        assert!(!MissionPhase::Ending.is_terminal());
        assert!(MissionPhase::Complete.is_terminal());
        assert!(MissionPhase::Cancelled.is_terminal());
    }

    // ---- Wire shape ----

    #[test]
    fn test_command_is_tagged() {
        let cmd = MissionCommand::CollectPickup {
            pickup_id: PickupId(4),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "CollectPickup");
        assert_eq!(json["pickup_id"], 4);

        let back: MissionCommand = serde_json::from_str(r#"{"type":"Cancel"}"#).unwrap();
        assert!(matches!(back, MissionCommand::Cancel));
    }

    #[test]
    fn test_event_is_tagged() {
        let event = MissionEvent::PhaseChanged {
            session: 1,
            from: MissionPhase::Starting,
            to: MissionPhase::Active,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PhaseChanged");
        assert_eq!(json["to"], "Active");
    }
}
