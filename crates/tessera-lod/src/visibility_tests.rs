use glam::DVec3;
use tessera_config::{LodConfig, TerrainConfig};
use tessera_terrain::ChunkCoord;

use crate::{ChunkVisibilityManager, LodAssignment, VisibilityUpdate};

fn count_tier(manager: &ChunkVisibilityManager, tier: u8) -> usize {
    manager
        .assignments()
        .values()
        .filter(|a| a.tier == tier)
        .count()
}

#[test]
fn test_camera_at_origin_default_world() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    assert_eq!(manager.tick(DVec3::ZERO, &config, 0.0), VisibilityUpdate::Changed);

    assert_eq!(manager.assignments().len(), 16);
    for coord in [(-1, -1), (0, -1), (-1, 0), (0, 0)] {
        let a = manager.get(ChunkCoord::new(coord.0, coord.1)).copied();
        assert_eq!(
            a,
            Some(LodAssignment {
                tier: 0,
                segments: 64,
                span: 1
            }),
            "chunk {coord:?}"
        );
    }
    assert_eq!(count_tier(&manager, 0), 4);
    assert_eq!(count_tier(&manager, 1), 12);
    assert_eq!(
        manager.get(ChunkCoord::new(1, 1)).map(|a| a.segments),
        Some(32)
    );
}

#[test]
fn test_far_chunks_are_culled_and_coarse() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    manager.tick(DVec3::new(1400.0, 30.0, 0.0), &config, 0.0);

    let assignments = manager.assignments();
    // (0, -2) and (0, 1) sit ~1030 away, past the view distance.
    assert_eq!(assignments.len(), 6);
    assert!(assignments.keys().all(|c| c.x >= 0));
    assert!(!assignments.contains_key(&ChunkCoord::new(0, -2)));
    assert!(!assignments.contains_key(&ChunkCoord::new(0, 1)));
    assert_eq!(count_tier(&manager, 1), 4);
    assert_eq!(count_tier(&manager, 2), 2);
    assert_eq!(
        manager.get(ChunkCoord::new(0, 0)).map(|a| a.segments),
        Some(16)
    );
}

#[test]
fn test_culling_disabled_keeps_every_chunk() {
    let config = TerrainConfig {
        enable_view_culling: false,
        ..Default::default()
    };
    let assignments = ChunkVisibilityManager::assign(DVec3::new(5000.0, 0.0, 5000.0), &config);
    assert_eq!(assignments.len(), 16);
    assert!(assignments.values().all(|a| a.tier == 2));
}

#[test]
fn test_distance_uses_nearest_point_not_center() {
    // Camera flying alongside chunk (1,0) just outside its -z edge: the centre
    // is ~290 away but the nearest edge point is 40 away.
    let config = TerrainConfig::default();
    let camera = DVec3::new(750.0, 0.0, -40.0);
    let assignments = ChunkVisibilityManager::assign(camera, &config);
    assert_eq!(assignments[&ChunkCoord::new(1, 0)].tier, 0);
}

#[test]
fn test_static_camera_is_idempotent() {
    let config = TerrainConfig::default();
    let camera = DVec3::new(120.0, 50.0, -300.0);
    let mut manager = ChunkVisibilityManager::new();
    assert!(manager.tick(camera, &config, 0.0).is_changed());
    let first = manager.assignments().clone();

    for frame in 1..20 {
        let time = frame as f64 * 0.25;
        assert_eq!(manager.tick(camera, &config, time), VisibilityUpdate::Unchanged);
    }
    assert_eq!(manager.assignments(), &first);
    assert!(manager.evaluations() > 1);
}

#[test]
fn test_tier_change_is_reported() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    manager.tick(DVec3::ZERO, &config, 0.0);
    let update = manager.tick(DVec3::new(1400.0, 0.0, 0.0), &config, 1.0);
    assert_eq!(update, VisibilityUpdate::Changed);
    assert_eq!(manager.assignments().len(), 6);
}

#[test]
fn test_throttle_skips_small_moves_inside_interval() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    manager.tick(DVec3::ZERO, &config, 0.0);
    assert_eq!(manager.evaluations(), 1);

    manager.tick(DVec3::new(0.5, 0.0, 0.0), &config, 0.05);
    assert_eq!(manager.evaluations(), 1);

    // A large jump re-evaluates even inside the interval.
    let update = manager.tick(DVec3::new(1400.0, 0.0, 0.0), &config, 0.06);
    assert_eq!(manager.evaluations(), 2);
    assert!(update.is_changed());
}

#[test]
fn test_config_change_forces_evaluation() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    manager.tick(DVec3::ZERO, &config, 0.0);

    let no_lod = TerrainConfig {
        enable_lod: false,
        ..config
    };
    assert!(manager.tick(DVec3::ZERO, &no_lod, 0.01).is_changed());
    assert_eq!(count_tier(&manager, 0), 16);
}

#[test]
fn test_chunking_disabled_reports_single_world_chunk() {
    let config = TerrainConfig {
        enable_chunking: false,
        ..Default::default()
    };
    let assignments = ChunkVisibilityManager::assign(DVec3::new(9000.0, 0.0, 0.0), &config);
    assert_eq!(assignments.len(), 1);
    let (coord, assignment) = assignments.iter().next().map(|(c, a)| (*c, *a)).unwrap();
    assert_eq!(coord, ChunkCoord::new(-2, -2));
    assert_eq!(
        assignment,
        LodAssignment {
            tier: 0,
            segments: 256,
            span: 4
        }
    );
}

#[test]
fn test_neighbor_delta_is_limited() {
    let config = TerrainConfig {
        world_size: 4000.0,
        view_distance: 3000.0,
        lod: LodConfig {
            near: 100.0,
            medium: 200.0,
            far: 300.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let assignments = ChunkVisibilityManager::assign(DVec3::ZERO, &config);
    assert_eq!(assignments[&ChunkCoord::new(0, 0)].tier, 0);
    assert_eq!(assignments[&ChunkCoord::new(1, 0)].tier, 1);
    assert_eq!(assignments[&ChunkCoord::new(2, 0)].tier, 2);

    for (coord, a) in &assignments {
        for n in coord.edge_neighbors() {
            if let Some(b) = assignments.get(&n) {
                assert!(a.tier.abs_diff(b.tier) <= 1, "{coord:?} vs {n:?}");
            }
        }
    }

    let unlimited = TerrainConfig {
        lod: LodConfig {
            limit_neighbor_delta: false,
            ..config.lod.clone()
        },
        ..config
    };
    let raw = ChunkVisibilityManager::assign(DVec3::ZERO, &unlimited);
    assert_eq!(raw[&ChunkCoord::new(1, 0)].tier, 2);
}

#[test]
fn test_lod_tier_monotonic_as_camera_recedes() {
    let config = TerrainConfig {
        enable_view_culling: false,
        ..Default::default()
    };
    let target = ChunkCoord::new(0, 0);
    let mut prev = 0u8;
    for step in 0..40 {
        let camera = DVec3::new(-(step as f64) * 50.0, 0.0, 250.0);
        let tier = ChunkVisibilityManager::assign(camera, &config)[&target].tier;
        assert!(tier >= prev, "step {step}");
        prev = tier;
    }
    assert_eq!(prev, 2);
}

#[test]
fn test_reset_reports_change_again() {
    let config = TerrainConfig::default();
    let mut manager = ChunkVisibilityManager::new();
    manager.tick(DVec3::ZERO, &config, 0.0);
    manager.reset();
    assert!(manager.assignments().is_empty());
    assert!(manager.tick(DVec3::ZERO, &config, 0.01).is_changed());
}
