//! Pipeline tests for dimension contexts.

use std::collections::VecDeque;

use biomegrid_config::{ClimateGridConfig, PoolSpec};

use super::*;
use crate::biome::{BiomeCatalogBuilder, BiomeCategory, BiomeRecord};

const GRID: usize = 128;

/// Four biomes at equal distance from the spawn climate, plus a far-off one.
fn catalog() -> Arc<BiomeCatalog> {
    let mut builder = BiomeCatalogBuilder::new();
    let records = [
        BiomeRecord::namespaced("minecraft:plains", 0.3, 0.0, BiomeCategory::Plains),
        BiomeRecord::namespaced("minecraft:forest", 0.0, 0.3, BiomeCategory::Forest),
        BiomeRecord::namespaced("minecraft:taiga", -0.3, 0.0, BiomeCategory::Taiga),
        BiomeRecord::namespaced("minecraft:savanna", 0.0, -0.3, BiomeCategory::Savanna),
        BiomeRecord::namespaced("terralith:ice_spires", -1.0, 1.0, BiomeCategory::Icy),
    ];
    for record in records {
        builder.register(record).unwrap();
    }
    Arc::new(builder.build())
}

fn settings(min_blob_size: u32, tolerance: f64) -> DimensionSettings {
    DimensionSettings {
        seed: 1234,
        climate: ClimateGridConfig {
            noise_amplitude: 0.0,
            min_blob_size,
            tolerance,
            ..Default::default()
        },
        pool: PoolSpec::default(),
    }
}

fn context(min_blob_size: u32, tolerance: f64) -> DimensionContext {
    DimensionContext::new("overworld", &settings(min_blob_size, tolerance), &catalog()).unwrap()
}

fn shaped_context(irregularity: f64, coherence: f64) -> DimensionContext {
    let mut settings = settings(64, 10.0);
    settings.climate.blob_irregularity = irregularity;
    settings.climate.blob_coherence = coherence;
    DimensionContext::new("overworld", &settings, &catalog()).unwrap()
}

fn biome_grid(ctx: &DimensionContext) -> Vec<Vec<BiomeId>> {
    (0..GRID as i64)
        .map(|x| (0..GRID as i64).map(|z| ctx.biome_at(x, z)).collect())
        .collect()
}

/// Mean size of 4-connected same-biome regions.
fn mean_component_size(grid: &[Vec<BiomeId>]) -> f64 {
    let mut seen = vec![vec![false; GRID]; GRID];
    let mut components = 0usize;
    for sx in 0..GRID {
        for sz in 0..GRID {
            if seen[sx][sz] {
                continue;
            }
            components += 1;
            let biome = grid[sx][sz];
            let mut queue = VecDeque::from([(sx, sz)]);
            seen[sx][sz] = true;
            while let Some((x, z)) = queue.pop_front() {
                let neighbours = [
                    (x.wrapping_sub(1), z),
                    (x + 1, z),
                    (x, z.wrapping_sub(1)),
                    (x, z + 1),
                ];
                for (nx, nz) in neighbours {
                    if nx < GRID && nz < GRID && !seen[nx][nz] && grid[nx][nz] == biome {
                        seen[nx][nz] = true;
                        queue.push_back((nx, nz));
                    }
                }
            }
        }
    }
    (GRID * GRID) as f64 / components as f64
}

/// Longest run of consecutive boundary edges lying on one straight line.
fn longest_straight_seam(grid: &[Vec<BiomeId>]) -> usize {
    let mut longest = 0;
    for line in 0..GRID - 1 {
        // Seams between columns `line` and `line + 1`, then between rows.
        let mut along_x = 0;
        let mut along_z = 0;
        for step in 0..GRID {
            if grid[line][step] != grid[line + 1][step] {
                along_x += 1;
            } else {
                along_x = 0;
            }
            if grid[step][line] != grid[step][line + 1] {
                along_z += 1;
            } else {
                along_z = 0;
            }
            longest = longest.max(along_x).max(along_z);
        }
    }
    longest
}

#[test]
fn test_same_settings_same_biomes() {
    let a = context(64, 0.5);
    let b = context(64, 0.5);
    for x in (-2_000..2_000).step_by(37) {
        for z in (-2_000..2_000).step_by(41) {
            assert_eq!(a.biome_at(x, z), b.biome_at(x, z), "Mismatch at ({x}, {z})");
        }
    }
}

#[test]
fn test_selection_always_from_pool() {
    let ctx = context(16, 0.5);
    let ice = ctx.catalog().id_of("terralith:ice_spires").unwrap();
    for x in (-500..500).step_by(7) {
        for z in (-500..500).step_by(11) {
            let biome = ctx.biome_at(x, z);
            assert!(ctx.pool().contains(biome));
            assert_ne!(biome, ice);
        }
    }
}

#[test]
fn test_detailed_query_matches_biome_at() {
    let ctx = context(64, 0.5);
    for (x, z) in [(0, 0), (13, -7), (500, 500), (-900, 42)] {
        let query = ctx.select_detailed(x, z);
        assert_eq!(query.selection.biome, ctx.biome_at(x, z));
        assert_eq!(query.remapped, ctx.blob().remap(x, z));
        assert_eq!(query.climate, ctx.climate_at(x, z));
        assert!(!query.selection.fallback);
    }
}

#[test]
fn test_climate_at_spawn_without_blobs() {
    let ctx = context(1, 0.5);
    let climate = ctx.climate_at(0, 0);
    assert_eq!(climate.temperature(), 0.0);
    assert_eq!(climate.moisture(), 0.0);
}

#[test]
fn test_tight_tolerance_falls_back() {
    let ctx = context(1, 0.05);
    let query = ctx.select_detailed(0, 0);
    assert!(query.selection.fallback);
    assert_eq!(query.selection.biome, ctx.pool().first());
}

#[test]
fn test_fallbacks_counted_per_resolution() {
    let ctx = context(1, 0.05);
    for x in 0..100 {
        assert!(ctx.select_detailed(x, 0).selection.fallback);
    }
    assert_eq!(ctx.fallback_count(), 100);

    let matched = context(1, 0.5);
    for x in 0..100 {
        matched.biome_at(x, 0);
    }
    assert_eq!(matched.fallback_count(), 0);
}

#[test]
fn test_cache_never_changes_answers() {
    let plain = context(64, 0.5);
    let cached = context(64, 0.5).with_cache(16);
    for x in -40..40 {
        for z in -40..40 {
            assert_eq!(cached.biome_at(x, z), plain.biome_at(x, z));
        }
    }
    // Second pass hits whatever survived the clears.
    for x in -40..40 {
        assert_eq!(cached.biome_at(x, 0), plain.biome_at(x, 0));
    }
    assert!(cached.cache().unwrap().len() <= 16);
}

#[test]
fn test_concurrent_queries_agree() {
    let ctx = Arc::new(context(64, 0.5).with_cache(1_024));
    let expected = biome_grid(&context(64, 0.5));

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let ctx = Arc::clone(&ctx);
            let expected = &expected;
            scope.spawn(move || {
                for x in (worker..GRID).step_by(4) {
                    for z in 0..GRID {
                        assert_eq!(ctx.biome_at(x as i64, z as i64), expected[x][z]);
                    }
                }
            });
        }
    });
}

#[test]
fn test_empty_pool_is_an_error() {
    let mut settings = settings(64, 0.5);
    settings.pool.include_base = false;
    let result = DimensionContext::new("void", &settings, &catalog());
    assert!(matches!(result, Err(ContextError::Pool(PoolError::Empty { .. }))));
}

#[test]
fn test_invalid_climate_is_an_error() {
    let mut settings = settings(64, 0.5);
    settings.climate.boundary = 0;
    let result = DimensionContext::new("broken", &settings, &catalog());
    assert!(matches!(
        result,
        Err(ContextError::Config(ConfigError::Invalid { field: "boundary", .. }))
    ));
}

#[test]
fn test_blob_regions_reach_target_size() {
    // Wide tolerance: every pool member is a candidate everywhere, so region
    // size is governed by the blob enforcer alone.
    let blobbed = mean_component_size(&biome_grid(&context(64, 10.0)));
    let raw = mean_component_size(&biome_grid(&context(1, 10.0)));

    assert!(blobbed >= 32.0, "Mean region size {blobbed:.1} for target 64");
    assert!(
        blobbed > raw * 4.0,
        "Blobbed regions ({blobbed:.1}) not larger than raw ({raw:.1})"
    );
}

#[test]
fn test_context_holds_catalog_snapshot() {
    let catalog = catalog();
    let ctx = DimensionContext::new("overworld", &settings(64, 0.5), &catalog).unwrap();
    assert!(Arc::ptr_eq(ctx.catalog(), &catalog));
    assert_eq!(ctx.name(), "overworld");
    assert_eq!(ctx.settings().seed, 1234);
}

#[test]
fn test_region_size_grows_with_coherence() {
    let sizes: Vec<f64> = [0.0, 0.5, 1.0]
        .into_iter()
        .map(|coherence| mean_component_size(&biome_grid(&shaped_context(1.0, coherence))))
        .collect();

    for pair in sizes.windows(2) {
        assert!(
            pair[1] >= pair[0],
            "Mean region size shrank as coherence rose: {sizes:?}"
        );
    }
    assert!(
        sizes[2] >= 32.0,
        "Mean region size {:.1} at full coherence",
        sizes[2]
    );
}

#[test]
fn test_no_long_straight_seams() {
    let ctx = context(64, 10.0);
    let cell = ctx.blob().cell_size() as usize;
    let organic = longest_straight_seam(&biome_grid(&ctx));
    assert!(
        organic <= 4 * cell,
        "Straight seam of {organic} columns with cell size {cell}"
    );

    // An undistorted grid runs seams along whole rows of cells.
    let regular = longest_straight_seam(&biome_grid(&shaped_context(0.0, 0.5)));
    assert!(
        regular > organic,
        "Regular grid seam {regular} not longer than organic seam {organic}"
    );
}
