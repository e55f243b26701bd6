//! Per-frame terrain orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use glam::{DVec2, DVec3};
use rustc_hash::FxHashSet;
use tessera_config::TerrainConfig;
use tessera_lod::{ChunkVisibilityManager, LodAssignment};
use tessera_mesh::{
    CacheStats, ChunkFrame, ChunkGeometry, ChunkMeshBuilder, CollisionHeightfield, ColorMode,
    EdgeStitch, GeometryCache, GeometryKey,
};
use tessera_terrain::{
    AsyncHeightmapLoader, ChunkCoord, HeightSource, HeightmapError, HeightmapImage, TerrainFields,
    TerrainHeight,
};
use tracing::{debug, info, warn};

use crate::readiness::ReadySignal;

/// One visible chunk as handed to the rendering host.
#[derive(Clone, Debug)]
pub struct ChunkDraw {
    pub coord: ChunkCoord,
    /// World-space corner with the smallest x and z.
    pub origin: DVec2,
    pub tier: u8,
    pub segments: u32,
    pub geometry: Arc<ChunkGeometry>,
    pub color_mode: ColorMode,
}

/// What [`TerrainSystem::update`] publishes for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    /// The chunk set, a tier or the geometry itself differs from the previous frame.
    pub changed: bool,
    /// Every visible chunk, ordered by coordinate.
    pub chunks: Vec<ChunkDraw>,
    /// Meshes built this frame (cache misses).
    pub rebuilt: usize,
}

/// Owns the height field and everything derived from it.
///
/// Construction never blocks. With a height-map configured the image decodes in
/// the background; until it arrives [`height_at`](Self::height_at) answers 0 and
/// [`update`](Self::update) publishes nothing.
pub struct TerrainSystem {
    config: TerrainConfig,
    config_hash: u64,
    height: Option<TerrainHeight>,
    loader: Option<AsyncHeightmapLoader>,
    ready: ReadySignal,
    visibility: ChunkVisibilityManager,
    cache: GeometryCache,
    collision: Option<Arc<CollisionHeightfield>>,
    draws: Vec<ChunkDraw>,
    geometry_dirty: bool,
}

impl TerrainSystem {
    pub fn new(config: TerrainConfig) -> Self {
        let config_hash = config.geometry_hash();
        let mut system = Self {
            config,
            config_hash,
            height: None,
            loader: None,
            ready: ReadySignal::new(),
            visibility: ChunkVisibilityManager::new(),
            cache: GeometryCache::new(),
            collision: None,
            draws: Vec::new(),
            geometry_dirty: true,
        };

        match system.config.heightmap.clone() {
            Some(path) => system.loader = Some(AsyncHeightmapLoader::spawn(path)),
            None => system.install_height(TerrainHeight::procedural(&system.config)),
        }
        system
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Elevation at world `(x, z)`, or 0 before the height data is ready.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.height.as_ref().map_or(0.0, |h| h.height_at(x, z))
    }

    /// The height field itself, once ready.
    pub fn height_field(&self) -> Option<&TerrainHeight> {
        self.height.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_ready()
    }

    /// Channel that yields once when height data first becomes available.
    pub fn subscribe_ready(&mut self) -> Receiver<()> {
        self.ready.subscribe()
    }

    /// Full-resolution collision grid, once ready.
    pub fn collision(&self) -> Option<Arc<CollisionHeightfield>> {
        self.collision.clone()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cached_meshes(&self) -> usize {
        self.cache.len()
    }

    pub fn visibility(&self) -> &ChunkVisibilityManager {
        &self.visibility
    }

    /// Block until a pending height-map load finishes.
    ///
    /// Intended for headless tools and tests; frame loops should rely on
    /// [`update`](Self::update) polling instead.
    pub fn block_until_ready(&mut self) {
        if let Some(loader) = self.loader.take() {
            let path = loader.path().to_path_buf();
            let result = loader.wait();
            self.finish_load(path, result);
        }
    }

    /// Advance one frame.
    ///
    /// `config` is this frame's snapshot; a snapshot whose geometry hash differs
    /// from the last one rebuilds the height field and drops every cached mesh.
    pub fn update(&mut self, camera: DVec3, config: &TerrainConfig, time: f64) -> FrameOutput {
        if *config != self.config {
            self.apply_config(config);
        }
        self.poll_loader();

        if self.height.is_none() {
            return FrameOutput::default();
        }

        let visibility_changed = self.visibility.tick(camera, &self.config, time).is_changed();
        let mut rebuilt = 0;
        if visibility_changed || self.geometry_dirty {
            rebuilt = self.rebuild_draws();
            self.geometry_dirty = false;
        }

        FrameOutput {
            changed: visibility_changed || rebuilt > 0,
            chunks: self.draws.clone(),
            rebuilt,
        }
    }

    fn apply_config(&mut self, config: &TerrainConfig) {
        let previous = std::mem::replace(&mut self.config, config.clone());
        // Stitching only changes chunk keys, not the height field.
        if previous.lod.stitch_edges != config.lod.stitch_edges {
            self.geometry_dirty = true;
        }
        let hash = config.geometry_hash();
        if hash == self.config_hash {
            return;
        }
        self.config_hash = hash;
        info!(
            seed = config.seed,
            height_scale = config.height_scale,
            "terrain configuration changed"
        );

        let path_changed = previous.heightmap != config.heightmap;
        if path_changed {
            self.loader = config.heightmap.clone().map(AsyncHeightmapLoader::spawn);
        }

        // Keep answering queries with the current source until a new image lands.
        let next = match self.height.take() {
            Some(current) => Some(match current.source() {
                HeightSource::Image(image) if !path_changed && config.heightmap.is_some() => {
                    TerrainHeight::with_source(HeightSource::Image(image.clone()), config)
                }
                _ => TerrainHeight::procedural(config),
            }),
            None if self.loader.is_none() => Some(TerrainHeight::procedural(config)),
            None => None,
        };
        if let Some(height) = next {
            self.install_height(height);
        }
    }

    fn poll_loader(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let Some(result) = loader.poll() else {
            return;
        };
        let path = loader.path().to_path_buf();
        self.loader = None;
        self.finish_load(path, result);
    }

    fn finish_load(&mut self, path: PathBuf, result: Result<HeightmapImage, HeightmapError>) {
        let source = match result {
            Ok(image) => {
                info!(
                    path = %path.display(),
                    width = image.width(),
                    height = image.height(),
                    "heightmap loaded"
                );
                HeightSource::Image(image)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "heightmap unavailable, using procedural terrain");
                HeightSource::Procedural(TerrainFields::from_seed(self.config.seed))
            }
        };
        self.install_height(TerrainHeight::with_source(source, &self.config));
    }

    fn install_height(&mut self, height: TerrainHeight) {
        let collision = CollisionHeightfield::build(&height, &self.config);
        debug!(resolution = collision.resolution, "collision heightfield built");
        self.collision = Some(Arc::new(collision));
        self.height = Some(height);
        self.cache.clear();
        self.geometry_dirty = true;
        if self.ready.fire() {
            info!("terrain ready");
        }
    }

    /// Rebuild the published draw list from the current assignment, meshing
    /// only chunks whose cache key is new. Returns the number of meshes built.
    fn rebuild_draws(&mut self) -> usize {
        let Some(height) = &self.height else {
            return 0;
        };
        let config = &self.config;
        let gradient = Some(&config.color_gradient);
        let color_mode = ColorMode::for_gradient(gradient);
        let builder = ChunkMeshBuilder::new(height, gradient);
        let chunk_size = config.effective_chunk_size();
        let assignments = self.visibility.assignments();

        let mut draws = Vec::with_capacity(assignments.len());
        let mut live = FxHashSet::default();
        let mut rebuilt = 0;

        for (&coord, assignment) in assignments {
            let frame = if assignment.span > 1 {
                ChunkFrame::whole_world(config)
            } else {
                ChunkFrame::chunk(coord, chunk_size, assignment.segments)
            };
            let stitch = if config.lod.stitch_edges && assignment.span == 1 {
                let neighbors = coord
                    .edge_neighbors()
                    .map(|n| assignments.get(&n).map(|a: &LodAssignment| a.segments));
                EdgeStitch::from_neighbors(assignment.segments, neighbors)
            } else {
                EdgeStitch::NONE
            };

            let key = GeometryKey::new(&frame, &stitch, self.config_hash);
            let (geometry, built) = self.cache.get_or_build(key, || builder.build(&frame, &stitch));
            if built {
                rebuilt += 1;
            }
            live.insert(key);

            draws.push(ChunkDraw {
                coord,
                origin: frame.origin(),
                tier: assignment.tier,
                segments: frame.segments,
                geometry,
                color_mode,
            });
        }

        self.cache.retain_keys(&live);
        debug!(
            visible = draws.len(),
            rebuilt,
            cached = self.cache.len(),
            "terrain geometry published"
        );
        self.draws = draws;
        rebuilt
    }
}
