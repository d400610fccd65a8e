use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use tracing::debug;

use crate::error::TopographyError;
use crate::tile::{HgtTile, TileIndex};

/// Bounded set of resident elevation tiles with least-recently-used eviction.
///
/// Tiles are read from `root` on first use. Indices whose file is absent are
/// remembered so repeated queries in a dead zone do not touch the disk again;
/// a tile copied into `root` after its first miss is therefore not picked up
/// by this stack. The missing set is bounded by the number of 1° tiles.
#[derive(Debug)]
pub struct TileStack {
    root: PathBuf,
    capacity: usize,
    tiles: HashMap<TileIndex, HgtTile>,
    recency: VecDeque<TileIndex>,
    missing: HashSet<TileIndex>,
}

impl TileStack {
    pub fn new(root: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            root: root.into(),
            capacity: capacity.max(1),
            tiles: HashMap::new(),
            recency: VecDeque::new(),
            missing: HashSet::new(),
        }
    }

    pub fn resident(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_resident(&self, index: TileIndex) -> bool {
        self.tiles.contains_key(&index)
    }

    /// Elevation in meters at a geodetic position given in degrees.
    pub fn elevation(&mut self, latitude: f64, longitude: f64) -> Result<f64, TopographyError> {
        let index = TileIndex::containing(latitude, longitude);
        let Some(tile) = self.tile(index)? else {
            return Err(TopographyError::OutOfCoverage {
                latitude,
                longitude,
            });
        };
        Ok(tile.elevation(latitude, longitude))
    }

    fn tile(&mut self, index: TileIndex) -> Result<Option<&HgtTile>, TopographyError> {
        if self.missing.contains(&index) {
            return Ok(None);
        }

        if self.tiles.contains_key(&index) {
            self.touch(index);
        } else {
            let path = self.root.join(index.file_name());
            if !path.is_file() {
                debug!("no tile at {}", path.display());
                self.missing.insert(index);
                return Ok(None);
            }
            let tile = HgtTile::load(&path, index)?;
            let n = tile.size();
            debug!("loaded tile {} ({n}x{n})", path.display());

            while self.tiles.len() >= self.capacity {
                let Some(oldest) = self.recency.pop_front() else {
                    break;
                };
                self.tiles.remove(&oldest);
                debug!("evicted tile {}", oldest.file_name());
            }
            self.tiles.insert(index, tile);
            self.recency.push_back(index);
        }

        Ok(self.tiles.get(&index))
    }

    fn touch(&mut self, index: TileIndex) {
        if let Some(pos) = self.recency.iter().position(|i| *i == index) {
            self.recency.remove(pos);
        }
        self.recency.push_back(index);
    }
}

#[cfg(test)]
mod tests {
    use super::TileStack;
    use crate::tile::{TileIndex, encode_samples};
    use pretty_assertions::assert_eq;

    fn write_flat_tile(dir: &std::path::Path, index: TileIndex, height: i16) {
        let bytes = encode_samples(&[height; 4]);
        std::fs::write(dir.join(index.file_name()), bytes).expect("write tile");
    }

    #[test]
    fn missing_tile_is_out_of_coverage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut stack = TileStack::new(dir.path(), 4);
        let err = stack.elevation(42.5, 86.5).expect_err("no tile on disk");
        assert!(err.is_out_of_coverage());
        // Remembered as missing; still out of coverage on the second query.
        let err = stack.elevation(42.6, 86.6).expect_err("still missing");
        assert!(err.is_out_of_coverage());
    }

    #[test]
    fn evicts_least_recently_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = TileIndex::new(0, 0);
        let b = TileIndex::new(0, 1);
        let c = TileIndex::new(1, 0);
        write_flat_tile(dir.path(), a, 10);
        write_flat_tile(dir.path(), b, 20);
        write_flat_tile(dir.path(), c, 30);

        let mut stack = TileStack::new(dir.path(), 2);
        assert_eq!(stack.elevation(0.5, 0.5).expect("a"), 10.0);
        assert_eq!(stack.elevation(0.5, 1.5).expect("b"), 20.0);
        // Touch `a` so that `b` becomes the eviction candidate.
        assert_eq!(stack.elevation(0.25, 0.25).expect("a again"), 10.0);
        assert_eq!(stack.elevation(1.5, 0.5).expect("c"), 30.0);

        assert_eq!(stack.resident(), 2);
        assert!(stack.is_resident(a));
        assert!(!stack.is_resident(b));
        assert!(stack.is_resident(c));
    }

    #[test]
    fn tiles_added_after_a_miss_stay_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = TileIndex::new(42, 86);
        let mut stack = TileStack::new(dir.path(), 4);
        let err = stack.elevation(42.5, 86.5).expect_err("absent");
        assert!(err.is_out_of_coverage());

        write_flat_tile(dir.path(), index, 1_000);
        let err = stack.elevation(42.5, 86.5).expect_err("still absent");
        assert!(err.is_out_of_coverage());
        assert!(!stack.is_resident(index));

        // A fresh stack over the same directory sees the new tile.
        let mut fresh = TileStack::new(dir.path(), 4);
        assert_eq!(fresh.elevation(42.5, 86.5).expect("loaded"), 1_000.0);
    }

    #[test]
    fn malformed_tile_is_not_a_coverage_gap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index = TileIndex::new(5, 5);
        std::fs::write(dir.path().join(index.file_name()), [0u8; 5]).expect("write");

        let mut stack = TileStack::new(dir.path(), 1);
        let err = stack.elevation(5.5, 5.5).expect_err("bad tile");
        assert!(!err.is_out_of_coverage());
    }
}
