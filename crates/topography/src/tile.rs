//! SRTM `.hgt` elevation tiles.
//!
//! A tile covers one degree of latitude and longitude. Samples are big-endian
//! `i16` meters in a square grid, rows ordered north to south, columns west to
//! east. Edge rows and columns are shared with the neighbouring tiles.

use std::io::Cursor;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::TopographyError;

/// Sample value marking missing data.
pub const VOID_SAMPLE: i16 = -32768;

/// Integer coordinates of a tile's south-west corner, in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub lat: i32,
    pub lon: i32,
}

impl TileIndex {
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    pub fn containing(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.floor() as i32, longitude.floor() as i32)
    }

    /// File name following the SRTM convention, e.g. `N42E086.hgt`.
    pub fn file_name(&self) -> String {
        let ns = if self.lat < 0 { 'S' } else { 'N' };
        let ew = if self.lon < 0 { 'W' } else { 'E' };
        format!(
            "{ns}{:02}{ew}{:03}.hgt",
            self.lat.unsigned_abs(),
            self.lon.unsigned_abs()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HgtTile {
    index: TileIndex,
    size: usize,
    samples: Vec<i16>,
}

impl HgtTile {
    pub fn from_bytes(index: TileIndex, bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() % 2 != 0 {
            return Err(format!("odd byte count {}", bytes.len()));
        }
        let count = bytes.len() / 2;
        let size = (count as f64).sqrt().round() as usize;
        if size < 2 || size * size != count {
            return Err(format!("{count} samples do not form a square grid"));
        }

        let mut samples = vec![0i16; count];
        Cursor::new(bytes)
            .read_i16_into::<BigEndian>(&mut samples)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            index,
            size,
            samples,
        })
    }

    pub fn load(path: &Path, index: TileIndex) -> Result<Self, TopographyError> {
        let bytes = std::fs::read(path).map_err(|source| TopographyError::TileIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(index, &bytes).map_err(|reason| TopographyError::MalformedTile {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Sample at `(row, col)`, counting rows from the northern edge. Voids read as 0 m.
    pub fn sample(&self, row: usize, col: usize) -> f64 {
        match self.samples[row * self.size + col] {
            VOID_SAMPLE => 0.0,
            v => f64::from(v),
        }
    }

    /// Bilinear elevation (meters) at a position inside the tile.
    pub fn elevation(&self, latitude: f64, longitude: f64) -> f64 {
        let last = (self.size - 1) as f64;
        let fy = ((f64::from(self.index.lat) + 1.0 - latitude) * last).clamp(0.0, last);
        let fx = ((longitude - f64::from(self.index.lon)) * last).clamp(0.0, last);

        let row = (fy.floor() as usize).min(self.size - 2);
        let col = (fx.floor() as usize).min(self.size - 2);
        let ty = fy - row as f64;
        let tx = fx - col as f64;

        let z00 = self.sample(row, col);
        let z01 = self.sample(row, col + 1);
        let z10 = self.sample(row + 1, col);
        let z11 = self.sample(row + 1, col + 1);

        let north = z00 + (z01 - z00) * tx;
        let south = z10 + (z11 - z10) * tx;
        north + (south - north) * ty
    }
}

#[cfg(test)]
pub(crate) fn encode_samples(samples: &[i16]) -> Vec<u8> {
    use byteorder::WriteBytesExt;

    let mut out = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        out.write_i16::<BigEndian>(s).expect("write to vec");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{HgtTile, TileIndex, VOID_SAMPLE, encode_samples};
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn file_names_follow_hemisphere() {
        assert_eq!(TileIndex::new(42, 86).file_name(), "N42E086.hgt");
        assert_eq!(TileIndex::new(-1, -7).file_name(), "S01W007.hgt");
        assert_eq!(TileIndex::containing(-0.5, 179.9), TileIndex::new(-1, 179));
    }

    #[test]
    fn rejects_non_square_payloads() {
        let idx = TileIndex::new(0, 0);
        assert!(HgtTile::from_bytes(idx, &[0u8; 3]).is_err());
        let three = encode_samples(&[1, 2, 3]);
        assert!(HgtTile::from_bytes(idx, &three).is_err());
        assert!(HgtTile::from_bytes(idx, &encode_samples(&[7])).is_err());
    }

    #[test]
    fn corners_and_center_interpolate() {
        // 3x3 grid, north row first.
        let samples = [100, 200, 300, 400, 500, 600, 700, 800, VOID_SAMPLE];
        let bytes = encode_samples(&samples);
        let tile = HgtTile::from_bytes(TileIndex::new(10, 20), &bytes).expect("tile");
        assert_eq!(tile.size(), 3);

        // North-west corner.
        assert_close(tile.elevation(11.0, 20.0), 100.0, 1e-9);
        // South-west corner.
        assert_close(tile.elevation(10.0, 20.0), 700.0, 1e-9);
        // Center sample.
        assert_close(tile.elevation(10.5, 20.5), 500.0, 1e-9);
        // Void in the south-east corner reads as sea level.
        assert_close(tile.elevation(10.0, 21.0), 0.0, 1e-9);
        // Halfway between the two northern samples.
        assert_close(tile.elevation(11.0, 20.25), 150.0, 1e-9);
    }
}
