use foundation::math::FloatKey;
use tracing::info;

/// Geographic origin of a topography handle, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Origin {
    pub latitude: f64,
    pub longitude: f64,
}

impl Origin {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn key(self) -> [FloatKey; 2] {
        [FloatKey::new(self.latitude), FloatKey::new(self.longitude)]
    }
}

/// Single-slot memo of a topography handle keyed by its origin.
///
/// The handle is rebuilt exactly when the requested origin differs from the
/// cached one. A failed rebuild leaves the cache empty, never holding a handle
/// for another origin.
#[derive(Debug)]
pub struct TopographyCache<T> {
    slot: Option<([FloatKey; 2], T)>,
    builds: u64,
}

impl<T> Default for TopographyCache<T> {
    fn default() -> Self {
        Self {
            slot: None,
            builds: 0,
        }
    }
}

impl<T> TopographyCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build<E, F>(&mut self, origin: Origin, build: F) -> Result<&mut T, E>
    where
        F: FnOnce(Origin) -> Result<T, E>,
    {
        let key = origin.key();
        let entry = match self.slot.take() {
            Some((cached, handle)) if cached == key => (cached, handle),
            _ => {
                info!(
                    "building topography handle for origin ({}, {})",
                    origin.latitude, origin.longitude
                );
                let handle = build(origin)?;
                self.builds += 1;
                (key, handle)
            }
        };
        Ok(&mut self.slot.insert(entry).1)
    }

    /// Handle for the origin most recently requested, if it was built successfully.
    pub fn current(&mut self) -> Option<&mut T> {
        self.slot.as_mut().map(|(_, handle)| handle)
    }

    /// Number of handles built so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
