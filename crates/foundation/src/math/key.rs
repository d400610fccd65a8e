/// Hashable identity of a float, for use in map and cache keys.
///
/// `-0.0` and `0.0` share a key, as do all NaNs. Every other value keys on its
/// exact bit pattern, so nearby but distinct values never collide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(v: f64) -> Self {
        let v = if v == 0.0 {
            0.0
        } else if v.is_nan() {
            f64::NAN
        } else {
            v
        };
        Self(v.to_bits())
    }
}

impl From<f64> for FloatKey {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}
