//! Common utilities

use xxhash_rust::xxh3::Xxh3;

/// Incremental digest over a sequence of optional string fields.
///
/// Each field is length-prefixed and absent fields get their own tag, so
/// `("ab", "c")` and `("a", "bc")` or `None` and `Some("")` never collide.
pub struct Fingerprint {
    hasher: Xxh3,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    pub fn field(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => {
                self.hasher.update(&[1]);
                self.hasher.update(&(v.len() as u64).to_le_bytes());
                self.hasher.update(v.as_bytes());
            }
            None => self.hasher.update(&[0]),
        }
        self
    }

    pub fn finish(&self) -> String {
        format!("{:016x}", self.hasher.digest())
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = Fingerprint::new().field(Some("$.a")).field(Some("1")).finish();
        let b = Fingerprint::new().field(Some("$.a")).field(Some("1")).finish();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16); // 64-bit hex
    }

    #[test]
    fn test_fingerprint_field_boundaries() {
        let a = Fingerprint::new().field(Some("ab")).field(Some("c")).finish();
        let b = Fingerprint::new().field(Some("a")).field(Some("bc")).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_absent_differs_from_empty() {
        let a = Fingerprint::new().field(None).finish();
        let b = Fingerprint::new().field(Some("")).finish();
        assert_ne!(a, b);
    }
}
