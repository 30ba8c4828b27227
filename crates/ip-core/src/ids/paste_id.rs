use rand::Rng;
use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Characters a paste id is drawn from.
const PASTE_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a generated paste id.
pub const PASTE_ID_LEN: usize = 5;

/// Short random identifier of one pending placeholder.
///
/// Uniqueness only matters among markers that are simultaneously present in the
/// same buffer, so a handful of base36 characters is enough. No collision check is
/// performed against ids that are still in flight.
///
/// 单个待替换占位符的短随机标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PasteId(String);

impl PasteId {
    /// Generate a fresh id from the thread-local RNG.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..PASTE_ID_LEN)
            .map(|_| PASTE_ID_ALPHABET[rng.random_range(0..PASTE_ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }
}

impl_id!(PasteId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_uses_lowercase_base36() {
        for _ in 0..200 {
            let id = PasteId::generate();
            assert_eq!(id.as_str().len(), PASTE_ID_LEN);
            assert!(id
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn generated_ids_rarely_repeat() {
        let ids: std::collections::HashSet<_> = (0..64).map(|_| PasteId::generate()).collect();
        // 36^5 possibilities; 64 draws colliding would point at a broken generator.
        assert!(ids.len() >= 63);
    }
}
