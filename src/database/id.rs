//! Resource identifier generation.
//!
//! Every resource id is an opaque 24-character lowercase hex string (12
//! random bytes). The shape is part of the public contract: anything that is
//! not 24 hex characters is invalid input, never "not found".

use rand::RngCore;

pub const ID_LEN: usize = 24;

/// Generate a new 24-hex resource id.
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::is_valid_id;

    #[test]
    fn generated_ids_are_valid() {
        for _ in 0..32 {
            let id = generate_id();
            assert_eq!(id.len(), ID_LEN);
            assert!(is_valid_id(Some(&id)), "generated id failed validation: {}", id);
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
