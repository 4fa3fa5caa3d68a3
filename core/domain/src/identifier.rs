/// Number of characters in a textual object id
pub const OBJECT_ID_LENGTH: usize = 24;

/// Generates a new random object id (24 lowercase hexadecimal characters)
pub fn new_object_id() -> String {
    let bytes: [u8; OBJECT_ID_LENGTH / 2] = rand::random();
    hex::encode(bytes)
}

/// Checks whether the input is a well-formed object id
///
/// Uppercase digits are accepted, anything but exactly 24 hexadecimal characters is not.
pub fn is_object_id(input: &str) -> bool {
    input.len() == OBJECT_ID_LENGTH && input.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod does {
    use super::*;

    #[test]
    fn generate_valid_ids() {
        let id = new_object_id();

        assert!(is_object_id(&id));
        assert_eq!(id, id.to_lowercase());
        assert_ne!(id, new_object_id());
    }

    #[test]
    fn accept_object_ids() {
        assert!(is_object_id("64b7f3c2a1e4d5f6a7b8c9d0"));
        assert!(is_object_id("64B7F3C2A1E4D5F6A7B8C9D0"));
    }

    #[test]
    fn reject_malformed_ids() {
        assert!(!is_object_id(""));
        assert!(!is_object_id("abc123"));
        assert!(!is_object_id("64b7f3c2a1e4d5f6a7b8c9d0ff"));
        assert!(!is_object_id("64b7f3c2a1e4d5f6a7b8c9zz"));
    }
}
