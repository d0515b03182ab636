use rand::Rng;

pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const INVITE_CODE_LENGTH: usize = 6;

/// Maximum redraws before giving up on finding an unused code. With 36^6
/// possible codes a collision streak this long means something is wrong
/// with the table, not with the dice.
pub const MAX_INVITE_CODE_ATTEMPTS: usize = 10;

/// Draws a 6-character code over [A-Z0-9], one uniform draw per character.
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let index = rng.gen_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[index] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_shape() {
        let code = generate_invite_code();
        assert_eq!(code.len(), INVITE_CODE_LENGTH);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_invite_code()).collect();
        // 100 draws from a 2.2e9 space colliding down to a handful would
        // mean the generator is broken.
        assert!(codes.len() > 90);
    }

    proptest! {
        #[test]
        fn test_every_draw_stays_in_alphabet(_seed in 0u32..1000) {
            let code = generate_invite_code();
            prop_assert_eq!(code.len(), INVITE_CODE_LENGTH);
            for c in code.chars() {
                prop_assert!(INVITE_CODE_ALPHABET.contains(&(c as u8)));
            }
        }
    }
}
