use std::collections::HashSet;

use rand::Rng;

/// 0, O, 1, I and L are left out so codes survive being read aloud.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const CODE_LENGTH: usize = 6;

pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Draws codes until one is not in `issued`, then records it.
pub fn generate_unique_code<R: Rng + ?Sized>(rng: &mut R, issued: &mut HashSet<String>) -> String {
    loop {
        let code = generate_code(rng);
        if issued.insert(code.clone()) {
            return code;
        }
        tracing::debug!("secret code collision, drawing again");
    }
}

pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
