//! Code token generation

use rand::Rng;
use shared::models::BottleTier;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh code token in `AAA-BBB-999-SSS` format
///
/// Two random letter triplets, a random three-digit group, and the bottle
/// tier suffix. Tokens are not guaranteed unique; callers retry on
/// collision against the store.
pub fn generate_code_token(tier: BottleTier) -> String {
    let mut rng = rand::thread_rng();
    let triplet = |rng: &mut rand::rngs::ThreadRng| -> String {
        (0..3)
            .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    };
    let first = triplet(&mut rng);
    let second = triplet(&mut rng);
    let digits: u16 = rng.gen_range(0..1000);

    format!("{}-{}-{:03}-{}", first, second, digits, tier.code_suffix())
}
