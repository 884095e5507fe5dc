use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an identifier of the form `<prefix>_<unix millis>_<random suffix>`.
/// Unique in practice, not cryptographically unique.
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}
