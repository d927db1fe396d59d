//! Identifier generation

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated event ids
pub const EVENT_ID_LEN: usize = 9;

/// Random lowercase alphanumeric id of the given length
pub fn random_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Draw event ids until one is not taken
pub fn fresh_event_id<F>(is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = random_id(EVENT_ID_LEN);
        if !is_taken(&id) {
            return id;
        }
    }
}
