//! Daily universal staff code
//!
//! One shared code per calendar day that lets staff open any bottling
//! station without a booking. Rotates lazily on first use after
//! midnight UTC.

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use rand::Rng;
use tracing::info;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 8;

#[derive(Default)]
pub struct DailyAccessCode {
    state: RwLock<Option<(NaiveDate, String)>>,
}

impl DailyAccessCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// The code for today, rotating it if the stored one is stale
    pub fn current(&self) -> String {
        self.current_for(Utc::now().date_naive())
    }

    pub fn current_for(&self, today: NaiveDate) -> String {
        if let Some((date, code)) = self.state.read().as_ref() {
            if *date == today {
                return code.clone();
            }
        }

        let mut state = self.state.write();
        // Re-check under the write lock, another caller may have rotated
        if let Some((date, code)) = state.as_ref() {
            if *date == today {
                return code.clone();
            }
        }

        let code = random_daily_code();
        info!(date = %today, "daily staff code rotated");
        *state = Some((today, code.clone()));
        code
    }

    /// Whether `candidate` matches today's code (case-insensitive)
    pub fn verify(&self, candidate: &str) -> bool {
        self.verify_for(candidate, Utc::now().date_naive())
    }

    pub fn verify_for(&self, candidate: &str, today: NaiveDate) -> bool {
        self.current_for(today) == candidate.trim().to_ascii_uppercase()
    }
}

fn random_daily_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
