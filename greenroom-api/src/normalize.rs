/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! The single normalization point for room names and allow-list entries.
//!
//! Every read and write boundary goes through [`normalize`] so that inputs
//! differing only in case or surrounding whitespace always resolve to the
//! same room.

use rand::Rng;

use crate::error::AppError;

const MAX_NAME_LEN: usize = 255;
const VALID_NAME_PATTERN: &str = "^[a-z0-9][a-z0-9_-]*$";

/// Canonical form of a room name or allow-list entry: trimmed and case-folded.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an already-normalized room name.
pub fn validate_room_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::invalid_room_name("cannot be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::invalid_room_name(&format!(
            "cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    let re = regex::Regex::new(VALID_NAME_PATTERN).expect("valid regex");
    if !re.is_match(name) {
        return Err(AppError::invalid_room_name(&format!(
            "must match pattern: {VALID_NAME_PATTERN}"
        )));
    }
    Ok(())
}

/// Generate a random room name for creation requests that omit one.
pub fn generate_room_name() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
