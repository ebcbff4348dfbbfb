//! # vcprompt Status Normalizer
//!
//! File: cli/src/core/status.rs
//!
//! ## Overview
//!
//! Every VCS reports working-tree changes with its own letters, casing and
//! ordering. `normalize` turns the raw codes collected by a probe into a
//! stable string: lowercase codes first, then uppercase, then digits, each
//! group in the order the codes were encountered. Anything else (`?`, `!`,
//! whitespace) is dropped.
//!

/// Orders status codes as lowercase + uppercase + digits.
///
/// With `unique` set, each group keeps only the first occurrence of a code.
pub fn normalize(codes: &str, unique: bool) -> String {
    let mut lower = Vec::new();
    let mut upper = Vec::new();
    let mut digit = Vec::new();

    for c in codes.chars() {
        let bucket = if c.is_lowercase() {
            &mut lower
        } else if c.is_uppercase() {
            &mut upper
        } else if c.is_ascii_digit() {
            &mut digit
        } else {
            continue;
        };
        if unique && bucket.contains(&c) {
            continue;
        }
        bucket.push(c);
    }

    lower.into_iter().chain(upper).chain(digit).collect()
}
