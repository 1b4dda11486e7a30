use rand::prelude::*;
use std::fmt;

pub const SHARE_CODE_LEN: usize = 10;
pub const SHARE_CODE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Query parameter carrying the code in a share link.
pub const SHARE_PARAM: &str = "v";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareCodeError {
    #[error("share code must be {expected} characters, got {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("share code has invalid character {ch:?} at index {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// Opaque 10-character identifier used in share links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareCode(String);

impl ShareCode {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut s = String::with_capacity(SHARE_CODE_LEN);
        for _ in 0..SHARE_CODE_LEN {
            let idx = rng.gen_range(0..SHARE_CODE_ALPHABET.len());
            s.push(SHARE_CODE_ALPHABET[idx] as char);
        }
        Self(s)
    }

    pub fn parse(input: &str) -> Result<Self, ShareCodeError> {
        let found = input.chars().count();
        if found != SHARE_CODE_LEN {
            return Err(ShareCodeError::InvalidLength {
                expected: SHARE_CODE_LEN,
                found,
            });
        }
        for (index, ch) in input.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ShareCodeError::InvalidCharacter { ch, index });
            }
        }
        Ok(Self(input.to_owned()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Share link: base origin plus the code in the query string.
pub fn share_url(base: &str, code: &ShareCode) -> String {
    format!("{}/?{}={}", base.trim_end_matches('/'), SHARE_PARAM, code)
}

// Naive ?a=b&c=d parser; enough for a single opaque parameter and tolerant
// of anything else in the query.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key && !v.is_empty() {
            return Some(v.to_owned());
        }
    }
    None
}
