//! # Password Generation
//!
//! Generates random passwords that satisfy the most restrictive IAM password
//! policy: at least one lowercase letter, one uppercase letter, one digit and
//! one symbol.
//!
//! Rather than planting one character of each class, every candidate is drawn
//! uniformly from the combined character set and rejected when it misses a
//! class. Even in the worst case this tends to take fewer than 10 tries, and
//! any reasonably long password passes on the first one.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::constants::{
    CHAR_LOWER, CHAR_NUMBERS, CHAR_SYMBOLS, CHAR_UPPER, PASSWORD_ATTEMPT_BUDGET,
};

/// Password generation failures
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The secure random source failed
    #[error("secure random source failed: {0}")]
    Random(#[from] rand::Error),

    /// No candidate satisfied the policy within the attempt budget
    #[error("failed to generate acceptable password of length {length} after {attempts} attempts")]
    BudgetExhausted { length: usize, attempts: u32 },
}

/// Bytes pulled from the random source per refill
const RANDOM_CHUNK: usize = 64;

/// Generate a password of exactly `length` characters from the OS random source.
///
/// Lengths below 4 can never contain all four classes, so they always end in
/// [`PasswordError::BudgetExhausted`].
///
/// # Errors
///
/// Returns an error if the OS random source fails or the attempt budget runs out.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>, PasswordError> {
    generate_password_with(&mut OsRng, length)
}

/// Generate a password from a caller-supplied cryptographically secure generator.
///
/// # Errors
///
/// Returns an error if `rng` fails or the attempt budget runs out.
pub fn generate_password_with<R>(
    rng: &mut R,
    length: usize,
) -> Result<Zeroizing<String>, PasswordError>
where
    R: RngCore + CryptoRng,
{
    let charset = charset();
    let mut source = ByteSource::new(rng);
    let mut candidate = Zeroizing::new(vec![0u8; length]);

    for _ in 0..PASSWORD_ATTEMPT_BUDGET {
        for slot in candidate.iter_mut() {
            *slot = charset[source.index_below(charset.len())?];
        }

        if check_password_policy(&candidate) {
            // Every byte comes from the ASCII charset
            let password: String = candidate.iter().map(|&b| char::from(b)).collect();
            return Ok(Zeroizing::new(password));
        }
    }

    Err(PasswordError::BudgetExhausted {
        length,
        attempts: PASSWORD_ATTEMPT_BUDGET,
    })
}

/// Check the password contains every character class of the IAM password policy
pub fn check_password_policy(password: &[u8]) -> bool {
    contains_any(password, CHAR_LOWER)
        && contains_any(password, CHAR_UPPER)
        && contains_any(password, CHAR_NUMBERS)
        && contains_any(password, CHAR_SYMBOLS)
}

fn contains_any(password: &[u8], class: &str) -> bool {
    password.iter().any(|b| class.as_bytes().contains(b))
}

fn charset() -> Vec<u8> {
    [CHAR_LOWER, CHAR_UPPER, CHAR_NUMBERS, CHAR_SYMBOLS]
        .concat()
        .into_bytes()
}

/// Buffered reader over a random generator that yields unbiased indexes
struct ByteSource<'a, R> {
    rng: &'a mut R,
    buffer: Zeroizing<[u8; RANDOM_CHUNK]>,
    position: usize,
}

impl<'a, R: RngCore> ByteSource<'a, R> {
    fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            buffer: Zeroizing::new([0u8; RANDOM_CHUNK]),
            position: RANDOM_CHUNK,
        }
    }

    fn next_byte(&mut self) -> Result<u8, PasswordError> {
        if self.position == RANDOM_CHUNK {
            self.rng.try_fill_bytes(&mut *self.buffer)?;
            self.position = 0;
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Uniform index in `0..bound` (bound <= 256), discarding bytes that would bias
    /// the modulo toward the start of the range.
    fn index_below(&mut self, bound: usize) -> Result<usize, PasswordError> {
        let limit = 256 - (256 % bound);
        loop {
            let byte = usize::from(self.next_byte()?);
            if byte < limit {
                return Ok(byte % bound);
            }
        }
    }
}
