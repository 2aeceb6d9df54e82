//! Request and result types for the four sales use cases, together with the
//! schema each model response is reconciled against and the deterministic
//! fallback used when reconciliation fails.

pub mod campaign;
pub mod intel;
pub mod lead;
pub mod pitch;

use crate::errors::DomainError;

/// Whether a completion-provider transport failure reaches the client or is
/// absorbed into the use case's fallback result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportPolicy {
    Surface,
    Degrade,
}

/// Rejects a key field that is empty after trimming.
pub fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}

/// Word-wise title casing: a letter is upper-cased when it follows a
/// non-letter, lower-cased otherwise (`o'neil corp` → `O'Neil Corp`).
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(ch);
            previous_is_letter = false;
        }
    }

    output
}
