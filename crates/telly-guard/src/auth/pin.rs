//! PIN entry buffer

use telly_core::PIN_LENGTH;
use zeroize::{Zeroize, Zeroizing};

/// Proof that a complete entry matched the expected PIN
///
/// Only [`PinEntry::submit_digit`] can create one, and
/// [`SessionGuard::unlock`](super::SessionGuard::unlock) consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct UnlockToken {
    _private: (),
}

impl UnlockToken {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Result of feeding one digit into a [`PinEntry`]
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum PinOutcome {
    /// Input dropped: buffer full or not a digit
    Ignored,
    /// Digit buffered, entry not complete yet
    Pending,
    /// Entry matched; the buffer has been wiped
    Accepted(UnlockToken),
    /// Entry did not match; the error flag is set
    Rejected,
}

/// Digits typed on the lock screen
///
/// Holds between zero and `PIN_LENGTH` digits. The entered and expected
/// PINs are wiped from memory when the buffer is dropped.
pub struct PinEntry {
    expected: Zeroizing<String>,
    digits: Zeroizing<String>,
    error: bool,
}

impl PinEntry {
    /// Create an empty buffer checking against `expected`
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: Zeroizing::new(expected.into()),
            digits: Zeroizing::new(String::with_capacity(PIN_LENGTH)),
            error: false,
        }
    }

    /// Append one digit and check the entry once it is complete
    pub fn submit_digit(&mut self, digit: char) -> PinOutcome {
        if !digit.is_ascii_digit() {
            tracing::debug!("Ignoring non-digit PIN input");
            return PinOutcome::Ignored;
        }
        if self.digits.len() >= PIN_LENGTH {
            return PinOutcome::Ignored;
        }

        self.digits.push(digit);
        self.error = false;

        if self.digits.len() < PIN_LENGTH {
            return PinOutcome::Pending;
        }

        if self.digits.as_str() == self.expected.as_str() {
            self.digits.zeroize();
            PinOutcome::Accepted(UnlockToken::new())
        } else {
            tracing::info!("Incorrect PIN entered");
            self.error = true;
            PinOutcome::Rejected
        }
    }

    /// Remove the last digit; the error flag is left as is
    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    /// Empty the buffer and clear the error flag
    pub fn clear(&mut self) {
        self.digits.zeroize();
        self.error = false;
    }

    /// Number of digits buffered
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the last complete entry was rejected
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Whether more digits are accepted
    pub fn is_full(&self) -> bool {
        self.digits.len() >= PIN_LENGTH
    }
}

impl std::fmt::Debug for PinEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinEntry")
            .field("len", &self.digits.len())
            .field("error", &self.error)
            .finish()
    }
}
