//! Phone verification state.

/// How long a verification code stays valid, in seconds.
///
/// The window is enforced server-side; the client mirrors it so the UI
/// can close the code input when the code can no longer be accepted.
pub const CODE_TTL_SECS: u32 = 300;

/// State of the phone-verification sub-flow.
///
/// `Unverified -> Sending -> (CodeSent <-> Verifying) -> Verified`, where
/// the busy flags mark the transient states and `countdown` tracks the
/// remaining code validity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneVerification {
    pub is_verified: bool,
    pub is_sending: bool,
    pub is_verifying: bool,
    pub verification_code: String,
    pub countdown: u32,
}

impl PhoneVerification {
    /// Arm the code-validity countdown after a successful send.
    pub fn start_countdown(&mut self) {
        self.countdown = CODE_TTL_SECS;
    }

    /// One-second tick. Saturates at zero.
    pub fn tick(&mut self) {
        if self.countdown > 0 {
            self.countdown -= 1;
        }
    }

    /// The code input is only offered while a code is outstanding.
    pub fn code_entry_open(&self) -> bool {
        self.countdown > 0 && !self.is_verified
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
