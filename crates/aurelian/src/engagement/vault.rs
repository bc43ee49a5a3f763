use crate::engagement::notify::{Notice, Notifier};
use serde::Serialize;

/// Progression of the vault gate. The level only ever advances one step at
/// a time (`Locked → Verifying → Granted`) or resets to `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Locked,
    Verifying,
    Granted,
}

impl AccessLevel {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Locked => 0,
            Self::Verifying => 1,
            Self::Granted => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Verifying => "Verifying",
            Self::Granted => "Granted",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("access denied: {reason}")]
pub struct AccessDenied {
    pub reason: String,
}

impl AccessDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Credential-check capability behind the vault gate. The shipped
/// implementation is an explicit simulation; a real biometric or credential
/// backend slots in here without touching the state machine.
pub trait AccessVerifier: Send + Sync {
    /// Stage one: capture the signature.
    fn scan(&self) -> Result<(), AccessDenied>;
    /// Stage two: verify it.
    fn confirm(&self) -> Result<(), AccessDenied>;
}

/// Stand-in verifier that grants every request. Named for what it is: there
/// is no real verification behind the vault in this build.
#[derive(Debug, Default, Clone)]
pub struct SimulatedVerifier;

impl AccessVerifier for SimulatedVerifier {
    fn scan(&self) -> Result<(), AccessDenied> {
        Ok(())
    }

    fn confirm(&self) -> Result<(), AccessDenied> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The vault was already open; nothing changed.
    AlreadyGranted,
    Granted,
    Denied,
}

/// Per-session vault gate state. Not persisted across reloads; reset by an
/// explicit lock.
#[derive(Debug, Clone)]
pub struct VaultAccess {
    is_unlocked: bool,
    is_scanning: bool,
    level: AccessLevel,
}

impl Default for VaultAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultAccess {
    pub fn new() -> Self {
        Self {
            is_unlocked: false,
            is_scanning: false,
            level: AccessLevel::Locked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.is_unlocked
    }

    pub fn is_scanning(&self) -> bool {
        self.is_scanning
    }

    pub fn level(&self) -> AccessLevel {
        self.level
    }

    /// Enter the verifying stage. Returns `false` when the vault is already
    /// granted, in which case nothing changes (idempotent no-op).
    pub fn begin_verification(&mut self) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_scanning = true;
        self.level = AccessLevel::Verifying;
        true
    }

    /// Apply the verifier result after the verifying stage. Completions
    /// arriving when the gate is not verifying are ignored.
    pub fn complete_verification(
        &mut self,
        verified: Result<(), AccessDenied>,
        notifier: &dyn Notifier,
    ) -> AccessOutcome {
        if self.level != AccessLevel::Verifying {
            return if self.is_unlocked {
                AccessOutcome::AlreadyGranted
            } else {
                AccessOutcome::Denied
            };
        }

        self.is_scanning = false;
        match verified {
            Ok(()) => {
                self.is_unlocked = true;
                self.level = AccessLevel::Granted;
                notifier.notify(Notice::gold("ACCESS GRANTED", "Welcome to The Vault, User."));
                AccessOutcome::Granted
            }
            Err(_) => {
                self.is_unlocked = false;
                self.level = AccessLevel::Locked;
                notifier.notify(Notice::destructive(
                    "ACCESS DENIED",
                    "Biometric signature not recognized.",
                ));
                AccessOutcome::Denied
            }
        }
    }

    /// Run the full two-stage gate synchronously. Callers that want
    /// simulated latency between the stages use `begin_verification` /
    /// `complete_verification` directly.
    pub fn request_access(
        &mut self,
        verifier: &dyn AccessVerifier,
        notifier: &dyn Notifier,
    ) -> AccessOutcome {
        if !self.begin_verification() {
            return AccessOutcome::AlreadyGranted;
        }

        let verified = verifier.scan().and_then(|()| verifier.confirm());
        self.complete_verification(verified, notifier)
    }

    /// Relock the vault from any state.
    pub fn lock(&mut self) {
        self.is_unlocked = false;
        self.is_scanning = false;
        self.level = AccessLevel::Locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engagement::notify::RecordingNotifier;

    struct DenyingVerifier;

    impl AccessVerifier for DenyingVerifier {
        fn scan(&self) -> Result<(), AccessDenied> {
            Ok(())
        }

        fn confirm(&self) -> Result<(), AccessDenied> {
            Err(AccessDenied::new("signature mismatch"))
        }
    }

    #[test]
    fn granted_flow_advances_through_verifying() {
        let mut vault = VaultAccess::new();
        assert_eq!(vault.level(), AccessLevel::Locked);

        assert!(vault.begin_verification());
        assert_eq!(vault.level(), AccessLevel::Verifying);
        assert!(vault.is_scanning());

        let notifier = RecordingNotifier::default();
        let outcome = vault.complete_verification(Ok(()), &notifier);
        assert_eq!(outcome, AccessOutcome::Granted);
        assert_eq!(vault.level(), AccessLevel::Granted);
        assert!(vault.is_unlocked());
        assert!(!vault.is_scanning());
        assert_eq!(notifier.notices()[0].title, "ACCESS GRANTED");
    }

    #[test]
    fn request_access_when_granted_is_a_noop() {
        let mut vault = VaultAccess::new();
        let notifier = RecordingNotifier::default();
        vault.request_access(&SimulatedVerifier, &notifier);

        let before = vault.clone();
        let outcome = vault.request_access(&SimulatedVerifier, &notifier);
        assert_eq!(outcome, AccessOutcome::AlreadyGranted);
        assert_eq!(vault.level(), before.level());
        assert_eq!(vault.is_unlocked(), before.is_unlocked());
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn denial_returns_to_locked_with_a_destructive_notice() {
        let mut vault = VaultAccess::new();
        let notifier = RecordingNotifier::default();

        let outcome = vault.request_access(&DenyingVerifier, &notifier);
        assert_eq!(outcome, AccessOutcome::Denied);
        assert_eq!(vault.level(), AccessLevel::Locked);
        assert!(!vault.is_unlocked());
        assert_eq!(notifier.notices()[0].title, "ACCESS DENIED");
    }

    #[test]
    fn lock_resets_from_any_state() {
        let mut vault = VaultAccess::new();
        let notifier = RecordingNotifier::default();
        vault.request_access(&SimulatedVerifier, &notifier);
        assert!(vault.is_unlocked());

        vault.lock();
        assert_eq!(vault.level(), AccessLevel::Locked);
        assert!(!vault.is_unlocked());
        assert!(!vault.is_scanning());

        vault.begin_verification();
        vault.lock();
        assert_eq!(vault.level(), AccessLevel::Locked);
        assert!(!vault.is_scanning());
    }

    #[test]
    fn stray_completion_without_verification_is_ignored() {
        let mut vault = VaultAccess::new();
        let notifier = RecordingNotifier::default();
        let outcome = vault.complete_verification(Ok(()), &notifier);
        assert_eq!(outcome, AccessOutcome::Denied);
        assert_eq!(vault.level(), AccessLevel::Locked);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn access_levels_map_to_stable_numbers() {
        assert_eq!(AccessLevel::Locked.as_u8(), 0);
        assert_eq!(AccessLevel::Verifying.as_u8(), 1);
        assert_eq!(AccessLevel::Granted.as_u8(), 2);
    }
}
