use aurelian::engagement::notify::RecordingNotifier;
use aurelian::engagement::{
    AccessDenied, AccessLevel, AccessOutcome, AccessVerifier, SimulatedVerifier, VaultAccess,
};

struct FailingScanner;

impl AccessVerifier for FailingScanner {
    fn scan(&self) -> Result<(), AccessDenied> {
        Err(AccessDenied::new("sensor offline"))
    }

    fn confirm(&self) -> Result<(), AccessDenied> {
        Ok(())
    }
}

#[test]
fn grant_deny_and_relock_round_trip() {
    let notifier = RecordingNotifier::default();
    let mut vault = VaultAccess::new();

    // Denied first: sensor never gets past stage one.
    let denied = vault.request_access(&FailingScanner, &notifier);
    assert_eq!(denied, AccessOutcome::Denied);
    assert_eq!(vault.level(), AccessLevel::Locked);

    // Granted on the second attempt with the simulated verifier.
    let granted = vault.request_access(&SimulatedVerifier, &notifier);
    assert_eq!(granted, AccessOutcome::Granted);
    assert!(vault.is_unlocked());

    vault.lock();
    assert_eq!(vault.level(), AccessLevel::Locked);

    let titles: Vec<String> = notifier
        .notices()
        .into_iter()
        .map(|notice| notice.title)
        .collect();
    assert_eq!(titles, vec!["ACCESS DENIED", "ACCESS GRANTED"]);
}

#[test]
fn split_stages_support_suspended_verification() {
    let notifier = RecordingNotifier::default();
    let mut vault = VaultAccess::new();

    // The HTTP layer sleeps between these two calls to simulate the scan.
    assert!(vault.begin_verification());
    assert_eq!(vault.level(), AccessLevel::Verifying);
    assert!(vault.is_scanning());

    let outcome = vault.complete_verification(Ok(()), &notifier);
    assert_eq!(outcome, AccessOutcome::Granted);
    assert_eq!(vault.level().as_u8(), 2);
}

#[test]
fn repeated_requests_after_grant_do_not_rescan() {
    let notifier = RecordingNotifier::default();
    let mut vault = VaultAccess::new();
    vault.request_access(&SimulatedVerifier, &notifier);

    assert!(!vault.begin_verification());
    assert_eq!(
        vault.request_access(&SimulatedVerifier, &notifier),
        AccessOutcome::AlreadyGranted
    );
    assert_eq!(vault.level(), AccessLevel::Granted);
    assert!(!vault.is_scanning());
    assert_eq!(notifier.notices().len(), 1);
}
