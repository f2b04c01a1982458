// Host-side tests for waitlist validation and submission.

use flow_core::waitlist::{
    add_to_waitlist, is_valid_email, submit, MemoryStore, WaitlistError, WaitlistStore,
    FAILURE_MESSAGE, INVALID_EMAIL_MESSAGE, SUCCESS_MESSAGE,
};

struct BrokenStore {
    calls: usize,
}

impl WaitlistStore for BrokenStore {
    fn upsert(&mut self, _email: &str) -> Result<(), WaitlistError> {
        self.calls += 1;
        Err(WaitlistError::Storage("connection refused".into()))
    }
}

#[test]
fn accepts_plausible_addresses() {
    for ok in ["a@b.c", "user@example.com", "First.Last+tag@sub.domain.org", "a@@b.c"] {
        assert!(is_valid_email(ok), "{} should be accepted", ok);
    }
}

#[test]
fn rejects_malformed_addresses() {
    for bad in [
        "",
        "plain",
        "@example.com",
        "user@",
        "user@example",
        "user@.com",
        "user@example.",
        "us er@example.com",
        "user@example.com ",
    ] {
        assert!(!is_valid_email(bad), "{:?} should be rejected", bad);
    }
}

#[test]
fn fresh_email_is_stored_lowercased() {
    let mut store = MemoryStore::new();
    let resp = submit(&mut store, "Person@Example.COM");
    assert!(resp.success);
    assert_eq!(resp.message, SUCCESS_MESSAGE);
    assert!(store.contains("person@example.com"));
}

#[test]
fn duplicate_submission_is_still_a_success() {
    let mut store = MemoryStore::new();
    assert!(submit(&mut store, "dup@example.com").success);
    assert!(submit(&mut store, "DUP@example.com").success);
    assert_eq!(store.len(), 1);
    assert_eq!(store.writes(), 2);
}

#[test]
fn invalid_email_never_touches_storage() {
    let mut store = MemoryStore::new();
    let resp = submit(&mut store, "not-an-email");
    assert!(!resp.success);
    assert_eq!(resp.message, INVALID_EMAIL_MESSAGE);
    assert_eq!(store.writes(), 0);
    assert_eq!(
        add_to_waitlist(&mut store, "nope"),
        Err(WaitlistError::InvalidEmail)
    );
}

#[test]
fn storage_failure_returns_a_generic_message() {
    let mut store = BrokenStore { calls: 0 };
    let resp = submit(&mut store, "someone@example.com");
    assert!(!resp.success);
    assert_eq!(resp.message, FAILURE_MESSAGE);
    assert!(!resp.message.contains("connection"));
    assert_eq!(store.calls, 1);
}
