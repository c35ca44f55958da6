//! Tests for suspending and resuming sessions across a mini-game.

use word_link::{
    FileStorage, MemoryStorage, PuzzleSession, ResumeParams, ResumeTarget, ResumptionGateway,
    ResumptionSnapshot, ReturnTicket, SessionSettings, SessionStorage, StorageError, Url,
};

const INTERLUDE: &str = "http://game.test/minigames/catch.html";
const HOME: &str = "http://game.test/index.html";

fn url(raw: &str) -> Url {
    Url::parse(raw).expect("Valid test URL")
}

fn gateway<S: SessionStorage>(storage: S) -> ResumptionGateway<S> {
    ResumptionGateway::new(storage, url(INTERLUDE), url(HOME), 3)
}

/// Storage that refuses every operation, like a browser with storage disabled.
struct BrokenStorage;

impl SessionStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::new("Storage disabled"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::new("Storage disabled"))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::new("Storage disabled"))
    }
}

/// Follows a hand-off URL through the mini-game and back.
fn play_interlude(hand_off_url: &Url, bonus_hearts: u32) -> Url {
    ReturnTicket::from_url(hand_off_url).return_url(bonus_hearts, &url(HOME))
}

fn word_link_snapshot() -> ResumptionSnapshot {
    ResumptionSnapshot::new(0, 250, ResumeTarget::WordLink)
        .with_words(vec!["cat".to_string(), "frog".to_string()], 1)
}

#[test]
fn test_suspend_persists_snapshot_and_tags_url() {
    let mut gateway = gateway(MemoryStorage::new());
    let hand_off = gateway.suspend(&word_link_snapshot());

    assert!(*hand_off.persisted());
    assert_eq!(hand_off.storage_key(), "heartsPendingRestore:wordlink");
    assert!(
        gateway
            .storage()
            .get(hand_off.storage_key())
            .expect("Memory storage reads")
            .is_some()
    );

    let pairs: Vec<(String, String)> = hand_off.url().query_pairs().into_owned().collect();
    assert!(pairs.contains(&("returnTo".to_string(), "wordlink".to_string())));
    assert!(pairs.contains(&("resumeWordLink".to_string(), "true".to_string())));
    assert!(pairs.contains(&("returnUrl".to_string(), HOME.to_string())));
}

#[test]
fn test_word_link_round_trip_adds_bonus_hearts() {
    let mut gateway = gateway(MemoryStorage::new());
    let hand_off = gateway.suspend(&word_link_snapshot());

    let snapshot = gateway.resume(&play_interlude(hand_off.url(), 2));

    assert_eq!(*snapshot.resume_target(), ResumeTarget::WordLink);
    assert_eq!(*snapshot.hearts(), 0);
    assert_eq!(*snapshot.bonus_hearts_pending(), 2);
    assert_eq!(snapshot.total_hearts(), 2);
    assert_eq!(*snapshot.score(), 250);
    assert_eq!(*snapshot.word_index(), 1);

    let session = PuzzleSession::resume(&snapshot, SessionSettings::default().with_seed(1))
        .expect("Session resumes");
    assert_eq!(session.hearts(), 2);
    assert_eq!(session.current_word(), Some("frog"));
}

#[test]
fn test_mad_lib_round_trip_keeps_its_target() {
    let mut gateway = gateway(MemoryStorage::new());
    let hand_off = gateway.suspend(&ResumptionSnapshot::new(0, 30, ResumeTarget::MadLib));

    let snapshot = gateway.resume(&play_interlude(hand_off.url(), 1));

    assert_eq!(*snapshot.resume_target(), ResumeTarget::MadLib);
    assert_eq!(snapshot.total_hearts(), 1);
    assert_eq!(*snapshot.score(), 30);
}

#[test]
fn test_untagged_return_uses_stored_target() {
    let mut gateway = gateway(MemoryStorage::new());
    gateway.suspend(&word_link_snapshot());

    let snapshot = gateway.resume(&url("http://game.test/index.html?bonusHearts=1"));

    assert_eq!(*snapshot.resume_target(), ResumeTarget::WordLink);
    assert_eq!(snapshot.total_hearts(), 1);
    assert_eq!(*snapshot.score(), 250);
}

#[test]
fn test_untagged_return_without_storage_defaults_to_mad_lib() {
    let mut gateway = gateway(MemoryStorage::new());

    let snapshot = gateway.resume(&url("http://game.test/index.html?bonusHearts=2"));

    assert_eq!(*snapshot.resume_target(), ResumeTarget::LEGACY_DEFAULT);
    assert_eq!(*snapshot.resume_target(), ResumeTarget::MadLib);
    assert_eq!(snapshot.total_hearts(), 5);
    assert_eq!(*snapshot.score(), 0);
}

#[test]
fn test_screen_parameter_wins_over_storage() {
    let mut gateway = gateway(MemoryStorage::new());
    gateway.suspend(&ResumptionSnapshot::new(1, 70, ResumeTarget::MadLib));

    let snapshot = gateway.resume(&url("http://game.test/index.html?screen=wordlink"));

    assert_eq!(*snapshot.resume_target(), ResumeTarget::WordLink);
    assert_eq!(snapshot.total_hearts(), 3);
    assert_eq!(*snapshot.score(), 0);
    assert!(gateway.storage().is_empty());
}

#[test]
fn test_snapshot_of_unnamed_phase_does_not_outlive_return() {
    let mut gateway = gateway(MemoryStorage::new());
    gateway.suspend(&word_link_snapshot());

    let first = gateway.resume(&url(
        "http://game.test/index.html?screen=madlib&bonusHearts=1",
    ));
    assert_eq!(*first.resume_target(), ResumeTarget::MadLib);
    assert!(gateway.storage().is_empty());

    let later = gateway.resume(&url("http://game.test/index.html?bonusHearts=1"));
    assert_eq!(*later.resume_target(), ResumeTarget::LEGACY_DEFAULT);
    assert_eq!(*later.score(), 0);
}

#[test]
fn test_explicit_hearts_parameter_is_absolute() {
    let mut gateway = gateway(MemoryStorage::new());
    gateway.suspend(&word_link_snapshot());

    let mut return_url = url(HOME);
    ResumeParams::returning_to(ResumeTarget::WordLink, 2)
        .with_hearts(5)
        .append_to(&mut return_url);
    let snapshot = gateway.resume(&return_url);

    assert_eq!(snapshot.total_hearts(), 5);
    assert_eq!(*snapshot.score(), 250);
}

#[test]
fn test_stored_snapshot_is_consumed_once() {
    let mut gateway = gateway(MemoryStorage::new());
    let hand_off = gateway.suspend(&word_link_snapshot());
    let return_url = play_interlude(hand_off.url(), 1);

    let first = gateway.resume(&return_url);
    let second = gateway.resume(&return_url);

    assert_eq!(*first.score(), 250);
    assert!(gateway.storage().is_empty());
    assert_eq!(*second.score(), 0);
    assert_eq!(second.total_hearts(), 4);
}

#[test]
fn test_broken_storage_still_hands_off() {
    let mut gateway = gateway(BrokenStorage);
    let hand_off = gateway.suspend(&word_link_snapshot());

    assert!(!*hand_off.persisted());
    assert!(hand_off.url().as_str().starts_with(INTERLUDE));

    let snapshot = gateway.resume(&play_interlude(hand_off.url(), 2));
    assert_eq!(*snapshot.resume_target(), ResumeTarget::WordLink);
    assert_eq!(snapshot.total_hearts(), 5);
    assert_eq!(*snapshot.score(), 0);
}

#[test]
fn test_garbled_bonus_counts_as_zero() {
    let mut gateway = gateway(MemoryStorage::new());
    gateway.suspend(&word_link_snapshot());

    let snapshot = gateway.resume(&url(
        "http://game.test/index.html?screen=wordlink&bonusHearts=lots",
    ));

    assert_eq!(*snapshot.bonus_hearts_pending(), 0);
    assert_eq!(snapshot.total_hearts(), 0);
}

#[test]
fn test_unreadable_stored_snapshot_is_discarded() {
    let mut storage = MemoryStorage::new();
    storage
        .set(&ResumeTarget::WordLink.storage_key(), "{not json")
        .expect("Memory storage writes");
    let mut gateway = gateway(storage);

    let snapshot = gateway.resume(&url("http://game.test/index.html?screen=wordlink"));

    assert_eq!(snapshot.total_hearts(), 3);
    assert!(gateway.storage().is_empty());
}

#[test]
fn test_file_storage_survives_new_gateway() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let hand_off = {
        let storage = FileStorage::open(dir.path()).expect("Storage opens");
        let mut gateway = gateway(storage);
        gateway.suspend(&word_link_snapshot())
    };
    assert!(*hand_off.persisted());

    let storage = FileStorage::open(dir.path()).expect("Storage reopens");
    let mut gateway = gateway(storage);
    let snapshot = gateway.resume(&play_interlude(hand_off.url(), 1));

    assert_eq!(*snapshot.score(), 250);
    assert_eq!(snapshot.total_hearts(), 1);
    assert_eq!(
        gateway
            .storage()
            .get(&ResumeTarget::WordLink.storage_key())
            .expect("File storage reads"),
        None
    );
}

#[test]
fn test_ticket_without_tag_returns_untagged_url() {
    let ticket = ReturnTicket::from_url(&url(INTERLUDE));
    assert_eq!(ticket.return_to(), None);

    let back = ticket.return_url(3, &url(HOME));
    let params = ResumeParams::from_url(&back);
    assert_eq!(params.requested_target(), None);
    assert_eq!(params.bonus_hearts(), 3);
    assert!(back.as_str().starts_with(HOME));
}

#[test]
fn test_ticket_with_flag_only_returns_to_that_phase() {
    let ticket = ReturnTicket::from_url(&url(&format!("{}?resumeMadLib=1", INTERLUDE)));
    assert_eq!(ticket.return_to(), Some(ResumeTarget::MadLib));

    let params = ResumeParams::from_url(&ticket.return_url(0, &url(HOME)));
    assert_eq!(params.screen(), Some(ResumeTarget::MadLib));
    assert!(params.has_flag(ResumeTarget::MadLib));
}
