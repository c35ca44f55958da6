//! Suspending gameplay before a mini-game and picking it back up afterwards.

use super::params::{RETURN_TO_PARAM, RETURN_URL_PARAM, ResumeParams};
use super::snapshot::{ResumeTarget, ResumptionSnapshot};
use super::storage::SessionStorage;
use crate::config::{ConfigError, HandOffSettings, SessionSettings};
use crate::puzzle::PuzzleSession;
use derive_getters::Getters;
use reqwest::Url;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Result of suspending a session: where to navigate, and what was stored.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HandOff {
    /// Mini-game URL carrying the return instructions.
    url: Url,
    /// Session-storage key the snapshot was written under.
    storage_key: String,
    /// `false` if storage failed and only the URL carries state.
    persisted: bool,
    /// The snapshot that was suspended.
    snapshot: ResumptionSnapshot,
}

/// Serializes sessions into session storage and URL parameters across a full
/// navigation, and rebuilds them on return.
///
/// Storage failures never abort a hand-off; they are logged and the gateway
/// carries on with whatever the URL says.
#[derive(Debug)]
pub struct ResumptionGateway<S> {
    storage: S,
    interlude_url: Url,
    home_url: Url,
    starting_hearts: u32,
}

impl<S: SessionStorage> ResumptionGateway<S> {
    /// Creates a gateway.
    ///
    /// `starting_hearts` is the fallback when nothing was persisted.
    #[instrument(skip(storage), fields(interlude = %interlude_url, home = %home_url))]
    pub fn new(storage: S, interlude_url: Url, home_url: Url, starting_hearts: u32) -> Self {
        info!("Creating resumption gateway");
        Self {
            storage,
            interlude_url,
            home_url,
            starting_hearts,
        }
    }

    /// Creates a gateway from configuration.
    #[instrument(skip_all)]
    pub fn from_settings(
        storage: S,
        handoff: &HandOffSettings,
        session: &SessionSettings,
    ) -> Result<Self, ConfigError> {
        let interlude_url = parse_url(handoff.interlude_url())?;
        let home_url = parse_url(handoff.home_url())?;
        Ok(Self::new(
            storage,
            interlude_url,
            home_url,
            *session.starting_hearts(),
        ))
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the underlying storage.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Page the mini-game sends the player back to.
    pub fn home_url(&self) -> &Url {
        &self.home_url
    }

    /// Persists `snapshot` and builds the mini-game URL.
    #[instrument(skip(self), fields(target = %snapshot.resume_target()))]
    pub fn suspend(&mut self, snapshot: &ResumptionSnapshot) -> HandOff {
        let target = *snapshot.resume_target();
        let storage_key = target.storage_key();

        let persisted = match snapshot
            .to_json()
            .and_then(|json| self.storage.set(&storage_key, &json))
        {
            Ok(()) => {
                debug!(key = %storage_key, "Snapshot persisted");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not persist snapshot, continuing with URL only");
                false
            }
        };

        let mut url = self.interlude_url.clone();
        url.query_pairs_mut()
            .append_pair(RETURN_TO_PARAM, target.as_str())
            .append_pair(target.resume_flag(), "true")
            .append_pair(RETURN_URL_PARAM, self.home_url.as_str());

        info!(url = %url, persisted, "Session suspended");
        HandOff {
            url,
            storage_key,
            persisted,
            snapshot: snapshot.clone(),
        }
    }

    /// Suspends a Word Link session whose hearts ran out.
    #[instrument(skip(self, session))]
    pub fn suspend_session(&mut self, session: &PuzzleSession) -> HandOff {
        self.suspend(&session.snapshot(ResumeTarget::WordLink))
    }

    /// Rebuilds the snapshot from a return URL, consuming what was stored.
    ///
    /// Every phase's stored snapshot is cleared, not only the one read, so a
    /// leftover cannot steer a later untagged return.
    ///
    /// The phase comes from `screen`, then the resume flags, then whichever
    /// phase has a stored snapshot, and finally [`ResumeTarget::LEGACY_DEFAULT`].
    /// An explicit `hearts` parameter is taken as the final heart count.
    /// Otherwise the stored heart count (or the starting count, if nothing was
    /// stored) is returned with `bonusHearts` pending on top.
    #[instrument(skip(self), fields(url = %return_url))]
    pub fn resume(&mut self, return_url: &Url) -> ResumptionSnapshot {
        let params = ResumeParams::from_url(return_url);

        let target = match params.requested_target() {
            Some(target) => target,
            None => self.stored_target().unwrap_or_else(|| {
                info!(
                    default = %ResumeTarget::LEGACY_DEFAULT,
                    "Return URL names no phase, using legacy default"
                );
                ResumeTarget::LEGACY_DEFAULT
            }),
        };

        let stored = self.take_stored(target);
        self.discard_other_snapshots(target);
        let (score, words, word_index) = match &stored {
            Some(s) => (*s.score(), s.words().clone(), *s.word_index()),
            None => (0, Vec::new(), 0),
        };

        let snapshot = match params.hearts() {
            Some(hearts) => {
                debug!(hearts, "Using explicit heart count from URL");
                ResumptionSnapshot::new(hearts, score, target)
            }
            None => {
                let hearts = stored.as_ref().map_or_else(
                    || {
                        warn!(
                            fallback = self.starting_hearts,
                            "No stored heart count, restarting with full hearts"
                        );
                        self.starting_hearts
                    },
                    |s| *s.hearts(),
                );
                ResumptionSnapshot::new(hearts, score, target)
                    .with_bonus_hearts(params.bonus_hearts())
            }
        }
        .with_words(words, word_index);

        info!(
            %target,
            hearts = snapshot.total_hearts(),
            score = *snapshot.score(),
            "Session resumed"
        );
        snapshot
    }

    /// First phase that has a stored snapshot.
    fn stored_target(&self) -> Option<ResumeTarget> {
        ResumeTarget::iter().find(|target| match self.storage.get(&target.storage_key()) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(error = %e, %target, "Could not read storage");
                false
            }
        })
    }

    /// Deletes stored snapshots of every phase other than `keep` unread.
    fn discard_other_snapshots(&mut self, keep: ResumeTarget) {
        for target in ResumeTarget::iter().filter(|t| *t != keep) {
            let key = target.storage_key();
            match self.storage.remove(&key) {
                Ok(()) => debug!(key = %key, "Cleared snapshot slot of another phase"),
                Err(e) => warn!(error = %e, key = %key, "Could not clear stored snapshot"),
            }
        }
    }

    /// Reads and deletes the stored snapshot for `target`.
    fn take_stored(&mut self, target: ResumeTarget) -> Option<ResumptionSnapshot> {
        let key = target.storage_key();
        let raw = match self.storage.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, key = %key, "Could not read stored snapshot");
                return None;
            }
        };

        if let Err(e) = self.storage.remove(&key) {
            warn!(error = %e, key = %key, "Could not clear stored snapshot");
        }

        match ResumptionSnapshot::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, key = %key, "Discarding unreadable stored snapshot");
                None
            }
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::new(format!("Invalid URL '{}': {}", raw, e)))
}
