//! Query parameters exchanged with mini-game pages.

use super::snapshot::ResumeTarget;
use reqwest::Url;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Phase to land on when control comes back.
pub const SCREEN_PARAM: &str = "screen";

/// Hearts earned in the mini-game.
pub const BONUS_HEARTS_PARAM: &str = "bonusHearts";

/// Absolute heart count, overriding anything stored.
pub const HEARTS_PARAM: &str = "hearts";

/// On the outbound trip: phase the mini-game should send the player back to.
pub const RETURN_TO_PARAM: &str = "returnTo";

/// On the outbound trip: page the mini-game should send the player back to.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Resume parameters read from a return URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeParams {
    screen: Option<ResumeTarget>,
    bonus_hearts: u32,
    hearts: Option<u32>,
    flags: Vec<ResumeTarget>,
}

impl ResumeParams {
    /// Parameters sending the player back to `target` with `bonus_hearts`.
    #[instrument]
    pub fn returning_to(target: ResumeTarget, bonus_hearts: u32) -> Self {
        Self {
            screen: Some(target),
            bonus_hearts,
            hearts: None,
            flags: vec![target],
        }
    }

    /// Adds an absolute heart count.
    #[instrument(skip(self))]
    pub fn with_hearts(mut self, hearts: u32) -> Self {
        self.hearts = Some(hearts);
        self
    }

    /// Reads parameters from `url`. Unknown or malformed values are ignored;
    /// a missing or unparseable bonus counts as zero.
    #[instrument(skip(url), fields(url = %url))]
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                SCREEN_PARAM => match ResumeTarget::from_str(&value) {
                    Ok(target) => params.screen = Some(target),
                    Err(_) => warn!(screen = %value, "Unknown screen parameter"),
                },
                BONUS_HEARTS_PARAM => {
                    params.bonus_hearts = value.trim().parse().unwrap_or_else(|_| {
                        warn!(bonus_hearts = %value, "Unparseable bonus hearts, using 0");
                        0
                    });
                }
                HEARTS_PARAM => match value.trim().parse() {
                    Ok(hearts) => params.hearts = Some(hearts),
                    Err(_) => warn!(hearts = %value, "Unparseable hearts parameter"),
                },
                other => {
                    if let Some(target) = ResumeTarget::iter().find(|t| t.resume_flag() == other) {
                        if is_truthy(&value) && !params.flags.contains(&target) {
                            params.flags.push(target);
                        }
                    }
                }
            }
        }

        debug!(?params, "Parsed resume parameters");
        params
    }

    /// Writes these parameters onto `url`'s query string.
    #[instrument(skip(self, url))]
    pub fn append_to(&self, url: &mut Url) {
        let mut query = url.query_pairs_mut();
        if let Some(screen) = self.screen {
            query.append_pair(SCREEN_PARAM, screen.as_str());
        }
        query.append_pair(BONUS_HEARTS_PARAM, &self.bonus_hearts.to_string());
        if let Some(hearts) = self.hearts {
            query.append_pair(HEARTS_PARAM, &hearts.to_string());
        }
        for flag in &self.flags {
            query.append_pair(flag.resume_flag(), "true");
        }
    }

    /// Phase named by the URL: `screen` first, then the resume flags.
    pub fn requested_target(&self) -> Option<ResumeTarget> {
        self.screen.or_else(|| self.flags.first().copied())
    }

    /// Explicit `screen` parameter.
    pub fn screen(&self) -> Option<ResumeTarget> {
        self.screen
    }

    /// Hearts earned in the mini-game.
    pub fn bonus_hearts(&self) -> u32 {
        self.bonus_hearts
    }

    /// Absolute heart count, if the URL carried one.
    pub fn hearts(&self) -> Option<u32> {
        self.hearts
    }

    /// Returns `true` if `target`'s resume flag was set.
    pub fn has_flag(&self, target: ResumeTarget) -> bool {
        self.flags.contains(&target)
    }
}

/// The mini-game's view of an outbound hand-off URL: where to send the
/// player afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTicket {
    return_to: Option<ResumeTarget>,
    return_url: Option<Url>,
}

impl ReturnTicket {
    /// Reads the return instructions from the URL the mini-game was opened with.
    #[instrument(skip(url), fields(url = %url))]
    pub fn from_url(url: &Url) -> Self {
        let mut return_to = None;
        let mut return_url = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                RETURN_TO_PARAM => return_to = ResumeTarget::from_str(&value).ok(),
                RETURN_URL_PARAM => return_url = Url::parse(&value).ok(),
                other => {
                    if return_to.is_none() {
                        return_to = ResumeTarget::iter()
                            .find(|t| t.resume_flag() == other && is_truthy(&value));
                    }
                }
            }
        }
        debug!(?return_to, "Read return ticket");
        Self {
            return_to,
            return_url,
        }
    }

    /// Phase the player should go back to, if the ticket names one.
    pub fn return_to(&self) -> Option<ResumeTarget> {
        self.return_to
    }

    /// Builds the URL that hands control back, crediting `bonus_hearts`.
    ///
    /// Uses the ticket's return page, or `fallback_home` if it has none. A
    /// ticket without a phase produces a URL without `screen` or flags.
    #[instrument(skip(self, fallback_home))]
    pub fn return_url(&self, bonus_hearts: u32, fallback_home: &Url) -> Url {
        let mut url = self
            .return_url
            .clone()
            .unwrap_or_else(|| fallback_home.clone());
        let params = match self.return_to {
            Some(target) => ResumeParams::returning_to(target, bonus_hearts),
            None => {
                warn!("Return ticket has no phase tag");
                ResumeParams {
                    bonus_hearts,
                    ..ResumeParams::default()
                }
            }
        };
        params.append_to(&mut url);
        url
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}
