use crate::sample::Sample;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use std::collections::BTreeSet;

/// Label shown in place of every course code missing from the whitelist.
///
/// Shared by all redacted rows, so it cannot be used to look a course up.
pub const REDACTION_TOKEN: &str = "Redacted";

/// Course codes allowed to keep their real identity. Empty means every
/// course is redacted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Whitelist {
    codes: BTreeSet<String>,
}

impl Whitelist {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// A whitelist that keeps every course in `samples` visible.
    pub fn all_of(samples: &[Sample]) -> Self {
        Self::new(samples.iter().map(Sample::code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Whitelist entries that match none of the given samples.
    pub fn unknown_entries<'a>(&'a self, samples: &[Sample]) -> Vec<&'a str> {
        self.codes
            .iter()
            .filter(|code| !samples.iter().any(|sample| sample.code() == code.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Orders samples for display and picks the label each one is shown under.
///
/// Whitelisted samples come first, in input order, labelled with their code.
/// The rest follow under [`REDACTION_TOKEN`] in a uniformly random order
/// drawn from `rng`. The draw is skipped when fewer than two samples are
/// redacted.
pub fn partition<'a, R>(
    samples: &'a [Sample],
    whitelist: &Whitelist,
    rng: &mut R,
) -> Vec<(&'a Sample, &'a str)>
where
    R: Rng + ?Sized,
{
    let (kept, mut redacted): (Vec<&Sample>, Vec<&Sample>) = samples
        .iter()
        .partition(|sample| whitelist.contains(sample.code()));

    debug!(
        kept = kept.len(),
        redacted = redacted.len(),
        "partitioned samples"
    );

    if redacted.len() > 1 {
        redacted.shuffle(rng);
    }

    kept.into_iter()
        .map(|sample| (sample, sample.code()))
        .chain(redacted.into_iter().map(|sample| (sample, REDACTION_TOKEN)))
        .collect()
}
