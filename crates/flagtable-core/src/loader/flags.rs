// crates/flagtable-core/src/loader/flags.rs
use crate::common::FlagSummary;
use crate::error::{FlagBatchError, FlagError};
use crate::fetch::FetchRequest;
use crate::model::{Country, Flag};
use crate::traits::Fetch;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const FLAG_TIMEOUT: Duration = Duration::from_secs(2);

// -----------------------------------------------------------------------------
// POLICY
// -----------------------------------------------------------------------------

/// What a failed flag does to the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the flag unset and move on (best-effort).
    #[default]
    SkipItem,
    /// Stop at the first failure and report it.
    AbortBatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagLoadPolicy {
    pub on_failure: FailurePolicy,
    /// `1` fetches strictly one after another in list order.
    pub workers: usize,
}

impl Default for FlagLoadPolicy {
    fn default() -> Self {
        Self::best_effort()
    }
}

impl FlagLoadPolicy {
    pub fn best_effort() -> Self {
        Self {
            on_failure: FailurePolicy::SkipItem,
            workers: 1,
        }
    }

    pub fn strict() -> Self {
        Self {
            on_failure: FailurePolicy::AbortBatch,
            workers: 1,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    fn aborts(&self) -> bool {
        self.on_failure == FailurePolicy::AbortBatch
    }
}

// -----------------------------------------------------------------------------
// SOURCE
// -----------------------------------------------------------------------------

/// Base URL the per-country `<code>.png` is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSource {
    pub base_url: String,
    pub timeout: Duration,
}

impl FlagSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: FLAG_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url_for(&self, code: &str) -> String {
        format!("{}/{code}.png", self.base_url.trim_end_matches('/'))
    }

    pub fn request_for(&self, code: &str) -> FetchRequest {
        FetchRequest::get(self.url_for(code)).timeout(self.timeout)
    }
}

// -----------------------------------------------------------------------------
// LOADING
// -----------------------------------------------------------------------------

/// Fetches and decodes the flag for a single code.
pub fn fetch_flag<F: Fetch + ?Sized>(
    fetcher: &F,
    source: &FlagSource,
    code: &str,
) -> Result<Flag, FlagError> {
    let response = fetcher
        .fetch(&source.request_for(code))
        .map_err(|source| FlagError::Fetch {
            code: code.to_owned(),
            source,
        })?;
    Flag::decode(code, response.body())
}

/// Attaches a flag to every country in `countries` that does not have one yet.
///
/// The slice is never reordered or resized. Under [`FailurePolicy::SkipItem`]
/// this never returns `Err`; a failed country simply keeps `flag == None`.
/// Under [`FailurePolicy::AbortBatch`] the first failure (in list order) is
/// returned together with the batch summary, and every country after it is
/// left untouched. With a pool, fetches already in flight past the abort
/// point are discarded; their failures still count in `failed`.
pub fn attach_flags<F: Fetch + Sync + ?Sized>(
    fetcher: &F,
    countries: &mut [Country],
    source: &FlagSource,
    policy: &FlagLoadPolicy,
) -> Result<FlagSummary, FlagBatchError> {
    let pending: Vec<usize> = countries
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.has_flag())
        .map(|(i, _)| i)
        .collect();

    let mut summary = FlagSummary {
        skipped: countries.len() - pending.len(),
        ..FlagSummary::default()
    };

    info!(
        "Fetching {} flags from {} ({} worker(s))",
        pending.len(),
        source.base_url,
        policy.workers.max(1)
    );

    let outcome = if policy.workers <= 1 || pending.len() <= 1 {
        attach_sequential(fetcher, countries, &pending, source, policy, &mut summary)
    } else {
        attach_pooled(fetcher, countries, &pending, source, policy, &mut summary)
    };

    info!(
        "Flags: {} loaded, {} failed, {} already present",
        summary.loaded, summary.failed, summary.skipped
    );
    match outcome {
        Ok(()) => Ok(summary),
        Err(error) => Err(FlagBatchError { summary, error }),
    }
}

fn attach_sequential<F: Fetch + ?Sized>(
    fetcher: &F,
    countries: &mut [Country],
    pending: &[usize],
    source: &FlagSource,
    policy: &FlagLoadPolicy,
    summary: &mut FlagSummary,
) -> Result<(), FlagError> {
    for &index in pending {
        let country = &mut countries[index];
        match fetch_flag(fetcher, source, country.code()) {
            Ok(flag) => {
                debug!("Flag for '{}' is {}x{}", country.code(), flag.width(), flag.height());
                country.set_flag(flag);
                summary.loaded += 1;
            }
            Err(err) => {
                summary.failed += 1;
                report_failure(&err);
                if policy.aborts() {
                    return Err(err);
                }
            }
        }
    }
    Ok(())
}

/// Bounded pool: `workers` scoped threads pull job slots from a shared
/// counter and send `(index, result)` back. Results are applied by index,
/// so completion order never leaks into the list.
fn attach_pooled<F: Fetch + Sync + ?Sized>(
    fetcher: &F,
    countries: &mut [Country],
    pending: &[usize],
    source: &FlagSource,
    policy: &FlagLoadPolicy,
    summary: &mut FlagSummary,
) -> Result<(), FlagError> {
    let jobs: Vec<(usize, String)> = pending
        .iter()
        .map(|&i| (i, countries[i].code().to_owned()))
        .collect();
    let workers = policy.workers.min(jobs.len());
    let aborts = policy.aborts();

    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<(usize, Result<Flag, FlagError>)>();

    let mut results: Vec<(usize, Result<Flag, FlagError>)> = thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (jobs, next, stop) = (&jobs, &next, &stop);
            scope.spawn(move || loop {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                let slot = next.fetch_add(1, Ordering::Relaxed);
                let Some((index, code)) = jobs.get(slot) else {
                    break;
                };
                let result = fetch_flag(fetcher, source, code);
                if aborts && result.is_err() {
                    stop.store(true, Ordering::Relaxed);
                }
                if tx.send((*index, result)).is_err() {
                    break;
                }
            });
        }
        drop(tx);
        rx.into_iter().collect()
    });

    results.sort_by_key(|(index, _)| *index);

    let mut first_failure = None;
    for (index, result) in results {
        match result {
            Ok(flag) => {
                // Rows past the abort point stay as they were.
                if first_failure.is_none() && countries[index].set_flag(flag) {
                    summary.loaded += 1;
                }
            }
            Err(err) => {
                summary.failed += 1;
                report_failure(&err);
                if aborts && first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn report_failure(err: &FlagError) {
    match std::error::Error::source(err) {
        Some(cause) => warn!("No flag for '{}': {err}: {cause}", err.code()),
        None => warn!("No flag for '{}': {err}", err.code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::fetch::FetchResponse;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::{Barrier, Mutex};

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([0, 56, 168, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Serves canned bodies by URL; anything unknown times out.
    #[derive(Default)]
    struct Canned {
        bodies: HashMap<String, Vec<u8>>,
        calls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
            self.bodies.insert(url.to_string(), body);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Fetch for Canned {
        fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
            self.calls.lock().unwrap().push(request.url().to_string());
            match self.bodies.get(request.url()) {
                Some(body) => Ok(FetchResponse::new(200, body.clone())),
                None => Err(NetworkError::timeout(request.url())),
            }
        }
    }

    fn source() -> FlagSource {
        FlagSource::new("https://flagcdn.com/w80")
    }

    fn countries() -> Vec<Country> {
        vec![
            Country::new("Polska", "pl"),
            Country::new("Niemcy", "de"),
            Country::new("Francja", "fr"),
        ]
    }

    #[test]
    fn url_is_base_plus_code() {
        assert_eq!(source().url_for("pl"), "https://flagcdn.com/w80/pl.png");
        assert_eq!(
            FlagSource::new("https://flagcdn.com/w80/").url_for("us-ca"),
            "https://flagcdn.com/w80/us-ca.png"
        );
        assert_eq!(source().request_for("pl").request_timeout(), FLAG_TIMEOUT);
    }

    #[test]
    fn sequential_fetch_follows_list_order() {
        let fetcher = Canned::default()
            .serve("https://flagcdn.com/w80/pl.png", png(4, 3))
            .serve("https://flagcdn.com/w80/de.png", png(5, 3))
            .serve("https://flagcdn.com/w80/fr.png", png(6, 4));
        let mut list = countries();

        let summary = attach_flags(&fetcher, &mut list, &source(), &FlagLoadPolicy::default()).unwrap();

        assert_eq!(summary, FlagSummary { loaded: 3, skipped: 0, failed: 0 });
        assert_eq!(
            fetcher.calls(),
            [
                "https://flagcdn.com/w80/pl.png",
                "https://flagcdn.com/w80/de.png",
                "https://flagcdn.com/w80/fr.png"
            ]
        );
        assert_eq!(list[2].flag().map(Flag::dimensions), Some((6, 4)));
    }

    #[test]
    fn skip_policy_isolates_failures() {
        let fetcher = Canned::default()
            .serve("https://flagcdn.com/w80/pl.png", png(4, 3))
            .serve("https://flagcdn.com/w80/fr.png", png(4, 3));
        let mut list = countries();

        let summary = attach_flags(&fetcher, &mut list, &source(), &FlagLoadPolicy::best_effort()).unwrap();

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.failed, 1);
        assert!(list[0].has_flag());
        assert!(!list[1].has_flag());
        assert!(list[2].has_flag());
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let fetcher = Canned::default()
            .serve("https://flagcdn.com/w80/pl.png", png(4, 3))
            .serve("https://flagcdn.com/w80/fr.png", png(4, 3));
        let mut list = countries();

        let err = attach_flags(&fetcher, &mut list, &source(), &FlagLoadPolicy::strict()).unwrap_err();

        assert_eq!(err.code(), "de");
        assert!(matches!(err.error, FlagError::Fetch { ref source, .. } if source.is_timeout()));
        assert_eq!(err.summary, FlagSummary { loaded: 1, skipped: 0, failed: 1 });
        assert!(list[0].has_flag());
        assert!(!list[2].has_flag());
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[test]
    fn present_flags_are_not_fetched_again() {
        let fetcher = Canned::default()
            .serve("https://flagcdn.com/w80/de.png", png(4, 3))
            .serve("https://flagcdn.com/w80/fr.png", png(4, 3));
        let existing = Flag::decode("pl", &png(9, 9)).unwrap();
        let mut list = countries();
        list[0].set_flag(existing);

        let summary = attach_flags(&fetcher, &mut list, &source(), &FlagLoadPolicy::default()).unwrap();

        assert_eq!(summary, FlagSummary { loaded: 2, skipped: 1, failed: 0 });
        assert!(!fetcher.calls().iter().any(|u| u.ends_with("/pl.png")));
        assert_eq!(list[0].flag().map(Flag::dimensions), Some((9, 9)));
    }

    #[test]
    fn pooled_fetch_preserves_order_and_isolates_failures() {
        let codes = ["pl", "de", "fr", "it", "es", "cz", "sk", "at"];
        let mut fetcher = Canned::default();
        for (i, code) in codes.iter().enumerate() {
            if *code != "fr" {
                fetcher = fetcher.serve(&format!("https://flagcdn.com/w80/{code}.png"), png(i as u32 + 1, 2));
            }
        }
        let mut list: Vec<Country> = codes.iter().map(|c| Country::new(c.to_uppercase(), *c)).collect();

        let policy = FlagLoadPolicy::best_effort().with_workers(3);
        let summary = attach_flags(&fetcher, &mut list, &source(), &policy).unwrap();

        assert_eq!(summary.loaded, 7);
        assert_eq!(summary.failed, 1);
        let got: Vec<&str> = list.iter().map(Country::code).collect();
        assert_eq!(got, codes);
        for (i, c) in list.iter().enumerate() {
            if c.code() == "fr" {
                assert!(c.flag().is_none());
            } else {
                assert_eq!(c.flag().map(Flag::width), Some(i as u32 + 1));
            }
        }
    }

    /// Holds every request until `parties` of them are in flight at once.
    struct Lockstep {
        inner: Canned,
        gate: Barrier,
    }

    impl Fetch for Lockstep {
        fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
            self.gate.wait();
            self.inner.fetch(request)
        }
    }

    #[test]
    fn pooled_abort_leaves_rows_after_first_failure_untouched() {
        // "bb" and "cc" time out; all four fetches run concurrently.
        let fetcher = Lockstep {
            inner: Canned::default()
                .serve("https://flagcdn.com/w80/aa.png", png(4, 3))
                .serve("https://flagcdn.com/w80/dd.png", png(4, 3)),
            gate: Barrier::new(4),
        };
        let mut list: Vec<Country> = ["aa", "bb", "cc", "dd"]
            .iter()
            .map(|c| Country::new(c.to_uppercase(), *c))
            .collect();

        let policy = FlagLoadPolicy::strict().with_workers(4);
        let err = attach_flags(&fetcher, &mut list, &source(), &policy).unwrap_err();

        assert_eq!(err.code(), "bb");
        assert_eq!(err.summary, FlagSummary { loaded: 1, skipped: 0, failed: 2 });
        assert_eq!(
            list.iter().map(Country::has_flag).collect::<Vec<_>>(),
            [true, false, false, false]
        );
        assert_eq!(fetcher.inner.calls().len(), 4);
    }

    #[test]
    fn workers_never_drop_to_zero() {
        assert_eq!(FlagLoadPolicy::default().with_workers(0).workers, 1);
    }
}
