// crates/flagtable-core/src/traits.rs
use crate::error::NetworkError;
use crate::fetch::{FetchRequest, FetchResponse};
use crate::text::fold_key;

/// Transport abstraction: turns one [`FetchRequest`] into a body.
///
/// Implementations perform a single attempt. They must not retry and must
/// not inspect the status code; both are the caller's business. The only
/// failure they report is a request that produced no body at all
/// (timeout, refused connection, broken stream).
///
/// `HttpFetcher` (feature `http`) is the production implementation. Tests
/// plug in-memory maps in here.
///
/// # Examples
/// ```rust
/// use flagtable_core::fetch::{FetchRequest, FetchResponse};
/// use flagtable_core::traits::Fetch;
/// use flagtable_core::NetworkError;
///
/// struct Canned(&'static str);
/// impl Fetch for Canned {
///     fn fetch(&self, _request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
///         Ok(FetchResponse::new(200, self.0.as_bytes().to_vec()))
///     }
/// }
///
/// let body = Canned("{}").fetch(&FetchRequest::get("https://flagcdn.com/pl/codes.json")).unwrap();
/// assert_eq!(body.status(), 200);
/// ```
pub trait Fetch {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        (**self).fetch(request)
    }
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        (**self).fetch(request)
    }
}

/// Name-based matching helpers for types that expose a display name.
///
/// Comparisons are accent-insensitive and case-insensitive, based on
/// [`fold_key`].
///
/// # Examples
/// ```rust
/// use flagtable_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łotwa").name_contains("LOT"));
/// assert!(Place("Wybrzeże Kości Słoniowej").name_contains("kosci"));
/// ```
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
