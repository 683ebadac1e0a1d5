use std::sync::{Arc, Mutex};

use crate::r#ref::Ref;
use crate::Error;

type Producer = Box<dyn FnOnce() -> Result<Vec<u8>, Error> + Send>;

enum State {
    Pending(Producer),
    Ready(Arc<Vec<u8>>),
    Failed(String),
}

/// An immutable byte sequence addressed by its [`Ref`].
///
/// A Blob pairs a Ref with a byte producer that is invoked at most once and
/// memoized. `is_valid()` is the integrity predicate clients use when they do
/// not trust whatever handed them this Blob: it recomputes the digest of the
/// actual bytes and compares it to `reference().digest_bytes()`.
pub struct Blob {
    r: Ref,
    state: Mutex<State>,
}

impl Blob {
    /// Construct a Blob from a known Ref and a lazy producer of its bytes.
    /// The producer is not invoked until [`Blob::bytes`] is first called.
    pub fn new(r: Ref, producer: impl FnOnce() -> Result<Vec<u8>, Error> + Send + 'static) -> Self {
        Self { r, state: Mutex::new(State::Pending(Box::new(producer))) }
    }

    /// Construct a Blob from raw contents, computing its Ref via
    /// [`Ref::from_contents`] (the currently recommended algorithm).
    pub fn from_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let r = Ref::from_contents(&bytes);
        Self { r, state: Mutex::new(State::Ready(Arc::new(bytes))) }
    }

    /// Construct a Blob from an already-known Ref and already-available bytes
    /// (no lazy producer involved). Used by Storage backends that have both
    /// in hand after a fetch.
    pub fn from_ref_and_contents(r: Ref, bytes: impl Into<Vec<u8>>) -> Self {
        Self { r, state: Mutex::new(State::Ready(Arc::new(bytes.into()))) }
    }

    /// This Blob's Ref.
    pub fn reference(&self) -> &Ref {
        &self.r
    }

    /// The Blob's bytes, invoking and memoizing the lazy producer on first
    /// call. Producer failure propagates as [`Error::FetchFailure`].
    pub fn bytes(&self) -> Result<Arc<Vec<u8>>, Error> {
        let mut guard = self.state.lock().expect("blob state mutex poisoned");
        match &*guard {
            State::Ready(b) => return Ok(b.clone()),
            State::Failed(msg) => return Err(Error::FetchFailure(msg.clone())),
            State::Pending(_) => {}
        }
        let State::Pending(producer) =
            std::mem::replace(&mut *guard, State::Failed("producer panicked".to_string()))
        else {
            unreachable!("checked above")
        };
        match producer() {
            Ok(bytes) => {
                let arc = Arc::new(bytes);
                *guard = State::Ready(arc.clone());
                Ok(arc)
            }
            Err(e) => {
                *guard = State::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// True iff the Blob's bytes decode as UTF-8. Producer failures count as
    /// `false` rather than propagating, since this is a cheap probe, not a fetch.
    pub fn is_utf8(&self) -> bool {
        self.bytes().map(|b| std::str::from_utf8(&b).is_ok()).unwrap_or(false)
    }

    /// True iff digesting the Blob's bytes under `reference().algorithm()`
    /// equals `reference().digest_bytes()`.
    pub fn is_valid(&self) -> bool {
        let Ok(bytes) = self.bytes() else { return false };
        self.r.algorithm().digest(&bytes) == self.r.digest_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_contents_is_valid() {
        let b = Blob::from_contents(b"test".to_vec());
        assert_eq!(
            b.reference().to_string(),
            "sha224-90a3ed9e32b2aaf4c61c410eb925426119e1a9dc53d4286ade99a809"
        );
        assert!(b.is_valid());
    }

    #[test]
    fn mismatched_producer_is_invalid() {
        let r = Ref::from_contents(b"test");
        let b = Blob::new(r, || Ok(b"other".to_vec()));
        assert!(!b.is_valid());
    }

    #[test]
    fn producer_invoked_at_most_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();
        let r = Ref::from_contents(b"memoized");
        let b = Blob::new(r, move || {
            calls2.fetch_add(1, Ordering::SeqCst);
            Ok(b"memoized".to_vec())
        });
        let _ = b.bytes().unwrap();
        let _ = b.bytes().unwrap();
        let _ = b.bytes().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn producer_failure_propagates_and_is_memoized() {
        let r = Ref::from_contents(b"x");
        let b = Blob::new(r, || Err(Error::FetchFailure("boom".into())));
        assert!(matches!(b.bytes(), Err(Error::FetchFailure(_))));
        assert!(matches!(b.bytes(), Err(Error::FetchFailure(_))));
        assert!(!b.is_valid());
    }

    #[test]
    fn is_utf8_detection() {
        let utf8 = Blob::from_contents(b"hello".to_vec());
        assert!(utf8.is_utf8());
        let not_utf8 = Blob::from_contents(vec![0xff, 0xfe, 0xfd]);
        assert!(!not_utf8.is_utf8());
    }
}
