use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::field;

use crate::observer::observer;
use crate::{Blob, Enumerator, Error, Fetcher, Receiver, Ref};

/// An in-process `Storage` backed by a `BTreeMap`, keyed by the Ref's textual
/// form so enumeration order falls out of the map's natural ordering.
///
/// This is the reference backend used by this workspace's other crates in
/// tests; it holds no state across process restarts.
#[derive(Default)]
pub struct InMemoryBackend {
    blobs: Mutex<BTreeMap<String, (Ref, Arc<Vec<u8>>)>>,
}

impl InMemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.lock().expect("in-memory backend mutex poisoned").len()
    }

    /// True iff no blobs are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Fetcher for InMemoryBackend {
    fn fetch(&self, r: &Ref) -> Result<Blob, Error> {
        let span = tracing::info_span!("in_memory_fetch", ref = %r, found = field::Empty);
        let _enter = span.enter();
        let blobs = self.blobs.lock().expect("in-memory backend mutex poisoned");
        match blobs.get(&r.to_string()) {
            Some((r, bytes)) => {
                span.record("found", true);
                Ok(Blob::from_ref_and_contents(r.clone(), bytes.as_ref().clone()))
            }
            None => {
                span.record("found", false);
                Err(Error::NotFound)
            }
        }
    }
}

impl Enumerator for InMemoryBackend {
    fn enumerate(&self, after: Option<&Ref>, limit: usize) -> Result<Vec<(Ref, u64)>, Error> {
        let blobs = self.blobs.lock().expect("in-memory backend mutex poisoned");
        let after_key = after.map(|r| r.to_string());
        let iter = blobs.iter().filter(|(key, _)| match &after_key {
            Some(a) => key.as_str() > a.as_str(),
            None => true,
        });
        Ok(iter.take(limit).map(|(_, (r, b))| (r.clone(), b.len() as u64)).collect())
    }
}

impl Receiver for InMemoryBackend {
    fn receive(&self, bytes: &[u8]) -> Result<Ref, Error> {
        let r = Ref::from_contents(bytes);
        let span = tracing::info_span!("in_memory_receive", ref = %r, already_present = field::Empty);
        let _enter = span.enter();
        let mut blobs = self.blobs.lock().expect("in-memory backend mutex poisoned");
        let already_present = blobs.contains_key(&r.to_string());
        span.record("already_present", already_present);
        blobs.entry(r.to_string()).or_insert_with(|| (r.clone(), Arc::new(bytes.to_vec())));
        if !already_present {
            if let Some(obs) = observer() {
                obs.on_receive(&r, bytes.len() as u64);
            }
        }
        Ok(r)
    }
}
