//! The protocol a remote object-storage backend (S3 and similar) must
//! satisfy to back a conforming [`crate::Storage`].
//!
//! This module specifies the interface and the key-layout/pagination
//! contract; it does not ship a concrete S3 (or other vendor) client.
//! [`ObjectStoreBackend`] implements `Storage` generically over any
//! [`ObjectStoreClient`], so the pagination and key-layout logic below is
//! exercised by this crate's own tests against a fake in-memory client.

use crate::{Blob, Enumerator, Error, Fetcher, Receiver, Ref};

/// One entry returned by [`ObjectStoreClient::list_page`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMeta {
    /// The full object key, including the backend's directory prefix.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
}

/// The minimal transport capability a remote object store must expose.
/// Implementations perform no retries; that is a wrapping backend's concern.
pub trait ObjectStoreClient: Send + Sync {
    /// Fetch the object at `key`, or [`Error::NotFound`] if absent.
    fn get_object(&self, key: &str) -> Result<Vec<u8>, Error>;

    /// Store `bytes` at `key`, creating or overwriting it.
    fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), Error>;

    /// List up to `limit` objects whose key starts with `prefix`, in
    /// ascending key order, starting strictly after `start_after` (a full
    /// key, not a Ref) when given. An empty result means this page is
    /// exhausted, not that listing overall is exhausted: callers must keep
    /// paging from the last key actually seen until a page returns fewer
    /// than `limit` entries.
    fn list_page(
        &self,
        prefix: &str,
        start_after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ObjectMeta>, Error>;
}

/// Deployment-specific configuration for an [`ObjectStoreBackend`]: the key
/// prefix blobs are namespaced under. Empty or must end with `/`.
#[derive(Clone, Debug, Default)]
pub struct ObjectStoreConfig {
    /// The key prefix every blob is stored/listed under, e.g. `"blobs/"`.
    /// Empty means blobs are keyed directly by their Ref text.
    pub dir_prefix: String,
}

impl ObjectStoreConfig {
    /// A config namespacing blobs under `dir_prefix` (e.g. `"blobs/"`).
    pub fn with_dir_prefix(dir_prefix: impl Into<String>) -> Self {
        Self { dir_prefix: dir_prefix.into() }
    }
}

/// A `Storage` backed by any [`ObjectStoreClient`], keying each blob as
/// `"<dirprefix><ref-text>"` under the configured prefix.
pub struct ObjectStoreBackend<C> {
    client: C,
    cfg: ObjectStoreConfig,
}

impl<C: ObjectStoreClient> ObjectStoreBackend<C> {
    /// Build a backend over `client` using `cfg`.
    pub fn new(client: C, cfg: ObjectStoreConfig) -> Self {
        Self { client, cfg }
    }

    fn key_for(&self, r: &Ref) -> String {
        format!("{}{}", self.cfg.dir_prefix, r)
    }

    fn ref_for_key(&self, key: &str) -> Option<Ref> {
        key.strip_prefix(self.cfg.dir_prefix.as_str()).and_then(|rest| Ref::parse(rest).ok())
    }
}

impl<C: ObjectStoreClient> Fetcher for ObjectStoreBackend<C> {
    fn fetch(&self, r: &Ref) -> Result<Blob, Error> {
        let bytes = self.client.get_object(&self.key_for(r))?;
        Ok(Blob::from_ref_and_contents(r.clone(), bytes))
    }
}

impl<C: ObjectStoreClient> Receiver for ObjectStoreBackend<C> {
    fn receive(&self, bytes: &[u8]) -> Result<Ref, Error> {
        let r = Ref::from_contents(bytes);
        self.client.put_object(&self.key_for(&r), bytes)?;
        Ok(r)
    }
}

impl<C: ObjectStoreClient> Enumerator for ObjectStoreBackend<C> {
    /// Pages through the client's listing, skipping any object whose key
    /// does not parse as a Ref under this backend's prefix (foreign keys
    /// sharing the namespace), until `limit` valid entries are collected or
    /// the client reports exhaustion.
    ///
    /// Tracks the last key actually observed from the client explicitly,
    /// rather than deriving it from the last *accepted* Ref: a page made
    /// entirely of foreign keys must still advance the cursor, or
    /// enumeration would loop forever re-requesting the same page.
    fn enumerate(&self, after: Option<&Ref>, limit: usize) -> Result<Vec<(Ref, u64)>, Error> {
        const PAGE_SIZE: usize = 1000;

        let mut start_after = after.map(|r| self.key_for(r));
        let mut out = Vec::new();

        loop {
            let page = self.client.list_page(&self.cfg.dir_prefix, start_after.as_deref(), PAGE_SIZE)?;
            if page.is_empty() {
                break;
            }
            let last_seen_key = page.last().expect("checked non-empty").key.clone();

            for obj in &page {
                if let Some(r) = self.ref_for_key(&obj.key) {
                    out.push((r, obj.size));
                    if out.len() == limit {
                        return Ok(out);
                    }
                }
            }

            if page.len() < PAGE_SIZE {
                break;
            }
            start_after = Some(last_seen_key);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeClient {
        objects: Mutex<BTreeMap<String, Vec<u8>>>,
    }

    impl ObjectStoreClient for FakeClient {
        fn get_object(&self, key: &str) -> Result<Vec<u8>, Error> {
            self.objects.lock().unwrap().get(key).cloned().ok_or(Error::NotFound)
        }

        fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), Error> {
            self.objects.lock().unwrap().insert(key.to_string(), bytes.to_vec());
            Ok(())
        }

        fn list_page(
            &self,
            prefix: &str,
            start_after: Option<&str>,
            limit: usize,
        ) -> Result<Vec<ObjectMeta>, Error> {
            let objects = self.objects.lock().unwrap();
            let page = objects
                .iter()
                .filter(|(k, _)| k.starts_with(prefix))
                .filter(|(k, _)| start_after.map_or(true, |a| k.as_str() > a))
                .take(limit)
                .map(|(k, v)| ObjectMeta { key: k.clone(), size: v.len() as u64 })
                .collect();
            Ok(page)
        }
    }

    #[test]
    fn receive_then_fetch_round_trips() {
        let backend = ObjectStoreBackend::new(FakeClient::default(), ObjectStoreConfig::with_dir_prefix("blobs/"));
        let r = backend.receive(b"payload").unwrap();
        let blob = backend.fetch(&r).unwrap();
        assert_eq!(blob.bytes().unwrap().as_ref(), b"payload");
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let backend = ObjectStoreBackend::new(FakeClient::default(), ObjectStoreConfig::with_dir_prefix("blobs/"));
        let r = Ref::from_contents(b"nope");
        assert!(matches!(backend.fetch(&r), Err(Error::NotFound)));
    }

    #[test]
    fn enumerate_skips_foreign_keys_and_still_advances() {
        let client = FakeClient::default();
        // A non-Ref key sharing the same prefix/namespace.
        client.put_object("blobs/README", b"not a blob").unwrap();
        let backend = ObjectStoreBackend::new(client, ObjectStoreConfig::with_dir_prefix("blobs/"));
        let r1 = backend.receive(b"one").unwrap();
        let r2 = backend.receive(b"two").unwrap();

        let page = backend.enumerate(None, 10).unwrap();
        let refs: Vec<Ref> = page.into_iter().map(|(r, _)| r).collect();
        assert!(refs.contains(&r1));
        assert!(refs.contains(&r2));
        assert_eq!(refs.len(), 2);
    }
}
