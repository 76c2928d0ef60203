use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use snafu::{OptionExt as _, ResultExt as _};
use tokio::sync::RwLock;
use tracing::instrument;

pub use error::*;

mod error;

/// A value that is persisted as a record in a flat JSON file.
pub trait Document: Sized + Clone {
    /// Serialized shape of the value.
    type Record: Serialize + DeserializeOwned;

    /// Name used in errors and logs.
    const KIND: &'static str;

    fn from_record(record: &Self::Record) -> crate::model::Result<Self>;

    fn to_record(&self) -> Self::Record;
}

/// An ordered collection of documents backed by a JSON array on disk.
///
/// Reads are served from an in-memory cache. [Store::save] holds the write lock while it re-reads
/// the file, appends, replaces the file and drops the cache, so a reader never sees a stale
/// collection or a partially written file.
#[derive(Debug)]
pub struct Store<T> {
    path: PathBuf,
    cache: RwLock<Option<Arc<Vec<T>>>>,
}

impl<T: Document> Store<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return every document, reading the file only if the cache is empty.
    #[instrument(skip(self), fields(kind = T::KIND, path = %self.path.display()))]
    pub async fn load(&self) -> Result<Arc<Vec<T>>> {
        if let Some(items) = self.cache.read().await.as_ref() {
            return Ok(items.clone());
        }

        let mut cache = self.cache.write().await;
        // another task may have filled it while we waited for the lock
        if let Some(items) = cache.as_ref() {
            return Ok(items.clone());
        }

        let items = self
            .read_records()
            .await?
            .iter()
            .enumerate()
            .map(|(index, record)| {
                T::from_record(record).context(InvalidRecordSnafu {
                    kind: T::KIND,
                    index,
                    path: &self.path,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = items.len(), "loaded {} records", T::KIND);

        let items = Arc::new(items);
        *cache = Some(items.clone());
        Ok(items)
    }

    pub async fn list(&self) -> Result<Arc<Vec<T>>> {
        self.load().await
    }

    /// Fetch a copy of the document at `index`.
    pub async fn get(&self, index: usize) -> Result<T> {
        self.load()
            .await?
            .get(index)
            .cloned()
            .context(NotFoundSnafu {
                kind: T::KIND,
                index,
            })
    }

    /// Append `item` to the file and return its index.
    #[instrument(skip_all, fields(kind = T::KIND, path = %self.path.display()))]
    pub async fn save(&self, item: &T) -> Result<usize> {
        let mut cache = self.cache.write().await;

        let mut records = self.read_records().await?;
        records.push(item.to_record());
        let index = records.len() - 1;

        let content = serde_json::to_vec_pretty(&records).context(SerializeSnafu { kind: T::KIND })?;
        self.replace_file(&content).await?;

        *cache = None;
        tracing::info!(index, "saved {} record", T::KIND);

        Ok(index)
    }

    async fn read_records(&self) -> Result<Vec<T::Record>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!("`{}` does not exist, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(source).context(ReadFileSnafu { path: &self.path }),
        };

        serde_json::from_slice(&content).context(ParseFileSnafu { path: &self.path })
    }

    async fn replace_file(&self, content: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context(WriteFileSnafu { path: parent })?;
        }

        let temporary = self.path.with_extension("json.tmp");
        tokio::fs::write(&temporary, content)
            .await
            .context(WriteFileSnafu { path: &temporary })?;
        tokio::fs::rename(&temporary, &self.path)
            .await
            .context(WriteFileSnafu { path: &self.path })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::model::{Clip, ClipRecord, Definition, Reel, Standard, Timecode};

    fn clip_record(name: &str, end: &str) -> ClipRecord {
        ClipRecord {
            name: name.into(),
            description: format!("{name} commercial"),
            standard: "PAL".into(),
            definition: "SD".into(),
            start_timecode: "00:00:00:00".into(),
            end_timecode: end.into(),
        }
    }

    fn write_clips(dir: &Path, records: &[ClipRecord]) -> PathBuf {
        let path = dir.join("clips.json");
        std::fs::write(&path, serde_json::to_vec(records).unwrap()).unwrap();
        path
    }

    fn reel(name: &str) -> Reel {
        let clip = Clip::new(
            "Audi",
            "",
            Standard::PAL,
            Definition::SD,
            Timecode::zero(Standard::PAL),
            Timecode::from_frames(750, Standard::PAL),
        )
        .unwrap();
        Reel::new(name, Standard::PAL, Definition::SD, vec![clip]).unwrap()
    }

    #[tokio::test]
    async fn load_and_get() {
        let dir = tempdir().unwrap();
        let path = write_clips(
            dir.path(),
            &[clip_record("Bud Light", "00:00:30:12"), clip_record("Audi", "00:00:30:00")],
        );
        let store: Store<Clip> = Store::new(path);

        assert_eq!(store.list().await.unwrap().len(), 2);
        assert_eq!(store.get(1).await.unwrap().name, "Audi");
        assert!(matches!(
            store.get(2).await,
            Err(StoreError::NotFound { kind: "clip", index: 2, .. })
        ));
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store: Store<Reel> = Store::new(dir.path().join("reels.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_record_names_its_position() {
        let dir = tempdir().unwrap();
        let mut bad = clip_record("Fanta", "00:00:20:16");
        bad.standard = "SECAM".into();
        let path = write_clips(dir.path(), &[clip_record("Audi", "00:00:30:00"), bad]);

        let store: Store<Clip> = Store::new(path);
        assert!(matches!(
            store.load().await,
            Err(StoreError::InvalidRecord { index: 1, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clips.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store: Store<Clip> = Store::new(path);
        assert!(matches!(store.load().await, Err(StoreError::ParseFile { .. })));
    }

    #[tokio::test]
    async fn save_appends_and_invalidates_cache() {
        let dir = tempdir().unwrap();
        let store: Store<Reel> = Store::new(dir.path().join("nested").join("reels.json"));

        assert!(store.list().await.unwrap().is_empty());

        assert_eq!(store.save(&reel("First")).await.unwrap(), 0);
        assert_eq!(store.save(&reel("Second")).await.unwrap(), 1);

        let reels = store.list().await.unwrap();
        assert_eq!(reels.len(), 2, "saved reels should be visible to the next read");
        assert_eq!(reels[1].name, "Second");
        assert_eq!(reels[1], reel("Second"));

        let reopened: Store<Reel> = Store::new(store.path());
        assert_eq!(reopened.get(0).await.unwrap().name, "First");
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn cache_is_served_until_write() {
        let dir = tempdir().unwrap();
        let path = write_clips(dir.path(), &[clip_record("Audi", "00:00:30:00")]);
        let store: Store<Clip> = Store::new(&path);

        assert_eq!(store.list().await.unwrap().len(), 1);

        // edits behind the store's back are not picked up until the cache is dropped
        write_clips(dir.path(), &[]);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_are_serialized() {
        const SAVES: usize = 32;

        let dir = tempdir().unwrap();
        let store: Arc<Store<Reel>> = Arc::new(Store::new(dir.path().join("reels.json")));

        let writers: Vec<_> = (0..SAVES)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.save(&reel(&format!("Reel {n}"))).await.unwrap() })
            })
            .collect();

        // readers racing the writers must always see a whole file
        let readers: Vec<_> = (0..SAVES)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.list().await.unwrap().len() })
            })
            .collect();

        let mut indices = Vec::with_capacity(SAVES);
        for writer in writers {
            indices.push(writer.await.unwrap());
        }
        for reader in readers {
            assert!(reader.await.unwrap() <= SAVES);
        }

        indices.sort_unstable();
        assert_eq!(indices, (0..SAVES).collect::<Vec<_>>());

        let reels = store.list().await.unwrap();
        assert_eq!(reels.len(), SAVES, "every save should be visible afterwards");

        let mut names: Vec<_> = reels.iter().map(|reel| reel.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SAVES, "no save should overwrite another");
    }
}
