use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use dulcevida_shared::{RawDaySchedule, WeekSchedule};

pub const DEFAULT_CACHE_KEY: &str = "camiseta-schedule";

/// Persistent key-value surface used when the remote store is unreachable.
pub trait LocalCache: Send + Sync {
    fn get(&self, key: &str) -> dulcevida_shared::Result<Option<Vec<RawDaySchedule>>>;

    fn set(&self, key: &str, schedule: &WeekSchedule) -> dulcevida_shared::Result<()>;
}

impl<T: LocalCache + ?Sized> LocalCache for Arc<T> {
    fn get(&self, key: &str) -> dulcevida_shared::Result<Option<Vec<RawDaySchedule>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, schedule: &WeekSchedule) -> dulcevida_shared::Result<()> {
        (**self).set(key, schedule)
    }
}

/// One JSON file per key under `dir`.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> dulcevida_shared::Result<PathBuf> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            dulcevida_shared::bail!("invalid cache key '{key}'");
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> dulcevida_shared::Result<Option<Vec<RawDaySchedule>>> {
        let path = self.path(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn set(&self, key: &str, schedule: &WeekSchedule) -> dulcevida_shared::Result<()> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Written next to the target so the rename stays on one filesystem.
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(schedule)?;
        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "schedule cached");

        Ok(())
    }
}

/// Process-local cache holding the same JSON a [`FileCache`] would write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    /// Store raw entries as-is, bypassing normalization.
    pub fn seed(&self, key: &str, raw: &[RawDaySchedule]) -> dulcevida_shared::Result<()> {
        let json = serde_json::to_string(raw)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), json);

        Ok(())
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> dulcevida_shared::Result<Option<Vec<RawDaySchedule>>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let Some(json) = entries.get(key) else {
            return Ok(None);
        };

        Ok(Some(serde_json::from_str(json)?))
    }

    fn set(&self, key: &str, schedule: &WeekSchedule) -> dulcevida_shared::Result<()> {
        let json = serde_json::to_string(schedule)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), json);

        Ok(())
    }
}
