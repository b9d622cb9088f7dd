use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::app_dirs::AppDirs;
use crate::error::Result;

/// Creatures that can be met at the end of a dive.
pub const MARINE_LIFE: [&str; 15] = [
    "🐠", "🐟", "🐡", "🦈", "🐋", "🐳", "🐬", "🐙", "🦑", "🦐", "🦞", "🦀", "🐚", "🪸", "🦦",
];

/// Settings key the collection is stored under.
pub const REWARD_KEY: &str = "collected_creatures";

pub trait RewardStore {
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, collected: &[String]) -> Result<()>;
}

/// Key-value JSON settings file; only [`REWARD_KEY`] is touched, other keys
/// survive writes.
#[derive(Debug, Clone)]
pub struct FileRewardStore {
    path: PathBuf,
}

impl FileRewardStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::rewards_path().unwrap_or_else(|| PathBuf::from("deepfocus_rewards.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    fn read_settings(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for FileRewardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardStore for FileRewardStore {
    fn load(&self) -> Result<Vec<String>> {
        match self.read_settings()?.remove(REWARD_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(vec![]),
        }
    }

    fn save(&self, collected: &[String]) -> Result<()> {
        let mut settings = self.read_settings().unwrap_or_default();
        settings.insert(REWARD_KEY.to_string(), serde_json::to_value(collected)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(&settings)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// In-memory store for headless runs and tests. Clones share the same
/// backing record, so a test can keep a handle and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryRewardStore {
    raw: Rc<RefCell<Option<String>>>,
}

impl MemoryRewardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the record with arbitrary serialized text.
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Rc::new(RefCell::new(Some(raw.to_string()))),
        }
    }

    pub fn persisted(&self) -> Option<Vec<String>> {
        self.raw
            .borrow()
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

impl RewardStore for MemoryRewardStore {
    fn load(&self) -> Result<Vec<String>> {
        match self.raw.borrow().as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(vec![]),
        }
    }

    fn save(&self, collected: &[String]) -> Result<()> {
        *self.raw.borrow_mut() = Some(serde_json::to_string(collected)?);
        Ok(())
    }
}

/// The "my sea" collection: one random creature per completed countdown.
#[derive(Debug)]
pub struct RewardLedger<S: RewardStore, R: Rng = ThreadRng> {
    catalog: &'static [&'static str],
    collected: Vec<String>,
    store: S,
    rng: R,
}

impl<S: RewardStore> RewardLedger<S, ThreadRng> {
    pub fn load(store: S) -> Self {
        Self::load_with_rng(store, rand::thread_rng())
    }
}

impl<S: RewardStore, R: Rng> RewardLedger<S, R> {
    /// Restore the collection; unreadable or missing data starts it empty.
    pub fn load_with_rng(store: S, rng: R) -> Self {
        let collected = store.load().unwrap_or_else(|err| {
            warn!(%err, "could not restore reward collection, starting empty");
            vec![]
        });
        Self {
            catalog: &MARINE_LIFE,
            collected,
            store,
            rng,
        }
    }

    /// Draw one creature, add it to the collection and persist.
    pub fn grant(&mut self) -> String {
        let creature = self
            .catalog
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(MARINE_LIFE[0])
            .to_string();
        self.collected.push(creature.clone());
        info!(%creature, total = self.collected.len(), "reward granted");
        self.persist();
        creature
    }

    pub fn clear(&mut self) {
        self.collected.clear();
        info!("reward collection cleared");
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.collected) {
            warn!(%err, "could not persist reward collection");
        }
    }

    pub fn catalog(&self) -> &'static [&'static str] {
        self.catalog
    }

    /// Acquisition order, oldest first.
    pub fn collected(&self) -> &[String] {
        &self.collected
    }

    pub fn recent_first(&self) -> impl Iterator<Item = &str> {
        self.collected.iter().rev().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }
}
