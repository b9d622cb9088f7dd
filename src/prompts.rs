use std::collections::HashMap;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{Error, Result};

static CATALOG_DIR: Dir = include_dir!("src/catalogs");

/// Shown when a partition turns out to be empty at draw time.
pub const PLACEHOLDER_PROMPT: &str = "...";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Korean,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Korean, Language::English];

    pub fn toggled(self) -> Self {
        match self {
            Language::Korean => Language::English,
            Language::English => Language::Korean,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Consonants,
    Vowels,
    Words,
    Sentences,
    Paragraphs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Consonants,
        Category::Vowels,
        Category::Words,
        Category::Sentences,
        Category::Paragraphs,
    ];

    /// Drill categories show one large glyph instead of running text.
    pub fn is_single_char(self) -> bool {
        matches!(self, Category::Consonants | Category::Vowels)
    }
}

#[derive(Deserialize, Debug)]
struct CatalogFile {
    language: Language,
    prompts: HashMap<Category, Vec<String>>,
}

/// Practice texts partitioned by language and category.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    partitions: HashMap<(Language, Category), Vec<String>>,
}

impl Catalog {
    /// Parse the catalogs embedded from `src/catalogs`.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Catalog::default();
        for file in CATALOG_DIR.files() {
            let contents = file.contents_utf8().unwrap_or_default();
            let parsed: CatalogFile = serde_json::from_str(contents)?;
            for (category, entries) in parsed.prompts {
                catalog.insert(parsed.language, category, entries);
            }
        }
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn insert(&mut self, language: Language, category: Category, entries: Vec<String>) {
        self.partitions.insert((language, category), entries);
    }

    pub fn partition(&self, language: Language, category: Category) -> &[String] {
        self.partitions
            .get(&(language, category))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every (language, category) pair must have at least one entry.
    pub fn validate(&self) -> Result<()> {
        for language in Language::ALL {
            for category in Category::ALL {
                if self.partition(language, category).is_empty() {
                    return Err(Error::EmptyCatalogPartition { language, category });
                }
            }
        }
        Ok(())
    }
}

/// Uniform random draws from a [`Catalog`]. Holds no notion of current or
/// upcoming prompt; that bookkeeping belongs to the typing session.
#[derive(Debug)]
pub struct PromptRotator<R: Rng = ThreadRng> {
    catalog: Catalog,
    rng: R,
}

impl PromptRotator<ThreadRng> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, rand::thread_rng())
    }
}

impl<R: Rng> PromptRotator<R> {
    pub fn with_rng(catalog: Catalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn next(&mut self, language: Language, category: Category) -> String {
        if let Some(prompt) = self
            .catalog
            .partition(language, category)
            .choose(&mut self.rng)
        {
            return prompt.clone();
        }

        error!(%language, %category, "empty prompt partition");
        Category::ALL
            .iter()
            .map(|&c| self.catalog.partition(language, c))
            .find(|entries| !entries.is_empty())
            .and_then(|entries| entries.choose(&mut self.rng))
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_PROMPT.to_string())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded(catalog: Catalog) -> PromptRotator<StdRng> {
        PromptRotator::with_rng(catalog, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = Catalog::builtin().unwrap();

        for language in Language::ALL {
            for category in Category::ALL {
                assert!(!catalog.partition(language, category).is_empty());
            }
        }
        assert_eq!(catalog.partition(Language::Korean, Category::Consonants).len(), 14);
        assert_eq!(catalog.partition(Language::English, Category::Consonants).len(), 8);
        assert!(catalog
            .partition(Language::English, Category::Words)
            .contains(&"banana".to_string()));
    }

    #[test]
    fn test_validate_reports_missing_partition() {
        let mut catalog = Catalog::default();
        for category in Category::ALL {
            catalog.insert(Language::Korean, category, vec!["가".into()]);
        }

        assert_matches!(
            catalog.validate(),
            Err(Error::EmptyCatalogPartition {
                language: Language::English,
                category: Category::Consonants
            })
        );
    }

    #[test]
    fn test_next_draws_from_partition() {
        let catalog = Catalog::builtin().unwrap();
        let words = catalog.partition(Language::Korean, Category::Words).to_vec();
        let mut rotator = seeded(catalog);

        for _ in 0..50 {
            let prompt = rotator.next(Language::Korean, Category::Words);
            assert!(words.contains(&prompt));
        }
    }

    #[test]
    fn test_next_covers_partition() {
        let mut catalog = Catalog::default();
        catalog.insert(
            Language::English,
            Category::Words,
            vec!["a".into(), "b".into(), "c".into()],
        );
        let mut rotator = seeded(catalog);

        let mut seen: Vec<String> = (0..200)
            .map(|_| rotator.next(Language::English, Category::Words))
            .collect();
        seen.sort();
        seen.dedup();

        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_partition_falls_back_within_language() {
        let mut catalog = Catalog::default();
        catalog.insert(Language::English, Category::Sentences, vec!["Keep calm.".into()]);
        let mut rotator = seeded(catalog);

        assert_eq!(rotator.next(Language::English, Category::Words), "Keep calm.");
    }

    #[test]
    fn test_empty_language_yields_placeholder() {
        let mut rotator = seeded(Catalog::default());

        assert_eq!(
            rotator.next(Language::Korean, Category::Paragraphs),
            PLACEHOLDER_PROMPT
        );
    }

    #[test]
    fn test_language_toggle_and_display() {
        assert_eq!(Language::Korean.toggled(), Language::English);
        assert_eq!(Language::English.toggled(), Language::Korean);
        assert_eq!(Language::English.to_string(), "english");
        assert_eq!(Category::Paragraphs.to_string(), "paragraphs");
    }

    #[test]
    fn test_single_char_categories() {
        assert!(Category::Consonants.is_single_char());
        assert!(Category::Vowels.is_single_char());
        assert!(!Category::Words.is_single_char());
        assert!(!Category::Paragraphs.is_single_char());
    }
}
