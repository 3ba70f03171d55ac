/// Category → reference document selection.
///
/// Built once from a loaded [`Corpus`]; every lookup afterwards is a pure read.
use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::classify::{Classification, Classifier};
use crate::corpus::Corpus;
use crate::descriptor::CategoryEntry;
use crate::error::AppError;
use crate::model::{Category, Document};
use crate::search::{self, SearchHit};
use crate::template::render_output_template;

/// Documents for one category plus the report template to fill in.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub category: Category,
    pub documents: Vec<&'a Document>,
    pub output_template: String,
}

pub struct ReferenceSelector {
    skill: String,
    description: String,
    documents: BTreeMap<String, Document>,
    mapping: BTreeMap<Category, CategoryEntry>,
    classifier: Classifier,
}

impl ReferenceSelector {
    /// Resolve every mapped document id against the corpus. Any id without a
    /// document is an error, so lookups never have to handle a dangling id.
    pub fn from_corpus(corpus: Corpus) -> Result<Self, AppError> {
        let Corpus {
            origin,
            descriptor,
            documents,
        } = corpus;

        let classifier = Classifier::new(&descriptor)?;
        let documents: BTreeMap<String, Document> =
            documents.into_iter().map(|d| (d.id.clone(), d)).collect();

        let mut mapping = BTreeMap::new();
        for entry in &descriptor.categories {
            let mut seen = HashSet::new();
            for id in &entry.documents {
                if !seen.insert(id.as_str()) {
                    return Err(AppError::DuplicateDocument {
                        category: entry.category,
                        id: id.clone(),
                    });
                }
                if !documents.contains_key(id) {
                    return Err(AppError::UnresolvedDocument {
                        category: entry.category,
                        id: id.clone(),
                    });
                }
            }
            mapping.insert(entry.category, entry.clone());
        }

        for category in Category::ALL {
            if mapping.get(&category).map_or(true, |e| e.documents.is_empty()) {
                warn!(%category, "category has no reference documents");
            }
        }

        info!(
            origin = %origin,
            skill = %descriptor.name,
            version = descriptor.version.as_deref().unwrap_or("unversioned"),
            documents = documents.len(),
            categories = mapping.len(),
            "reference selector ready"
        );

        Ok(Self {
            skill: descriptor.name,
            description: descriptor.description,
            documents,
            mapping,
            classifier,
        })
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Documents mapped to `category`, in mapping order. Empty when unmapped.
    pub fn select(&self, category: Category) -> Vec<&Document> {
        self.mapping
            .get(&category)
            .map(|entry| {
                entry
                    .documents
                    .iter()
                    .filter_map(|id| self.documents.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Select by a caller-supplied tag. Unknown tags fail with `InvalidCategory`.
    pub fn selection(&self, tag: &str) -> Result<Selection<'_>, AppError> {
        let category: Category = tag.parse()?;
        Ok(Selection {
            category,
            documents: self.select(category),
            output_template: render_output_template(category),
        })
    }

    /// Case-insensitive lookup by document id.
    pub fn document(&self, id: &str) -> Result<&Document, AppError> {
        let id = id.trim();
        self.documents
            .get(id)
            .or_else(|| {
                self.documents
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(id))
                    .map(|(_, doc)| doc)
            })
            .ok_or_else(|| AppError::DocumentNotFound(id.to_string()))
    }

    /// Categories whose selection includes document `id`.
    pub fn categories_for(&self, id: &str) -> Vec<Category> {
        self.mapping
            .values()
            .filter(|entry| entry.documents.iter().any(|d| d == id))
            .map(|entry| entry.category)
            .collect()
    }

    /// Every category in enumeration order with its descriptor entry, if any.
    pub fn categories(&self) -> impl Iterator<Item = (Category, Option<&CategoryEntry>)> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.mapping.get(&category)))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn classify(&self, request: &str) -> Classification {
        self.classifier.classify(request)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        search::search(self.documents.values(), query, limit)
    }
}
