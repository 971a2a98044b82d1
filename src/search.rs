//! Multi-entity search with debouncing and stale-result protection
//!
//! [`MultiEntitySearch`] matches one query against four entity types
//! independently: recipes and categories against the already-loaded
//! snapshot, chefs and ingredients through the repository's name lookup.
//! [`DebouncedSearch`] drives it from keystrokes: a cancellable timer
//! plus a generation counter so a superseded query can never publish
//! over a newer one.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    error::SourceError,
    model::{Category, Chef, IngredientRef, Recipe},
    source::RecipeRepository,
    text,
};

/// Result cap for the recipe list
pub const MAX_RECIPE_RESULTS: usize = 5;
/// Result cap for the chef list
pub const MAX_CHEF_RESULTS: usize = 3;
/// Result cap for the category list
pub const MAX_CATEGORY_RESULTS: usize = 3;
/// Result cap for the ingredient list
pub const MAX_INGREDIENT_RESULTS: usize = 3;

/// Quiet period an input must survive before the search runs
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Capped per-entity result lists of one query
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SearchResults {
    pub recipes: Vec<Recipe>,
    pub chefs: Vec<Chef>,
    pub categories: Vec<Category>,
    pub ingredients: Vec<IngredientRef>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
            && self.chefs.is_empty()
            && self.categories.is_empty()
            && self.ingredients.is_empty()
    }
}

/// Searcher over a loaded snapshot plus repository lookups
pub struct MultiEntitySearch<R> {
    recipes: Vec<Recipe>,
    categories: Vec<Category>,
    repository: R,
}

impl<R: RecipeRepository> MultiEntitySearch<R> {
    /// Creates a searcher over an already-loaded recipe and category
    /// snapshot. Recipe and category matching never re-fetches.
    pub fn new(recipes: Vec<Recipe>, categories: Vec<Category>, repository: R) -> Self {
        Self {
            recipes,
            categories,
            repository,
        }
    }

    /// Match `query` against every entity type.
    ///
    /// An empty or whitespace-only query returns four empty lists without
    /// touching the repository. Finding nothing anywhere is also just
    /// empty lists, not an error.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchResults, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let recipes: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|r| {
                text::contains_ignore_case(&r.title, query)
                    || text::contains_ignore_case(&r.description, query)
            })
            .take(MAX_RECIPE_RESULTS)
            .cloned()
            .collect();

        let categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| text::contains_ignore_case(&c.name, query))
            .take(MAX_CATEGORY_RESULTS)
            .cloned()
            .collect();

        let (mut chefs, mut ingredients) = futures_util::future::try_join(
            self.repository.search_chefs_by_name(query),
            self.repository.search_ingredients_by_name(query),
        )
        .await?;
        chefs.truncate(MAX_CHEF_RESULTS);
        ingredients.truncate(MAX_INGREDIENT_RESULTS);

        Ok(SearchResults {
            recipes,
            chefs,
            categories,
            ingredients,
        })
    }
}

/// Latest outcome published by a [`DebouncedSearch`]
///
/// `query` tags which input the results belong to. A repository failure
/// surfaces in `error` with empty results; the caller decides what to
/// show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchUpdate {
    pub query: String,
    pub results: SearchResults,
    pub error: Option<SourceError>,
}

/// Debounced keystroke driver for [`MultiEntitySearch`]
///
/// Each [`on_input`](Self::on_input) cancels the pending timer and starts
/// a new one; only the input that survives the quiet window executes.
/// Every execution carries the generation it was started for, and a
/// result whose generation is no longer current is discarded, so slow
/// repository lookups for an old query never overwrite a newer one.
pub struct DebouncedSearch<R> {
    inner: Arc<MultiEntitySearch<R>>,
    window: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<tokio::task::JoinHandle<()>>>,
    tx: watch::Sender<SearchUpdate>,
}

impl<R: RecipeRepository + 'static> DebouncedSearch<R> {
    /// Debounce with the default [`DEBOUNCE_WINDOW`]
    pub fn new(inner: MultiEntitySearch<R>) -> Self {
        Self::with_window(inner, DEBOUNCE_WINDOW)
    }

    pub fn with_window(inner: MultiEntitySearch<R>, window: Duration) -> Self {
        let (tx, _) = watch::channel(SearchUpdate::default());
        Self {
            inner: Arc::new(inner),
            window,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            tx,
        }
    }

    /// Receiver for published [`SearchUpdate`]s
    pub fn subscribe(&self) -> watch::Receiver<SearchUpdate> {
        self.tx.subscribe()
    }

    /// Feed the current input.
    ///
    /// Must be called from within a tokio runtime. The search itself runs
    /// on a spawned task after the quiet window; results arrive through
    /// [`subscribe`](Self::subscribe).
    pub fn on_input(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(handle) = self.pending.lock().expect("pending lock poisoned").take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let window = self.window;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let outcome = inner.search(&query).await;

            // the lookup may have been slow; check again before publishing
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(query = %query, "discarding stale search results");
                return;
            }

            let update = match outcome {
                Ok(results) => SearchUpdate {
                    query,
                    results,
                    error: None,
                },
                Err(error) => SearchUpdate {
                    query,
                    results: SearchResults::default(),
                    error: Some(error),
                },
            };
            let _ = tx.send(update);
        });

        *self.pending.lock().expect("pending lock poisoned") = Some(handle);
    }
}
