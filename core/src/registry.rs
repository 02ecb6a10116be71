//! Process-wide language model registry.
//!
//! Models are loaded once per identifier and shared read-only for the
//! process lifetime. First load of an identifier parses the bundle under
//! the write lock with a double check, so concurrent callers racing on
//! the same language parse it exactly once; lookups after that take the
//! read lock only.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::LanguageModel;

static MODELS: Lazy<RwLock<HashMap<String, Arc<LanguageModel>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Install an already-built model (language crates use this for their
/// built-in resources). Idempotent: an existing model under the same
/// identifier wins and is returned unchanged.
pub fn install(model: LanguageModel) -> Arc<LanguageModel> {
    let mut map = MODELS.write().unwrap_or_else(|e| e.into_inner());
    let id = model.id().to_string();
    let entry = map.entry(id).or_insert_with(|| Arc::new(model));
    Arc::clone(entry)
}

/// Look up a loaded model.
pub fn get(id: &str) -> Option<Arc<LanguageModel>> {
    let map = MODELS.read().unwrap_or_else(|e| e.into_inner());
    map.get(id).cloned()
}

/// Load a bundle directory under `id`, or return the cached instance if
/// the identifier was loaded before.
pub fn load_from_dir<P: AsRef<Path>>(id: &str, dir: P) -> Result<Arc<LanguageModel>> {
    if let Some(model) = get(id) {
        return Ok(model);
    }
    let mut map = MODELS.write().unwrap_or_else(|e| e.into_inner());
    // double check: another caller may have loaded it while we waited
    if let Some(model) = map.get(id) {
        return Ok(Arc::clone(model));
    }
    let model = Arc::new(LanguageModel::from_bundle_dir(id, dir)?);
    map.insert(id.to_string(), Arc::clone(&model));
    debug!(language = id, "registered language model");
    Ok(model)
}

/// Resolve an identifier or fail with `UnknownLanguage`.
pub fn require(id: &str) -> Result<Arc<LanguageModel>> {
    get(id).ok_or_else(|| Error::UnknownLanguage(id.to_string()))
}

/// Identifiers of all loaded models, sorted.
pub fn loaded_languages() -> Vec<String> {
    let map = MODELS.read().unwrap_or_else(|e| e.into_inner());
    let mut ids: Vec<String> = map.keys().cloned().collect();
    ids.sort();
    ids
}

/// Drop a loaded model. Existing `Arc` holders keep their instance.
pub fn unload(id: &str) -> bool {
    let mut map = MODELS.write().unwrap_or_else(|e| e.into_inner());
    map.remove(id).is_some()
}
