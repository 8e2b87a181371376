use indexmap::map::Values;
use indexmap::IndexMap;
use serde::Serialize;

/// Anything that can be stored in a `ModelList` under its own identifier
pub trait Keyed {
    fn key(&self) -> &str;
}

impl<T: Keyed + ?Sized> Keyed for std::sync::Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

/// Ordered model collection
///
/// A map from id to model that remembers first-insertion order. Inserting
/// an id that is already present replaces the stored value without moving
/// it; removing an id drops it from the map and the ordering together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelList<T> {
    models: IndexMap<String, T>,
}

impl<T> Default for ModelList<T> {
    fn default() -> Self {
        Self {
            models: IndexMap::new(),
        }
    }
}

impl<T> ModelList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under an explicit id, returning the replaced value if any
    pub fn insert_keyed(&mut self, id: impl Into<String>, model: T) -> Option<T> {
        self.models.insert(id.into(), model)
    }

    /// Insert at a given position (clamped to the end)
    ///
    /// Used to put a removed model back where it was. If the id is already
    /// present the existing entry is moved to `index`.
    pub fn insert_at(&mut self, index: usize, id: impl Into<String>, model: T) {
        let index = index.min(self.models.len());
        self.models.shift_insert(index, id.into(), model);
    }

    /// Remove by id; no-op when absent
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.models.shift_remove(id)
    }

    pub fn get_model(&self, id: &str) -> Option<&T> {
        self.models.get(id)
    }

    pub fn get_model_mut(&mut self, id: &str) -> Option<&mut T> {
        self.models.get_mut(id)
    }

    /// The models in insertion order
    pub fn get_models(&self) -> Values<'_, String, T> {
        self.models.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.models.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.models.get_index_of(id)
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &T)> {
        self.models.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Stable sort of the ordering by a comparator over the models
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.models.sort_by(|_, a, _, b| compare(a, b));
    }
}

impl<T: Keyed> ModelList<T> {
    /// Insert by the model's own id
    pub fn insert(&mut self, model: T) -> Option<T> {
        let id = model.key().to_string();
        self.insert_keyed(id, model)
    }
}

impl<T: Keyed> FromIterator<T> for ModelList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ModelList::new();
        for model in iter {
            list.insert(model);
        }
        list
    }
}
