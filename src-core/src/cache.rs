use std::sync::RwLock;

/// Entities held in a view cache expose their row id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Id-keyed, ordered list of entities mirrored from the store.
///
/// `replace` swaps the whole list for a freshly fetched snapshot; the other
/// operations patch individual entries in place so a mutation only touches
/// the row it changed.
pub struct EntityCache<T> {
    entries: RwLock<Vec<T>>,
}

impl<T: Keyed + Clone> EntityCache<T> {
    pub fn new() -> Self {
        EntityCache {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the cached list wholesale with a fetched snapshot.
    pub fn replace(&self, items: Vec<T>) {
        *self.entries.write().unwrap() = items;
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.entries.read().unwrap().clone()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .find(|item| item.key() == id)
            .cloned()
    }

    /// Replaces the entry with the same id, or appends when absent.
    pub fn upsert(&self, item: T) {
        let mut entries = self.entries.write().unwrap();
        match entries.iter_mut().find(|e| e.key() == item.key()) {
            Some(existing) => *existing = item,
            None => entries.push(item),
        }
    }

    /// Replaces the entry with the same id, returning the prior value.
    /// Does nothing (and returns None) when the id is not cached.
    pub fn patch(&self, item: T) -> Option<T> {
        let mut entries = self.entries.write().unwrap();
        let existing = entries.iter_mut().find(|e| e.key() == item.key())?;
        let prior = existing.clone();
        *existing = item;
        Some(prior)
    }

    /// Applies `f` to the entry with the given id, returning the prior value.
    pub fn patch_with<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut entries = self.entries.write().unwrap();
        let existing = entries.iter_mut().find(|e| e.key() == id)?;
        let prior = existing.clone();
        f(existing);
        Some(prior)
    }

    pub fn remove(&self, id: &str) -> Option<T> {
        let mut entries = self.entries.write().unwrap();
        let position = entries.iter().position(|e| e.key() == id)?;
        Some(entries.remove(position))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|item| item.key() == id)
    }
}

impl<T: Keyed + Clone> Default for EntityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The two parallel views of a soft-deleted entity kind: rows with
/// `deleted = false` (active) and rows with `deleted = true` (archived).
pub struct ArchiveView<T> {
    active: EntityCache<T>,
    archived: EntityCache<T>,
}

impl<T: Keyed + Clone> ArchiveView<T> {
    pub fn new() -> Self {
        ArchiveView {
            active: EntityCache::new(),
            archived: EntityCache::new(),
        }
    }

    pub fn active(&self) -> &EntityCache<T> {
        &self.active
    }

    pub fn archived(&self) -> &EntityCache<T> {
        &self.archived
    }

    pub fn replace_active(&self, items: Vec<T>) {
        self.active.replace(items);
    }

    pub fn replace_archived(&self, items: Vec<T>) {
        self.archived.replace(items);
    }

    /// Moves an entity into the archived view after a successful soft delete.
    pub fn apply_archive(&self, entity: T) {
        self.active.remove(entity.key());
        self.archived.upsert(entity);
    }

    /// Moves an entity back into the active view after a successful restore.
    pub fn apply_restore(&self, entity: T) {
        self.archived.remove(entity.key());
        self.active.upsert(entity);
    }
}

impl<T: Keyed + Clone> Default for ArchiveView<T> {
    fn default() -> Self {
        Self::new()
    }
}
