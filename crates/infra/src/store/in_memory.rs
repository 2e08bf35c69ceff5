use std::sync::RwLock;

use indexmap::IndexMap;

use mercado_core::{DomainError, DomainResult, Entity, IdentityStore};

/// In-memory, insertion-ordered identity store.
///
/// One instance per entity type. Each operation takes the lock once
/// (coarse-grained); there are no multi-operation transactions.
#[derive(Debug)]
pub struct InMemoryIdentityStore<E: Entity> {
    inner: RwLock<IndexMap<E::Id, E>>,
}

impl<E: Entity> InMemoryIdentityStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IndexMap::new()),
        }
    }

    /// Build a store pre-populated with `entities`, saved in iteration order.
    ///
    /// Later entities replace earlier ones sharing an id.
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let map = entities
            .into_iter()
            .map(|e| (e.id().clone(), e))
            .collect::<IndexMap<_, _>>();
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Number of stored entities.
    pub fn len(&self) -> DomainResult<usize> {
        let map = self.inner.read().map_err(|_| DomainError::StoreUnavailable)?;
        Ok(map.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<E: Entity> Default for InMemoryIdentityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> IdentityStore<E> for InMemoryIdentityStore<E>
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    fn save(&self, entity: E) -> DomainResult<E> {
        let mut map = self.inner.write().map_err(|_| DomainError::StoreUnavailable)?;
        let id = entity.id().clone();
        // IndexMap keeps the original slot when the key already exists.
        let replaced = map.insert(id.clone(), entity.clone()).is_some();
        tracing::debug!(?id, replaced, "entity saved");
        Ok(entity)
    }

    fn find(&self, id: &E::Id) -> DomainResult<E> {
        let map = self.inner.read().map_err(|_| DomainError::StoreUnavailable)?;
        map.get(id).cloned().ok_or_else(|| DomainError::not_found(id))
    }

    fn find_all(&self) -> DomainResult<Vec<E>> {
        let map = self.inner.read().map_err(|_| DomainError::StoreUnavailable)?;
        Ok(map.values().cloned().collect())
    }

    fn update(&self, entity: E) -> DomainResult<E> {
        let mut map = self.inner.write().map_err(|_| DomainError::StoreUnavailable)?;
        let slot = map
            .get_mut(entity.id())
            .ok_or_else(|| DomainError::not_found(entity.id()))?;
        *slot = entity.clone();
        tracing::debug!(id = ?entity.id(), "entity updated");
        Ok(entity)
    }

    fn delete(&self, entity: &E) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| DomainError::StoreUnavailable)?;
        // shift_remove keeps the relative order of the remaining entities.
        map.shift_remove(entity.id())
            .ok_or_else(|| DomainError::not_found(entity.id()))?;
        tracing::debug!(id = ?entity.id(), "entity deleted");
        Ok(())
    }

    fn delete_all(&self) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| DomainError::StoreUnavailable)?;
        map.clear();
        tracing::debug!("store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Widget {
        id: u32,
        label: String,
    }

    impl Entity for Widget {
        type Id = u32;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    fn widget(id: u32, label: &str) -> Widget {
        Widget {
            id,
            label: label.to_string(),
        }
    }

    fn ids(store: &InMemoryIdentityStore<Widget>) -> Vec<u32> {
        store.find_all().unwrap().into_iter().map(|w| w.id).collect()
    }

    #[test]
    fn save_then_find_returns_equal_entity() {
        let store = InMemoryIdentityStore::new();
        let saved = store.save(widget(1, "first")).unwrap();

        assert_eq!(saved, widget(1, "first"));
        assert_eq!(store.find(&1).unwrap(), widget(1, "first"));
    }

    #[test]
    fn find_on_empty_store_is_not_found() {
        let store: InMemoryIdentityStore<Widget> = InMemoryIdentityStore::new();
        assert_eq!(store.find(&2).unwrap_err(), DomainError::NotFound("2".to_string()));
    }

    #[test]
    fn find_all_preserves_insertion_order() {
        let store = InMemoryIdentityStore::new();
        for id in [7, 2, 3, 4, 5, 6, 1] {
            store.save(widget(id, "w")).unwrap();
        }

        assert_eq!(ids(&store), vec![7, 2, 3, 4, 5, 6, 1]);
    }

    #[test]
    fn save_with_existing_id_replaces_in_place() {
        let store = InMemoryIdentityStore::new();
        store.save(widget(1, "a")).unwrap();
        store.save(widget(2, "b")).unwrap();
        store.save(widget(1, "a2")).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(all, vec![widget(1, "a2"), widget(2, "b")]);
    }

    #[test]
    fn update_replaces_existing_entity_and_keeps_position() {
        let store = InMemoryIdentityStore::with_entities([widget(1, "a"), widget(2, "b")]);

        let updated = store.update(widget(1, "changed")).unwrap();

        assert_eq!(updated, widget(1, "changed"));
        assert_eq!(store.find_all().unwrap(), vec![widget(1, "changed"), widget(2, "b")]);
    }

    #[test]
    fn update_of_missing_id_fails_and_does_not_insert() {
        let store = InMemoryIdentityStore::with_entities([widget(1, "a")]);

        let err = store.update(widget(3, "c")).unwrap_err();

        assert_eq!(err, DomainError::not_found(3_u32));
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn delete_removes_only_the_matching_entity() {
        let store = InMemoryIdentityStore::with_entities((1..=7).map(|id| widget(id, "w")));

        store.delete(&widget(2, "w")).unwrap();
        assert_eq!(store.len().unwrap(), 6);
        store.delete(&widget(7, "ignored label")).unwrap();

        assert_eq!(ids(&store), vec![1, 3, 4, 5, 6]);
        assert!(matches!(store.find(&2), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn delete_of_missing_id_is_not_found() {
        let store = InMemoryIdentityStore::with_entities([widget(1, "a")]);

        assert!(matches!(store.delete(&widget(9, "x")), Err(DomainError::NotFound(_))));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn delete_all_is_idempotent() {
        let store = InMemoryIdentityStore::with_entities((1..=7).map(|id| widget(id, "w")));

        store.delete_all().unwrap();
        assert!(store.find_all().unwrap().is_empty());
        store.delete_all().unwrap();
        assert!(store.find_all().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn with_entities_keeps_last_write_per_id() {
        let store = InMemoryIdentityStore::with_entities([widget(1, "a"), widget(2, "b"), widget(1, "c")]);

        assert_eq!(store.find_all().unwrap(), vec![widget(1, "c"), widget(2, "b")]);
    }

    #[test]
    fn arc_store_is_a_store() {
        let store = Arc::new(InMemoryIdentityStore::new());
        let shared = store.clone();

        IdentityStore::save(&shared, widget(1, "a")).unwrap();

        assert_eq!(store.find(&1).unwrap(), widget(1, "a"));
    }

    #[test]
    fn poisoned_lock_is_reported_as_unavailable() {
        let store = Arc::new(InMemoryIdentityStore::with_entities([widget(1, "a")]));
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store lock");
        })
        .join();

        assert_eq!(store.len(), Err(DomainError::StoreUnavailable));
        assert_eq!(store.is_empty(), Err(DomainError::StoreUnavailable));
        assert_eq!(store.find(&1), Err(DomainError::StoreUnavailable));
        assert_eq!(store.delete_all(), Err(DomainError::StoreUnavailable));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: size equals distinct ids; order is first-insertion order.
            #[test]
            fn find_all_tracks_distinct_ids_in_first_insertion_order(
                ids in proptest::collection::vec(0u32..20, 0..40)
            ) {
                let store = InMemoryIdentityStore::new();
                let mut expected: Vec<u32> = Vec::new();
                for (n, id) in ids.iter().enumerate() {
                    store.save(widget(*id, &n.to_string())).unwrap();
                    if !expected.contains(id) {
                        expected.push(*id);
                    }
                }

                let all = store.find_all().unwrap();
                prop_assert_eq!(all.len(), expected.len());
                prop_assert_eq!(all.iter().map(|w| w.id).collect::<Vec<_>>(), expected);
            }

            /// Property: the last save of an id is what `find` returns.
            #[test]
            fn last_write_is_visible(labels in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
                let store = InMemoryIdentityStore::new();
                for label in &labels {
                    store.save(widget(1, label)).unwrap();
                }

                prop_assert_eq!(&store.find(&1).unwrap().label, labels.last().unwrap());
                prop_assert_eq!(store.len().unwrap(), 1);
            }
        }
    }
}
