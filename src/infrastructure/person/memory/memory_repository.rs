use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::person::{Person, PersonId, PersonRepository, PersonRepositoryError};

#[derive(Debug, Default)]
struct Store {
    people: BTreeMap<PersonId, Person>,
    last_id: PersonId,
}

/// Process-local store, every clone shares the same records.
/// Ids start at 1 and are never reused after a deletion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError> {
        let store = self.store.read().await;
        Ok(store.people.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Person, PersonRepositoryError> {
        let store = self.store.read().await;
        store
            .people
            .get(&id)
            .cloned()
            .ok_or(PersonRepositoryError::PersonNotFound)
    }

    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        let mut store = self.store.write().await;
        let saved = match person.id() {
            Some(id) => {
                if !store.people.contains_key(&id) {
                    return Err(PersonRepositoryError::PersonNotFound);
                }
                person.clone()
            }
            None => {
                store.last_id += 1;
                Person::with_id(store.last_id, person.firstname(), person.lastname())
            }
        };
        if let Some(id) = saved.id() {
            store.people.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError> {
        let mut store = self.store.write().await;
        store
            .people
            .remove(&id)
            .map(|_| ())
            .ok_or(PersonRepositoryError::PersonNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryPersonRepository;
    use crate::domain::person::{Person, PersonRepository, PersonRepositoryError};

    #[tokio::test]
    async fn test_memory_person_lifecycle() {
        let repository = InMemoryPersonRepository::new();
        assert_eq!(repository.find_all().await, Ok(vec![]));

        let ada = repository
            .save(&Person::new("Ada", "Lovelace"))
            .await
            .unwrap();
        assert_eq!(ada, Person::with_id(1, "Ada", "Lovelace"));

        let mut renamed = ada.clone();
        renamed.set_firstname("Augusta");
        assert_eq!(repository.save(&renamed).await, Ok(renamed.clone()));
        assert_eq!(repository.find_by_id(1).await, Ok(renamed));

        assert_eq!(repository.delete(1).await, Ok(()));
        assert_eq!(
            repository.find_by_id(1).await,
            Err(PersonRepositoryError::PersonNotFound)
        );
        assert_eq!(
            repository.delete(1).await,
            Err(PersonRepositoryError::PersonNotFound)
        );
    }

    #[tokio::test]
    async fn test_memory_ids_are_not_reused() {
        let repository = InMemoryPersonRepository::new();
        repository.save(&Person::new("Ada", "Lovelace")).await.unwrap();
        repository.delete(1).await.unwrap();
        let alan = repository.save(&Person::new("Alan", "Turing")).await.unwrap();
        assert_eq!(alan.id(), Some(2));
    }

    #[tokio::test]
    async fn test_memory_save_of_deleted_person_fails() {
        let repository = InMemoryPersonRepository::new();
        let ada = repository.save(&Person::new("Ada", "Lovelace")).await.unwrap();
        repository.delete(1).await.unwrap();
        assert_eq!(
            repository.save(&ada).await,
            Err(PersonRepositoryError::PersonNotFound)
        );
        assert!(repository.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_clones_share_records() {
        let repository = InMemoryPersonRepository::new();
        let clone = repository.clone();
        repository.save(&Person::new("Ada", "Lovelace")).await.unwrap();
        assert_eq!(clone.find_all().await.unwrap().len(), 1);
    }
}
