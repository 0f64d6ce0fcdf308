use super::person::{Person, PersonId};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PersonRepositoryError {
    #[error("person not found")]
    PersonNotFound,
    #[error("internal store error: {0}")]
    InternalError(String),
}

#[async_trait::async_trait]
pub trait PersonRepository: PersonClone + Send + Sync {
    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError>;
    async fn find_by_id(&self, id: PersonId) -> Result<Person, PersonRepositoryError>;
    /// Inserts the person when it has no id yet, overwrites the stored one otherwise.
    /// Returns the record as stored.
    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError>;
    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError>;
}

pub trait PersonClone {
    fn clone_box(&self) -> Box<dyn PersonRepository>;
}

impl<T> PersonClone for T
where
    T: 'static + PersonRepository + Clone,
{
    fn clone_box(&self) -> Box<dyn PersonRepository> {
        Box::new(self.clone())
    }
}

// We can now implement Clone manually by forwarding to clone_box.
impl Clone for Box<dyn PersonRepository> {
    fn clone(&self) -> Box<dyn PersonRepository> {
        self.clone_box()
    }
}

#[cfg(test)]
pub mod mock {
    use async_trait::async_trait;

    use super::{Person, PersonId, PersonRepository, PersonRepositoryError};

    mockall::mock! {
        pub Repository {}

        impl Clone for Repository {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl PersonRepository for Repository {
            async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError>;
            async fn find_by_id(&self, id: PersonId) -> Result<Person, PersonRepositoryError>;
            async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError>;
            async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError>;
        }
    }
}
