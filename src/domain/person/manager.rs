use super::{
    person::{Person, PersonId},
    repository::{PersonRepository, PersonRepositoryError},
    validator::{FieldErrors, PersonValidator},
};

pub const PERSON_DELETED: &str = "Person deleted.";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PersonError {
    #[error("data not found")]
    NotFound,
    #[error("validation failed on {} field(s)", .0.len())]
    ValidationFailed(FieldErrors),
    #[error(transparent)]
    Repository(PersonRepositoryError),
}

impl From<PersonRepositoryError> for PersonError {
    fn from(value: PersonRepositoryError) -> Self {
        match value {
            PersonRepositoryError::PersonNotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Fields of a partial update, `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct UpdatePerson {
    pub id: PersonId,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != "0")
}

#[derive(Clone)]
pub struct PersonManager {
    repository: Box<dyn PersonRepository>,
    validator: PersonValidator,
}

impl PersonManager {
    pub fn new(repository: Box<dyn PersonRepository>, validator: PersonValidator) -> Self {
        return PersonManager {
            repository,
            validator,
        };
    }

    /// An empty store is reported as `NotFound`, not as an empty list.
    pub async fn list_people(&self) -> Result<Vec<Person>, PersonError> {
        let people = self.repository.find_all().await?;
        if people.is_empty() {
            return Err(PersonError::NotFound);
        }
        Ok(people)
    }

    pub async fn get_person(&self, id: PersonId) -> Result<Person, PersonError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn create_person(
        &self,
        firstname: &str,
        lastname: &str,
    ) -> Result<Person, PersonError> {
        let person = Person::new(firstname, lastname);
        self.validate_and_save(person).await
    }

    /// Values that read as false (`""` and `"0"`) count as not supplied.
    pub async fn update_person(&self, update: UpdatePerson) -> Result<Person, PersonError> {
        let mut person = self.repository.find_by_id(update.id).await?;
        if let Some(firstname) = supplied(&update.firstname) {
            person.set_firstname(firstname);
        }
        if let Some(lastname) = supplied(&update.lastname) {
            person.set_lastname(lastname);
        }
        self.validate_and_save(person).await
    }

    pub async fn delete_person(&self, id: PersonId) -> Result<&'static str, PersonError> {
        let person = self.repository.find_by_id(id).await?;
        let id = person.id().unwrap_or(id);
        self.repository.delete(id).await?;
        Ok(PERSON_DELETED)
    }

    async fn validate_and_save(&self, person: Person) -> Result<Person, PersonError> {
        let errors = self.validator.validate(&person);
        if !errors.is_empty() {
            tracing::debug!(?errors, "person rejected by validation");
            return Err(PersonError::ValidationFailed(errors));
        }
        Ok(self.repository.save(&person).await?)
    }
}
