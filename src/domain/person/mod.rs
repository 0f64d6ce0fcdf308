mod manager;
mod person;
pub mod repository;
pub mod translator;
pub mod validator;

pub use manager::{PersonError, PersonManager, UpdatePerson};
pub use person::{Person, PersonId};
pub use repository::{PersonRepository, PersonRepositoryError};
pub use translator::Translator;
pub use validator::{FieldErrors, PersonValidator};
