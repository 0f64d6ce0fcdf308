pub mod person;
pub mod router;
