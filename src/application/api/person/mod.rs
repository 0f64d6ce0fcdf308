pub mod person_router;
