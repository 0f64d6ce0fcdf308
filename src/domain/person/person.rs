pub type PersonId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: Option<PersonId>,
    firstname: String,
    lastname: String,
}

impl Person {
    /// Builds a record that has not been saved yet, the store assigns its id.
    pub fn new(firstname: &str, lastname: &str) -> Self {
        Self {
            id: None,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        }
    }

    pub fn with_id(id: PersonId, firstname: &str, lastname: &str) -> Self {
        Self {
            id: Some(id),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        }
    }

    pub fn id(&self) -> Option<PersonId> {
        self.id
    }
    pub fn firstname(&self) -> &String {
        &self.firstname
    }
    pub fn lastname(&self) -> &String {
        &self.lastname
    }

    pub fn set_firstname(&mut self, firstname: &str) {
        self.firstname = firstname.to_string();
    }
    pub fn set_lastname(&mut self, lastname: &str) {
        self.lastname = lastname.to_string();
    }
}
