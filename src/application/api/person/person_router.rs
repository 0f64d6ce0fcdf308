use hyper::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{value, Map, Value};

use crate::{
    application::api::router::{
        ApiResponse, APIError, HttpError, INTERNAL_ERROR, INVALID_FORMAT_ERROR, NOT_FOUND_ERROR,
    },
    domain::person::{Person, PersonError, PersonId, PersonManager, UpdatePerson},
};

#[derive(Deserialize)]
struct CreatePersonInput {
    firstname: Option<String>,
    lastname: Option<String>,
}

#[derive(Deserialize)]
struct UpdatePersonInput {
    id: PersonId,
    firstname: Option<String>,
    lastname: Option<String>,
}

impl From<UpdatePersonInput> for UpdatePerson {
    fn from(value: UpdatePersonInput) -> Self {
        Self {
            id: value.id,
            firstname: value.firstname,
            lastname: value.lastname,
        }
    }
}

#[derive(Serialize)]
struct GetPersonOutput {
    id: PersonId,
    firstname: String,
    lastname: String,
}

impl From<Person> for GetPersonOutput {
    fn from(value: Person) -> Self {
        return Self {
            id: value.id().unwrap_or_default(),
            firstname: value.firstname().clone(),
            lastname: value.lastname().clone(),
        };
    }
}

impl From<PersonError> for APIError {
    fn from(value: PersonError) -> Self {
        match value {
            PersonError::NotFound => APIError::RequestError(NOT_FOUND_ERROR),
            PersonError::ValidationFailed(errors) => APIError::ValidationError(errors),
            PersonError::Repository(e) => {
                tracing::error!(
                    error = %e,
                    "An internal error occured while making an action on Persons"
                );
                APIError::RequestError(INTERNAL_ERROR)
            }
        }
    }
}

/// Every operation the person resource answers to, resolved from method and path.
#[derive(Debug, PartialEq)]
enum PersonRoute {
    ListPeople,
    GetPerson(PersonId),
    CreatePerson,
    UpdatePerson,
    DeletePerson(PersonId),
}

fn parse_id(raw: &str) -> Result<PersonId, HttpError<'static>> {
    if raw.contains('/') {
        return Err(NOT_FOUND_ERROR);
    }
    raw.parse::<PersonId>().map_err(|_| {
        HttpError::new(400, "InvalidId", "The id you provided is not a valid integer")
    })
}

impl PersonRoute {
    fn resolve(method: &Method, resource: &str, path: &str) -> Result<Self, HttpError<'static>> {
        match (method, resource, path) {
            (&Method::GET, "people", "") => Ok(Self::ListPeople),
            (&Method::GET, "people", id) => Ok(Self::GetPerson(parse_id(id)?)),
            (&Method::POST, "people", "") => Ok(Self::CreatePerson),
            (&Method::PUT, "person", "") => Ok(Self::UpdatePerson),
            (&Method::DELETE, "people", id) if !id.is_empty() => {
                Ok(Self::DeletePerson(parse_id(id)?))
            }
            (_, _, _) => Err(NOT_FOUND_ERROR),
        }
    }
}

/// Missing body reads as an empty object, so absent fields reach validation.
/// Only JSON objects are accepted, arrays would otherwise bind fields by position.
fn input_from_body<T: for<'de> Deserialize<'de>>(body: Value) -> Result<T, APIError> {
    let body = match body {
        Value::Null => Value::Object(Map::new()),
        Value::Object(fields) => Value::Object(fields),
        other => {
            tracing::debug!(body = %other, "request body is not a JSON object");
            return Err(APIError::RequestError(INVALID_FORMAT_ERROR));
        }
    };
    serde_json::from_value(body).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        APIError::RequestError(INVALID_FORMAT_ERROR)
    })
}

fn to_body<T: Serialize>(output: T) -> Result<Value, APIError> {
    value::to_value(output).map_err(|e| {
        tracing::error!(
            error = ?e,
            "An internal error occured while converting persons to value"
        );
        APIError::RequestError(INTERNAL_ERROR)
    })
}

pub async fn router(
    resource: &str,
    path: &str,
    method: &Method,
    body: Value,
    person_manager: &PersonManager,
) -> Result<ApiResponse, APIError> {
    match PersonRoute::resolve(method, resource, path)? {
        PersonRoute::ListPeople => {
            let people: Vec<GetPersonOutput> = person_manager
                .list_people()
                .await?
                .into_iter()
                .map(GetPersonOutput::from)
                .collect();
            Ok(ApiResponse::new(StatusCode::OK, to_body(people)?))
        }
        PersonRoute::GetPerson(id) => {
            let person_found: GetPersonOutput = person_manager.get_person(id).await?.into();
            Ok(ApiResponse::new(StatusCode::OK, to_body(person_found)?))
        }
        PersonRoute::CreatePerson => {
            let input: CreatePersonInput = input_from_body(body)?;
            let created: GetPersonOutput = person_manager
                .create_person(
                    input.firstname.as_deref().unwrap_or_default(),
                    input.lastname.as_deref().unwrap_or_default(),
                )
                .await?
                .into();
            Ok(ApiResponse::new(StatusCode::OK, to_body(created)?))
        }
        PersonRoute::UpdatePerson => {
            let input: UpdatePersonInput = input_from_body(body)?;
            let updated: GetPersonOutput = person_manager.update_person(input.into()).await?.into();
            Ok(ApiResponse::new(StatusCode::OK, to_body(updated)?))
        }
        PersonRoute::DeletePerson(id) => {
            let message = person_manager.delete_person(id).await?;
            Ok(ApiResponse::new(StatusCode::NO_CONTENT, to_body(message)?))
        }
    }
}
