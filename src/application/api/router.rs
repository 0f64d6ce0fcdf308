use std::{fmt::Debug, io::Error, net::SocketAddr};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Body,
    header::{self, HeaderValue},
    server::conn::http1,
    Method, Request, Response, StatusCode,
};
use hyper_util::{rt::TokioIo, service::TowerToHyperService};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    application::api::person::person_router,
    domain::person::{FieldErrors, PersonManager},
};

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

#[derive(Debug, Serialize, PartialEq)]
pub struct HttpError<'a> {
    code: u16,
    error: &'a str,
    details: &'a str,
}
impl<'a> HttpError<'a> {
    pub const fn new(code: u16, error: &'a str, details: &'a str) -> Self {
        HttpError {
            code,
            error,
            details,
        }
    }
}

pub const INTERNAL_ERROR: HttpError = HttpError {
    code: 500,
    error: "InternalError",
    details: "An internal error occured, please contact our technical service",
};

pub const NOT_FOUND_ERROR: HttpError = HttpError {
    code: 404,
    error: "NotFound",
    details: "Data not found.",
};

pub const INVALID_FORMAT_ERROR: HttpError = HttpError {
    code: 400,
    error: "InvalidFormat",
    details: "The body format is invalid. Please refer to the documentation",
};

#[derive(Debug)]
pub enum APIError {
    ConfigurationError(String),
    RequestError(HttpError<'static>),
    ValidationError(FieldErrors),
}

impl From<HttpError<'static>> for APIError {
    fn from(value: HttpError<'static>) -> Self {
        APIError::RequestError(value)
    }
}

impl From<APIError> for Response<BoxBody> {
    fn from(value: APIError) -> Self {
        match value {
            APIError::RequestError(err) => json_response(
                StatusCode::from_u16(err.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                &err,
            ),
            // Validation failures answer with the bare field -> messages map.
            APIError::ValidationError(errors) => json_response(StatusCode::BAD_REQUEST, &errors),
            APIError::ConfigurationError(e) => {
                tracing::error!(error = %e, "configuration error while serving a request");
                json_response(StatusCode::INTERNAL_SERVER_ERROR, &INTERNAL_ERROR)
            }
        }
    }
}

/// Successful outcome of a route: status code and JSON body.
#[derive(Debug, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl From<ApiResponse> for Response<BoxBody> {
    fn from(value: ApiResponse) -> Self {
        json_response(value.status, &value.body)
    }
}

pub struct MainRouter {
    addr: SocketAddr,
    person_manager: PersonManager,
}

impl MainRouter {
    pub fn new(addr: SocketAddr, person_manager: PersonManager) -> Self {
        return Self {
            addr,
            person_manager,
        };
    }

    pub async fn run(&self) -> Result<(), APIError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| APIError::ConfigurationError(e.to_string()))?;
        tracing::info!(addr = %self.addr, "people api listening");
        // We start a loop to continuously accept incoming connections
        loop {
            let (stream, _) = tokio::select! {
                accepted = listener.accept() => {
                    accepted.map_err(|e| APIError::ConfigurationError(e.to_string()))?
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown requested, no longer accepting connections");
                    return Ok(());
                }
            };

            // Use an adapter to access something implementing `tokio::io` traits as if they implement
            // `hyper::rt` IO traits.
            let io = TokioIo::new(stream);

            let person_manager_cloned = self.person_manager.clone();
            tokio::task::spawn(async move {
                let cors = CorsLayer::new()
                    .allow_origin(AllowOrigin::any())
                    .allow_methods(vec![
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers(vec![header::CONTENT_TYPE]);
                let service = ServiceBuilder::new().layer(cors).service_fn(|r| {
                    let person_manager_cloned = person_manager_cloned.clone();
                    async {
                        let res = match route_requests(r, person_manager_cloned).await {
                            Ok(r) => r,
                            Err(e) => e.into(),
                        };
                        Ok::<Response<BoxBody>, Error>(res)
                    }
                });
                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, TowerToHyperService::new(service))
                    .await
                {
                    tracing::error!(error = ?err, "error serving connection");
                }
            });
        }
    }
}

pub async fn route_requests<B>(
    request: Request<B>,
    person_manager: PersonManager,
) -> Result<Response<BoxBody>, APIError>
where
    B: Body,
    B::Error: Debug,
{
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let method = parts.method;
    tracing::info!(method = %method, path = %path, "request");
    let whole_body = body
        .collect()
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "cannot read request body");
            APIError::RequestError(INTERNAL_ERROR)
        })?
        .to_bytes();
    // An empty body reads as null, anything else has to be valid JSON.
    let body: Value = if whole_body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&whole_body).map_err(|e| {
            tracing::debug!(error = %e, "unparsable request body");
            APIError::RequestError(INVALID_FORMAT_ERROR)
        })?
    };
    let mut splitted_path = path.split("/").skip(1);
    match splitted_path.next() {
        Some(api_str) => {
            if api_str != "api" {
                return Err(APIError::RequestError(HttpError {
                    code: 400,
                    error: "InvalidRoute",
                    details: "The route format seems invalid",
                }));
            }
        }
        None => return Err(APIError::RequestError(NOT_FOUND_ERROR)),
    }
    let resp = match splitted_path.next() {
        Some(val) => {
            let partial_path = &splitted_path.collect::<Vec<&str>>().join("/");
            match val {
                "people" | "person" => {
                    person_router::router(val, partial_path, &method, body, &person_manager)
                        .await?
                }
                _ => return Err(APIError::RequestError(NOT_FOUND_ERROR)),
            }
        }
        None => return Err(APIError::RequestError(NOT_FOUND_ERROR)),
    };
    Ok(resp.into())
}

fn full<T: Into<Bytes>>(chunk: T) -> BoxBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "cannot serialize response body");
        "null".to_owned()
    });
    let mut response = Response::new(full(json));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
