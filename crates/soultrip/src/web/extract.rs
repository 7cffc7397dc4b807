//! Request body extractors.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Request};
use axum::http::request::Parts;
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::uploads::UploadedFile;

/// A body sent either as JSON or as an urlencoded form.
///
/// The admin scripts post JSON while plain HTML forms post urlencoded data;
/// handlers accept both.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

/// Numeric record id from the last path segment of an admin API route.
///
/// A malformed id answers with the JSON error body instead of axum's plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::bad_request("Invalid id"))
    }
}

/// A multipart body split into text fields and files.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        Self::read(multipart).await
    }
}

impl MultipartForm {
    /// Read every part. File inputs left empty by the browser are skipped.
    ///
    /// # Errors
    ///
    /// Returns the multipart error's status (413 when the body is over the
    /// limit, 400 otherwise).
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(ToString::to_string);
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;

            match file_name {
                Some(file_name) => {
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    form.fields
                        .insert(name, String::from_utf8_lossy(&bytes).into_owned());
                }
            }
        }
        Ok(form)
    }

    /// Remove and return the file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// A text field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Deserialize the text fields into `T`, the way a form body would be.
    ///
    /// # Errors
    ///
    /// Returns 400 when the fields do not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| ApiError::bad_request(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Login {
        username: String,
        password: String,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_json() {
        let req = request("application/json", r#"{"username":"admin","password":"pw"}"#);
        let JsonOrForm(login) = JsonOrForm::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.username, "admin");
    }

    #[tokio::test]
    async fn test_reads_form() {
        let req = request("application/x-www-form-urlencoded", "username=admin&password=p%26w");
        let JsonOrForm(login) = JsonOrForm::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.password, "p&w");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = request("application/json", "{not json");
        let err = JsonOrForm::<Login>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_fields() {
        let mut form = MultipartForm::default();
        form.fields.insert("username".to_string(), "admin".to_string());
        form.fields.insert("password".to_string(), "pw".to_string());
        let login: Login = form.parse().unwrap();
        assert_eq!(
            login,
            Login {
                username: "admin".to_string(),
                password: "pw".to_string()
            }
        );
        assert_eq!(form.field("username"), Some("admin"));
        assert!(form.take_file("image").is_none());
    }
}
