//! # REST Source
//!
//! [`HttpSource<T>`] implements [`RemoteSource`] and [`FavoriteSource`] against a JSON
//! REST backend with `reqwest`:
//!
//! | Operation        | Request                                   | Body required |
//! |------------------|-------------------------------------------|---------------|
//! | `list`           | `GET    {base}/{collection}?{filter}`     | yes           |
//! | `get`            | `GET    {base}/{collection}/{id}`         | no (`None`)   |
//! | `create`         | `POST   {base}/{collection}`              | yes           |
//! | `update`         | `PUT    {base}/{collection}/{id}`         | yes           |
//! | `delete`         | `DELETE {base}/{collection}/{id}`         | no            |
//! | `is_favorite`    | `GET    {base}/{collection}/{id}/favorite`| yes (`bool`)  |
//! | `add_favorite`   | `PUT    {base}/{collection}/{id}/favorite`| no            |
//! | `remove_favorite`| `DELETE {base}/{collection}/{id}/favorite`| no            |
//!
//! A non-2xx answer becomes `RemoteError::Status` with the status code and the server's
//! message: the `message` field of a JSON error body such as
//! `{"message": "Title already taken"}`, or else the canonical reason phrase
//! (`Error 404: Not Found`). Transport and decoding failures become
//! `RemoteError::Exception`.

use crate::model::{Comment, Notification, Tutorial, User};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use resource_framework::{FavoriteSource, RemoteEntity, RemoteError, RemoteSource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// How an entity is laid out on the REST backend.
pub trait HttpEntity: RemoteEntity + DeserializeOwned {
    /// Path segment of the collection, e.g. `"tutorials"`.
    const COLLECTION: &'static str;

    /// Query parameters for a list request.
    fn list_query(_filter: &Self::Filter) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl HttpEntity for Tutorial {
    const COLLECTION: &'static str = "tutorials";
}

impl HttpEntity for Comment {
    const COLLECTION: &'static str = "comments";

    fn list_query(filter: &Self::Filter) -> Vec<(&'static str, String)> {
        filter
            .iter()
            .map(|tutorial_id| ("tutorial_id", tutorial_id.to_string()))
            .collect()
    }
}

impl HttpEntity for User {
    const COLLECTION: &'static str = "users";
}

impl HttpEntity for Notification {
    const COLLECTION: &'static str = "notifications";

    fn list_query(filter: &Self::Filter) -> Vec<(&'static str, String)> {
        filter
            .iter()
            .map(|recipient| ("recipient", recipient.to_string()))
            .collect()
    }
}

/// One REST collection.
pub struct HttpSource<T> {
    http: Client,
    base_url: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpSource<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: HttpEntity> HttpSource<T> {
    /// Create a source from a shared client and the backend's base URL.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::COLLECTION)
    }

    fn record_url(&self, id: &T::Id) -> String {
        format!("{}/{}/{}", self.base_url, T::COLLECTION, id)
    }

    fn favorite_url(&self, id: &T::Id) -> String {
        format!("{}/favorite", self.record_url(id))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        debug!(%method, %url, "HTTP request");
        self.http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

/// Error body some backends send along with a non-2xx status.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// The server's `message` if the body carries one, the reason phrase otherwise.
fn status_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|error| error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string()
        })
}

/// Sends the request and returns the body, `None` when it is empty.
async fn send(request: RequestBuilder) -> Result<Option<Vec<u8>>, RemoteError> {
    let response: Response = request.send().await.map_err(RemoteError::exception)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(RemoteError::status(
            status.as_u16(),
            status_message(status, &body),
        ));
    }

    let body = response.bytes().await.map_err(RemoteError::exception)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(None)
    } else {
        Ok(Some(body.to_vec()))
    }
}

fn decode<U: DeserializeOwned>(body: &[u8]) -> Result<U, RemoteError> {
    serde_json::from_slice(body).map_err(RemoteError::exception)
}

/// Sends the request and decodes a body that must be present.
async fn fetch<U: DeserializeOwned>(request: RequestBuilder) -> Result<U, RemoteError> {
    let body = send(request).await?.ok_or(RemoteError::EmptyBody)?;
    decode(&body)
}

#[async_trait]
impl<T> RemoteSource<T> for HttpSource<T>
where
    T: HttpEntity,
    T::Create: Serialize,
    T::Update: Serialize,
{
    async fn list(&self, filter: &T::Filter) -> Result<Vec<T>, RemoteError> {
        let query = T::list_query(filter);
        fetch(self.request(Method::GET, self.collection_url()).query(&query)).await
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, RemoteError> {
        match send(self.request(Method::GET, self.record_url(id))).await? {
            Some(body) => decode(&body).map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, params: T::Create) -> Result<T, RemoteError> {
        fetch(self.request(Method::POST, self.collection_url()).json(&params)).await
    }

    async fn update(&self, id: &T::Id, update: T::Update) -> Result<T, RemoteError> {
        fetch(self.request(Method::PUT, self.record_url(id)).json(&update)).await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        send(self.request(Method::DELETE, self.record_url(id))).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: HttpEntity> FavoriteSource<T> for HttpSource<T> {
    async fn is_favorite(&self, id: &T::Id) -> Result<bool, RemoteError> {
        fetch(self.request(Method::GET, self.favorite_url(id))).await
    }

    async fn add_favorite(&self, id: &T::Id) -> Result<(), RemoteError> {
        send(self.request(Method::PUT, self.favorite_url(id))).await?;
        Ok(())
    }

    async fn remove_favorite(&self, id: &T::Id) -> Result<(), RemoteError> {
        send(self.request(Method::DELETE, self.favorite_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TutorialId;

    #[test]
    fn test_urls() {
        let source = HttpSource::<Tutorial>::new(Client::new(), "http://localhost:8080/api/");
        let id = TutorialId::from("abc");
        assert_eq!(source.collection_url(), "http://localhost:8080/api/tutorials");
        assert_eq!(source.record_url(&id), "http://localhost:8080/api/tutorials/abc");
        assert_eq!(
            source.favorite_url(&id),
            "http://localhost:8080/api/tutorials/abc/favorite"
        );
    }

    #[test]
    fn test_comment_list_query() {
        assert!(Comment::list_query(&None).is_empty());
        assert_eq!(
            Comment::list_query(&Some("t1".into())),
            vec![("tutorial_id", "t1".to_string())]
        );
    }

    #[test]
    fn test_status_message_prefers_the_server_message() {
        assert_eq!(
            status_message(StatusCode::CONFLICT, br#"{"message":"Title already taken"}"#),
            "Title already taken"
        );
        assert_eq!(status_message(StatusCode::NOT_FOUND, b""), "Not Found");
        assert_eq!(
            status_message(StatusCode::BAD_GATEWAY, b"<html>upstream down</html>"),
            "Bad Gateway"
        );
        assert_eq!(
            status_message(StatusCode::BAD_REQUEST, br#"{"message":"  "}"#),
            "Bad Request"
        );
    }

    #[test]
    fn test_decode_failure_is_exception() {
        let result: Result<Vec<Tutorial>, _> = decode(b"{not json");
        assert!(matches!(result, Err(RemoteError::Exception(_))));
    }
}
