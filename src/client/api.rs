//! HTTP access to the `/books` API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientResult};
use crate::{
    error::ErrorResponse,
    models::book::{Book, BookPatch, BookResponse, BooksResponse, NewBook},
};

/// Remote book operations used by the client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> ClientResult<Vec<Book>>;

    async fn get_book(&self, id: &str) -> ClientResult<Book>;

    async fn create_book(&self, data: &NewBook) -> ClientResult<Book>;

    async fn update_book(&self, id: &str, patch: &BookPatch) -> ClientResult<Book>;

    async fn delete_book(&self, id: &str) -> ClientResult<()>;
}

/// [`BooksApi`] over HTTP with `reqwest`
#[derive(Clone)]
pub struct HttpBooksApi {
    client: Client,
    base_url: String,
}

impl HttpBooksApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let response = self.client.get(self.url("/books")).send().await?;
        let body: BooksResponse = decode(response).await?;
        Ok(body.books)
    }

    async fn get_book(&self, id: &str) -> ClientResult<Book> {
        let response = self
            .client
            .get(self.url(&format!("/books/{}", id)))
            .send()
            .await?;
        let body: BookResponse = decode(response).await?;
        Ok(body.book)
    }

    async fn create_book(&self, data: &NewBook) -> ClientResult<Book> {
        let response = self
            .client
            .post(self.url("/books"))
            .json(data)
            .send()
            .await?;
        let body: BookResponse = decode(response).await?;
        Ok(body.book)
    }

    async fn update_book(&self, id: &str, patch: &BookPatch) -> ClientResult<Book> {
        let response = self
            .client
            .put(self.url(&format!("/books/{}", id)))
            .json(patch)
            .send()
            .await?;
        let body: BookResponse = decode(response).await?;
        Ok(body.book)
    }

    async fn delete_book(&self, id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/books/{}", id)))
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(api_error(response).await)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(api_error(response).await)
}

/// Turn a failed response into [`ClientError::Api`], keeping the server message when there is one
async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message.to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
