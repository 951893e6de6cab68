use super::{Storage, StorageError};
use crate::model::{EventPhoto, Member};
use axum::async_trait;
use reqwest::{Client, Response};

const MEMBERS_TABLE: &str = "membros";
const PHOTOS_TABLE: &str = "fotos_evento";

/// Hosted table store, one request per operation. No retries, no
/// pagination; collections fit in one response.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    key: String,
}

impl RemoteStore {
    pub fn new(client: Client, base_url: &str, key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            key: key.to_owned(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }

    async fn expect_success(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(StorageError::Upstream {
                status: status.as_u16(),
                detail,
            })
        }
    }

    async fn fetch_photos(&self) -> Result<Vec<EventPhoto>, StorageError> {
        let response = self
            .authed(self.client.get(self.table_url(PHOTOS_TABLE)))
            .query(&[("select", "*"), ("order", "createdAt.desc")])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Storage for RemoteStore {
    async fn members(&self) -> Result<Vec<Member>, StorageError> {
        let response = self
            .authed(self.client.get(self.table_url(MEMBERS_TABLE)))
            .query(&[("select", "*"), ("order", "createdAt.desc")])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn add_member(&self, member: Member) -> Result<(), StorageError> {
        let response = self
            .authed(self.client.post(self.table_url(MEMBERS_TABLE)))
            .header("Prefer", "return=minimal")
            .json(&[member])
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete_member(&self, id: &str) -> Result<(), StorageError> {
        // zero matched rows is still a success upstream
        let response = self
            .authed(self.client.delete(self.table_url(MEMBERS_TABLE)))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn event_photos(&self) -> Result<Vec<EventPhoto>, StorageError> {
        match self.fetch_photos().await {
            Ok(photos) => Ok(photos),
            Err(error) => {
                tracing::warn!("mural fetch failed, showing empty board: {}", error);
                Ok(Vec::new())
            }
        }
    }

    async fn add_event_photos(&self, photos: &[EventPhoto]) -> Result<(), StorageError> {
        let response = self
            .authed(self.client.post(self.table_url(PHOTOS_TABLE)))
            .header("Prefer", "return=minimal")
            .json(&photos)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_urls_are_rooted_at_rest_v1() {
        let store = RemoteStore::new(Client::new(), "https://x.example", "k");
        assert_eq!(
            store.table_url(MEMBERS_TABLE),
            "https://x.example/rest/v1/membros"
        );
        assert_eq!(
            store.table_url(PHOTOS_TABLE),
            "https://x.example/rest/v1/fotos_evento"
        );
    }

    #[test]
    fn trailing_slash_in_endpoint_is_tolerated() {
        let store = RemoteStore::new(Client::new(), "https://x.example/", "k");
        assert_eq!(
            store.table_url(MEMBERS_TABLE),
            "https://x.example/rest/v1/membros"
        );
    }
}
