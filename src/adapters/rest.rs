//! REST implementation of [`PostSource`] using reqwest.
//!
//! Talks to the server's v4 JSON API with a bearer session token.
//! Transport and status failures are translated into structured
//! [`FetchError`]s at this boundary; nothing above it ever sees a raw
//! reqwest error.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{classify_reqwest_error, FetchError, FetchResult};
use crate::models::{Channel, ChannelNotifyProps, PostId, PostThread};
use crate::traits::PostSource;

/// Production post source backed by the server's REST API.
#[derive(Debug, Clone)]
pub struct RestPostSource {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestPostSource {
    /// Create a source for the given server with a session token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create a source with a preconfigured reqwest client, e.g. with
    /// custom timeouts or proxy settings.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url, token: token.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.token))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|err| classify_reqwest_error(&err))?;
        Self::decode(response).await
    }

    async fn send_json(
        &self,
        builder: reqwest::RequestBuilder,
        body: &serde_json::Value,
    ) -> FetchResult<()> {
        let response = self
            .authorized(builder)
            .json(body)
            .send()
            .await
            .map_err(|err| classify_reqwest_error(&err))?;
        Self::check_status(&response)?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> FetchResult<T> {
        Self::check_status(&response)?;
        response
            .json::<T>()
            .await
            .map_err(|err| FetchError::invalid_response(err.to_string()))
    }

    fn check_status(response: &reqwest::Response) -> FetchResult<()> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(format!(
                "{} returned 404",
                response.url()
            )));
        }
        if !status.is_success() {
            return Err(FetchError::server(
                status.as_u16(),
                format!("{} returned {}", response.url(), status),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PostSource for RestPostSource {
    async fn get_post_thread(&self, post_id: &str) -> FetchResult<PostThread> {
        self.get_json(&format!("posts/{}/thread", urlencoding::encode(post_id)))
            .await
    }

    async fn get_channel(&self, channel_id: &str) -> FetchResult<Channel> {
        self.get_json(&format!("channels/{}", urlencoding::encode(channel_id)))
            .await
    }

    async fn join_channel(
        &self,
        user_id: &str,
        team_id: &str,
        channel_id: &str,
    ) -> FetchResult<()> {
        let url = self.url(&format!("channels/{}/members", urlencoding::encode(channel_id)));
        tracing::debug!(%url, "POST join");
        self.send_json(
            self.client.post(&url),
            &serde_json::json!({ "user_id": user_id, "team_id": team_id }),
        )
        .await
    }

    async fn get_posts_around(
        &self,
        channel_id: &str,
        post_id: &str,
        count: usize,
    ) -> FetchResult<Vec<PostId>> {
        let thread: PostThread = self
            .get_json(&format!(
                "channels/{}/posts?around={}&per_page={}",
                urlencoding::encode(channel_id),
                urlencoding::encode(post_id),
                count
            ))
            .await?;
        Ok(thread.order)
    }

    async fn get_pinned_posts(&self, channel_id: &str) -> FetchResult<Vec<PostId>> {
        let thread: PostThread = self
            .get_json(&format!("channels/{}/pinned", urlencoding::encode(channel_id)))
            .await?;
        Ok(thread.order)
    }

    async fn update_channel_notify_props(
        &self,
        user_id: &str,
        channel_id: &str,
        props: ChannelNotifyProps,
    ) -> FetchResult<()> {
        let url = self.url(&format!(
            "channels/{}/members/{}/notify_props",
            urlencoding::encode(channel_id),
            urlencoding::encode(user_id)
        ));
        tracing::debug!(%url, "PUT notify props");
        let body = serde_json::to_value(&props)
            .map_err(|err| FetchError::other(err.to_string()))?;
        self.send_json(self.client.put(&url), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = RestPostSource::new("https://chat.example.com/", "token");
        assert_eq!(
            source.url("posts/p1/thread"),
            "https://chat.example.com/api/v4/posts/p1/thread"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let encoded = urlencoding::encode("post/with?chars");
        assert_eq!(encoded, "post%2Fwith%3Fchars");
    }
}
