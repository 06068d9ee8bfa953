use crate::auth::AppToken;
use gemharvest_core::{CoreError, RedditApiError, Submission};
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: Option<String>,
    pub url: String,
    pub created_utc: f64,
}

#[derive(Debug)]
pub struct RedditApiClient {
    pub(crate) http_client: Client,
    pub(crate) user_agent: String,
    pub(crate) token: Option<AppToken>,
}

impl RedditApiClient {
    pub fn new(user_agent: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            user_agent,
            token: None,
        })
    }

    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let token = self
            .token
            .as_ref()
            .ok_or(CoreError::RedditApi(RedditApiError::NotAuthenticated))?;
        let url = format!("{}{}", REDDIT_API_BASE, endpoint);

        let mut request_builder = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(&token.access_token)
            .header("User-Agent", &self.user_agent);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        info!("Making Reddit API request: {} {}", method, endpoint);
        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        if response.status().is_success() {
            debug!("Request successful: {} {}", response.status(), endpoint);
            return Ok(response);
        }

        error!(
            "Request failed with status: {} for {}",
            response.status(),
            endpoint
        );
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        Err(CoreError::RedditApi(status_to_error(
            response.status().as_u16(),
            retry_after,
            endpoint,
        )))
    }

    /// Fetches one page of `/r/<subreddit>/new`, newest first. `after` is
    /// the opaque pagination cursor from the previous page.
    pub async fn get_new_posts(
        &self,
        subreddit: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<RedditListing<RedditPostData>, CoreError> {
        let endpoint = format!("/r/{}/new", subreddit);
        let limit_str = limit.to_string();
        let mut params = vec![("limit", limit_str.as_str())];
        if let Some(after_val) = after {
            params.push(("after", after_val));
        }

        let response = self
            .make_request(Method::GET, &endpoint, Some(params.as_slice()))
            .await?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{}", subreddit),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{}",
            listing.data.children.len(),
            subreddit
        );
        Ok(listing)
    }
}

/// Maps a non-success HTTP status to the error it represents.
/// `retry_after` is the parsed retry-after header, if any; absent or
/// unparsable values fall back to 60 seconds.
fn status_to_error(status: u16, retry_after: Option<u64>, endpoint: &str) -> RedditApiError {
    match status {
        429 => {
            let retry_after = retry_after.unwrap_or(60);
            warn!("Rate limited, retry after {} seconds", retry_after);
            RedditApiError::RateLimitExceeded { retry_after }
        }
        401 => RedditApiError::InvalidToken,
        403 => RedditApiError::Forbidden {
            resource: endpoint.to_string(),
        },
        404 => match subreddit_of(endpoint) {
            Some(subreddit) => RedditApiError::SubredditNotFound { subreddit },
            None => RedditApiError::InvalidResponse {
                details: "Resource not found".to_string(),
            },
        },
        500..=599 => RedditApiError::ServerError {
            status_code: status,
        },
        other => RedditApiError::InvalidResponse {
            details: format!("Unexpected status {other} for {endpoint}"),
        },
    }
}

/// The subreddit name from a `/r/<subreddit>/...` endpoint, so a 404 on
/// a listing can name what was missing.
fn subreddit_of(endpoint: &str) -> Option<String> {
    endpoint
        .strip_prefix("/r/")
        .and_then(|rest| rest.split('/').next())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
}

impl From<RedditPostData> for Submission {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            id: post_data.id,
            title: post_data.title,
            selftext: post_data.selftext,
            author: post_data
                .author
                .filter(|name| !name.is_empty() && name != "[deleted]"),
            created_utc: post_data.created_utc as i64,
            url: post_data.url,
        }
    }
}
