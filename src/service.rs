//! Clients for the external collaborators: the data service that owns
//! snippets and collections, and the session provider.

use {
  super::*,
  http::{header, HeaderMap, StatusCode},
  reqwest::{Client, RequestBuilder},
  serde::de::DeserializeOwned,
};

pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("{reason}")]
  Status { status: StatusCode, reason: String },
  #[error("unexpected response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

impl ServiceError {
  pub(crate) fn status(status: StatusCode) -> Self {
    Self::Status {
      status,
      reason: status
        .canonical_reason()
        .filter(|reason| !reason.is_empty())
        .unwrap_or(GENERIC_FAILURE)
        .into(),
    }
  }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct SnippetQuery {
  pub logged_in_user: Option<String>,
  pub search_query: Option<String>,
  pub page: u32,
}

#[async_trait::async_trait]
pub trait DataService: Send + Sync {
  async fn public_snippets(&self, query: &SnippetQuery) -> Result<SnippetData, ServiceError>;

  /// Collections owned by `user`, requested with the viewer's credentials
  /// from `headers`.
  async fn user_collections(
    &self,
    user: &str,
    headers: &HeaderMap,
  ) -> Result<Vec<CollectionWithCount>, ServiceError>;

  async fn update_collection(
    &self,
    id: &str,
    update: &CollectionUpdate,
    headers: &HeaderMap,
  ) -> Result<(), ServiceError>;
}

#[async_trait::async_trait]
pub trait SessionLookup: Send + Sync {
  /// The session attached to a request, or `None` for anonymous viewers.
  async fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, ServiceError>;
}

async fn send(request: RequestBuilder, url: &Url) -> Result<reqwest::Response, ServiceError> {
  let response = request.send().await.map_err(|source| ServiceError::Transport {
    url: url.to_string(),
    source,
  })?;

  if response.status().is_success() {
    Ok(response)
  } else {
    Err(ServiceError::status(response.status()))
  }
}

async fn decode<T: DeserializeOwned>(
  response: reqwest::Response,
  url: &Url,
) -> Result<T, ServiceError> {
  response.json().await.map_err(|source| ServiceError::Decode {
    url: url.to_string(),
    source,
  })
}

fn with_cookie(request: RequestBuilder, headers: &HeaderMap) -> RequestBuilder {
  match headers.get(header::COOKIE) {
    Some(cookie) => request.header(header::COOKIE, cookie.clone()),
    None => request,
  }
}

/// `path` resolved beneath `base`, keeping any path prefix `base` has.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url> {
  let mut base = base.clone();
  base.set_query(None);
  base.set_fragment(None);

  if !base.path().ends_with('/') {
    let prefix = format!("{}/", base.path());
    base.set_path(&prefix);
  }

  base
    .join(path)
    .with_context(|| format!("failed to resolve `{path}` against {base}"))
}

pub struct HttpDataService {
  client: Client,
  collection_url: Url,
  collections_url: Url,
  snippets_url: Url,
}

impl HttpDataService {
  pub fn new(base: Url, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client: Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build data service client")?,
      collection_url: endpoint(&base, "api/collection")?,
      collections_url: endpoint(&base, "api/collections")?,
      snippets_url: endpoint(&base, "api/snippets/public")?,
    })
  }
}

#[async_trait::async_trait]
impl DataService for HttpDataService {
  async fn public_snippets(&self, query: &SnippetQuery) -> Result<SnippetData, ServiceError> {
    let mut url = self.snippets_url.clone();

    {
      let mut pairs = url.query_pairs_mut();
      pairs.append_pair("page", &query.page.to_string());
      if let Some(search) = &query.search_query {
        pairs.append_pair("q", search);
      }
      if let Some(user) = &query.logged_in_user {
        pairs.append_pair("user", user);
      }
    }

    log::debug!("Fetching public snippets from {url}");

    decode(send(self.client.get(url.clone()), &url).await?, &url).await
  }

  async fn user_collections(
    &self,
    user: &str,
    headers: &HeaderMap,
  ) -> Result<Vec<CollectionWithCount>, ServiceError> {
    let mut url = self.collections_url.clone();
    url.query_pairs_mut().append_pair("user", user);

    decode(
      send(with_cookie(self.client.get(url.clone()), headers), &url).await?,
      &url,
    )
    .await
  }

  async fn update_collection(
    &self,
    id: &str,
    update: &CollectionUpdate,
    headers: &HeaderMap,
  ) -> Result<(), ServiceError> {
    let mut url = self.collection_url.clone();
    url.query_pairs_mut().append_pair("id", id);

    send(
      with_cookie(self.client.patch(url.clone()).json(update), headers),
      &url,
    )
    .await?;

    Ok(())
  }
}

pub struct HttpSessionLookup {
  client: Client,
  session_url: Url,
}

impl HttpSessionLookup {
  pub fn new(base: Url, timeout: Duration) -> Result<Self> {
    Ok(Self {
      client: Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build session client")?,
      session_url: endpoint(&base, "api/auth/session")?,
    })
  }
}

/// Body of the session endpoint, `{}` when nobody is signed in.
#[derive(Deserialize)]
struct SessionResponse {
  #[serde(default)]
  user: Option<api::SessionUser>,
}

#[async_trait::async_trait]
impl SessionLookup for HttpSessionLookup {
  async fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, ServiceError> {
    if !headers.contains_key(header::COOKIE) {
      return Ok(None);
    }

    let url = &self.session_url;

    let response: SessionResponse = decode(
      send(with_cookie(self.client.get(url.clone()), headers), url).await?,
      url,
    )
    .await?;

    Ok(response.user.map(|user| Session { user }))
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::test::pretty_assert_eq};

  #[test]
  fn endpoint_drops_query() {
    pretty_assert_eq!(
      endpoint(&"http://data.example/?x=1#top".parse().unwrap(), "api/collection")
        .unwrap()
        .as_str(),
      "http://data.example/api/collection"
    );
  }

  #[test]
  fn endpoint_keeps_base_path() {
    for base in ["http://gw.example/snipshare", "http://gw.example/snipshare/"] {
      pretty_assert_eq!(
        endpoint(&base.parse().unwrap(), "api/collection")
          .unwrap()
          .as_str(),
        "http://gw.example/snipshare/api/collection",
        "{base}"
      );
    }
  }

  #[test]
  fn endpoints_share_the_base_path() {
    let base = "http://gw.example/snipshare/".parse::<Url>().unwrap();

    let service = HttpDataService::new(base.clone(), Duration::from_secs(1)).unwrap();

    pretty_assert_eq!(
      service.collection_url.as_str(),
      "http://gw.example/snipshare/api/collection"
    );
    pretty_assert_eq!(
      service.snippets_url.as_str(),
      "http://gw.example/snipshare/api/snippets/public"
    );
    pretty_assert_eq!(
      HttpSessionLookup::new(base, Duration::from_secs(1))
        .unwrap()
        .session_url
        .as_str(),
      "http://gw.example/snipshare/api/auth/session"
    );
  }

  #[test]
  fn cookie_is_forwarded() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, "session=abc".parse().unwrap());

    let request = with_cookie(Client::new().get("http://data.example/"), &headers)
      .build()
      .unwrap();

    pretty_assert_eq!(request.headers()[header::COOKIE], "session=abc");

    let request = with_cookie(Client::new().get("http://data.example/"), &HeaderMap::new())
      .build()
      .unwrap();

    assert!(!request.headers().contains_key(header::COOKIE));
  }

  #[test]
  fn status_error_uses_canonical_reason() {
    pretty_assert_eq!(
      ServiceError::status(StatusCode::INTERNAL_SERVER_ERROR).to_string(),
      "Internal Server Error"
    );
  }

  #[test]
  fn status_error_without_reason_is_generic() {
    pretty_assert_eq!(
      ServiceError::status(StatusCode::from_u16(599).unwrap()).to_string(),
      GENERIC_FAILURE
    );
  }
}
