use {super::*, crate::query::QueryParams};

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for QueryParams
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut http::request::Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    Ok(Self::parse(parts.uri.query()))
  }
}
