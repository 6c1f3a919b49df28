use {
  axum::{
    extract::{Json, Query, State as Shared},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
  },
  serde::Deserialize,
  serde_json::{json, Value},
  std::{
    collections::BTreeMap,
    net::TcpListener,
    sync::{Arc, Mutex, MutexGuard},
    thread,
    time::Duration,
  },
  tokio::{runtime::Runtime, sync::oneshot},
};

pub const SESSION_COOKIE: &str = "next-auth.session-token";

pub fn builder() -> Builder {
  Builder {
    state: State {
      page_size: 10,
      ..Default::default()
    },
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snippet {
  pub id: String,
  pub title: String,
  pub description: Option<String>,
  pub content: String,
  pub language: Option<String>,
  pub author: String,
  pub created_at: String,
  pub public: bool,
}

impl Snippet {
  pub fn new(id: &str, title: &str, author: &str) -> Self {
    Self {
      id: id.into(),
      title: title.into(),
      description: None,
      content: format!("// {title}"),
      language: None,
      author: author.into(),
      created_at: "2024-01-01T00:00:00Z".into(),
      public: true,
    }
  }

  fn to_json(&self, viewer: Option<&str>) -> Value {
    json!({
      "id": self.id,
      "title": self.title,
      "description": self.description,
      "content": self.content,
      "language": self.language,
      "author": self.author,
      "createdAt": self.created_at,
      "isSnippetOwner": viewer == Some(self.author.as_str()),
    })
  }

  fn matches(&self, search: &str) -> bool {
    let search = search.to_lowercase();

    [Some(&self.title), self.description.as_ref(), Some(&self.content)]
      .into_iter()
      .flatten()
      .any(|field| field.to_lowercase().contains(&search))
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
  pub id: String,
  pub owner: String,
  pub title: String,
  pub description: Option<String>,
  pub is_private: bool,
  pub snippets: u64,
}

impl Collection {
  pub fn new(id: &str, owner: &str, title: &str) -> Self {
    Self {
      id: id.into(),
      owner: owner.into(),
      title: title.into(),
      description: None,
      is_private: false,
      snippets: 0,
    }
  }

  fn to_json(&self) -> Value {
    json!({
      "id": self.id,
      "title": self.title,
      "description": self.description,
      "isPrivate": self.is_private,
      "_count": { "snippets": self.snippets },
    })
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct User {
  pub id: String,
  pub name: Option<String>,
}

impl User {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      id: id.into(),
      name: Some(name.into()),
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Update {
  pub id: String,
  pub user: String,
  pub title: String,
  pub description: String,
  pub is_private: bool,
}

#[derive(Debug, Default)]
pub struct State {
  pub collections: Vec<Collection>,
  pub failing_updates: Option<u16>,
  pub page_size: usize,
  pub requests: Vec<String>,
  pub sessions: BTreeMap<String, User>,
  pub snippets: Vec<Snippet>,
  pub stalled_updates: bool,
  pub unavailable: bool,
  pub updates: Vec<Update>,
}

pub struct Builder {
  state: State,
}

impl Builder {
  pub fn snippet(mut self, snippet: Snippet) -> Self {
    self.state.snippets.push(snippet);
    self
  }

  pub fn collection(mut self, collection: Collection) -> Self {
    self.state.collections.push(collection);
    self
  }

  pub fn session(mut self, token: &str, user: User) -> Self {
    self.state.sessions.insert(token.into(), user);
    self
  }

  pub fn page_size(mut self, page_size: usize) -> Self {
    self.state.page_size = page_size;
    self
  }

  pub fn build(self) -> Handle {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let state = Arc::new(Mutex::new(self.state));

    let router = Router::new()
      .route("/api/auth/session", get(session))
      .route("/api/collection", patch(update_collection))
      .route("/api/collections", get(collections))
      .route("/api/snippets/public", get(public_snippets))
      .with_state(state.clone());

    let (shutdown, signal) = oneshot::channel::<()>();

    thread::spawn(move || {
      Runtime::new().unwrap().block_on(async {
        axum::Server::from_tcp(listener)
          .unwrap()
          .serve(router.into_make_service())
          .with_graceful_shutdown(async {
            signal.await.ok();
          })
          .await
          .unwrap()
      })
    });

    Handle {
      port,
      shutdown: Some(shutdown),
      state,
    }
  }
}

pub struct Handle {
  port: u16,
  shutdown: Option<oneshot::Sender<()>>,
  state: Arc<Mutex<State>>,
}

impl Handle {
  pub fn url(&self) -> String {
    format!("http://127.0.0.1:{}", self.port)
  }

  pub fn state(&self) -> MutexGuard<State> {
    self.state.lock().unwrap()
  }

  pub fn fail_updates(&self, status: u16) {
    self.state().failing_updates = Some(status);
  }

  pub fn stall_updates(&self) {
    self.state().stalled_updates = true;
  }

  pub fn set_unavailable(&self) {
    self.state().unavailable = true;
  }

  pub fn updates(&self) -> Vec<Update> {
    self.state().updates.clone()
  }

  pub fn requests(&self) -> Vec<String> {
    self.state().requests.clone()
  }

  pub fn collection(&self, id: &str) -> Option<Collection> {
    self
      .state()
      .collections
      .iter()
      .find(|collection| collection.id == id)
      .cloned()
  }
}

impl Drop for Handle {
  fn drop(&mut self) {
    if let Some(shutdown) = self.shutdown.take() {
      shutdown.send(()).ok();
    }
  }
}

#[derive(Deserialize)]
struct SnippetParams {
  page: Option<usize>,
  q: Option<String>,
  user: Option<String>,
}

#[derive(Deserialize)]
struct UserParams {
  user: String,
}

#[derive(Deserialize)]
struct IdParams {
  id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
  title: String,
  description: String,
  is_private: bool,
}

type SharedState = Arc<Mutex<State>>;

impl State {
  fn viewer(&self, headers: &HeaderMap) -> Option<&User> {
    let token = headers
      .get(header::COOKIE)
      .and_then(|cookie| cookie.to_str().ok())
      .and_then(|cookie| {
        cookie
          .split(';')
          .filter_map(|pair| pair.trim().split_once('='))
          .find(|(name, _)| *name == SESSION_COOKIE)
          .map(|(_, value)| value.to_owned())
      })?;

    self.sessions.get(&token)
  }
}

async fn public_snippets(
  Shared(state): Shared<SharedState>,
  uri: Uri,
  Query(params): Query<SnippetParams>,
) -> Response {
  let mut state = state.lock().unwrap();

  state.requests.push(uri.to_string());

  if state.unavailable {
    return StatusCode::SERVICE_UNAVAILABLE.into_response();
  }

  let matching = state
    .snippets
    .iter()
    .filter(|snippet| snippet.public)
    .filter(|snippet| {
      params
        .q
        .as_deref()
        .map(|search| snippet.matches(search))
        .unwrap_or(true)
    })
    .collect::<Vec<&Snippet>>();

  let page_size = state.page_size.max(1);
  let total_pages = ((matching.len() + page_size - 1) / page_size).max(1);
  let page = params.page.unwrap_or(1).max(1);

  let snippets = matching
    .iter()
    .skip((page - 1) * page_size)
    .take(page_size)
    .map(|snippet| snippet.to_json(params.user.as_deref()))
    .collect::<Vec<Value>>();

  Json(json!({
    "snippets": snippets,
    "totalPages": total_pages,
    "currentPage": page,
  }))
  .into_response()
}

async fn collections(
  Shared(state): Shared<SharedState>,
  uri: Uri,
  headers: HeaderMap,
  Query(params): Query<UserParams>,
) -> Response {
  let mut state = state.lock().unwrap();

  state.requests.push(uri.to_string());

  if state.unavailable {
    return StatusCode::SERVICE_UNAVAILABLE.into_response();
  }

  match state.viewer(&headers) {
    None => return StatusCode::UNAUTHORIZED.into_response(),
    Some(user) if user.id != params.user => return StatusCode::FORBIDDEN.into_response(),
    Some(_) => {}
  }

  Json(Value::Array(
    state
      .collections
      .iter()
      .filter(|collection| collection.owner == params.user)
      .map(Collection::to_json)
      .collect(),
  ))
  .into_response()
}

async fn update_collection(
  Shared(state): Shared<SharedState>,
  uri: Uri,
  headers: HeaderMap,
  Query(params): Query<IdParams>,
  Json(body): Json<UpdateBody>,
) -> Response {
  let stalled = {
    let mut state = state.lock().unwrap();
    state.requests.push(uri.to_string());
    state.stalled_updates
  };

  if stalled {
    tokio::time::sleep(Duration::from_secs(30)).await;
  }

  let mut state = state.lock().unwrap();

  let Some(user) = state.viewer(&headers).map(|user| user.id.clone()) else {
    return StatusCode::UNAUTHORIZED.into_response();
  };

  if let Some(status) = state.failing_updates {
    let status = StatusCode::from_u16(status).unwrap();
    return (status, Json(json!({ "error": "update rejected" }))).into_response();
  }

  let Some(collection) = state
    .collections
    .iter_mut()
    .find(|collection| collection.id == params.id)
  else {
    return StatusCode::NOT_FOUND.into_response();
  };

  if collection.owner != user {
    return StatusCode::FORBIDDEN.into_response();
  }

  collection.title = body.title.clone();
  collection.description = Some(body.description.clone());
  collection.is_private = body.is_private;

  let response = Json(collection.to_json()).into_response();

  state.updates.push(Update {
    id: params.id,
    user,
    title: body.title,
    description: body.description,
    is_private: body.is_private,
  });

  response
}

async fn session(Shared(state): Shared<SharedState>, headers: HeaderMap) -> Json<Value> {
  let state = state.lock().unwrap();

  match state.viewer(&headers) {
    Some(user) => Json(json!({ "user": { "id": user.id, "name": user.name } })),
    None => Json(json!({})),
  }
}
