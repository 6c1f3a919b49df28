use {
    self::{
        accept_json::AcceptJson,
        error::{OptionExt, ServerError, ServerResult},
    },
    super::*,
    crate::{
        query::{self, QueryParams},
        server_config::ServerConfig,
        service::{HttpDataService, HttpSessionLookup},
        templates::{DashboardHtml, ExploreHtml, PageContent},
    },
    axum::{
        extract::{Extension, Form, Json, Path, Query, State},
        http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
        response::{IntoResponse, Redirect, Response},
        routing::{get, post},
        Router,
    },
    axum_server::Handle,
    rust_embed::RustEmbed,
    std::convert::Infallible,
    tower_http::{compression::CompressionLayer, set_header::SetResponseHeaderLayer},
};

mod accept_json;
mod error;
mod query_params;

pub(crate) const EXPLORE_CACHE_CONTROL: &str = "public, s-maxage=10, stale-while-revalidate=59";

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

#[derive(Deserialize)]
struct CollectionId {
    id: String,
}

#[derive(Deserialize)]
struct CollectionForm {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_private: Option<String>,
}

impl From<CollectionForm> for CollectionUpdate {
    fn from(form: CollectionForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            is_private: form.is_private.is_some(),
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct Server {
    #[arg(
        long,
        help = "Listen on <ADDRESS> for incoming requests. [default: 0.0.0.0]"
    )]
    pub(crate) address: Option<String>,
    #[arg(
        long,
        help = "Listen on <HTTP_PORT> for incoming HTTP requests. [default: 80]"
    )]
    pub(crate) http_port: Option<u16>,
    #[arg(long, help = "Disable JSON API.")]
    pub(crate) disable_json_api: bool,
    #[arg(
        long,
        default_value = "10s",
        help = "Give up on data service and session requests after <REQUEST_TIMEOUT>."
    )]
    pub(crate) request_timeout: humantime::Duration,
}

impl Server {
    pub fn run(self, settings: Settings, handle: Handle) -> SubcommandResult {
        Runtime::new()?.block_on(async {
            let server_config = Arc::new(ServerConfig::new(&settings, !self.disable_json_api)?);

            let timeout = Duration::from(self.request_timeout);

            let data_service: Arc<dyn DataService> =
                Arc::new(HttpDataService::new(settings.api_url()?.clone(), timeout)?);

            let sessions: Arc<dyn SessionLookup> =
                Arc::new(HttpSessionLookup::new(settings.auth_url()?.clone(), timeout)?);

            log::info!(
                "Using data service at {} and sessions at {}",
                settings.api_url()?,
                settings.auth_url()?
            );

            let router = Self::router(server_config, data_service, sessions);

            self.spawn(router, handle, self.http_port())?.await??;

            Ok(None)
        })
    }

    pub(crate) fn router(
        server_config: Arc<ServerConfig>,
        data_service: Arc<dyn DataService>,
        sessions: Arc<dyn SessionLookup>,
    ) -> Router {
        Router::new()
            .route("/", get(Self::home))
            .route("/dashboard", get(Self::dashboard))
            .route("/dashboard/collection", post(Self::update_collection))
            .route("/explore", get(Self::explore))
            .route("/static/*path", get(Self::static_asset))
            .route("/status", get(Self::status))
            .layer(Extension(data_service))
            .layer(Extension(sessions))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'self'"),
            ))
            .layer(CompressionLayer::new())
            .with_state(server_config)
    }

    fn spawn(
        &self,
        router: Router,
        handle: Handle,
        port: u16,
    ) -> Result<task::JoinHandle<std::io::Result<()>>> {
        let address = match &self.address {
            Some(address) => address.as_str(),
            None => {
                if cfg!(test) {
                    "127.0.0.1"
                } else {
                    "0.0.0.0"
                }
            }
        };

        let addr = (address, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow!("failed to get socket addrs"))?;

        if !cfg!(test) {
            eprintln!("Listening on http://{addr}");
        }

        Ok(tokio::spawn(async move {
            axum_server::Server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await
        }))
    }

    fn http_port(&self) -> u16 {
        self.http_port.unwrap_or(80)
    }

    async fn viewer(sessions: &dyn SessionLookup, headers: &HeaderMap) -> Option<Session> {
        match sessions.session(headers).await {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Looking up session: {err}");
                None
            }
        }
    }

    fn bad_request(err: Error) -> ServerError {
        ServerError::BadRequest(err.to_string())
    }

    async fn home() -> Redirect {
        Redirect::to("/explore")
    }

    async fn status() -> &'static str {
        "OK"
    }

    async fn explore(
        State(server_config): State<Arc<ServerConfig>>,
        Extension(data_service): Extension<Arc<dyn DataService>>,
        Extension(sessions): Extension<Arc<dyn SessionLookup>>,
        headers: HeaderMap,
        uri: Uri,
        params: QueryParams,
        AcceptJson(accept_json): AcceptJson,
    ) -> ServerResult<Response> {
        let search = query::query_string(params.get("q").as_ref()).map_err(Self::bad_request)?;

        let page = query::page_number(params.get("page").as_ref());

        let viewer = Self::viewer(sessions.as_ref(), &headers).await;

        let data = data_service
            .public_snippets(&SnippetQuery {
                logged_in_user: viewer.as_ref().map(|session| session.user_id().to_owned()),
                search_query: search.clone(),
                page,
            })
            .await?;

        let cache_control = [(
            header::CACHE_CONTROL,
            HeaderValue::from_static(EXPLORE_CACHE_CONTROL),
        )];

        Ok(if accept_json {
            (cache_control, Json(data)).into_response()
        } else {
            (
                cache_control,
                ExploreHtml::new(data, search, uri.path(), &params).page(server_config, viewer),
            )
                .into_response()
        })
    }

    async fn dashboard(
        State(server_config): State<Arc<ServerConfig>>,
        Extension(data_service): Extension<Arc<dyn DataService>>,
        Extension(sessions): Extension<Arc<dyn SessionLookup>>,
        headers: HeaderMap,
        params: QueryParams,
    ) -> ServerResult<Response> {
        let Some(viewer) = Self::viewer(sessions.as_ref(), &headers).await else {
            return Ok(Redirect::temporary("/").into_response());
        };

        let active =
            query::query_string(params.get("collection").as_ref()).map_err(Self::bad_request)?;

        let editing = query::query_string(params.get("edit").as_ref())
            .map_err(Self::bad_request)?
            .as_deref()
            == Some("true");

        let collections = data_service
            .user_collections(viewer.user_id(), &headers)
            .await?;

        let mut dashboard = DashboardHtml::new(collections, active.as_deref());

        if editing {
            if let Some(card) = dashboard.active_card() {
                card.open_editor()?;
            }
        }

        Ok(dashboard.page(server_config, Some(viewer)).into_response())
    }

    async fn update_collection(
        State(server_config): State<Arc<ServerConfig>>,
        Extension(data_service): Extension<Arc<dyn DataService>>,
        Extension(sessions): Extension<Arc<dyn SessionLookup>>,
        headers: HeaderMap,
        Query(CollectionId { id }): Query<CollectionId>,
        Form(form): Form<CollectionForm>,
    ) -> ServerResult<Response> {
        let Some(viewer) = Self::viewer(sessions.as_ref(), &headers).await else {
            return Ok(Redirect::to("/").into_response());
        };

        let collections = data_service
            .user_collections(viewer.user_id(), &headers)
            .await?;

        let mut dashboard = DashboardHtml::new(collections, Some(&id));

        let card = dashboard
            .active_card()
            .ok_or_not_found(|| format!("collection {id}"))?;

        let values = CollectionUpdate::from(form);

        card.submit(values.clone())?;

        let outcome = data_service
            .update_collection(&id, &values, &headers)
            .await;

        let notification = card.resolve(&outcome)?;

        if outcome.is_ok() {
            log::info!("Updated collection {id}");

            card.apply(&values);

            match data_service
                .user_collections(viewer.user_id(), &headers)
                .await
            {
                Ok(collections) => dashboard = DashboardHtml::new(collections, Some(&id)),
                Err(err) => log::warn!("Refreshing collections after updating {id}: {err}"),
            }
        }

        dashboard.notification = Some(notification);

        Ok(dashboard.page(server_config, Some(viewer)).into_response())
    }

    async fn static_asset(Path(path): Path<String>) -> ServerResult<Response> {
        let path = path.strip_prefix('/').unwrap_or(&path);

        let content = StaticAssets::get(path).ok_or_not_found(|| format!("asset {path}"))?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();

        Ok((
            [(header::CONTENT_TYPE, mime.as_ref().to_owned())],
            content.data,
        )
            .into_response())
    }
}
