use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{classify, financials, transactions};
use assistant::Assistant;
use engine::Engine;

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
    pub assistant: Arc<Assistant>,
    /// Bearer token required on every route; open when `None`.
    pub api_key: Option<String>,
}

impl ServerState {
    pub fn new(engine: Engine, assistant: Assistant, api_key: Option<String>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            assistant: Arc::new(assistant),
            api_key,
        }
    }
}

async fn auth(
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = state.api_key.as_deref() {
        match bearer {
            Some(TypedHeader(Authorization(token))) if token.token() == expected => {}
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    }
    Ok(next.run(request).await)
}

/// Answers preflight requests directly and tags every response with the
/// allow headers.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/parse-finance-command", post(classify::parse_command))
        .route("/chat", post(classify::chat))
        .route("/drivers", get(financials::drivers))
        .route("/financials/company", get(financials::company))
        .route("/financials/drivers", get(financials::all_drivers))
        .route("/financials/drivers/{id}", get(financials::driver))
        .route("/revenues", post(transactions::revenue_new))
        .route("/expenses", post(transactions::expense_new))
        .route("/salaries", post(transactions::salary_new))
        .route("/revenues/{id}", delete(transactions::revenue_delete))
        .route("/expenses/{id}", delete(transactions::expense_delete))
        .route("/salaries/{id}", delete(transactions::salary_delete))
        .route("/history", get(transactions::history))
        .route("/export.csv", get(transactions::export))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

pub async fn run(state: ServerState, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await.inspect_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
    })?;
    run_with_listener(state, listener).await
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
