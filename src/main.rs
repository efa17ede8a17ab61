use axum::{
  extract::{rejection::JsonRejection, Path, State},
  http::{Method, StatusCode},
  response::IntoResponse,
  routing::{get, post},
  Json, Router,
};
use conference_lobby_backend::config::DirectoryConfig;
use conference_lobby_backend::directory::{build_page, PageOptions, RoomSnapshot};
use conference_lobby_backend::sessions::{ExpandRejection, ExpansionStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

const SESSION_SWEEP_SECS: u64 = 60;

struct AppState {
  config: DirectoryConfig,
  sessions: ExpansionStore,
}

#[derive(Debug, Deserialize)]
struct DirectoryRequest {
  #[serde(flatten)]
  snapshot: RoomSnapshot,
  session: Option<String>,
  expanded: Option<Vec<String>>,
  fragment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExpandRequest {
  group: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
  #[serde(rename = "sessionId")]
  session_id: String,
}

#[derive(Debug, Serialize)]
struct OkResponse {
  ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
  ok: bool,
  error: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = DirectoryConfig::from_env()?;
  let port = config.port;
  tracing::info!(
    max_room_cap = config.max_room_cap,
    max_sessions = config.max_sessions,
    session_idle_secs = config.session_idle_secs,
    "loaded directory config"
  );

  let state = Arc::new(AppState {
    sessions: ExpansionStore::new(config.session_limits()),
    config,
  });

  let sweep_state = Arc::clone(&state);
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(SESSION_SWEEP_SECS)).await;
      sweep_state.sessions.evict_idle();
    }
  });

  let address = format!("0.0.0.0:{port}");
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app(state)).await?;

  Ok(())
}

fn app(state: Arc<AppState>) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

  Router::new()
    .route("/api/health", get(health))
    .route("/api/directory", post(directory))
    .route("/api/sessions", post(create_session))
    .route("/api/sessions/:session/expand", post(expand_group))
    .layer(cors)
    .with_state(state)
}

async fn health() -> impl IntoResponse {
  Json(OkResponse { ok: true })
}

async fn directory(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<DirectoryRequest>, JsonRejection>,
) -> impl IntoResponse {
  let Json(payload) = match payload {
    Ok(payload) => payload,
    Err(_) => return invalid_json(),
  };

  let mut expanded: HashSet<String> = payload
    .session
    .as_deref()
    .and_then(|session| state.sessions.expanded_groups(session))
    .unwrap_or_default();
  expanded.extend(payload.expanded.unwrap_or_default());

  let page = build_page(
    &payload.snapshot,
    PageOptions {
      max_room_cap: state.config.max_room_cap,
      logo: state.config.logo_image.as_deref(),
      expanded: &expanded,
      fragment: payload.fragment.as_deref(),
    },
  );

  (StatusCode::OK, Json(page)).into_response()
}

async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let Some(session_id) = state.sessions.create_session() else {
    tracing::warn!(
      sessions = state.sessions.len(),
      "session store full, refusing new session"
    );
    return (
      StatusCode::SERVICE_UNAVAILABLE,
      Json(ErrorResponse {
        ok: false,
        error: "Too many sessions".to_string(),
      }),
    )
      .into_response();
  };

  tracing::debug!(session_id, "created session");
  (StatusCode::OK, Json(SessionResponse { session_id })).into_response()
}

async fn expand_group(
  State(state): State<Arc<AppState>>,
  Path(session): Path<String>,
  payload: Result<Json<ExpandRequest>, JsonRejection>,
) -> impl IntoResponse {
  let Json(payload) = match payload {
    Ok(payload) => payload,
    Err(_) => return invalid_json(),
  };

  let (status, error) = match state.sessions.expand(&session, &payload.group) {
    Ok(()) => return (StatusCode::OK, Json(OkResponse { ok: true })).into_response(),
    Err(ExpandRejection::UnknownSession) => (StatusCode::NOT_FOUND, "Unknown session"),
    Err(ExpandRejection::GroupNameTooLong) => (StatusCode::BAD_REQUEST, "Group name too long"),
    Err(ExpandRejection::TooManyGroups) => (StatusCode::PAYLOAD_TOO_LARGE, "Too many expanded groups"),
  };
  tracing::debug!(session, error, "rejected group expand");

  (
    status,
    Json(ErrorResponse {
      ok: false,
      error: error.to_string(),
    }),
  )
    .into_response()
}

fn invalid_json() -> axum::response::Response {
  (
    StatusCode::BAD_REQUEST,
    Json(ErrorResponse {
      ok: false,
      error: "Invalid JSON".to_string(),
    }),
  )
    .into_response()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn make_state(max_sessions: usize) -> Arc<AppState> {
    let mut config = DirectoryConfig::from_lookup(|_| None).unwrap();
    config.max_sessions = max_sessions;
    config.max_expanded_groups = 1;
    Arc::new(AppState {
      sessions: ExpansionStore::new(config.session_limits()),
      config,
    })
  }

  async fn expand(state: &Arc<AppState>, session: &str, group: &str) -> StatusCode {
    expand_group(
      State(Arc::clone(state)),
      Path(session.to_string()),
      Ok(Json(ExpandRequest {
        group: group.to_string(),
      })),
    )
    .await
    .into_response()
    .status()
  }

  fn directory_request(value: serde_json::Value) -> DirectoryRequest {
    serde_json::from_value(value).expect("request should parse")
  }

  #[test]
  fn directory_request_accepts_client_field_names() {
    let request = directory_request(json!({
      "publicRooms": [
        { "id": "1", "name": "Lobby", "member_count": 0, "lobby_count": 0, "room_size": 24 }
      ],
      "session": "abc",
      "expanded": ["Lobby"],
      "fragment": "#lobby"
    }));
    assert_eq!(request.snapshot.public_rooms.map(|rooms| rooms.len()), Some(1));
    assert!(request.snapshot.favorited_rooms.is_none());
    assert_eq!(request.session.as_deref(), Some("abc"));
    assert_eq!(request.fragment.as_deref(), Some("#lobby"));
  }

  #[test]
  fn directory_request_allows_empty_body_object() {
    let request = directory_request(json!({}));
    assert!(request.snapshot.public_rooms.is_none());
    assert!(request.expanded.is_none());
  }

  #[tokio::test]
  async fn directory_returns_ok_for_valid_payload() {
    let state = make_state(4);
    let request = directory_request(json!({ "publicRooms": [] }));
    let response = directory(State(state), Ok(Json(request))).await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn expand_requires_known_session() {
    let state = make_state(4);
    assert_eq!(expand(&state, "missing", "Posters").await, StatusCode::NOT_FOUND);

    let session = state.sessions.create_session().unwrap();
    assert_eq!(expand(&state, &session, "Posters").await, StatusCode::OK);
    assert!(state.sessions.expanded_groups(&session).unwrap().contains("Posters"));
  }

  #[tokio::test]
  async fn expand_rejects_groups_past_the_session_limits() {
    let state = make_state(4);
    let session = state.sessions.create_session().unwrap();
    let long_name = "x".repeat(state.config.max_group_name_len + 1);
    assert_eq!(expand(&state, &session, &long_name).await, StatusCode::BAD_REQUEST);
    assert_eq!(expand(&state, &session, "Posters").await, StatusCode::OK);
    assert_eq!(expand(&state, &session, "Socials").await, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(expand(&state, &session, "Posters").await, StatusCode::OK);
  }

  #[tokio::test]
  async fn create_session_refuses_when_full() {
    let state = make_state(1);
    let first = create_session(State(Arc::clone(&state))).await.into_response();
    assert_eq!(first.status(), StatusCode::OK);
    let second = create_session(State(state)).await.into_response();
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
  }
}
