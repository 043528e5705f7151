// system-tests/tests/helpers/idea_api_stub.rs
// ============================================================================
// Module: Idea API Stub
// Description: In-process Idea Center API backed by an in-memory store.
// Purpose: Exercise full suite runs over real HTTP without a live server.
// Dependencies: tiny_http, serde_json, url
// ============================================================================

//! ## Overview
//! The stub mirrors the live API surface the suite touches: login, create,
//! list, edit, and delete. It validates the bearer header on idea routes,
//! rejects empty titles or descriptions and unknown ids with 400, and can be
//! told to fail the listing or the delete to drive failure paths.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Stub behavior knobs.
#[derive(Debug, Clone)]
pub struct StubOptions {
    /// Bearer token accepted on idea routes and issued by login.
    pub token: String,
    /// Email accepted by login.
    pub email: String,
    /// Password accepted by login.
    pub password: String,
    /// Status forced on every login attempt, if set.
    pub login_status: Option<u16>,
    /// Answer the listing with 500.
    pub fail_listing: bool,
    /// Answer deletes of existing ideas with 500.
    pub fail_delete: bool,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            token: "stub-token".to_string(),
            email: "qa@example.com".to_string(),
            password: "pass123".to_string(),
            login_status: None,
            fail_listing: false,
            fail_delete: false,
        }
    }
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Stored idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdea {
    /// Title as last written.
    pub title: String,
    /// Description as last written.
    pub description: String,
    /// Optional picture URL.
    pub url: String,
}

/// PascalCase idea body sent by the suite.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IdeaBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

/// PascalCase login body sent by the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginBody {
    email: String,
    password: String,
}

/// Shared mutable stub state.
#[derive(Debug, Default)]
struct StubState {
    ideas: BTreeMap<u64, StoredIdea>,
    next_id: u64,
    login_calls: usize,
    requests: Vec<String>,
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Running stub; the server stops when the handle drops.
pub struct IdeaApiStub {
    base_url: Url,
    server: Arc<Server>,
    state: Arc<Mutex<StubState>>,
    join: Option<thread::JoinHandle<()>>,
}

impl IdeaApiStub {
    /// Starts a stub on an ephemeral loopback port.
    pub fn start(options: StubOptions) -> Result<Self, String> {
        let server = Server::http("127.0.0.1:0").map_err(|err| err.to_string())?;
        let addr = server.server_addr().to_ip().ok_or_else(|| "stub has no ip address".to_string())?;
        let base_url = Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())?;
        let server = Arc::new(server);
        let state = Arc::new(Mutex::new(StubState::default()));
        let join = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(request, &options, &state);
                }
            })
        };
        Ok(Self {
            base_url,
            server,
            state,
            join: Some(join),
        })
    }

    /// Returns the stub base URL.
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Returns how many login requests arrived.
    pub fn login_calls(&self) -> usize {
        self.state.lock().map_or(0, |state| state.login_calls)
    }

    /// Returns the stored ideas keyed by id.
    pub fn ideas(&self) -> BTreeMap<String, StoredIdea> {
        self.state.lock().map_or_else(
            |_| BTreeMap::new(),
            |state| state.ideas.iter().map(|(id, idea)| (id.to_string(), idea.clone())).collect(),
        )
    }

    /// Returns `METHOD path` for every request, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().map_or_else(|_| Vec::new(), |state| state.requests.clone())
    }

    /// Inserts an idea directly, bypassing HTTP.
    pub fn seed(&self, title: &str, description: &str) -> String {
        let Ok(mut state) = self.state.lock() else {
            return String::new();
        };
        let id = insert(&mut state, title.to_string(), description.to_string(), String::new());
        id.to_string()
    }
}

impl Drop for IdeaApiStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Routing
// ============================================================================

/// Answers one request.
fn handle(mut request: Request, options: &StubOptions, state: &Mutex<StubState>) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let Ok(url) = Url::parse(&format!("http://stub{}", request.url())) else {
        let _ = request.respond(reply(400, &json!({"msg": "bad request line"})));
        return;
    };
    let idea_id = url
        .query_pairs()
        .find(|(key, _)| key == "ideaId")
        .map(|(_, value)| value.into_owned());
    let authorized = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Authorization"))
        .is_some_and(|header| header.value.as_str() == format!("Bearer {}", options.token));

    let Ok(mut state) = state.lock() else {
        let _ = request.respond(reply(500, &json!({"msg": "stub state poisoned"})));
        return;
    };
    state.requests.push(format!("{} {}", request.method(), url.path()));

    let response = match (request.method(), url.path()) {
        (Method::Post, "/api/User/Authentication") => login(&mut state, options, &body),
        (_, path) if path.starts_with("/api/Idea/") && !authorized => {
            reply(401, &json!({"msg": "Unauthorized"}))
        }
        (Method::Post, "/api/Idea/Create") => create(&mut state, &body),
        (Method::Get, "/api/Idea/All") => list(&state, options),
        (Method::Put, "/api/Idea/Edit") => edit(&mut state, idea_id.as_deref(), &body),
        (Method::Delete, "/api/Idea/Delete") => delete(&mut state, options, idea_id.as_deref()),
        _ => reply(404, &json!({"msg": "Not found"})),
    };
    drop(state);
    let _ = request.respond(response);
}

/// Login route.
fn login(state: &mut StubState, options: &StubOptions, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    state.login_calls += 1;
    if let Some(status) = options.login_status {
        return reply(status, &json!({"message": "login disabled"}));
    }
    match serde_json::from_str::<LoginBody>(body) {
        Ok(login) if login.email == options.email && login.password == options.password => {
            reply(200, &json!({"accessToken": options.token, "email": login.email}))
        }
        _ => reply(401, &json!({"message": "Invalid email or password"})),
    }
}

/// Create route.
fn create(state: &mut StubState, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let Ok(idea) = serde_json::from_str::<IdeaBody>(body) else {
        return reply(400, &json!({"msg": "Invalid body"}));
    };
    if idea.title.trim().is_empty() || idea.description.trim().is_empty() {
        return reply(400, &json!({"msg": "Title and description are required"}));
    }
    let id = insert(state, idea.title, idea.description, idea.url);
    reply(200, &json!({"msg": "Successfully created!", "idea": {"id": id.to_string()}}))
}

/// Listing route.
fn list(state: &StubState, options: &StubOptions) -> Response<std::io::Cursor<Vec<u8>>> {
    if options.fail_listing {
        return reply(500, &json!({"msg": "listing unavailable"}));
    }
    let records: Vec<Value> = state
        .ideas
        .iter()
        .map(|(id, idea)| {
            json!({
                "id": id.to_string(),
                "title": idea.title,
                "description": idea.description,
                "url": idea.url,
            })
        })
        .collect();
    reply(200, &Value::Array(records))
}

/// Edit route.
fn edit(state: &mut StubState, idea_id: Option<&str>, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    let Some(stored) = lookup(idea_id).and_then(|id| state.ideas.get_mut(&id)) else {
        return reply(400, &json!({"msg": "There is no such idea!"}));
    };
    let Ok(idea) = serde_json::from_str::<IdeaBody>(body) else {
        return reply(400, &json!({"msg": "Invalid body"}));
    };
    if idea.title.trim().is_empty() || idea.description.trim().is_empty() {
        return reply(400, &json!({"msg": "Title and description are required"}));
    }
    *stored = StoredIdea {
        title: idea.title,
        description: idea.description,
        url: idea.url,
    };
    reply(200, &json!({"msg": "Edited successfully"}))
}

/// Delete route.
fn delete(
    state: &mut StubState,
    options: &StubOptions,
    idea_id: Option<&str>,
) -> Response<std::io::Cursor<Vec<u8>>> {
    let Some(id) = lookup(idea_id).filter(|id| state.ideas.contains_key(id)) else {
        return reply(400, &json!({"msg": "There is no such idea!"}));
    };
    if options.fail_delete {
        return reply(500, &json!({"msg": "delete unavailable"}));
    }
    state.ideas.remove(&id);
    reply(200, &Value::String("The idea is deleted!".to_string()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Stores an idea under the next numeric id.
fn insert(state: &mut StubState, title: String, description: String, url: String) -> u64 {
    state.next_id += 1;
    let id = state.next_id;
    state.ideas.insert(
        id,
        StoredIdea {
            title,
            description,
            url,
        },
    );
    id
}

/// Parses an id query value; non-numeric ids never exist.
fn lookup(idea_id: Option<&str>) -> Option<u64> {
    idea_id.and_then(|raw| raw.parse().ok())
}

/// Builds a JSON response.
fn reply(status: u16, body: &Value) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(body.to_string()).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    response
}
