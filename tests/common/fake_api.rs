//! Stateful stand-in for the myFlix REST API
//!
//! A single wiremock responder that keeps users, tokens and favorites in
//! memory, so a script of commands sees the effects of earlier ones.

use serde_json::{json, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Debug, Clone)]
struct UserRecord {
    id: String,
    username: String,
    password: String,
    email: String,
    birthday: Option<String>,
    favorites: BTreeSet<String>,
}

impl UserRecord {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "Username": self.username,
            "Email": self.email,
            "Birthday": self.birthday,
            "FavoriteMovies": self.favorites,
        })
    }
}

#[derive(Debug, Default)]
struct FakeState {
    movies: Vec<Value>,
    users: HashMap<String, UserRecord>,
    tokens: HashMap<String, String>,
    issued: usize,
}

/// In-memory fake of the remote API, mounted as a catch-all mock
#[derive(Debug, Clone, Default)]
pub struct FakeMyFlix {
    state: Arc<Mutex<FakeState>>,
}

pub fn movie(id: &str, title: &str, director: &str, genre: &str) -> Value {
    json!({
        "_id": id,
        "Title": title,
        "Description": format!("{title} description"),
        "Director": { "Name": director, "Bio": "", "Birth": "1939" },
        "Genre": { "Name": genre, "Description": format!("{genre} films") },
        "ImagePath": "",
        "Featured": false
    })
}

impl FakeMyFlix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(self, movies: Vec<Value>) -> Self {
        self.lock().movies = movies;
        self
    }

    pub fn with_user(self, username: &str, password: &str, favorites: &[&str]) -> Self {
        {
            let mut state = self.lock();
            let record = UserRecord {
                id: format!("u-{username}"),
                username: username.to_string(),
                password: password.to_string(),
                email: format!("{username}@example.com"),
                birthday: None,
                favorites: favorites.iter().map(|f| f.to_string()).collect(),
            };
            state.users.insert(username.to_string(), record);
        }
        self
    }

    /// Start a mock server answering every request from this fake
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(self.clone())
            .mount(&server)
            .await;
        server
    }

    /// Issue a token directly, as a prior login would have
    pub fn issue_token(&self, username: &str) -> String {
        let mut state = self.lock();
        state.issued += 1;
        let token = format!("token-{username}-{}", state.issued);
        state.tokens.insert(token.clone(), username.to_string());
        token
    }

    pub fn favorites(&self, username: &str) -> Option<Vec<String>> {
        self.lock()
            .users
            .get(username)
            .map(|u| u.favorites.iter().cloned().collect())
    }

    /// Change server state behind the client's back
    pub fn set_favorites(&self, username: &str, favorites: &[&str]) {
        if let Some(user) = self.lock().users.get_mut(username) {
            user.favorites = favorites.iter().map(|f| f.to_string()).collect();
        }
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.lock().users.contains_key(username)
    }

    pub fn email(&self, username: &str) -> Option<String> {
        self.lock().users.get(username).map(|u| u.email.clone())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

fn decode(segment: &str) -> String {
    segment.replace("%20", " ")
}

fn bearer(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap_or(Value::Null)
}

fn field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

impl Respond for FakeMyFlix {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let method = request.method.as_str().to_string();
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).map(decode).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut state = self.lock();

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["users"]) => {
                let body = body(request);
                let (Some(username), Some(password), Some(email)) = (
                    field(&body, "Username"),
                    field(&body, "Password"),
                    field(&body, "Email"),
                ) else {
                    return ResponseTemplate::new(422).set_body_string("missing fields");
                };
                if state.users.contains_key(&username) {
                    return ResponseTemplate::new(400)
                        .set_body_string(format!("{username} already exists"));
                }
                let record = UserRecord {
                    id: format!("u-{username}"),
                    username: username.clone(),
                    password,
                    email,
                    birthday: field(&body, "Birthday"),
                    favorites: BTreeSet::new(),
                };
                let json = record.to_json();
                state.users.insert(username, record);
                ResponseTemplate::new(201).set_body_json(json)
            }
            ("POST", ["login"]) => {
                let body = body(request);
                let username = field(&body, "Username").unwrap_or_default();
                let password = field(&body, "Password").unwrap_or_default();
                let Some(user) = state
                    .users
                    .get(&username)
                    .filter(|u| u.password == password)
                    .map(UserRecord::to_json)
                else {
                    return ResponseTemplate::new(400)
                        .set_body_json(json!({ "message": "Something is not right" }));
                };
                state.issued += 1;
                let token = format!("token-{username}-{}", state.issued);
                state.tokens.insert(token.clone(), username);
                ResponseTemplate::new(200).set_body_json(json!({ "user": user, "token": token }))
            }
            (method, path) => {
                let authorized = bearer(request)
                    .and_then(|token| state.tokens.get(&token).cloned())
                    .filter(|username| state.users.contains_key(username));
                if authorized.is_none() {
                    return ResponseTemplate::new(401).set_body_string("Unauthorized");
                }
                route_authorized(&mut state, method, path, request)
            }
        }
    }
}

fn route_authorized(
    state: &mut FakeState,
    method: &str,
    path: &[&str],
    request: &Request,
) -> ResponseTemplate {
    let find_movie = |key: &str, value: &str| {
        state
            .movies
            .iter()
            .find(|m| m.pointer(key).and_then(Value::as_str) == Some(value))
            .cloned()
    };

    match (method, path) {
        ("GET", ["movies"]) => ResponseTemplate::new(200).set_body_json(&state.movies),
        ("GET", ["movies", title]) => match find_movie("/Title", title) {
            Some(movie) => ResponseTemplate::new(200).set_body_json(movie),
            None => ResponseTemplate::new(404),
        },
        ("GET", ["directors", name]) => match find_movie("/Director/Name", name) {
            Some(movie) => ResponseTemplate::new(200).set_body_json(&movie["Director"]),
            None => ResponseTemplate::new(404),
        },
        ("GET", ["genres", name]) => match find_movie("/Genre/Name", name) {
            Some(movie) => ResponseTemplate::new(200).set_body_json(&movie["Genre"]),
            None => ResponseTemplate::new(404),
        },
        ("GET", ["users", username]) => match state.users.get(*username) {
            Some(user) => ResponseTemplate::new(200).set_body_json(user.to_json()),
            None => ResponseTemplate::new(404),
        },
        ("PUT", ["users", username]) => {
            let Some(mut user) = state.users.remove(*username) else {
                return ResponseTemplate::new(404);
            };
            let body = body(request);
            if let Some(name) = field(&body, "Username") {
                user.username = name;
            }
            if let Some(password) = field(&body, "Password") {
                user.password = password;
            }
            if let Some(email) = field(&body, "Email") {
                user.email = email;
            }
            user.birthday = field(&body, "Birthday").or(user.birthday);
            for owner in state.tokens.values_mut() {
                if *owner == *username {
                    *owner = user.username.clone();
                }
            }
            let json = user.to_json();
            state.users.insert(user.username.clone(), user);
            ResponseTemplate::new(200).set_body_json(json)
        }
        ("DELETE", ["users", username]) => {
            if state.users.remove(*username).is_none() {
                return ResponseTemplate::new(404);
            }
            state.tokens.retain(|_, owner| owner.as_str() != *username);
            ResponseTemplate::new(200).set_body_string(format!("{username} was deleted."))
        }
        ("POST", ["users", username, "movies", movie_id]) => {
            match state.users.get_mut(*username) {
                Some(user) => {
                    user.favorites.insert(movie_id.to_string());
                    ResponseTemplate::new(200).set_body_json(user.to_json())
                }
                None => ResponseTemplate::new(404),
            }
        }
        ("DELETE", ["users", username, "movies", movie_id]) => {
            match state.users.get_mut(*username) {
                Some(user) => {
                    user.favorites.remove(*movie_id);
                    ResponseTemplate::new(200).set_body_json(user.to_json())
                }
                None => ResponseTemplate::new(404),
            }
        }
        _ => ResponseTemplate::new(404),
    }
}
