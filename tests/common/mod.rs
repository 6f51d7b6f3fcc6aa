#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, http::StatusCode, web};
use chrono::Utc;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use serde_json::{Value, json};
use uuid::Uuid;

use shiftlinkr_admin::api::ApiResponse;
use shiftlinkr_admin::{ApiClient, Config};

const API_PREFIX: &str = "/api/v1";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone)]
struct Stub {
    status: u16,
    body: Value,
    delay: Option<Duration>,
}

/// A request as the mock backend received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then(|| v.to_string())
        })
    }
}

fn envelope<T: serde::Serialize>(response: ApiResponse<T>) -> Value {
    serde_json::to_value(response).unwrap()
}

#[derive(Default)]
struct MockState {
    stubs: Mutex<HashMap<(String, String), VecDeque<Stub>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockState {
    /// Queued stubs are served in order; the last one keeps answering
    fn next_stub(&self, method: &str, path: &str) -> Stub {
        let mut stubs = self.stubs.lock().unwrap();
        match stubs.get_mut(&(method.to_string(), path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Stub {
                status: 404,
                body: envelope(ApiResponse::error(&format!("No stub for {} {}", method, path))),
                delay: None,
            },
        }
    }
}

async fn dispatch(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let method = req.method().to_string();
    let path = req.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: req.query_string().to_string(),
        body: serde_json::from_slice(&body).ok(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
    });

    let stub = state.next_stub(&method, &path);

    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(current, Ordering::SeqCst);
    if let Some(delay) = stub.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    HttpResponse::build(StatusCode::from_u16(stub.status).unwrap()).json(stub.body)
}

/// Real HTTP server standing in for the ShiftLinkr API
pub struct MockBackend {
    pub base_url: String,
    state: web::Data<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        init_logging();

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock backend");
        let port = listener.local_addr().unwrap().port();
        let state = web::Data::new(MockState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::to(dispatch))
        })
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();
        tokio::spawn(server);

        MockBackend {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::for_base_url(&self.base_url)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config()).expect("Failed to build client")
    }

    fn push(&self, method: &str, path: &str, stub: Stub) {
        self.state
            .stubs
            .lock()
            .unwrap()
            .entry((method.to_string(), format!("{}{}", API_PREFIX, path)))
            .or_default()
            .push_back(stub);
    }

    /// Replace everything queued for an endpoint
    pub fn reset(&self, method: &str, path: &str) {
        self.state
            .stubs
            .lock()
            .unwrap()
            .remove(&(method.to_string(), format!("{}{}", API_PREFIX, path)));
    }

    /// Queue a successful envelope carrying `data`
    pub fn ok(&self, method: &str, path: &str, data: Value) {
        self.push(
            method,
            path,
            Stub {
                status: 200,
                body: envelope(ApiResponse::success(data)),
                delay: None,
            },
        );
    }

    /// Success envelope with a message and no data, as action endpoints reply
    pub fn ok_empty(&self, method: &str, path: &str) {
        self.push(
            method,
            path,
            Stub {
                status: 200,
                body: envelope(ApiResponse::<Value>::success_with_message(None, "OK")),
                delay: None,
            },
        );
    }

    pub fn ok_delayed(&self, method: &str, path: &str, data: Value, delay: Duration) {
        self.push(
            method,
            path,
            Stub {
                status: 200,
                body: envelope(ApiResponse::success(data)),
                delay: Some(delay),
            },
        );
    }

    /// Queue an arbitrary status and raw body
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Stub {
                status,
                body,
                delay: None,
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        let full_path = format!("{}{}", API_PREFIX, path);
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full_path)
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

/// JSON fixtures shaped like the API's camelCase payloads
pub struct MockData;

impl MockData {
    pub fn name() -> String {
        Name().fake()
    }

    pub fn email() -> String {
        SafeEmail().fake()
    }

    pub fn team(id: Uuid, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "departmentId": null,
            "memberCount": 0,
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        })
    }

    pub fn department(id: Uuid, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        })
    }

    pub fn user(id: Uuid, role: &str) -> Value {
        json!({
            "id": id,
            "name": Self::name(),
            "email": Self::email(),
            "role": role,
            "departmentId": null,
            "isActive": true,
            "createdAt": Utc::now(),
        })
    }

    pub fn team_member(team_id: Uuid, user_id: Uuid, user_name: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "teamId": team_id,
            "userId": user_id,
            "userName": user_name,
            "role": "member",
            "joinedAt": Utc::now(),
        })
    }

    pub fn pending_approval(id: Uuid) -> Value {
        json!({
            "id": id,
            "swapRequestId": Uuid::new_v4(),
            "requestingEmployeeId": Uuid::new_v4(),
            "requestingEmployeeName": Self::name(),
            "targetEmployeeId": Uuid::new_v4(),
            "targetEmployeeName": Self::name(),
            "shiftStart": "2025-06-02T07:00:00Z",
            "shiftEnd": "2025-06-02T15:00:00Z",
            "shiftType": "day",
            "currentLevel": 1,
            "totalLevels": 2,
            "isDelegated": false,
            "delegatedFrom": null,
            "reason": "Family event",
            "requestedAt": "2025-05-20T10:00:00Z",
        })
    }

    pub fn approval_chain(swap_request_id: Uuid) -> Value {
        json!({
            "swapRequestId": swap_request_id,
            "steps": [
                {
                    "level": 1,
                    "approverName": "Team Lead",
                    "approverRole": "lead",
                    "status": "approved",
                    "actedAt": "2025-05-21T09:00:00Z",
                    "comments": "Fine by me",
                },
                {
                    "level": 2,
                    "approverName": "Ward Manager",
                    "approverRole": null,
                    "status": "pending",
                    "actedAt": null,
                    "comments": null,
                },
            ],
            "autoApprovalEligible": false,
            "autoApprovalReason": null,
        })
    }

    pub fn audit_entry(action: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "action": action,
            "actorName": Self::name(),
            "timestamp": Utc::now(),
            "comments": null,
        })
    }

    pub fn overview(day: bool, night: bool, weekend: bool) -> Value {
        json!({
            "plans": [
                { "shiftType": "day", "enabled": day, "lastGeneratedAt": null, "nextGenerationAt": null },
                { "shiftType": "night", "enabled": night, "lastGeneratedAt": null, "nextGenerationAt": null },
                { "shiftType": "weekend", "enabled": weekend, "lastGeneratedAt": null, "nextGenerationAt": null },
            ]
        })
    }

    pub fn run(status: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "status": status,
            "teamName": "ICU",
            "totalShifts": 30,
            "assignedShifts": 28,
            "startedAt": "2025-05-01T08:00:00Z",
            "completedAt": "2025-05-01T08:01:30Z",
            "initiatedBy": "scheduler",
            "errorMessage": null,
        })
    }

    pub fn template(
        id: Uuid,
        name: &str,
        shift_type: &str,
        category: Option<&str>,
        favorite: bool,
        active: bool,
    ) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "shiftType": shift_type,
            "category": category,
            "durationMinutes": 480,
            "defaultStartTime": "07:00:00",
            "defaultEndTime": "15:00:00",
            "tags": ["ward"],
            "isFavorite": favorite,
            "isActive": active,
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        })
    }

    pub fn notification(id: Uuid, is_read: bool) -> Value {
        json!({
            "id": id,
            "title": "Swap request",
            "message": "A colleague asked to swap a shift",
            "type": "swap",
            "isRead": is_read,
            "createdAt": Utc::now(),
            "actionUrl": "/approvals",
        })
    }

    pub fn notification_page(items: Vec<Value>, page: u32, per_page: u32, total: u64) -> Value {
        json!({
            "items": items,
            "page": page,
            "perPage": per_page,
            "total": total,
            "unreadCount": 3,
        })
    }

    pub fn pending_user(id: Uuid) -> Value {
        json!({
            "id": id,
            "name": Self::name(),
            "email": Self::email(),
            "requestedRole": "employee",
            "registeredAt": Utc::now(),
        })
    }

    pub fn profile(name: &str, email: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "email": email,
            "phone": null,
            "role": "manager",
            "departmentName": "Nursing",
            "emailVerified": true,
            "createdAt": Utc::now(),
        })
    }
}
