use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, RETRY_AFTER, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{router, AppState};
use crate::config::Config;
use crate::mail::testing::RecordingMailer;
use crate::storage::Storage;

struct TestApp {
    app: Router,
    state: AppState,
    mailer: Arc<RecordingMailer>,
    public_dir: PathBuf,
}

impl TestApp {
    fn new(tag: &str) -> Self {
        Self::with_config(tag, Config::default())
    }

    fn with_config(tag: &str, mut config: Config) -> Self {
        crate::logging::init_test_logging();
        let public_dir =
            std::env::temp_dir().join(format!("soultrip_web_{}_{}", tag, std::process::id()));
        config.server.public_dir.clone_from(&public_dir);

        let storage = Storage::open_in_memory().unwrap();
        storage.seed_sample_data().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(&config, storage, mailer.clone());
        let app = router(state.clone(), &config.server);

        Self {
            app,
            state,
            mailer,
            public_dir,
        }
    }

    async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.unwrap()
    }

    /// Log in and return the `Cookie` header value for later requests.
    async fn login(&self) -> String {
        let res = self
            .send(form("/admin/login", "username=admin&password=admin123"))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let set_cookie = res.headers()[SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn sent_mail(&self) -> usize {
        self.mailer.sent.lock().await.len()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.public_dir);
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_as(method: &str, uri: &str, cookie: &str, body: &Value) -> Request<Body> {
    let mut req = json_post(uri, body);
    *req.method_mut() = method.parse().unwrap();
    req.headers_mut().insert(COOKIE, cookie.parse().unwrap());
    req
}

fn delete_as(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// A file part for [`multipart_as`]: field name, file name, content type, bytes.
type FilePart<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

fn multipart_as(
    uri: &str,
    cookie: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let boundary = "soultripboundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((name, file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(COOKIE, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn from_client(mut req: Request<Body>, client: SocketAddr) -> Request<Body> {
    req.extensions_mut().insert(ConnectInfo(client));
    req
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn location(res: &Response) -> &str {
    res.headers()[LOCATION].to_str().unwrap()
}

async fn text(res: Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_home_lists_seeded_tours() {
    let t = TestApp::new("home");
    let res = t.send(get("/")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = text(res).await;
    assert!(html.contains("Himalayan Adventure Trek"));
}

#[tokio::test]
async fn test_unknown_paths_render_not_found_page() {
    let t = TestApp::new("not_found");

    let res = t.send(get("/no-such-page")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(text(res).await.contains("<!DOCTYPE html>"));

    assert_eq!(t.send(get("/tour/abc")).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(t.send(get("/tour/9999")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_form_stores_and_mails() {
    let t = TestApp::new("contact_ok");
    let res = t
        .send(form(
            "/contact",
            "name=Nadia&email=nadia%40example.com&subject=Trek&message=When+is+the+next+trek%3F",
        ))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/contact?success=true");

    assert_eq!(t.sent_mail().await, 2);
    let inquiries = t.state.storage.lock().await.list_inquiries().unwrap();
    assert_eq!(inquiries.len(), 1);
}

#[tokio::test]
async fn test_contact_form_rejects_missing_email() {
    let t = TestApp::new("contact_bad");
    let res = t.send(form("/contact", "name=Nadia&message=Hello")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/contact?error=true");
    assert_eq!(t.sent_mail().await, 0);
}

#[tokio::test]
async fn test_booking_request() {
    let t = TestApp::new("book");
    let body = json!({
        "tourId": "1",
        "name": "Sam",
        "email": "sam@example.com",
        "participants": "2",
    });
    let res = t.send(json_post("/book", &body)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let reply = body_json(res).await;
    assert_eq!(reply["success"], true);
    assert_eq!(t.sent_mail().await, 1);

    let missing = json!({ "tourId": 9999, "name": "Sam", "email": "sam@example.com" });
    let res = t.send(json_post("/book", &missing)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["success"], false);
}

#[tokio::test]
async fn test_admin_requires_login() {
    let t = TestApp::new("guard");

    let res = t.send(get("/admin/dashboard")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/admin/login?error=unauthorized");

    let res = t.send(get("/api/admin/stats")).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["error"], "Authentication required");
}

#[tokio::test]
async fn test_login_and_logout() {
    let t = TestApp::new("login");

    let res = t
        .send(form("/admin/login", "username=admin&password=wrong"))
        .await;
    assert_eq!(location(&res), "/admin/login?error=invalid");

    let cookie = t.login().await;
    let res = t.send(get_as("/admin/dashboard", &cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = t
        .send(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(location(&res), "/admin/login");
    assert!(res.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let res = t.send(get_as("/admin/dashboard", &cookie)).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_tour_create_and_delete() {
    let t = TestApp::new("tours");
    let cookie = t.login().await;

    let tour = json!({
        "title": "Silk Road Caravan",
        "description": "Across the steppe.",
        "price": "1800",
        "duration": "12 days",
        "destination": "Uzbekistan",
        "category_id": "1",
        "highlights": "Samarkand, Bukhara",
    });
    let res = t.send(json_as("POST", "/api/admin/tours", &cookie, &tour)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let id = body_json(res).await["id"].as_i64().unwrap();

    let res = t
        .send(delete_as(&format!("/api/admin/tours/{id}"), &cookie))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = t
        .send(delete_as(&format!("/api/admin/tours/{id}"), &cookie))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tour_with_bookings_cannot_be_deleted() {
    let t = TestApp::new("tour_conflict");
    let cookie = t.login().await;
    let booking = json!({ "tourId": 1, "name": "Sam", "email": "sam@example.com" });
    t.send(json_post("/book", &booking)).await;

    let res = t.send(delete_as("/api/admin/tours/1", &cookie)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let reply = body_json(res).await;
    assert_eq!(reply["success"], false);
    assert_eq!(reply["hasBookings"], true);
}

#[tokio::test]
async fn test_setting_update_reaches_public_pages() {
    let t = TestApp::new("settings");
    let cookie = t.login().await;

    // Fill the cache first.
    t.send(get("/")).await;

    let update = json!({ "setting_key": "site_name", "value": "Soul Trip Test" });
    let res = t
        .send(json_as("POST", "/admin/settings/update", &cookie, &update))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = text(t.send(get("/")).await).await;
    assert!(html.contains("Soul Trip Test"));

    let unknown = json!({ "setting_key": "no_such_key", "value": "x" });
    let res = t
        .send(json_as("POST", "/admin/settings/update", &cookie, &unknown))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let missing = json!({ "value": "x" });
    let res = t
        .send(json_as("POST", "/admin/settings/update", &cookie, &missing))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_category_lookup() {
    let t = TestApp::new("settings_category");
    let cookie = t.login().await;
    let res = t
        .send(get_as("/admin/settings/category/identity", &cookie))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let reply = body_json(res).await;
    assert!(!reply["settings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_status_must_be_known() {
    let t = TestApp::new("contact_status");
    let cookie = t.login().await;
    let res = t
        .send(json_as(
            "PUT",
            "/api/admin/contacts/1",
            &cookie,
            &json!({ "status": "archived-forever" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Invalid status value");
}

#[tokio::test]
async fn test_rate_limit_answers_429() {
    let mut config = Config::default();
    config.rate_limit.requests = 2;
    let t = TestApp::with_config("rate_limit", config);
    let client: SocketAddr = "203.0.113.7:5000".parse().unwrap();

    let mut last = None;
    for _ in 0..3 {
        let mut req = get("/contact");
        req.extensions_mut().insert(ConnectInfo(client));
        last = Some(t.send(req).await);
    }
    let res = last.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().contains_key(RETRY_AFTER));
    let reply = body_json(res).await;
    assert_eq!(
        reply["error"],
        "Too many requests from this IP, please try again later."
    );
}

#[tokio::test]
async fn test_image_upload() {
    let t = TestApp::new("upload");
    let cookie = t.login().await;

    let req = multipart_as(
        "/api/upload-image",
        &cookie,
        &[],
        Some(("image", "cover.png", "image/png", PNG)),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let reply = body_json(res).await;
    let path = reply["imagePath"].as_str().unwrap();
    assert!(path.starts_with("/uploads/tour-"));
    assert!(t.public_dir.join(path.trim_start_matches('/')).exists());
}

#[tokio::test]
async fn test_uploaded_file_is_served_as_image() {
    let t = TestApp::new("upload_html");
    let cookie = t.login().await;

    let req = multipart_as(
        "/api/upload-image",
        &cookie,
        &[],
        Some(("image", "page.html", "image/png", &b"<script>alert(1)</script>"[..])),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let path = body_json(res).await["imagePath"].as_str().unwrap().to_string();
    assert!(path.ends_with(".png"));

    let res = t.send(get(&path)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_oversized_upload_answers_413() {
    let mut config = Config::default();
    config.uploads.max_bytes = 16;
    let t = TestApp::with_config("upload_large", config);
    let cookie = t.login().await;

    let big = vec![0x89; 64];
    let req = multipart_as(
        "/api/upload-image",
        &cookie,
        &[],
        Some(("image", "huge.png", "image/png", big.as_slice())),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(res).await["success"], false);
}

#[tokio::test]
async fn test_malformed_ids_answer_json() {
    let t = TestApp::new("bad_id");
    let cookie = t.login().await;

    for uri in ["/api/admin/tours/abc", "/admin/about/stats/x1"] {
        let res = t.send(delete_as(uri, &cookie)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let reply = body_json(res).await;
        assert_eq!(reply["success"], false);
        assert_eq!(reply["error"], "Invalid id");
    }
}

#[tokio::test]
async fn test_booking_admin_endpoints() {
    let t = TestApp::new("bookings_api");
    let cookie = t.login().await;
    let booking = json!({ "tourId": 1, "name": "Sam", "email": "sam@example.com" });
    assert_eq!(t.send(json_post("/book", &booking)).await.status(), StatusCode::OK);

    let res = t.send(get_as("/api/admin/bookings/1", &cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let stored = body_json(res).await;
    assert_eq!(stored["name"], "Sam");
    assert_eq!(stored["status"], "Pending");

    let res = t
        .send(json_as(
            "PUT",
            "/api/admin/bookings/1",
            &cookie,
            &json!({ "status": "Confirmed", "participants": "3" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let stored = body_json(t.send(get_as("/api/admin/bookings/1", &cookie)).await).await;
    assert_eq!(stored["status"], "Confirmed");
    assert_eq!(stored["participants"], 3);

    let res = t
        .send(json_as(
            "PUT",
            "/api/admin/bookings/1",
            &cookie,
            &json!({ "status": "Lost" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = t
        .send(json_as(
            "PUT",
            "/api/admin/bookings/99",
            &cookie,
            &json!({ "status": "Cancelled" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = t.send(delete_as("/api/admin/bookings/1", &cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = t.send(delete_as("/api/admin/bookings/1", &cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Booking not found");

    let res = t.send(get_as("/api/admin/bookings/1", &cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logo_upload_updates_site() {
    let t = TestApp::new("logo");
    let cookie = t.login().await;

    // Fill the cache first.
    let html = text(t.send(get("/")).await).await;
    assert!(html.contains("/logo/soul-trip-logo.svg"));

    let req = multipart_as(
        "/admin/settings/upload-logo",
        &cookie,
        &[],
        Some(("logo", "brand.png", "image/png", PNG)),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let path = body_json(res).await["logoPath"].as_str().unwrap().to_string();
    assert!(path.starts_with("/uploads/logos/logo-"));

    let stored = t.state.storage.lock().await.get_setting("site_logo").unwrap().unwrap();
    assert_eq!(stored.value.as_deref(), Some(path.as_str()));
    let html = text(t.send(get("/")).await).await;
    assert!(html.contains(&path));

    let res = t
        .send(multipart_as("/admin/settings/upload-logo", &cookie, &[], None))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_writes_have_their_own_limit() {
    let mut config = Config::default();
    config.rate_limit.settings_requests = 1;
    let t = TestApp::with_config("settings_limit", config);
    let cookie = t.login().await;
    let client: SocketAddr = "198.51.100.4:6000".parse().unwrap();
    let update = json!({ "setting_key": "site_tagline", "value": "Go further" });

    let res = t
        .send(from_client(
            json_as("POST", "/admin/settings/update", &cookie, &update),
            client,
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = t
        .send(from_client(
            json_as("POST", "/admin/settings/update", &cookie, &update),
            client,
        ))
        .await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().contains_key(RETRY_AFTER));

    let res = t
        .send(from_client(
            get_as("/admin/settings/category/identity", &cookie),
            client,
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_team_member_multipart_keeps_portrait() {
    let t = TestApp::new("team");
    let cookie = t.login().await;

    let req = multipart_as(
        "/admin/about/team",
        &cookie,
        &[("name", "Rafi Hasan"), ("position", "Trek Leader"), ("order_index", "9")],
        Some(("image", "rafi.jpg", "image/jpeg", &[0xff, 0xd8, 0xff, 0xe0][..])),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let id = body_json(res).await["id"].as_i64().unwrap();

    let portrait = {
        let page = t.state.storage.lock().await.about_page().unwrap();
        let member = page.team.iter().find(|m| m.id == id).unwrap().clone();
        member.image_url.unwrap()
    };
    assert!(portrait.starts_with("/uploads/team/team-"));
    assert!(portrait.ends_with(".jpg"));
    assert!(t.public_dir.join(portrait.trim_start_matches('/')).exists());

    let req = multipart_as(
        &format!("/admin/about/team/{id}"),
        &cookie,
        &[("name", "Rafi Hasan"), ("position", "Head of Treks")],
        None,
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["message"], "Team member updated successfully");

    let page = t.state.storage.lock().await.about_page().unwrap();
    let member = page.team.iter().find(|m| m.id == id).unwrap();
    assert_eq!(member.position, "Head of Treks");
    assert_eq!(member.image_url.as_deref(), Some(portrait.as_str()));

    let html = text(t.send(get("/about")).await).await;
    assert!(html.contains("Head of Treks"));
}

#[tokio::test]
async fn test_team_update_for_unknown_member_leaves_no_file() {
    let t = TestApp::new("team_missing");
    let cookie = t.login().await;

    let req = multipart_as(
        "/admin/about/team/9999",
        &cookie,
        &[("name", "Ghost"), ("position", "Nobody")],
        Some(("image", "ghost.png", "image/png", PNG)),
    );
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let team_dir = t.state.uploads.directory(crate::uploads::UploadKind::Team);
    let leftovers = std::fs::read_dir(&team_dir).map_or(0, Iterator::count);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_deleted_about_rows_leave_the_page() {
    let t = TestApp::new("about_delete");
    let cookie = t.login().await;
    let stat = "stat_key=guides&stat_value=12&stat_label=Local+Guides";

    let mut req = form("/admin/about/stats", stat);
    req.headers_mut().insert(COOKIE, cookie.parse().unwrap());
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let id = body_json(res).await["id"].as_i64().unwrap();
    assert!(text(t.send(get("/about")).await).await.contains("Local Guides"));

    let res = t
        .send(delete_as(&format!("/admin/about/stats/{id}"), &cookie))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!text(t.send(get("/about")).await).await.contains("Local Guides"));

    // The same key can be added again after a delete.
    let mut req = form("/admin/about/stats", stat);
    req.headers_mut().insert(COOKIE, cookie.parse().unwrap());
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(text(t.send(get("/about")).await).await.contains("Local Guides"));

    let res = t
        .send(delete_as("/admin/about/values/9999", &cookie))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_about_stat_add() {
    let t = TestApp::new("about_stat");
    let cookie = t.login().await;
    let req = Request::builder()
        .method("POST")
        .uri("/admin/about/stats")
        .header(COOKIE, &cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("stat_key=countries&stat_value=40&stat_label=Countries"))
        .unwrap();
    let res = t.send(req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let reply = body_json(res).await;
    assert_eq!(reply["message"], "Statistic added successfully");

    let page = text(t.send(get("/about")).await).await;
    assert!(page.contains("Countries"));
}
