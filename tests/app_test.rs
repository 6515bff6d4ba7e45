//! End-to-end screen flow tests
//!
//! Drives `App` with crossterm key events and runs its queued requests
//! against a mock catalog server.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use digitalflix::api::CatalogClient;
use digitalflix::app::{self, App, AppEvent, AppRequest, AppState, InputMode, NoticeLevel};
use digitalflix::forms::AdminField;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

/// Run every queued request and apply the results, as the event loop does
async fn pump(app: &mut App, client: &CatalogClient) {
    loop {
        let requests = app.take_requests();
        if requests.is_empty() {
            break;
        }
        for request in requests {
            let event = app::execute(client, request).await;
            app.handle_event(event);
        }
    }
}

fn catalog_json() -> String {
    json!([
        {
            "id": 1,
            "title": "Explosive Action",
            "genre": "Action",
            "rating": 8.5,
            "image": "https://img.example/1.jpg",
            "featured": true,
            "year": 2023,
            "trailerUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "videoUrl": "https://youtu.be/dQw4w9WgXcQ"
        },
        {
            "id": 2,
            "title": "Eternal Romance",
            "genre": "Romance",
            "rating": 7.2,
            "image": "https://img.example/2.jpg",
            "year": 2022
        }
    ])
    .to_string()
}

async fn catalog_server() -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movies")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(catalog_json())
        .expect_at_least(1)
        .create_async()
        .await;
    server
}

/// App already past the login screen with the catalog loaded
async fn signed_in(client: &CatalogClient) -> App {
    let mut app = App::new();
    app.go_home();
    pump(&mut app, client).await;
    app
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_login_flow_takes_one_second() {
    let mut app = App::new();
    type_text(&mut app, "john@email.com");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "hunter2");
    app.handle_key(key(KeyCode::Enter));

    let requests = app.take_requests();
    assert_eq!(requests, vec![AppRequest::SignIn]);

    let client = CatalogClient::with_base_url("http://unused.invalid/api");
    let started = tokio::time::Instant::now();
    let event = app::execute(&client, AppRequest::SignIn).await;
    assert!(started.elapsed() >= app::SIGN_IN_DELAY);
    assert_eq!(event, AppEvent::SignInFinished);

    app.handle_event(event);
    assert_eq!(app.state, AppState::Dashboard);
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));

    // Esc cannot return to the login screen
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.state, AppState::Dashboard);
}

// =============================================================================
// Dashboard -> Detail -> Watch
// =============================================================================

#[tokio::test]
async fn test_dashboard_to_detail_to_watch() {
    let mut server = catalog_server().await;
    let detail = server
        .mock("GET", "/movies/1")
        .with_status(200)
        .with_body(
            json!({
                "id": 1,
                "title": "Explosive Action",
                "genre": "Action",
                "rating": 8.5,
                "image": "https://img.example/1.jpg",
                "featured": true,
                "description": "Non-stop action",
                "videoUrl": "https://youtu.be/dQw4w9WgXcQ"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;
    assert_eq!(app.catalog.len(), 2);
    assert_eq!(app.hero().map(|i| i.id), Some(Some(1)));

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.state, AppState::Detail);
    pump(&mut app, &client).await;
    detail.assert_async().await;

    let loaded = app.detail.as_ref().and_then(|d| d.item.as_ref()).unwrap();
    assert_eq!(loaded.description.as_deref(), Some("Non-stop action"));

    app.handle_key(key(KeyCode::Char('w')));
    assert_eq!(app.state, AppState::Watch);
    let session = app.watch.as_ref().unwrap();
    assert_eq!(session.params.id.as_deref(), Some("1"));
    assert_eq!(session.params.title, "Explosive Action");
    assert!(session.embed_url.as_deref().unwrap().contains("controls=0"));

    app.handle_key(key(KeyCode::Char(' ')));
    assert!(!app.watch.as_ref().unwrap().playback.is_playing());

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.state, AppState::Detail);
    assert_eq!(app.history.len(), 1);
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.state, AppState::Dashboard);
}

#[tokio::test]
async fn test_detail_for_deleted_item_shows_not_found() {
    let mut server = catalog_server().await;
    let _missing = server
        .mock("GET", "/movies/2")
        .with_status(404)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    pump(&mut app, &client).await;
    assert_eq!(app.state, AppState::NotFound);

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.state, AppState::Dashboard);
    assert!(app.nav_stack.is_empty());
}

#[tokio::test]
async fn test_search_then_trailer() {
    let server = catalog_server().await;
    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "ACTION");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.dashboard_items().len(), 1);

    app.handle_key(key(KeyCode::Char('t')));
    let trailer = app.trailer.as_ref().unwrap();
    assert_eq!(trailer.display_title, "Explosive Action");

    app.handle_key(key(KeyCode::Esc));
    assert!(app.trailer.is_none());
}

#[tokio::test]
async fn test_search_without_results_leads_to_not_found() {
    let server = catalog_server().await;
    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "western");
    app.handle_key(key(KeyCode::Esc));
    assert!(app.dashboard_items().is_empty());

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.state, AppState::NotFound);
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.state, AppState::Dashboard);
}

#[tokio::test]
async fn test_catalog_unreachable_shows_error() {
    let client = CatalogClient::with_base_url("http://127.0.0.1:9/api");
    let mut app = App::new();
    app.go_home();
    pump(&mut app, &client).await;

    assert!(app.catalog.is_empty());
    assert!(app.catalog_loading.is_error());
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
}

// =============================================================================
// Watch Controls
// =============================================================================

#[tokio::test]
async fn test_mouse_reveals_watch_controls() {
    let server = catalog_server().await;
    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('w')));
    app.handle_event(AppEvent::Timer(digitalflix::player::TimerEvent::ControlsIdle));
    assert!(!app.watch.as_ref().unwrap().controls.is_visible());

    let moved = MouseEvent {
        kind: MouseEventKind::Moved,
        column: 10,
        row: 5,
        modifiers: KeyModifiers::empty(),
    };
    assert!(app.handle_mouse(moved));
    assert!(app.watch.as_ref().unwrap().controls.is_visible());
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_create_flow() {
    let mut server = catalog_server().await;
    let create = server
        .mock("POST", "/movies")
        .match_body(Matcher::PartialJson(json!({
            "title": "Night Terror",
            "genre": "Action",
            "rating": 7.5,
            "image": "https://img.example/n.jpg",
            "featured": true
        })))
        .with_status(201)
        .with_body(
            json!({
                "id": 3,
                "title": "Night Terror",
                "genre": "Action",
                "rating": 7.5,
                "image": "https://img.example/n.jpg",
                "featured": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('a')));
    assert_eq!(app.state, AppState::Admin);
    pump(&mut app, &client).await;

    app.handle_key(key(KeyCode::Char('n')));
    type_text(&mut app, "Night Terror");

    // Walk the form in tab order
    while app.admin.form.as_ref().unwrap().focus != AdminField::Genre {
        app.handle_key(key(KeyCode::Tab));
    }
    app.handle_key(key(KeyCode::Right));

    while app.admin.form.as_ref().unwrap().focus != AdminField::Rating {
        app.handle_key(key(KeyCode::Tab));
    }
    app.handle_key(key(KeyCode::Backspace));
    type_text(&mut app, "7.5");

    while app.admin.form.as_ref().unwrap().focus != AdminField::ImageUrl {
        app.handle_key(key(KeyCode::Tab));
    }
    type_text(&mut app, "https://img.example/n.jpg");

    while app.admin.form.as_ref().unwrap().focus != AdminField::Featured {
        app.handle_key(key(KeyCode::Tab));
    }
    app.handle_key(key(KeyCode::Char(' ')));

    app.handle_key(key(KeyCode::Enter));
    pump(&mut app, &client).await;

    create.assert_async().await;
    assert!(app.admin.form.is_none());
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
}

#[tokio::test]
async fn test_admin_rejects_out_of_range_year() {
    let server = catalog_server().await;
    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app, &client).await;
    app.handle_key(key(KeyCode::Char('e')));

    while app.admin.form.as_ref().unwrap().focus != AdminField::Year {
        app.handle_key(key(KeyCode::Tab));
    }
    for _ in 0..4 {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_text(&mut app, "1850");
    app.handle_key(key(KeyCode::Enter));

    assert!(app.take_requests().is_empty());
    assert!(app.admin.form.is_some());
    let notice = app.notice.as_ref().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.contains("1850"));
}

#[tokio::test]
async fn test_admin_delete_flow() {
    let mut server = catalog_server().await;
    let delete = server
        .mock("DELETE", "/movies/2")
        .with_status(204)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app, &client).await;

    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "romance");
    app.handle_key(key(KeyCode::Enter));

    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.admin.confirm_delete, Some(2));
    app.handle_key(key(KeyCode::Char('y')));
    pump(&mut app, &client).await;

    delete.assert_async().await;
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
}

#[tokio::test]
async fn test_admin_delete_prompt_swallows_quit() {
    let mut server = catalog_server().await;
    let delete = server
        .mock("DELETE", Matcher::Regex(r"^/movies/\d+$".into()))
        .expect(0)
        .create_async()
        .await;

    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app, &client).await;

    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.running);
    assert_eq!(app.state, AppState::Admin);
    assert!(app.admin.confirm_delete.is_none());

    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.state, AppState::Admin);
    assert!(app.admin.confirm_delete.is_none());

    pump(&mut app, &client).await;
    delete.assert_async().await;
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_shows_featured_favorites() {
    let server = catalog_server().await;
    let client = CatalogClient::with_base_url(server.url());
    let mut app = signed_in(&client).await;

    app.handle_key(key(KeyCode::Char('p')));
    assert_eq!(app.state, AppState::Profile);
    assert_eq!(app.favorites(), vec!["Explosive Action"]);

    app.handle_key(key(KeyCode::Char('e')));
    app.handle_key(key(KeyCode::Tab));
    for _ in 0.."john@email.com".len() {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_text(&mut app, "john@digitalflix.test");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.profile.profile.email, "john@digitalflix.test");
    assert!(app.profile.draft.is_none());
}
