//! App state and core application logic
//!
//! Manages the application state machine, navigation stack,
//! and coordinates between UI and backend services.
//!
//! `App` never performs I/O itself. Key handlers queue [`AppRequest`]s,
//! the event loop runs them on tokio and feeds the outcome back as
//! [`AppEvent`]s.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{CatalogClient, CatalogError};
use crate::config::Config;
use crate::forms::{AdminField, AdminForm, LoginForm, ProfileDraft, TextInput};
use crate::models::*;
use crate::player::{embed_url, ControlsOverlay, EmbedProfile, PlaybackState, TimerEvent, WatchTimers};

/// Delay of the simulated sign-in
pub const SIGN_IN_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Sign-in form
    #[default]
    Login,
    /// Catalog grid with hero and search
    Dashboard,
    /// Detail view for one catalog item
    Detail,
    /// Simulated playback
    Watch,
    /// User profile and watch history
    Profile,
    /// Catalog administration (CRUD)
    Admin,
    /// Content not found page
    NotFound,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

// =============================================================================
// Requests & Events
// =============================================================================

/// Side effect requested by the UI, executed by the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppRequest {
    /// Simulated sign-in round trip
    SignIn,
    LoadCatalog,
    LoadItem(u64),
    CreateItem(CatalogItem),
    UpdateItem(u64, CatalogPatch),
    DeleteItem(u64),
}

/// Why a single-item lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    NotFound,
    Failed(String),
}

/// Outcome delivered back to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Timer(TimerEvent),
    SignInFinished,
    CatalogLoaded(Result<Vec<CatalogItem>, String>),
    ItemLoaded(u64, Result<CatalogItem, LookupError>),
    ItemSaved {
        created: bool,
        result: Result<CatalogItem, String>,
    },
    ItemDeleted(u64, Result<(), String>),
}

impl From<TimerEvent> for AppEvent {
    fn from(event: TimerEvent) -> Self {
        AppEvent::Timer(event)
    }
}

/// Run one request against the catalog API
pub async fn execute(client: &CatalogClient, request: AppRequest) -> AppEvent {
    match request {
        AppRequest::SignIn => {
            tokio::time::sleep(SIGN_IN_DELAY).await;
            AppEvent::SignInFinished
        }
        AppRequest::LoadCatalog => {
            AppEvent::CatalogLoaded(client.list().await.map_err(|e| e.to_string()))
        }
        AppRequest::LoadItem(id) => {
            let result = client.get(id).await.map_err(|e| match e {
                CatalogError::NotFound => LookupError::NotFound,
                other => LookupError::Failed(other.to_string()),
            });
            AppEvent::ItemLoaded(id, result)
        }
        AppRequest::CreateItem(item) => AppEvent::ItemSaved {
            created: true,
            result: client.create(&item).await.map_err(|e| e.to_string()),
        },
        AppRequest::UpdateItem(id, patch) => AppEvent::ItemSaved {
            created: false,
            result: client.update(id, &patch).await.map_err(|e| e.to_string()),
        },
        AppRequest::DeleteItem(id) => {
            AppEvent::ItemDeleted(id, client.delete(id).await.map_err(|e| e.to_string()))
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible_height > 0 && self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Dashboard view state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Title/genre filter
    pub search: TextInput,
    pub list: ListState,
}

/// Detail view state
#[derive(Debug, Clone)]
pub struct DetailState {
    pub id: u64,
    pub item: Option<CatalogItem>,
    pub loading: LoadingState,
}

impl DetailState {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            item: None,
            loading: LoadingState::Loading(Some("Loading movie...".into())),
        }
    }
}

/// Watch-screen behavior derived from config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSettings {
    pub total_secs: u32,
    pub controls_visible_on_idle: bool,
    pub idle_hide_after: Option<Duration>,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for WatchSettings {
    fn from(config: &Config) -> Self {
        Self {
            total_secs: config.watch_duration_secs,
            controls_visible_on_idle: config.controls_visible_on_idle,
            idle_hide_after: config.idle_hide_after(),
        }
    }
}

/// One open watch screen; dropping it stops its timers
#[derive(Debug)]
pub struct WatchSession {
    pub params: WatchParams,
    /// Player URL for the video, if one was given
    pub embed_url: Option<String>,
    pub playback: PlaybackState,
    pub controls: ControlsOverlay,
    timers: Option<WatchTimers>,
}

impl WatchSession {
    pub fn new(params: WatchParams, settings: WatchSettings) -> Self {
        let profile = EmbedProfile::Watch {
            controls: settings.controls_visible_on_idle,
        };
        let embed_url = params.video_url.as_deref().map(|url| embed_url(url, profile));
        Self {
            params,
            embed_url,
            playback: PlaybackState::new(settings.total_secs),
            controls: ControlsOverlay::new(settings.controls_visible_on_idle),
            timers: None,
        }
    }

    /// Whether tick/idle timers are attached
    pub fn has_timers(&self) -> bool {
        self.timers.is_some()
    }

    /// Pointer moved or key pressed
    pub fn reveal_controls(&mut self) {
        self.controls.reveal();
        if let Some(timers) = &self.timers {
            timers.reveal();
        }
    }

    fn history_entry(&self) -> WatchHistoryEntry {
        WatchHistoryEntry {
            title: self.params.title.clone(),
            progress_percent: self.playback.progress_percent().round().min(100.0) as u8,
        }
    }
}

/// Profile view state
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: UserProfile,
    /// Present while editing
    pub draft: Option<ProfileDraft>,
}

/// Admin view state
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub search: TextInput,
    pub list: ListState,
    /// Open create/edit form
    pub form: Option<AdminForm>,
    /// Item awaiting delete confirmation
    pub confirm_delete: Option<u64>,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Current notification
    pub notice: Option<Notice>,
    /// Open trailer modal
    pub trailer: Option<TrailerSelection>,

    // Shared catalog data (dashboard, admin, profile favorites)
    pub catalog: Vec<CatalogItem>,
    pub catalog_loading: LoadingState,

    // View-specific states
    pub login: LoginForm,
    pub dashboard: DashboardState,
    pub detail: Option<DetailState>,
    pub watch: Option<WatchSession>,
    pub profile: ProfileState,
    pub admin: AdminState,
    pub history: Vec<WatchHistoryEntry>,

    pub watch_settings: WatchSettings,
    requests: Vec<AppRequest>,
    events: Option<mpsc::UnboundedSender<AppEvent>>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            state: AppState::Login,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            notice: None,
            trailer: None,

            catalog: Vec::new(),
            catalog_loading: LoadingState::Idle,

            login: LoginForm::default(),
            dashboard: DashboardState::default(),
            detail: None,
            watch: None,
            profile: ProfileState::default(),
            admin: AdminState::default(),
            history: Vec::new(),

            watch_settings: WatchSettings::default(),
            requests: Vec::new(),
            events: None,
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App using the watch settings from `config`
    pub fn with_config(config: &Config) -> Self {
        Self {
            watch_settings: WatchSettings::from(config),
            ..Self::default()
        }
    }

    /// Attach the channel timers report on. Without it, watch sessions run
    /// without timers (e.g. outside a tokio runtime).
    pub fn set_event_sender(&mut self, events: mpsc::UnboundedSender<AppEvent>) {
        self.events = Some(events);
    }

    /// Drain queued side effects
    pub fn take_requests(&mut self) -> Vec<AppRequest> {
        std::mem::take(&mut self.requests)
    }

    fn request(&mut self, request: AppRequest) {
        debug!(?request, "queued request");
        self.requests.push(request);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.leave_current();
            self.nav_stack.push(self.state);
            self.state = state;
            info!(?state, "navigate");
        }
        self.input_mode = InputMode::Normal;
    }

    /// Swap the current screen without recording it in history
    fn replace(&mut self, state: AppState) {
        if self.state != state {
            self.leave_current();
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        // If in editing mode, exit editing first
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.leave_current();
            self.state = prev;
            true
        } else {
            false
        }
    }

    /// Per-screen teardown when the current screen is left
    fn leave_current(&mut self) {
        if self.state == AppState::Watch {
            self.end_watch();
        }
        self.trailer = None;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.leave_current();
        self.running = false;
    }

    /// Clear notice
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Show a notice
    pub fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            warn!(title = %notice.title, message = %notice.message, "error notice");
        }
        self.notice = Some(notice);
    }

    // -------------------------------------------------------------------------
    // Screen Entry Points
    // -------------------------------------------------------------------------

    /// Start the dashboard from scratch (after sign-in or from not-found)
    pub fn go_home(&mut self) {
        self.leave_current();
        self.nav_stack.clear();
        self.state = AppState::Dashboard;
        self.input_mode = InputMode::Normal;
        self.reload_catalog();
    }

    /// Back to the login screen with an empty form
    pub fn logout(&mut self) {
        self.leave_current();
        self.nav_stack.clear();
        self.state = AppState::Login;
        self.input_mode = InputMode::Normal;
        self.login = LoginForm::default();
        info!("signed out");
    }

    pub fn reload_catalog(&mut self) {
        self.catalog_loading = LoadingState::Loading(Some("Loading movies...".into()));
        self.request(AppRequest::LoadCatalog);
    }

    /// Open the detail view for an item id
    pub fn open_detail(&mut self, id: u64) {
        self.detail = Some(DetailState::new(id));
        self.navigate(AppState::Detail);
        self.request(AppRequest::LoadItem(id));
    }

    /// Open the trailer modal
    pub fn open_trailer(&mut self, selection: TrailerSelection) {
        self.trailer = Some(selection);
    }

    pub fn close_trailer(&mut self) {
        self.trailer = None;
    }

    /// Embed URL of the open trailer
    pub fn trailer_embed_url(&self) -> Option<String> {
        self.trailer
            .as_ref()
            .map(|t| embed_url(&t.video_url, EmbedProfile::Trailer))
    }

    /// Open the watch screen
    pub fn open_watch(&mut self, params: WatchParams) {
        self.navigate(AppState::Watch);
        // Navigating ended any previous session, so a same-screen reopen
        // needs an explicit teardown too
        self.end_watch();

        let mut session = WatchSession::new(params, self.watch_settings);
        if let Some(events) = &self.events {
            session.timers = Some(WatchTimers::spawn(
                events.clone(),
                self.watch_settings.idle_hide_after,
            ));
        }
        info!(title = %session.params.title, "watch session started");
        self.watch = Some(session);
    }

    /// Drop the watch session (stopping its timers) and record history
    fn end_watch(&mut self) {
        if let Some(session) = self.watch.take() {
            let entry = session.history_entry();
            info!(title = %entry.title, progress = entry.progress_percent, "watch session ended");
            record_watch(&mut self.history, entry);
        }
    }

    pub fn open_profile(&mut self) {
        self.profile.draft = None;
        self.navigate(AppState::Profile);
    }

    pub fn open_admin(&mut self) {
        self.admin.form = None;
        self.admin.confirm_delete = None;
        self.navigate(AppState::Admin);
        self.reload_catalog();
    }

    // -------------------------------------------------------------------------
    // Derived Data
    // -------------------------------------------------------------------------

    /// Dashboard items after the search filter
    pub fn dashboard_items(&self) -> Vec<&CatalogItem> {
        filter_items(&self.catalog, self.dashboard.search.value())
    }

    /// Admin items after the search filter
    pub fn admin_items(&self) -> Vec<&CatalogItem> {
        filter_items(&self.catalog, self.admin.search.value())
    }

    /// First featured item, shown as the dashboard hero
    pub fn hero(&self) -> Option<&CatalogItem> {
        self.catalog.iter().find(|item| item.featured)
    }

    pub fn selected_dashboard_item(&self) -> Option<&CatalogItem> {
        self.dashboard_items().get(self.dashboard.list.selected).copied()
    }

    pub fn selected_admin_item(&self) -> Option<&CatalogItem> {
        self.admin_items().get(self.admin.list.selected).copied()
    }

    /// Favorite titles: featured catalog entries, else recently watched
    pub fn favorites(&self) -> Vec<&str> {
        let featured: Vec<&str> = self
            .catalog
            .iter()
            .filter(|item| item.featured)
            .map(|item| item.title.as_str())
            .collect();
        if featured.is_empty() {
            self.history.iter().map(|e| e.title.as_str()).collect()
        } else {
            featured
        }
    }

    fn sync_lists(&mut self) {
        let dashboard_len = self.dashboard_items().len();
        self.dashboard.list.set_len(dashboard_len);
        let admin_len = self.admin_items().len();
        self.admin.list.set_len(admin_len);
    }

    // -------------------------------------------------------------------------
    // Async Results
    // -------------------------------------------------------------------------

    /// Apply an event from a timer or a finished request
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Timer(TimerEvent::Tick) => {
                if let Some(session) = &mut self.watch {
                    session.playback.tick();
                }
            }
            AppEvent::Timer(TimerEvent::ControlsIdle) => {
                if let Some(session) = &mut self.watch {
                    session.controls.hide();
                }
            }
            AppEvent::SignInFinished => self.finish_sign_in(),
            AppEvent::CatalogLoaded(result) => self.apply_catalog(result),
            AppEvent::ItemLoaded(id, result) => self.apply_item(id, result),
            AppEvent::ItemSaved { created, result } => self.apply_saved(created, result),
            AppEvent::ItemDeleted(id, result) => self.apply_deleted(id, result),
        }
    }

    fn finish_sign_in(&mut self) {
        if self.state != AppState::Login || !self.login.submitting {
            return;
        }
        self.login.submitting = false;

        if self.login.is_complete() {
            info!(email = self.login.email.value(), "signed in");
            self.notify(Notice::info(
                "Signed in",
                "Welcome back to Digitalflix",
            ));
            self.go_home();
        } else {
            self.notify(Notice::error("Sign-in failed", "Please fill in all fields"));
        }
    }

    fn apply_catalog(&mut self, result: Result<Vec<CatalogItem>, String>) {
        match result {
            Ok(items) => {
                debug!(count = items.len(), "catalog loaded");
                self.catalog = items;
                self.catalog_loading = LoadingState::Idle;
            }
            Err(e) => {
                self.catalog.clear();
                self.catalog_loading = LoadingState::Error(e);
                self.notify(Notice::error(
                    "Error",
                    "Could not load movies. Check that the API is running.",
                ));
            }
        }
        self.sync_lists();
    }

    fn apply_item(&mut self, id: u64, result: Result<CatalogItem, LookupError>) {
        let relevant = self.state == AppState::Detail
            && self.detail.as_ref().map(|d| d.id) == Some(id);
        if !relevant {
            debug!(id, "discarding stale item result");
            return;
        }

        match result {
            Ok(item) => {
                if let Some(detail) = &mut self.detail {
                    detail.item = Some(item);
                    detail.loading = LoadingState::Idle;
                }
            }
            Err(LookupError::NotFound) => {
                self.detail = None;
                self.replace(AppState::NotFound);
            }
            Err(LookupError::Failed(e)) => {
                if let Some(detail) = &mut self.detail {
                    detail.loading = LoadingState::Error(e);
                }
                self.notify(Notice::error("Error", "Could not load this movie."));
            }
        }
    }

    fn apply_saved(&mut self, created: bool, result: Result<CatalogItem, String>) {
        match result {
            Ok(item) => {
                let message = if created {
                    "Movie created successfully!"
                } else {
                    "Movie updated successfully!"
                };
                debug!(id = ?item.id, created, "item saved");
                self.admin.form = None;
                self.notify(Notice::info("Success", message));
                self.reload_catalog();
            }
            Err(_) => {
                if let Some(form) = &mut self.admin.form {
                    form.saving = false;
                }
                self.notify(Notice::error(
                    "Error",
                    "Could not save the movie. Check that the API is running.",
                ));
            }
        }
    }

    fn apply_deleted(&mut self, id: u64, result: Result<(), String>) {
        match result {
            Ok(()) => {
                debug!(id, "item deleted");
                self.notify(Notice::info("Success", "Movie deleted successfully!"));
                self.reload_catalog();
            }
            Err(_) => self.notify(Notice::error("Error", "Could not delete the movie.")),
        }
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle mouse event; only pointer activity on the watch screen matters
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.state != AppState::Watch {
            return false;
        }
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                if let Some(session) = &mut self.watch {
                    session.reveal_controls();
                }
                true
            }
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear notice on any keypress
        self.notice = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        // Modal trailer swallows everything but close
        if self.trailer.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.close_trailer();
            }
            return true;
        }

        // A pending delete confirmation takes the next key, whatever it is
        if self.state == AppState::Admin {
            if let Some(id) = self.admin.confirm_delete.take() {
                if key.code == KeyCode::Char('y') {
                    self.request(AppRequest::DeleteItem(id));
                }
                return true;
            }
        }

        // Screens with their own text entry
        match self.state {
            AppState::Login => return self.handle_login_key(key),
            AppState::Admin if self.admin.form.is_some() => return self.handle_admin_form_key(key),
            AppState::Profile if self.profile.draft.is_some() => {
                return self.handle_profile_draft_key(key)
            }
            _ => {}
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        if self.login.submitting {
            return false;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus();
                true
            }
            KeyCode::Enter => {
                self.login.submitting = true;
                self.request(AppRequest::SignIn);
                true
            }
            KeyCode::Esc => {
                self.quit();
                true
            }
            code => edit_text(self.login.focused_input(), code),
        }
    }

    /// Search box editing on dashboard/admin
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            code => {
                let input = match self.state {
                    AppState::Admin => &mut self.admin.search,
                    _ => &mut self.dashboard.search,
                };
                let changed = edit_text(input, code);
                if changed {
                    self.dashboard.list.first();
                    self.admin.list.first();
                    self.sync_lists();
                }
                changed
            }
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Any key counts as activity on the watch screen
        if let Some(session) = &mut self.watch {
            session.reveal_controls();
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.state {
            AppState::Login => false,
            AppState::Dashboard => self.handle_dashboard_key(key),
            AppState::Detail => self.handle_detail_key(key),
            AppState::Watch => self.handle_watch_key(key),
            AppState::Profile => self.handle_profile_key(key),
            AppState::Admin => self.handle_admin_key(key),
            AppState::NotFound => self.handle_not_found_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.dashboard.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.dashboard.list.down();
                true
            }
            KeyCode::Home => {
                self.dashboard.list.first();
                true
            }
            KeyCode::End => {
                self.dashboard.list.last();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Editing;
                true
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                if self.dashboard_items().is_empty() && !self.dashboard.search.is_empty() {
                    self.navigate(AppState::NotFound);
                } else if let Some(id) = self.selected_dashboard_item().and_then(|i| i.id) {
                    self.open_detail(id);
                }
                true
            }
            KeyCode::Char('w') => {
                if let Some(params) = self.selected_dashboard_item().map(|i| i.watch_params()) {
                    self.open_watch(params);
                }
                true
            }
            KeyCode::Char('t') => {
                if let Some(trailer) = self.selected_dashboard_item().and_then(|i| i.trailer()) {
                    self.open_trailer(trailer);
                }
                true
            }
            KeyCode::Char('p') => {
                self.open_profile();
                true
            }
            KeyCode::Char('a') => {
                self.open_admin();
                true
            }
            KeyCode::Char('r') => {
                self.reload_catalog();
                true
            }
            KeyCode::Char('L') => {
                self.logout();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let item = self.detail.as_ref().and_then(|d| d.item.as_ref());
        match key.code {
            KeyCode::Enter | KeyCode::Char('w') => {
                if let Some(params) = item.map(|i| i.watch_params()) {
                    self.open_watch(params);
                }
                true
            }
            KeyCode::Char('t') => {
                if let Some(trailer) = item.and_then(|i| i.trailer()) {
                    self.open_trailer(trailer);
                }
                true
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.detail.as_ref().map(|d| d.id) {
                    self.detail = Some(DetailState::new(id));
                    self.request(AppRequest::LoadItem(id));
                }
                true
            }
            _ => false,
        }
    }

    fn handle_watch_key(&mut self, key: KeyEvent) -> bool {
        let Some(session) = &mut self.watch else {
            return false;
        };
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('k') => {
                session.playback.toggle_play();
                true
            }
            KeyCode::Char('m') => {
                session.playback.toggle_mute();
                true
            }
            // Activity only
            _ => true,
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('e') => {
                self.profile.draft = Some(ProfileDraft::from_profile(&self.profile.profile));
                true
            }
            _ => false,
        }
    }

    fn handle_profile_draft_key(&mut self, key: KeyEvent) -> bool {
        let Some(draft) = &mut self.profile.draft else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.profile.draft = None;
                true
            }
            KeyCode::Enter => {
                draft.apply(&mut self.profile.profile);
                self.profile.draft = None;
                self.notify(Notice::info(
                    "Profile updated",
                    "Your information was saved successfully!",
                ));
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                draft.focus = draft.focus.next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                draft.focus = draft.focus.prev();
                true
            }
            code => edit_text(draft.focused_input(), code),
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.admin.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.admin.list.down();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Editing;
                true
            }
            KeyCode::Char('n') => {
                self.admin.form = Some(AdminForm::new_item(current_year()));
                true
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(item) = self.selected_admin_item() {
                    let form = AdminForm::from_item(item, current_year());
                    self.admin.form = Some(form);
                }
                true
            }
            KeyCode::Char('d') => {
                self.admin.confirm_delete = self.selected_admin_item().and_then(|i| i.id);
                true
            }
            KeyCode::Char('r') => {
                self.reload_catalog();
                true
            }
            _ => false,
        }
    }

    fn handle_admin_form_key(&mut self, key: KeyEvent) -> bool {
        let Some(form) = &mut self.admin.form else {
            return false;
        };
        if form.saving {
            return false;
        }

        match key.code {
            KeyCode::Esc => {
                self.admin.form = None;
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.prev_field();
                true
            }
            KeyCode::Enter => {
                self.submit_admin_form();
                true
            }
            KeyCode::Left | KeyCode::Right if form.focus == AdminField::Genre => {
                form.cycle_genre(key.code == KeyCode::Right);
                true
            }
            KeyCode::Char(' ') if form.focus == AdminField::Featured => {
                form.toggle_featured();
                true
            }
            code => match form.focused_input() {
                Some(input) => edit_text(input, code),
                None => false,
            },
        }
    }

    fn submit_admin_form(&mut self) {
        let Some(form) = &mut self.admin.form else {
            return;
        };

        let request = match form.editing {
            Some(id) => form.to_patch().map(|patch| AppRequest::UpdateItem(id, patch)),
            None => form.to_item().map(AppRequest::CreateItem),
        };

        match request {
            Ok(request) => {
                form.saving = true;
                self.request(request);
            }
            Err(e) => self.notify(Notice::error("Invalid movie", e.to_string())),
        }
    }

    fn handle_not_found_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char('h') => {
                self.go_home();
                true
            }
            _ => false,
        }
    }
}

/// Apply a text-editing key to an input; returns true if handled
fn edit_text(input: &mut TextInput, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.cursor_left(),
        KeyCode::Right => input.cursor_right(),
        KeyCode::Home => input.cursor_home(),
        KeyCode::End => input.cursor_end(),
        _ => return false,
    }
    true
}

/// Current calendar year (UTC)
pub fn current_year() -> u16 {
    let days = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() / 86_400)
        .unwrap_or(0) as i64;

    // Civil-from-days, proleptic Gregorian
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    year as u16
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn movie(id: u64, title: &str, genre: &str, featured: bool) -> CatalogItem {
        let mut item = CatalogItem::new(title, genre, 8.0, format!("https://img.example/{}.jpg", id));
        item.id = Some(id);
        item.featured = featured;
        item
    }

    fn signed_in_app() -> App {
        let mut app = App::new();
        app.go_home();
        app.take_requests();
        app.handle_event(AppEvent::CatalogLoaded(Ok(vec![
            movie(1, "Explosive Action", "Action", true),
            movie(2, "Eternal Romance", "Romance", false),
            movie(3, "Cyberpunk Future", "Science Fiction", true),
        ])));
        app
    }

    // -------------------------------------------------------------------------
    // ListState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(3);
        list.down();
        list.down();
        list.down();
        assert_eq!(list.selected, 2);
        list.up();
        assert_eq!(list.selected, 1);
        list.first();
        assert_eq!(list.selected, 0);
        list.last();
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn test_list_state_set_len_clamps() {
        let mut list = ListState::new(10);
        list.selected = 8;
        list.set_len(5);
        assert_eq!(list.selected, 4);
        list.set_len(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut list = ListState::new(20);
        list.selected = 12;
        list.scroll_into_view(5);
        assert_eq!(list.offset, 8);
        list.selected = 3;
        list.scroll_into_view(5);
        assert_eq!(list.offset, 3);
    }

    // -------------------------------------------------------------------------
    // Navigation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_app_starts_on_login() {
        let app = App::new();
        assert_eq!(app.state, AppState::Login);
        assert!(app.running);
    }

    #[test]
    fn test_navigation_stack() {
        let mut app = signed_in_app();
        app.navigate(AppState::Profile);
        app.navigate(AppState::Admin);
        assert_eq!(app.nav_stack, vec![AppState::Dashboard, AppState::Profile]);

        assert!(app.back());
        assert_eq!(app.state, AppState::Profile);
        assert!(app.back());
        assert_eq!(app.state, AppState::Dashboard);
        assert!(!app.back());
    }

    #[test]
    fn test_navigate_same_state_does_not_push() {
        let mut app = signed_in_app();
        app.navigate(AppState::Admin);
        app.navigate(AppState::Admin);
        assert_eq!(app.nav_stack.len(), 1);
    }

    // -------------------------------------------------------------------------
    // Login Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_queues_sign_in() {
        let mut app = App::new();
        for c in "me@x.io".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "pw".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert!(app.login.submitting);
        assert_eq!(app.take_requests(), vec![AppRequest::SignIn]);

        // Typing is ignored while submitting
        app.handle_key(key(KeyCode::Char('z')));
        assert_eq!(app.login.password.value(), "pw");

        app.handle_event(AppEvent::SignInFinished);
        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.nav_stack.is_empty());
        assert_eq!(app.take_requests(), vec![AppRequest::LoadCatalog]);
        assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
    }

    #[test]
    fn test_login_with_empty_password_fails() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Enter));
        app.handle_event(AppEvent::SignInFinished);

        assert_eq!(app.state, AppState::Login);
        assert!(!app.login.submitting);
        assert!(app.notice.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_logout_resets_login() {
        let mut app = signed_in_app();
        app.login.email = TextInput::new("me@x.io");
        app.handle_key(key(KeyCode::Char('L')));
        assert_eq!(app.state, AppState::Login);
        assert!(app.login.email.is_empty());
        assert!(app.nav_stack.is_empty());
    }

    // -------------------------------------------------------------------------
    // Dashboard Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_dashboard_search_filters() {
        let mut app = signed_in_app();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
        for c in "romance".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let titles: Vec<&str> = app.dashboard_items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Eternal Romance"]);
        assert_eq!(app.dashboard.list.len, 1);
    }

    #[test]
    fn test_hero_is_first_featured() {
        let app = signed_in_app();
        assert_eq!(app.hero().map(|i| i.title.as_str()), Some("Explosive Action"));
    }

    #[test]
    fn test_catalog_failure_falls_back_to_empty() {
        let mut app = signed_in_app();
        app.handle_event(AppEvent::CatalogLoaded(Err("connection refused".into())));
        assert!(app.catalog.is_empty());
        assert!(app.catalog_loading.is_error());
        assert!(app.notice.as_ref().unwrap().is_error());
        assert_eq!(app.dashboard.list.len, 0);
    }

    #[test]
    fn test_dashboard_opens_detail() {
        let mut app = signed_in_app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Detail);
        assert_eq!(app.take_requests(), vec![AppRequest::LoadItem(2)]);
    }

    // -------------------------------------------------------------------------
    // Detail Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_detail_not_found_replaces_screen() {
        let mut app = signed_in_app();
        app.open_detail(99);
        app.handle_event(AppEvent::ItemLoaded(99, Err(LookupError::NotFound)));
        assert_eq!(app.state, AppState::NotFound);
        assert!(app.back());
        assert_eq!(app.state, AppState::Dashboard);
    }

    #[test]
    fn test_stale_item_result_is_discarded() {
        let mut app = signed_in_app();
        app.open_detail(1);
        app.back();
        app.handle_event(AppEvent::ItemLoaded(1, Err(LookupError::NotFound)));
        assert_eq!(app.state, AppState::Dashboard);
    }

    #[test]
    fn test_trailer_modal() {
        let mut app = signed_in_app();
        app.open_detail(3);
        let mut item = movie(3, "Cyberpunk Future", "Science Fiction", true);
        item.trailer_url = Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".into());
        app.handle_event(AppEvent::ItemLoaded(3, Ok(item)));

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(
            app.trailer_embed_url().as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0")
        );

        // Modal swallows navigation keys
        app.handle_key(key(KeyCode::Char('w')));
        assert_eq!(app.state, AppState::Detail);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.trailer.is_none());
        assert_eq!(app.state, AppState::Detail);
    }

    // -------------------------------------------------------------------------
    // Watch Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_watch_toggle_and_ticks() {
        let mut app = signed_in_app();
        app.open_watch(WatchParams::default());
        assert!(!app.watch.as_ref().unwrap().has_timers());

        app.handle_event(AppEvent::Timer(TimerEvent::Tick));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_event(AppEvent::Timer(TimerEvent::Tick));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_event(AppEvent::Timer(TimerEvent::Tick));

        let playback = app.watch.as_ref().unwrap().playback;
        assert!(playback.is_playing());
        assert_eq!(playback.position_secs(), 2);
    }

    #[test]
    fn test_watch_idle_hides_and_key_reveals() {
        let mut app = signed_in_app();
        app.open_watch(WatchParams::default());

        app.handle_event(AppEvent::Timer(TimerEvent::ControlsIdle));
        assert!(!app.watch.as_ref().unwrap().controls.is_visible());

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.watch.as_ref().unwrap().controls.is_visible());
    }

    #[test]
    fn test_watch_pinned_controls_setting() {
        let config = Config {
            controls_visible_on_idle: true,
            ..Default::default()
        };
        let mut app = App::with_config(&config);
        app.go_home();
        app.open_watch(WatchParams {
            video_url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            ..Default::default()
        });

        let session = app.watch.as_ref().unwrap();
        assert!(session.embed_url.as_deref().unwrap().contains("controls=1"));

        app.handle_event(AppEvent::Timer(TimerEvent::ControlsIdle));
        assert!(app.watch.as_ref().unwrap().controls.is_visible());
    }

    #[test]
    fn test_leaving_watch_records_history() {
        let mut app = signed_in_app();
        app.open_watch(WatchParams {
            title: "Explosive Action".into(),
            ..Default::default()
        });
        for _ in 0..3660 {
            app.handle_event(AppEvent::Timer(TimerEvent::Tick));
        }
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.watch.is_none());
        assert_eq!(
            app.history,
            vec![WatchHistoryEntry {
                title: "Explosive Action".into(),
                progress_percent: 50,
            }]
        );
    }

    #[test]
    fn test_ticks_after_teardown_are_ignored() {
        let mut app = signed_in_app();
        app.open_watch(WatchParams::default());
        app.back();
        app.handle_event(AppEvent::Timer(TimerEvent::Tick));
        assert!(app.watch.is_none());
    }

    // -------------------------------------------------------------------------
    // Profile Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_profile_edit_and_cancel() {
        let mut app = signed_in_app();
        app.open_profile();
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::Char('!')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.profile.profile, UserProfile::default());
        assert_eq!(app.state, AppState::Profile);

        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::Char('!')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.profile.profile.name, "John Silva!");
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_favorites_prefer_featured() {
        let mut app = signed_in_app();
        assert_eq!(app.favorites(), vec!["Explosive Action", "Cyberpunk Future"]);
        app.catalog.clear();
        app.history.push(WatchHistoryEntry {
            title: "Night Terror".into(),
            progress_percent: 40,
        });
        assert_eq!(app.favorites(), vec!["Night Terror"]);
    }

    // -------------------------------------------------------------------------
    // Admin Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_admin_delete_requires_confirmation() {
        let mut app = signed_in_app();
        app.open_admin();
        app.take_requests();

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.admin.confirm_delete, Some(1));
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.take_requests().is_empty());
        assert!(app.admin.form.is_none());

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.take_requests(), vec![AppRequest::DeleteItem(1)]);
    }

    #[test]
    fn test_admin_delete_confirmation_cancelled_by_quit_and_esc() {
        let mut app = signed_in_app();
        app.open_admin();
        app.take_requests();

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.state, AppState::Admin);
        assert_eq!(app.admin.confirm_delete, None);

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Admin);
        assert_eq!(app.admin.confirm_delete, None);
        assert!(app.take_requests().is_empty());

        // Keys work normally again once the prompt is gone
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Dashboard);
    }

    #[test]
    fn test_admin_invalid_form_stays_open() {
        let mut app = signed_in_app();
        app.open_admin();
        app.take_requests();

        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.admin.form.is_some());
        assert!(app.take_requests().is_empty());
        assert!(app.notice.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_admin_edit_submits_update() {
        let mut app = signed_in_app();
        app.open_admin();
        app.take_requests();

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::Enter));

        let requests = app.take_requests();
        assert!(matches!(requests.as_slice(), [AppRequest::UpdateItem(2, _)]));
        assert!(app.admin.form.as_ref().unwrap().saving);

        app.handle_event(AppEvent::ItemSaved {
            created: false,
            result: Ok(movie(2, "Eternal Romance", "Romance", false)),
        });
        assert!(app.admin.form.is_none());
        assert_eq!(app.take_requests(), vec![AppRequest::LoadCatalog]);
    }

    #[test]
    fn test_admin_save_failure_keeps_form() {
        let mut app = signed_in_app();
        app.open_admin();
        app.handle_key(key(KeyCode::Char('e')));
        app.submit_admin_form();
        app.handle_event(AppEvent::ItemSaved {
            created: false,
            result: Err("HTTP 500".into()),
        });
        let form = app.admin.form.as_ref().unwrap();
        assert!(!form.saving);
        assert!(app.notice.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_current_year_is_sane() {
        let year = current_year();
        assert!((2024..3000).contains(&year));
    }
}
