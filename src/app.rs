use crate::event::{AppEvent, Event, EventHandler};
use crate::modules::{
    router::Route,
    upload::{read_staged, StagedFile},
    view_handler::ViewHandler,
    ChatView, LoginView, UploadView,
};
use crate::util::{
    api::ApiClient,
    config::AppConfig,
    session::{SessionStore, SessionUser},
};
use crate::{log_error, log_info, log_warn};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use color_eyre::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Login,
    Main(Route),
}

/// Result of the `/health` probe shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Unknown,
    Online,
    Offline,
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Current screen
    pub mode: AppMode,
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    /// Display name; cosmetic only
    pub user: Option<SessionUser>,
    pub health: Health,

    pub login_view: LoginView,
    pub chat_view: ChatView,
    pub upload_view: UploadView,

    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`] reading terminal input.
    pub fn new(config: AppConfig) -> Self {
        Self::with_events(config, EventHandler::new())
    }

    pub fn with_events(config: AppConfig, events: EventHandler) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        let session = SessionStore::new(&config.data_dir);
        let user = session.load();

        let mode = if config.require_login && user.is_none() {
            AppMode::Login
        } else {
            AppMode::Main(Route::Chat)
        };

        Self {
            running: true,
            mode,
            config,
            api,
            session,
            user,
            health: Health::Unknown,
            login_view: LoginView::new(),
            chat_view: ChatView::new(),
            upload_view: UploadView::new(),
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        log_info!("Starting against {}", self.api.base_url());
        self.spawn_health_check();

        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {}
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                        self.handle_key_events(key_event);
                        needs_redraw = true;
                    }
                    crossterm::event::Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            match key_event.code {
                KeyCode::Char('c' | 'C') => {
                    self.events.send(AppEvent::Quit);
                    return;
                }
                KeyCode::Char('t') if matches!(self.mode, AppMode::Main(_)) => {
                    self.events.send(AppEvent::ToggleRoute);
                    return;
                }
                KeyCode::Char('l') if self.user.is_some() => {
                    self.events.send(AppEvent::Logout);
                    return;
                }
                _ => {}
            }
        }

        let event = match self.mode {
            AppMode::Login => self.login_view.handle_key(key_event),
            AppMode::Main(Route::Chat) => self.chat_view.handle_key(key_event),
            AppMode::Main(Route::Upload) => self.upload_view.handle_key(key_event),
        };

        if let Some(event) = event {
            self.events.send(event);
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit(),
            AppEvent::Navigate(route) => self.navigate(route),
            AppEvent::ToggleRoute => {
                if let AppMode::Main(route) = self.mode {
                    self.navigate(route.toggled());
                }
            }
            AppEvent::Login(username) => self.login(&username),
            AppEvent::Logout => self.logout(),
            AppEvent::SubmitQuestion(question) => self.spawn_query(question),
            AppEvent::StartUpload(files) => self.spawn_upload(files),
            AppEvent::QuestionAnswered(result) => self.chat_view.finish_submit(result),
            AppEvent::UploadFinished(result) => {
                if self.upload_view.finish_upload(result) {
                    log_info!("Upload finished, opening chat");
                    self.navigate(Route::Chat);
                }
            }
            AppEvent::HealthChecked(online) => {
                self.health = if online { Health::Online } else { Health::Offline };
            }
        }
    }

    /// Routes are only reachable past the sign-in screen.
    pub fn navigate(&mut self, route: Route) {
        if self.mode == AppMode::Login {
            return;
        }
        self.mode = AppMode::Main(route);
    }

    pub fn login(&mut self, username: &str) {
        let user = match self.session.login(username) {
            Ok(user) => user,
            Err(e) => {
                log_error!("Failed to persist session: {}", e);
                SessionUser { username: username.to_string() }
            }
        };
        log_info!("Signed in as {}", user.username);
        self.user = Some(user);
        self.mode = AppMode::Main(Route::Chat);
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            log_error!("Failed to clear session: {}", e);
        }
        self.user = None;
        self.chat_view = ChatView::new();
        self.upload_view = UploadView::new();
        if self.config.require_login {
            self.mode = AppMode::Login;
        }
    }

    /// Footer text: the active view's keys plus the global ones that apply now.
    pub fn help_text(&self) -> String {
        let mut parts = vec![self.active_view().help_text().to_string()];
        if let AppMode::Main(route) = self.mode {
            parts.push(format!("Ctrl+T: {}", route.toggled().title()));
            if self.user.is_some() {
                parts.push("Ctrl+L: Log out".to_string());
            }
            parts.push("Ctrl+C: Quit".to_string());
        }
        parts.join(" • ")
    }

    pub fn active_view(&self) -> &dyn ViewHandler {
        match self.mode {
            AppMode::Login => &self.login_view,
            AppMode::Main(Route::Chat) => &self.chat_view,
            AppMode::Main(Route::Upload) => &self.upload_view,
        }
    }

    fn spawn_query(&self, question: String) {
        let api = self.api.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let result = api.query_documents(&question).await;
            let _ = sender.send(Event::App(AppEvent::QuestionAnswered(result)));
        });
    }

    fn spawn_upload(&self, files: Vec<StagedFile>) {
        let api = self.api.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let result = match read_staged(&files).await {
                Ok(uploads) => api.upload_multiple_documents(uploads).await,
                Err(e) => Err(e),
            };
            let _ = sender.send(Event::App(AppEvent::UploadFinished(result)));
        });
    }

    fn spawn_health_check(&self) {
        let api = self.api.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let online = match api.check_health().await {
                Ok(()) => true,
                Err(e) => {
                    log_warn!("Health check failed: {}", e);
                    false
                }
            };
            let _ = sender.send(Event::App(AppEvent::HealthChecked(online)));
        });
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::api::{ApiError, BatchUploadResponse, FileUploadResult};

    fn test_app(require_login: bool) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            data_dir: dir.path().to_path_buf(),
            log_dir: dir.path().join("logs"),
            require_login,
        };
        (App::with_events(config, EventHandler::detached()), dir)
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key_events(KeyEvent::new(code, modifiers));
    }

    /// Feeds queued app events back into the app, like the run loop does.
    fn pump(app: &mut App) -> Vec<String> {
        let mut seen = Vec::new();
        while let Some(Event::App(event)) = app.events.try_next() {
            seen.push(format!("{:?}", event));
            app.handle_app_event(event);
        }
        seen
    }

    fn batch(successful: u32) -> BatchUploadResponse {
        BatchUploadResponse {
            success: true,
            message: String::new(),
            total_files: 1,
            successful_uploads: successful,
            failed_uploads: 1 - successful,
            total_chunks: 3,
            results: vec![FileUploadResult {
                filename: "a.docx".to_string(),
                success: successful > 0,
                error: None,
                document_id: None,
                chunks_count: 3,
            }],
        }
    }

    #[test]
    fn test_starts_on_login_when_required() {
        let (app, _dir) = test_app(true);
        assert_eq!(app.mode, AppMode::Login);

        let (app, _dir) = test_app(false);
        assert_eq!(app.mode, AppMode::Main(Route::Chat));
    }

    #[test]
    fn test_login_then_restore_then_logout() {
        let (mut app, dir) = test_app(true);
        for ch in "alice".chars() {
            press(&mut app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        pump(&mut app);

        assert_eq!(app.mode, AppMode::Main(Route::Chat));
        assert_eq!(app.user.as_ref().map(|u| u.username.as_str()), Some("alice"));

        let config = app.config.clone();
        let restored = App::with_events(config, EventHandler::detached());
        assert_eq!(restored.mode, AppMode::Main(Route::Chat));
        assert_eq!(restored.user, app.user);

        press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        pump(&mut app);
        assert_eq!(app.mode, AppMode::Login);
        assert!(app.user.is_none());
        assert!(SessionStore::new(dir.path()).load().is_none());
    }

    #[test]
    fn test_routes_locked_behind_login() {
        let (mut app, _dir) = test_app(true);
        app.handle_app_event(AppEvent::Navigate(Route::Upload));
        assert_eq!(app.mode, AppMode::Login);
    }

    #[test]
    fn test_toggle_route() {
        let (mut app, _dir) = test_app(false);
        press(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);
        pump(&mut app);
        assert_eq!(app.mode, AppMode::Main(Route::Upload));

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        pump(&mut app);
        assert_eq!(app.mode, AppMode::Main(Route::Chat));
    }

    /// Stages one file and marks the upload as in flight.
    fn start_upload(app: &mut App, dir: &std::path::Path) {
        let path = dir.join("a.docx");
        std::fs::write(&path, b"PK").unwrap();
        app.navigate(Route::Upload);
        app.upload_view.add_paths(&path.display().to_string());
        assert!(app.upload_view.begin_upload().is_some());
    }

    #[test]
    fn test_successful_upload_opens_chat() {
        let (mut app, dir) = test_app(false);
        start_upload(&mut app, dir.path());

        app.handle_app_event(AppEvent::UploadFinished(Ok(batch(1))));
        assert_eq!(app.mode, AppMode::Main(Route::Chat));
        assert_eq!(app.upload_view.results().len(), 1);
    }

    #[test]
    fn test_failed_upload_stays() {
        let (mut app, dir) = test_app(false);
        start_upload(&mut app, dir.path());

        app.handle_app_event(AppEvent::UploadFinished(Ok(batch(0))));
        assert_eq!(app.mode, AppMode::Main(Route::Upload));
        assert_eq!(app.upload_view.failure_count(), 1);
    }

    #[test]
    fn test_logout_clears_previous_user_state() {
        let (mut app, dir) = test_app(true);
        app.handle_app_event(AppEvent::Login("alice".to_string()));
        start_upload(&mut app, dir.path());
        app.navigate(Route::Chat);
        app.chat_view.draft = "secret question".to_string();
        assert!(app.chat_view.begin_submit().is_some());

        app.handle_app_event(AppEvent::Logout);
        assert!(app.chat_view.messages().is_empty());
        assert!(app.upload_view.staged().is_empty());

        // Replies to the old session arrive after the next sign-in
        app.handle_app_event(AppEvent::Login("bob".to_string()));
        app.handle_app_event(AppEvent::QuestionAnswered(Err(ApiError::Network("late".to_string()))));
        app.handle_app_event(AppEvent::UploadFinished(Ok(batch(1))));

        assert!(app.chat_view.messages().is_empty());
        assert!(app.upload_view.results().is_empty());
        assert_eq!(app.mode, AppMode::Main(Route::Chat));
    }

    #[test]
    fn test_footer_lists_applicable_keys() {
        let (mut app, _dir) = test_app(false);
        let help = app.help_text();
        assert!(help.contains("Ctrl+T: Upload"));
        assert!(!help.contains("Ctrl+L"));

        app.handle_app_event(AppEvent::Login("alice".to_string()));
        app.navigate(Route::Upload);
        let help = app.help_text();
        assert!(help.contains("Ctrl+T: Chat"));
        assert!(help.contains("Ctrl+L: Log out"));

        let (app, _dir) = test_app(true);
        assert!(!app.help_text().contains("Ctrl+T"));
    }

    #[test]
    fn test_blank_question_sends_nothing() {
        let (mut app, _dir) = test_app(false);
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(pump(&mut app).is_empty());
        assert!(app.chat_view.messages().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_becomes_chat_message() {
        let (mut app, _dir) = test_app(false);
        for ch in "hi".chars() {
            press(&mut app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        pump(&mut app);
        assert!(app.chat_view.is_waiting());

        match app.events.next().await.unwrap() {
            Event::App(event @ AppEvent::QuestionAnswered(_)) => app.handle_app_event(event),
            other => panic!("unexpected event {:?}", other),
        }

        let messages = app.chat_view.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "Error: Failed to get answer");
        assert!(!app.chat_view.is_waiting());
    }

    #[test]
    fn test_quit() {
        let (mut app, _dir) = test_app(false);
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        pump(&mut app);
        assert!(!app.running);
    }
}
