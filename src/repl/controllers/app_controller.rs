//! # REPL Application Controller
//!
//! The controller orchestrates the REPL components and manages the event loop.
//! It turns typed lines into command events, applies them to the view-models,
//! drains the events those produce and renders the result.

use crate::api::ApiClient;
use crate::repl::{
    commands::{CommandContext, CommandEvent, ExCommandRegistry},
    events::{ModelEvent, ModelEventBus, PendingEvents, Route, ViewEvent},
    io::{LineStream, RenderStream},
    models::{Notification, StatusLine},
    view_models::{
        CatalogViewModel, LoginViewModel, NavigationViewModel, ProfileForm, ProfileViewModel,
        RegistrationViewModel,
    },
    views::TerminalRenderer,
};
use crate::session::{IniSessionStore, MemorySessionStore, SessionContext};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::Result;

const DELETE_CONFIRMATION: &str = "Delete your profile? [y/N]";

/// View-model backing the current route
enum ActiveView {
    Welcome,
    Catalog(CatalogViewModel),
    Profile(ProfileViewModel),
}

impl ActiveView {
    fn teardown(&self) {
        match self {
            ActiveView::Welcome => {}
            ActiveView::Catalog(vm) => vm.teardown(),
            ActiveView::Profile(vm) => vm.teardown(),
        }
    }

    async fn load(&mut self) {
        match self {
            ActiveView::Welcome => {}
            ActiveView::Catalog(vm) => vm.load().await,
            ActiveView::Profile(vm) => vm.load().await,
        }
    }

    fn events_mut(&mut self) -> Option<&mut PendingEvents> {
        match self {
            ActiveView::Welcome => None,
            ActiveView::Catalog(vm) => Some(vm.events_mut()),
            ActiveView::Profile(vm) => Some(vm.events_mut()),
        }
    }
}

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<LS: LineStream, RS: RenderStream> {
    api: ApiClient,
    session: SessionContext,
    navigation: NavigationViewModel,
    registration: RegistrationViewModel,
    login: LoginViewModel,
    active: ActiveView,
    status_line: StatusLine,
    renderer: TerminalRenderer<RS>,
    command_registry: ExCommandRegistry,
    event_bus: ModelEventBus,
    line_stream: LS,
    redraw: bool,
    should_quit: bool,
}

impl<LS: LineStream, RS: RenderStream> AppController<LS, RS> {
    /// Create new application controller with injected I/O streams (dependency injection)
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        line_stream: LS,
        render_stream: RS,
    ) -> Result<Self> {
        let profile_name = cmd_args.profile();
        let profile_path = config::get_profile_path();
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);
        let profile = config::IniProfileStore::new(&profile_path).get_profile_or_default(profile_name)?;

        let api_url = cmd_args.api_url().unwrap_or(&profile.api_url);
        let api = ApiClient::new(api_url)?;

        let session = if cmd_args.ephemeral() {
            tracing::debug!("Keeping session in memory");
            SessionContext::restore(MemorySessionStore::new())?
        } else {
            SessionContext::restore(IniSessionStore::new(&profile.session_file))?
        };

        Ok(Self::with_session(
            api,
            session,
            profile_name,
            line_stream,
            render_stream,
        ))
    }

    /// Create a controller over an already configured client and session
    pub fn with_session(
        api: ApiClient,
        session: SessionContext,
        profile_name: &str,
        line_stream: LS,
        render_stream: RS,
    ) -> Self {
        let mut status_line = StatusLine::new(profile_name);
        status_line.set_username(session.username());

        Self {
            navigation: NavigationViewModel::new(session.clone()),
            registration: RegistrationViewModel::new(api.clone()),
            login: LoginViewModel::new(api.clone(), session.clone()),
            api,
            session,
            active: ActiveView::Welcome,
            status_line,
            renderer: TerminalRenderer::new(render_stream),
            command_registry: ExCommandRegistry::new(),
            event_bus: ModelEventBus::with_activity_log(),
            line_stream,
            redraw: false,
            should_quit: false,
        }
    }

    /// Run the main application loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.renderer
            .render_banner(self.status_line.profile_name(), self.api.base_url().as_str())?;

        let initial = self.navigation.route();
        self.switch_view(initial).await;
        self.process_pending_events().await?;
        self.render_if_needed()?;

        while !self.should_quit {
            self.renderer.render_prompt(&self.status_line)?;
            let Some(line) = self.line_stream.read_line()? else {
                tracing::debug!("End of input");
                break;
            };
            self.handle_line(&line).await?;
        }

        self.active.teardown();
        self.renderer.render_farewell()?;
        Ok(())
    }

    /// Process one typed line: parse, apply, drain events and render
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        let context = CommandContext::new(self.navigation.route(), self.session.is_authenticated());

        match self.command_registry.execute_command(line, &context) {
            Ok(events) => {
                tracing::debug!("Command events generated: {:?}", events);
                for event in events {
                    self.apply_command_event(event).await?;
                }
            }
            Err(e) => self.show_notification(Notification::failure(e.to_string()))?,
        }

        self.process_pending_events().await?;
        if !self.should_quit {
            self.render_if_needed()?;
        }
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn route(&self) -> Route {
        self.navigation.route()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn catalog(&self) -> Option<&CatalogViewModel> {
        match &self.active {
            ActiveView::Catalog(vm) => Some(vm),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&ProfileViewModel> {
        match &self.active {
            ActiveView::Profile(vm) => Some(vm),
            _ => None,
        }
    }

    /// Apply a command event to the view-models
    async fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        match event {
            CommandEvent::RegisterRequested(form) => {
                self.registration.open(form);
                self.registration.submit().await;
            }
            CommandEvent::LoginRequested(credentials) => {
                self.login.open(credentials);
                self.login.submit().await;
            }
            CommandEvent::LogoutRequested => {
                self.navigation.logout();
                self.sync_route().await;
            }
            CommandEvent::NavigateRequested(route) => {
                let opened = match route {
                    Route::Movies => self.navigation.open_movies(),
                    Route::Favorites => self.navigation.open_favorites(),
                    Route::Profile => self.navigation.open_profile(),
                    Route::Welcome => self.navigation.navigate(route),
                };
                if opened {
                    self.switch_view(route).await;
                }
            }
            CommandEvent::ToggleFavoriteRequested { movie } => {
                let favorites_only = self.navigation.route() == Route::Favorites;
                if let ActiveView::Catalog(vm) = &mut self.active {
                    let movie_id = vm.resolve_movie_id(&movie, favorites_only);
                    vm.toggle(&movie_id).await;
                }
            }
            CommandEvent::ShowMovieRequested { title } => {
                if let ActiveView::Catalog(vm) = &mut self.active {
                    vm.show_movie(&title).await;
                }
            }
            CommandEvent::ShowDirectorRequested { name } => {
                if let ActiveView::Catalog(vm) = &mut self.active {
                    vm.show_director(&name).await;
                }
            }
            CommandEvent::ShowGenreRequested { name } => {
                if let ActiveView::Catalog(vm) = &mut self.active {
                    vm.show_genre(&name).await;
                }
            }
            CommandEvent::EditProfileRequested(form) => self.edit_profile(&form).await,
            CommandEvent::DeleteAccountRequested => self.delete_account().await?,
            CommandEvent::HelpRequested => {
                let usage = self.command_registry.usage_lines();
                self.renderer.render_help(&usage)?;
            }
            CommandEvent::QuitRequested => {
                tracing::debug!("Quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    async fn edit_profile(&mut self, form: &ProfileForm) {
        if let ActiveView::Profile(vm) = &mut self.active {
            vm.edit(form).await;
        }
    }

    async fn delete_account(&mut self) -> Result<()> {
        self.renderer.render_question(DELETE_CONFIRMATION)?;
        let answer = self.line_stream.read_line()?.unwrap_or_default();
        let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");

        if let ActiveView::Profile(vm) = &mut self.active {
            vm.delete_account(confirmed).await;
        }
        Ok(())
    }

    /// Replace the active view-model for `route` and load it
    async fn switch_view(&mut self, route: Route) {
        let reuse = route.is_catalog() && matches!(self.active, ActiveView::Catalog(_));
        if reuse {
            if let ActiveView::Catalog(vm) = &mut self.active {
                vm.clear_detail();
            }
        } else {
            self.active.teardown();
            self.active = match route {
                Route::Welcome => ActiveView::Welcome,
                Route::Movies | Route::Favorites => ActiveView::Catalog(CatalogViewModel::new(
                    self.api.clone(),
                    self.session.clone(),
                )),
                Route::Profile => ActiveView::Profile(ProfileViewModel::new(
                    self.api.clone(),
                    self.session.clone(),
                )),
            };
        }

        self.status_line.set_route(route);
        self.redraw = true;
        self.active.load().await;
    }

    /// Follow the navigation view-model when it moved on its own (logout)
    async fn sync_route(&mut self) {
        let route = self.navigation.route();
        if route != self.status_line.route() {
            self.switch_view(route).await;
        }
    }

    /// Drain every view-model until no more events are pending. Model events are
    /// applied and published before the view events of the same round.
    async fn process_pending_events(&mut self) -> Result<()> {
        loop {
            let mut view_events = Vec::new();
            let mut model_events = Vec::new();
            let sources = [
                Some(self.navigation.events_mut()),
                Some(self.registration.events_mut()),
                Some(self.login.events_mut()),
                self.active.events_mut(),
            ];
            for pending in sources.into_iter().flatten() {
                let (view, model) = pending.drain();
                view_events.extend(view);
                model_events.extend(model);
            }

            if view_events.is_empty() && model_events.is_empty() {
                return Ok(());
            }

            for event in model_events {
                self.apply_model_event(&event);
                self.event_bus.publish(&event);
            }
            for event in view_events {
                self.apply_view_event(event).await?;
            }
        }
    }

    fn apply_model_event(&mut self, event: &ModelEvent) {
        match event {
            ModelEvent::SessionStarted { username } | ModelEvent::ProfileUpdated { username } => {
                self.status_line.set_username(Some(username.clone()));
            }
            ModelEvent::SessionEnded => self.status_line.set_username(None),
            _ => {}
        }
    }

    async fn apply_view_event(&mut self, event: ViewEvent) -> Result<()> {
        match event {
            ViewEvent::Notify(notification) => self.show_notification(notification)?,
            ViewEvent::NavigateTo(route) => {
                if self.navigation.navigate(route) {
                    self.switch_view(route).await;
                }
            }
            ViewEvent::FormClosed(form) => tracing::debug!("Form closed: {:?}", form),
            ViewEvent::ReloadRequired => {
                self.redraw = true;
                self.active.load().await;
            }
            ViewEvent::ContentChanged => self.redraw = true,
        }
        Ok(())
    }

    fn show_notification(&mut self, notification: Notification) -> Result<()> {
        self.renderer.render_notification(&notification)?;
        self.status_line.set_notification(notification);
        Ok(())
    }

    fn render_if_needed(&mut self) -> Result<()> {
        if !std::mem::take(&mut self.redraw) {
            return Ok(());
        }

        let route = self.navigation.route();
        match &mut self.active {
            ActiveView::Welcome => self.renderer.render_welcome()?,
            ActiveView::Catalog(vm) => {
                if let Some(detail) = vm.detail() {
                    self.renderer.render_detail(detail)?;
                    vm.clear_detail();
                } else {
                    self.renderer
                        .render_catalog(vm, route == Route::Favorites)?;
                }
            }
            ActiveView::Profile(vm) => self.renderer.render_profile(vm.user())?,
        }
        Ok(())
    }
}
