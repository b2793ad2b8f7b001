//! # Ex Commands Module
//!
//! Implementation of REPL commands using the command pattern. Each line the
//! user types is split into a command name and arguments, and the first
//! handler that recognises the name turns the arguments into events.

use std::sync::OnceLock;

use anyhow::{anyhow, bail, Result};
use regex::Regex;

use crate::api::{Credentials, Registration};
use crate::repl::commands::{CommandContext, CommandEvent};
use crate::repl::events::Route;
use crate::repl::view_models::ProfileForm;

/// Trait for ex commands
pub trait ExCommand: Send {
    /// Check if this command can handle the given command name
    fn can_handle(&self, name: &str) -> bool;

    /// Execute the command with its arguments and produce events
    fn execute(
        &self,
        name: &str,
        args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;

    /// One-line synopsis shown by `help`
    fn usage(&self) -> &'static str;
}

fn require_session(context: &CommandContext) -> Result<()> {
    if !context.authenticated {
        bail!("Please log in first");
    }
    Ok(())
}

fn require_catalog(context: &CommandContext) -> Result<()> {
    require_session(context)?;
    if !context.route.is_catalog() {
        bail!("Open movies or favorites first");
    }
    Ok(())
}

fn require_profile(context: &CommandContext) -> Result<()> {
    require_session(context)?;
    if context.route != Route::Profile {
        bail!("Open your profile first");
    }
    Ok(())
}

/// Join all arguments back into one value, for names that may contain spaces
fn joined(args: &[String], what: &str) -> Result<String> {
    let value = args.join(" ");
    if value.trim().is_empty() {
        bail!("{what} is required");
    }
    Ok(value)
}

/// Quit command handler (for quit, q and exit)
pub struct QuitCommand;

impl ExCommand for QuitCommand {
    fn can_handle(&self, name: &str) -> bool {
        matches!(name, "quit" | "q" | "exit")
    }

    fn execute(
        &self,
        _name: &str,
        _args: &[String],
        _context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "QuitCommand"
    }

    fn usage(&self) -> &'static str {
        "quit | q | exit                      leave flixline"
    }
}

pub struct HelpCommand;

impl ExCommand for HelpCommand {
    fn can_handle(&self, name: &str) -> bool {
        matches!(name, "help" | "?")
    }

    fn execute(
        &self,
        _name: &str,
        _args: &[String],
        _context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::HelpRequested])
    }

    fn name(&self) -> &'static str {
        "HelpCommand"
    }

    fn usage(&self) -> &'static str {
        "help                                 show this list"
    }
}

/// Register command handler (for register <username> <password> <email> [birthday])
pub struct RegisterCommand;

impl ExCommand for RegisterCommand {
    fn can_handle(&self, name: &str) -> bool {
        name == "register"
    }

    fn execute(
        &self,
        _name: &str,
        args: &[String],
        _context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        let field = |i: usize| args.get(i).cloned().unwrap_or_default();
        if args.len() > 4 {
            bail!("Usage: register <username> <password> <email> [birthday]");
        }
        Ok(vec![CommandEvent::RegisterRequested(Registration {
            username: field(0),
            password: field(1),
            email: field(2),
            birthday: args.get(3).cloned(),
        })])
    }

    fn name(&self) -> &'static str {
        "RegisterCommand"
    }

    fn usage(&self) -> &'static str {
        "register <user> <pass> <email> [birthday]   create an account"
    }
}

/// Login command handler (for login <username> <password>)
pub struct LoginCommand;

impl ExCommand for LoginCommand {
    fn can_handle(&self, name: &str) -> bool {
        name == "login"
    }

    fn execute(
        &self,
        _name: &str,
        args: &[String],
        _context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        if args.len() > 2 {
            bail!("Usage: login <username> <password>");
        }
        Ok(vec![CommandEvent::LoginRequested(Credentials {
            username: args.first().cloned().unwrap_or_default(),
            password: args.get(1).cloned().unwrap_or_default(),
        })])
    }

    fn name(&self) -> &'static str {
        "LoginCommand"
    }

    fn usage(&self) -> &'static str {
        "login <user> <pass>                  sign in"
    }
}

pub struct LogoutCommand;

impl ExCommand for LogoutCommand {
    fn can_handle(&self, name: &str) -> bool {
        name == "logout"
    }

    fn execute(
        &self,
        _name: &str,
        _args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        require_session(context)?;
        Ok(vec![CommandEvent::LogoutRequested])
    }

    fn name(&self) -> &'static str {
        "LogoutCommand"
    }

    fn usage(&self) -> &'static str {
        "logout                               sign out"
    }
}

/// Navigation command handler (for movies, favorites and profile)
pub struct NavigateCommand;

impl ExCommand for NavigateCommand {
    fn can_handle(&self, name: &str) -> bool {
        matches!(name, "movies" | "favorites" | "profile")
    }

    fn execute(
        &self,
        name: &str,
        args: &[String],
        _context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        if !args.is_empty() {
            bail!("Usage: {name}");
        }
        let route = match name {
            "movies" => Route::Movies,
            "favorites" => Route::Favorites,
            "profile" => Route::Profile,
            other => bail!("Unknown view: {other}"),
        };
        Ok(vec![CommandEvent::NavigateRequested(route)])
    }

    fn name(&self) -> &'static str {
        "NavigateCommand"
    }

    fn usage(&self) -> &'static str {
        "movies | favorites | profile         open a view"
    }
}

/// Favorite toggle handler (for fav <movie id or list position>)
pub struct FavoriteCommand;

impl ExCommand for FavoriteCommand {
    fn can_handle(&self, name: &str) -> bool {
        matches!(name, "fav" | "favorite")
    }

    fn execute(
        &self,
        _name: &str,
        args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        require_catalog(context)?;
        let [movie] = args else {
            bail!("Usage: fav <movie id or number>");
        };
        Ok(vec![CommandEvent::ToggleFavoriteRequested {
            movie: movie.clone(),
        }])
    }

    fn name(&self) -> &'static str {
        "FavoriteCommand"
    }

    fn usage(&self) -> &'static str {
        "fav <id | number>                    add or remove a favorite"
    }
}

/// Detail lookups (for movie <title>, director <name> and genre <name>)
pub struct LookupCommand;

impl ExCommand for LookupCommand {
    fn can_handle(&self, name: &str) -> bool {
        matches!(name, "movie" | "director" | "genre")
    }

    fn execute(
        &self,
        name: &str,
        args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        require_catalog(context)?;
        let event = match name {
            "movie" => CommandEvent::ShowMovieRequested {
                title: joined(args, "Title")?,
            },
            "director" => CommandEvent::ShowDirectorRequested {
                name: joined(args, "Name")?,
            },
            "genre" => CommandEvent::ShowGenreRequested {
                name: joined(args, "Name")?,
            },
            other => bail!("Unknown lookup: {other}"),
        };
        Ok(vec![event])
    }

    fn name(&self) -> &'static str {
        "LookupCommand"
    }

    fn usage(&self) -> &'static str {
        "movie|director|genre <name>          show details"
    }
}

/// Profile edit handler (for edit key=value ...)
pub struct EditCommand;

impl ExCommand for EditCommand {
    fn can_handle(&self, name: &str) -> bool {
        name == "edit"
    }

    fn execute(
        &self,
        _name: &str,
        args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        require_profile(context)?;
        let mut form = ProfileForm::default();
        for arg in args {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=value, got '{arg}'"))?;
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "username" => &mut form.username,
                "password" => &mut form.password,
                "email" => &mut form.email,
                "birthday" => &mut form.birthday,
                other => bail!("Unknown profile field: {other}"),
            };
            *slot = Some(value.to_string());
        }
        if form.is_empty() {
            bail!("Usage: edit password=<pass> [username=..] [email=..] [birthday=..]");
        }
        Ok(vec![CommandEvent::EditProfileRequested(form)])
    }

    fn name(&self) -> &'static str {
        "EditCommand"
    }

    fn usage(&self) -> &'static str {
        "edit password=.. [field=value ...]   update your profile"
    }
}

pub struct DeleteAccountCommand;

impl ExCommand for DeleteAccountCommand {
    fn can_handle(&self, name: &str) -> bool {
        name == "delete-account"
    }

    fn execute(
        &self,
        _name: &str,
        _args: &[String],
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        require_profile(context)?;
        Ok(vec![CommandEvent::DeleteAccountRequested])
    }

    fn name(&self) -> &'static str {
        "DeleteAccountCommand"
    }

    fn usage(&self) -> &'static str {
        "delete-account                       delete your account"
    }
}

/// Type alias to reduce complexity for ex command collection
type ExCommandCollection = Vec<Box<dyn ExCommand + Send>>;

/// Split a line into words; double quotes group words containing spaces
pub fn tokenize(line: &str) -> Vec<String> {
    static WORD: OnceLock<Regex> = OnceLock::new();
    let word = WORD.get_or_init(|| {
        Regex::new(r#""([^"]*)"|(\S+)"#).unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
    });
    word.captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Registry for managing ex commands
pub struct ExCommandRegistry {
    commands: ExCommandCollection,
}

impl ExCommandRegistry {
    /// Create a new ex command registry with all default commands
    pub fn new() -> Self {
        let commands: ExCommandCollection = vec![
            Box::new(QuitCommand),
            Box::new(HelpCommand),
            Box::new(RegisterCommand),
            Box::new(LoginCommand),
            Box::new(LogoutCommand),
            Box::new(NavigateCommand),
            Box::new(FavoriteCommand),
            Box::new(LookupCommand),
            Box::new(EditCommand),
            Box::new(DeleteAccountCommand),
        ];

        Self { commands }
    }

    /// Parse and execute a command line
    pub fn execute_command(
        &self,
        line: &str,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        let words = tokenize(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(vec![]);
        };

        let Some(command) = self.commands.iter().find(|c| c.can_handle(name)) else {
            tracing::warn!("Unknown command: {}", name);
            bail!("Unknown command: {name}. Type 'help' for a list of commands");
        };
        tracing::debug!("Command '{}' handled by {}", name, command.name());
        command.execute(name, args, context)
    }

    /// Synopsis lines for every registered command
    pub fn usage_lines(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.usage()).collect()
    }
}

impl Default for ExCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
