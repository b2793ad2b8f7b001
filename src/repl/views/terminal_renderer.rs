//! # Terminal Renderer
//!
//! Writes the REPL's views as plain lines to a `RenderStream`. Colour is
//! applied only when the stream is an interactive terminal.

use anyhow::Result;
use std::time::Instant;

use crate::api::{Movie, User};
use crate::repl::io::RenderStream;
use crate::repl::models::{Notification, NotificationKind, StatusLine};
use crate::repl::view_models::{CatalogViewModel, Detail};
use crate::repl::views::ansi_escape_codes::{
    paint, BOLD, DIM, FG_CYAN, FG_GREEN, FG_MAGENTA, FG_RED, FG_YELLOW,
};

const FAVORITE_MARK: &str = "♥";

/// Line-oriented renderer over a `RenderStream`
pub struct TerminalRenderer<W: RenderStream> {
    out: W,
    colour: bool,
}

impl<W: RenderStream> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        let colour = out.is_terminal();
        Self { out, colour }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        paint(self.colour, code, text)
    }

    pub fn render_banner(&mut self, profile_name: &str, api_url: &str) -> Result<()> {
        let title = self.paint(BOLD, "flixline");
        let url = self.paint(DIM, &format!("[{profile_name}] {api_url}"));
        writeln!(self.out, "{title} {url}")?;
        writeln!(self.out, "Type 'help' for a list of commands.")?;
        Ok(())
    }

    pub fn render_notification(&mut self, notification: &Notification) -> Result<()> {
        let line = if notification.is_failure() {
            self.paint(FG_RED, &format!("✖ {}", notification.message()))
        } else {
            self.paint(FG_GREEN, &format!("✔ {}", notification.message()))
        };
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn render_welcome(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to myFlix.")?;
        writeln!(
            self.out,
            "  register <username> <password> <email> [birthday]"
        )?;
        writeln!(self.out, "  login <username> <password>")?;
        Ok(())
    }

    /// Numbered movie list; positions match what `fav <number>` resolves
    pub fn render_catalog(&mut self, catalog: &CatalogViewModel, favorites_only: bool) -> Result<()> {
        let movies: Vec<&Movie> = if favorites_only {
            catalog.favorite_movies()
        } else {
            catalog.movies().iter().collect()
        };

        if movies.is_empty() {
            let empty = if favorites_only {
                "You have no favorite movies yet."
            } else {
                "No movies to show."
            };
            writeln!(self.out, "{}", self.paint(DIM, empty))?;
            return Ok(());
        }

        for (index, movie) in movies.iter().enumerate() {
            let mark = if catalog.is_favorite(&movie.id) {
                self.paint(FG_MAGENTA, FAVORITE_MARK)
            } else {
                " ".to_string()
            };
            let title = self.paint(BOLD, &movie.title);
            let meta = self.paint(
                DIM,
                &format!("{} · {} · {}", movie.director.name, movie.genre.name, movie.id),
            );
            writeln!(self.out, "{:>3}. {mark} {title}  {meta}", index + 1)?;
        }
        Ok(())
    }

    pub fn render_detail(&mut self, detail: &Detail) -> Result<()> {
        match detail {
            Detail::Movie(movie) => {
                writeln!(self.out, "{}", self.paint(BOLD, &movie.title))?;
                writeln!(self.out, "  Director: {}", movie.director.name)?;
                writeln!(self.out, "  Genre:    {}", movie.genre.name)?;
                if movie.featured {
                    writeln!(self.out, "  {}", self.paint(FG_YELLOW, "Featured"))?;
                }
                if !movie.image_url.is_empty() {
                    writeln!(self.out, "  Image:    {}", movie.image_url)?;
                }
                if !movie.description.is_empty() {
                    writeln!(self.out, "  {}", movie.description)?;
                }
            }
            Detail::Director(director) => {
                writeln!(self.out, "{}", self.paint(BOLD, &director.name))?;
                let born = director.born.as_deref().unwrap_or("?");
                match director.died.as_deref() {
                    Some(died) => writeln!(self.out, "  {born} - {died}")?,
                    None => writeln!(self.out, "  Born {born}")?,
                }
                if !director.bio.is_empty() {
                    writeln!(self.out, "  {}", director.bio)?;
                }
            }
            Detail::Genre(genre) => {
                writeln!(self.out, "{}", self.paint(BOLD, &genre.name))?;
                if !genre.description.is_empty() {
                    writeln!(self.out, "  {}", genre.description)?;
                }
            }
        }
        Ok(())
    }

    pub fn render_profile(&mut self, user: Option<&User>) -> Result<()> {
        let Some(user) = user else {
            writeln!(self.out, "{}", self.paint(DIM, "Profile not loaded."))?;
            return Ok(());
        };
        writeln!(self.out, "{}", self.paint(BOLD, &user.username))?;
        writeln!(self.out, "  Email:     {}", user.email)?;
        writeln!(
            self.out,
            "  Birthday:  {}",
            user.birthday.as_deref().unwrap_or("-")
        )?;
        writeln!(
            self.out,
            "  Favorites: {}",
            user.favorite_movie_ids.len()
        )?;
        Ok(())
    }

    pub fn render_help(&mut self, usage_lines: &[&str]) -> Result<()> {
        writeln!(self.out, "{}", self.paint(BOLD, "Commands"))?;
        for line in usage_lines {
            writeln!(self.out, "  {line}")?;
        }
        Ok(())
    }

    /// Confirmation question for irreversible actions
    pub fn render_question(&mut self, question: &str) -> Result<()> {
        write!(self.out, "{} ", self.paint(FG_YELLOW, question))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn render_prompt(&mut self, status: &StatusLine) -> Result<()> {
        self.render_prompt_at(status, Instant::now())
    }

    /// Prompt prefixed with the mark of a notification that is still current at `now`
    fn render_prompt_at(&mut self, status: &StatusLine, now: Instant) -> Result<()> {
        if let Some(notification) = status.active_notification(now) {
            let mark = match notification.kind() {
                NotificationKind::Info => self.paint(FG_GREEN, "✔"),
                NotificationKind::Failure => self.paint(FG_RED, "✖"),
            };
            write!(self.out, "{mark} ")?;
        }
        write!(self.out, "{}", self.paint(FG_CYAN, &status.prompt()))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn render_farewell(&mut self) -> Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
