//! Numbered interactive menu.

use std::io::{BufRead, Write};

use anyhow::Result;
use moviedb::{AppContext, CatalogError};
use tracing::warn;

use crate::cli::actions;
use crate::cli::utils::Console;

const BANNER: &str = "********** My Movies Database **********";

/// Every entry of the menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Exit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    SortByRating,
    GenerateWebsite,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::Exit,
        MenuAction::List,
        MenuAction::Add,
        MenuAction::Delete,
        MenuAction::Update,
        MenuAction::Stats,
        MenuAction::Random,
        MenuAction::Search,
        MenuAction::SortByRating,
        MenuAction::GenerateWebsite,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuAction::Exit => "0",
            MenuAction::List => "1",
            MenuAction::Add => "2",
            MenuAction::Delete => "3",
            MenuAction::Update => "4",
            MenuAction::Stats => "5",
            MenuAction::Random => "6",
            MenuAction::Search => "7",
            MenuAction::SortByRating => "8",
            MenuAction::GenerateWebsite => "9",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Exit => "Exit",
            MenuAction::List => "List movies",
            MenuAction::Add => "Add movie",
            MenuAction::Delete => "Delete movie",
            MenuAction::Update => "Update movie",
            MenuAction::Stats => "Stats",
            MenuAction::Random => "Random movie",
            MenuAction::Search => "Search movie",
            MenuAction::SortByRating => "Movies sorted by rating",
            MenuAction::GenerateWebsite => "Generate website",
        }
    }

    /// Resolve a typed menu key; surrounding whitespace is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|action| action.key() == key)
    }
}

/// Present the menu until the user exits or input ends.
///
/// Catalog errors raised by an action are reported and the menu is shown
/// again; only a failure of the console itself ends the loop early.
pub async fn run_menu<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> Result<()> {
    loop {
        console.blank()?;
        console.line(BANNER)?;
        for action in MenuAction::ALL {
            console.line(format!("{}. {}", action.key(), action.label()))?;
        }

        let Some(choice) = console.prompt("Enter choice: ")? else {
            break;
        };
        let action = match MenuAction::from_key(&choice) {
            Some(MenuAction::Exit) => break,
            Some(action) => action,
            None => {
                console.line("Invalid choice. Please try again.")?;
                continue;
            }
        };

        if let Err(err) = actions::execute(action, ctx, console).await {
            let Some(catalog_err) = err.downcast_ref::<CatalogError>() else {
                return Err(err);
            };
            if !catalog_err.is_expected() {
                warn!(action = action.label(), error = %catalog_err, "menu action failed");
            }
            console.line(format!("Error: {catalog_err}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    use moviedb::{Config, Movie};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn context() -> (TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let static_dir = dir.path().join("_static");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(
            static_dir.join("index_template.html"),
            "<title>__TEMPLATE_TITLE__</title><ol>__TEMPLATE_MOVIE_GRID__</ol>",
        )
        .unwrap();
        let config = Config {
            db_path: dir.path().join("movies.db"),
            static_dir,
            site_dir: dir.path().join("site"),
            ..Config::default()
        };
        let ctx = AppContext::new(config).unwrap();
        (dir, ctx)
    }

    async fn session(ctx: &AppContext, input: &str) -> String {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        run_menu(ctx, &mut console).await.unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(MenuAction::from_key("0"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::from_key(" 8 "), Some(MenuAction::SortByRating));
        assert_eq!(MenuAction::from_key("10"), None);
        assert_eq!(MenuAction::from_key("list"), None);
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_key(action.key()), Some(action));
        }
    }

    #[tokio::test]
    async fn menu_lists_every_action_and_exits() {
        let (_dir, ctx) = context();
        let output = session(&ctx, "0\n").await;
        assert!(output.contains(BANNER));
        assert!(output.contains("0. Exit"));
        assert!(output.contains("9. Generate website"));
        assert_eq!(output.matches(BANNER).count(), 1);
    }

    #[tokio::test]
    async fn unknown_choice_reprompts_without_side_effects() {
        let (_dir, ctx) = context();
        let output = session(&ctx, "42\n0\n").await;
        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches(BANNER).count(), 2);
        assert!(ctx.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let (_dir, ctx) = context();
        let output = session(&ctx, "1\n").await;
        assert!(output.contains("No movies in the database."));
        assert_eq!(output.matches(BANNER).count(), 2);
    }

    #[tokio::test]
    async fn failing_action_returns_to_menu() {
        let (_dir, ctx) = context();
        let output = session(&ctx, "2\nHeat\n1\n0\n").await;
        assert!(output.contains("Error: configuration error: OMDB_API_KEY not found"));
        assert!(output.contains("No movies in the database."));
    }

    #[tokio::test]
    async fn scripted_session_updates_and_deletes() {
        let (_dir, ctx) = context();
        ctx.store.add(&Movie::new("A", 2001, 9.0, "")).unwrap();
        ctx.store.add(&Movie::new("B", 2002, 9.0, "")).unwrap();
        ctx.store.add(&Movie::new("C", 2003, 5.0, "")).unwrap();

        let output = session(&ctx, "4\nC\n6.5\n3\nB\n3\nZ\n1\n0\n").await;
        assert!(output.contains("Movie 'C' updated successfully."));
        assert!(output.contains("Movie 'B' deleted successfully."));
        assert!(output.contains("Movie 'Z' not found."));
        assert!(output.contains("2 movies in total"));
        assert_eq!(
            ctx.store.list().unwrap(),
            vec![Movie::new("A", 2001, 9.0, ""), Movie::new("C", 2003, 6.5, "")]
        );
    }
}
