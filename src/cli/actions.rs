//! Menu action handlers. Each one reads any further input it needs through
//! the console and reports its outcome there.

use std::io::{BufRead, Write};

use anyhow::Result;
use moviedb::{AppContext, random_movie, rating_stats, search, sorted_by_rating};

use crate::cli::menu::MenuAction;
use crate::cli::utils::{Console, parse_rating};

/// Execute a single menu action.
pub async fn execute<R: BufRead, W: Write>(
    action: MenuAction,
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> Result<()> {
    match action {
        MenuAction::Exit => Ok(()),
        MenuAction::List => list(ctx, console),
        MenuAction::Add => add(ctx, console).await,
        MenuAction::Delete => delete(ctx, console),
        MenuAction::Update => update(ctx, console),
        MenuAction::Stats => stats(ctx, console),
        MenuAction::Random => random(ctx, console),
        MenuAction::Search => search_titles(ctx, console),
        MenuAction::SortByRating => by_rating(ctx, console),
        MenuAction::GenerateWebsite => generate_website(ctx, console),
    }
}

fn list<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let movies = ctx.store.list()?;
    if movies.is_empty() {
        return console.line("No movies in the database.");
    }
    console.blank()?;
    console.line(format!("{} movies in total", movies.len()))?;
    for movie in &movies {
        console.line(format!(
            "  {} ({}): {}",
            movie.title, movie.year, movie.rating
        ))?;
    }
    Ok(())
}

async fn add<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let Some(title) = console.prompt("Enter movie title: ")? else {
        return Ok(());
    };
    let movie = ctx.add_by_title(&title).await?;
    console.line(format!("Movie '{}' successfully added.", movie.title))
}

fn delete<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let Some(title) = console.prompt("Enter movie title to delete: ")? else {
        return Ok(());
    };
    if ctx.store.delete(&title)? {
        console.line(format!("Movie '{}' deleted successfully.", title))
    } else {
        console.line(format!("Movie '{}' not found.", title))
    }
}

fn update<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let Some(title) = console.prompt("Enter movie title to update: ")? else {
        return Ok(());
    };
    let Some(raw) = console.prompt("Enter new rating: ")? else {
        return Ok(());
    };
    let Some(rating) = parse_rating(&raw) else {
        return console.line("Invalid rating. Please enter a number.");
    };
    if ctx.store.update(&title, rating)? {
        console.line(format!("Movie '{}' updated successfully.", title))
    } else {
        console.line(format!("Movie '{}' not found.", title))
    }
}

fn stats<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let movies = ctx.store.list()?;
    let Some(stats) = rating_stats(&movies) else {
        return console.line("No movies to calculate stats for.");
    };
    console.blank()?;
    console.line(format!("Average rating: {:.2}", stats.mean))?;
    console.line(format!("Median rating: {:.2}", stats.median))?;

    console.blank()?;
    console.line("Best movie(s):")?;
    for movie in &stats.best {
        console.line(format!("  {}: {:.2}", movie.title, movie.rating))?;
    }
    console.blank()?;
    console.line("Worst movie(s):")?;
    for movie in &stats.worst {
        console.line(format!("  {}: {:.2}", movie.title, movie.rating))?;
    }
    Ok(())
}

fn random<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let movies = ctx.store.list()?;
    let Some(movie) = random_movie(&movies, &mut rand::thread_rng()) else {
        return console.line("No movies to choose from.");
    };
    console.blank()?;
    console.line(format!(
        "Your random movie for tonight: {} ({}) with a rating of {:.2}",
        movie.title, movie.year, movie.rating
    ))
}

fn search_titles<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> Result<()> {
    let Some(term) = console.prompt("Enter search term: ")? else {
        return Ok(());
    };
    let movies = ctx.store.list()?;
    let found = search(&movies, &term);
    if found.is_empty() {
        return console.line("No movies found for that search term.");
    }
    console.blank()?;
    console.line(format!("Found {} movie(s):", found.len()))?;
    for movie in &found {
        console.line(format!("  {}", movie.title))?;
    }
    Ok(())
}

fn by_rating<R: BufRead, W: Write>(ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
    let movies = ctx.store.list()?;
    if movies.is_empty() {
        return console.line("No movies to sort.");
    }
    console.blank()?;
    console.line("Movies sorted by rating:")?;
    for movie in sorted_by_rating(&movies) {
        console.line(format!("  {}: {:.2}", movie.title, movie.rating))?;
    }
    Ok(())
}

fn generate_website<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> Result<()> {
    let site = ctx.generate_site()?;
    if site.stylesheet.is_none() {
        console.line(format!(
            "Warning: {} not found, website may not be styled correctly.",
            ctx.config.site_layout().stylesheet.display()
        ))?;
    }
    let output_dir = site
        .index
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    console.line(format!(
        "Website was generated successfully in the '{}' directory.",
        output_dir
    ))
}
