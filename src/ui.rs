//! Plain-text renderers for the search screen. Pure functions of
//! controller state; printing is left to the caller.

use crate::controller::SearchPhase;
use crate::rating::{classify, display_score};
use crate::tmdb::{poster_url, release_year, MovieRecord};
use std::fmt::Write;

pub fn welcome() -> String {
    let mut out = String::new();
    writeln!(out, "Is It Good?").ok();
    writeln!(
        out,
        "Is this movie a waste of time? Type a title to find out."
    )
    .ok();
    writeln!(out, "Commands: :N opens card N, :c closes it, :q quits.").ok();
    out
}

pub fn render_phase(phase: &SearchPhase) -> String {
    match phase {
        SearchPhase::Idle => "Start typing to search for movies\n".to_string(),
        SearchPhase::Loading { .. } => "Fetching movie data...\n".to_string(),
        SearchPhase::Empty { query } => {
            format!(
                "Oops! No results found for '{query}'.\n\
                 Try broadening your search or adjusting your keywords.\n"
            )
        }
        SearchPhase::Populated { movies, .. } => render_results(movies),
        SearchPhase::Failed { .. } => String::new(),
    }
}

pub fn render_results(movies: &[MovieRecord]) -> String {
    let mut out = String::new();
    for (i, movie) in movies.iter().enumerate() {
        out.push_str(&render_card(i + 1, movie));
    }
    out
}

fn render_card(number: usize, movie: &MovieRecord) -> String {
    let year = release_year(movie.release_date.as_deref()).unwrap_or("N/A");
    let category = classify(movie.vote_average);
    let mut out = String::new();
    writeln!(
        out,
        "{number:>3}. {} ({year})  {}/10  [{}]",
        movie.title,
        display_score(movie.vote_average),
        category.badge()
    )
    .ok();
    writeln!(out, "     {}", poster_url(movie.poster_path.as_deref())).ok();
    out
}

pub fn render_detail(movie: &MovieRecord) -> String {
    let year = release_year(movie.release_date.as_deref()).unwrap_or("N/A");
    let category = classify(movie.vote_average);
    let overview = if movie.overview.is_empty() {
        "No synopsis available."
    } else {
        movie.overview.as_str()
    };
    let mut out = String::new();
    writeln!(out, "{} ({year})", movie.title).ok();
    writeln!(out, "{}", category.label()).ok();
    writeln!(out, "TMDb Rating: {}/10", display_score(movie.vote_average)).ok();
    writeln!(out, "Poster: {}", poster_url(movie.poster_path.as_deref())).ok();
    writeln!(out).ok();
    writeln!(out, "{overview}").ok();
    out
}

pub fn render_notice(message: &str) -> String {
    format!("! {message}\n")
}
