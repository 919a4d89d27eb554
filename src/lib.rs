pub mod app;
pub mod controller;
pub mod query;
pub mod rating;
pub mod tmdb;
pub mod ui;
