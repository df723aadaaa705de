pub mod achievements;
pub mod auth;
pub mod books;
pub mod comments;
pub mod competitions;
pub mod daily_pages;
pub mod notifications;
pub mod ratings;
pub mod registrations;
pub mod users;
