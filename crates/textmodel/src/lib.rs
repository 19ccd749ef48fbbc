//! Pre-trained sentiment artifacts: a fitted TF-IDF vectorizer and a linear
//! classifier, loaded from disk and paired into a [`SentimentModel`].

pub mod schema;
pub mod manifest;
pub mod store;
pub mod vectorizer;
pub mod classifier;
pub mod model;

pub use schema::*;
pub use manifest::*;
pub use store::*;
pub use vectorizer::*;
pub use classifier::*;
pub use model::*;
