//! Test utilities for pipeline tests.
//!
//! This module provides a scripted generative service and article fixtures.

#![allow(dead_code)]

pub mod mock_service;

#[allow(unused_imports)]
pub use mock_service::{MockBehavior, MockResponse, MockService};

use articulate_core::{Article, Section, Source};

/// A valid three-section article.
pub fn sample_article() -> Article {
    Article {
        title: "Paris Olympics 2024".to_string(),
        summary: String::new(),
        sections: vec![
            Section::new(
                "Opening Ceremony",
                "The **opening ceremony** took place on the Seine.\nBoats carried the athletes.",
            ),
            Section::new(
                "Highlights",
                "Key moments:\n* **Léon Marchand** won four golds\n* Simone Biles returned",
            )
            .with_subpoints(vec!["Record attendance".to_string()]),
            Section::new("Legacy", "New venues remain open to the public."),
        ],
        sources: vec![Source {
            title: "Olympics.com".to_string(),
            url: "https://olympics.com/paris-2024".to_string(),
            description: "Official results".to_string(),
        }],
        query: "Paris Olympics 2024".to_string(),
        reference_url: None,
    }
}

/// `article` serialized as the service would return it.
pub fn as_reply(article: &Article) -> String {
    serde_json::to_string_pretty(article).unwrap()
}

/// A reply rewording every section without changing the shape.
pub fn reworded_reply(article: &Article) -> String {
    let mut revised = article.clone();
    for section in &mut revised.sections {
        section.body = format!("{} (revised)", section.body);
    }
    as_reply(&revised)
}
