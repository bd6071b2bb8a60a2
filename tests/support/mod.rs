#![allow(dead_code)]

pub mod catalog;

use eventfeed::adapter::inbound::http::query::Params;

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn slugs(events: &[eventfeed::domain::event::Event]) -> Vec<&str> {
    events.iter().map(|e| e.slug.as_str()).collect()
}
