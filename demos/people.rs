//! People Example
//!
//! Loads a fixture set of people into a tag dictionary and queries it.
//!
//! Use `-t` (repeatable) to name the tags to query for, `*` for everyone
//! Use `-s` to load a different fixture set
//! Use `--log-format json` for structured logs

use std::{
    cell::RefCell,
    io::{self, Write},
};

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use tagdict::{
    prelude::*,
    utils::{DemoArgs, LogFormat, LoggingConfig},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct Person {
    name: String,
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?,
    }

    Ok(())
}

/// People Example
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    init_logging(&args.logging)?;

    let mut fixture = Fixture::<RefCell<Person>>::with_base_path(&args.fixtures);
    fixture.load_entries(&args.set)?;

    let people = fixture.dict();
    let query = TagQuery::from_tags(&args.tags);
    let matches = people.query(query.clone())?;

    info!(%query, matches = matches.len(), "query finished");

    let mut names: Vec<String> = matches
        .iter()
        .map(|person| person.borrow().name.clone())
        .collect();
    names.sort_unstable();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{people}")?;
    writeln!(out, "\n{query}: {}", names.join(", "))?;

    Ok(())
}
