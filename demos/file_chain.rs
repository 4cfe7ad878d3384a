// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reads a manifest file, then every file it lists, with one abort handler
//! guarding the whole chain.
//!
//! ```text
//! cargo run --example file_chain -- manifest.txt [guard.yaml]
//! RUST_LOG=flawless=trace cargo run --example file_chain -- manifest.txt
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use flawless::config::load_config;
use flawless::traits::Completion;
use flawless::Guard;
use tracing_subscriber::EnvFilter;

/// Callback-style wrapper around `tokio::fs::read_to_string`.
async fn read_file(path: String, mut done: impl Completion<String, anyhow::Error> + 'static) {
    let outcome = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read '{}'", path));
    done.complete(outcome);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <manifest> [guard.yaml]", args[0]);
        std::process::exit(1);
    }

    let guard = match args.get(2) {
        Some(path) => Guard::from_config(&load_config(path)?),
        None => Guard::new(),
    };

    let line_counts = Rc::new(RefCell::new(Vec::new()));
    let failures = Rc::new(RefCell::new(0usize));

    let sink = Rc::clone(&line_counts);
    let failed = Rc::clone(&failures);
    let read_manifest = guard
        .then_with(move |link, manifest: String| {
            for entry in manifest.lines().map(str::trim).filter(|l| !l.is_empty()) {
                let sink = Rc::clone(&sink);
                let name = entry.to_string();
                let read_entry = link
                    .then(move |content: String| {
                        sink.borrow_mut().push((name.clone(), content.lines().count()));
                    })
                    .named(entry);
                tokio::task::spawn_local(read_file(entry.to_string(), read_entry));
            }
        })
        .named("manifest")
        .or(move |e: anyhow::Error| {
            *failed.borrow_mut() += 1;
            eprintln!("❌ {:#}", e);
        });

    let local = tokio::task::LocalSet::new();
    local
        .run_until(read_file(args[1].clone(), read_manifest))
        .await;
    local.await;

    println!("📄 Files read:");
    for (name, lines) in line_counts.borrow().iter() {
        println!("  {:<40} {:>6} lines", name, lines);
    }
    println!("Failures: {}", failures.borrow());

    Ok(())
}
