// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci` runs lint, build, test and migration verification
//! - `cargo xtask verify-migrations` applies the persistence migrations to
//!   a scratch `SQLite` database, checks the resulting schema, then reverts
//!   them
//!
//! Standard `cargo test` needs no infrastructure; every test runs against
//! in-memory `SQLite`.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeSet;
use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre, eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{FileBasedMigrations, MigrationHarness};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Tables the booking schema must define.
const EXPECTED_TABLES: [&str; 5] = [
    "profile_venues",
    "reservation_profiles",
    "reservations",
    "users",
    "venues",
];

/// Columns of the unique index that forbids double booking.
const SLOT_KEY_COLUMNS: [&str; 3] = ["venue_id", "reservation_date", "slot_label"];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint clippy, docs and formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run all tests
    #[command(visible_alias = "t")]
    Test,

    /// Apply, inspect and revert the `SQLite` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Lint => lint(),
            Self::LintClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--",
                "-D",
                "warnings",
            ]),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => run_cargo(&["test", "--all-targets", "--all-features"]),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    Command::Build.run()?;
    Command::Test.run()?;
    verify_migrations()
}

fn lint() -> Result<()> {
    Command::LintClippy.run()?;
    lint_docs()?;
    Command::LintFormatting.run()
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we run as a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct IndexInfo {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Integer)]
    unique: i32,
}

#[derive(QueryableByName)]
struct IndexColumn {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ForeignKeyInfo {
    #[diesel(sql_type = Text)]
    table: String,
    #[diesel(sql_type = Text)]
    from: String,
}

/// Applies every migration to a scratch database, checks the schema the
/// allocator relies on, then reverts everything and checks nothing is left.
///
/// Fails if:
/// - A migration fails to apply or revert
/// - A booking table is missing
/// - `reservations` lacks the unique (venue, date, slot) index
/// - `reservations.venue_id` is not a foreign key to `venues`
/// - Any table survives the revert
fn verify_migrations() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;
    let migrations_dir = meta
        .workspace_root
        .join("crates")
        .join("persistence")
        .join("migrations");
    tracing::info!("Verifying migrations in {migrations_dir}");

    let load_migrations = || {
        FileBasedMigrations::from_path(&migrations_dir)
            .map_err(|e| eyre::eyre!("failed to read migrations: {e}"))
    };
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("failed to open scratch SQLite database")?;

    let applied = conn
        .run_pending_migrations(load_migrations()?)
        .map_err(|e| eyre::eyre!("failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let tables: BTreeSet<String> = list_tables(&mut conn)?;
    for expected in EXPECTED_TABLES {
        if !tables.contains(expected) {
            eyre::bail!("table '{expected}' is missing after migration");
        }
    }

    verify_slot_key(&mut conn)?;
    verify_venue_foreign_key(&mut conn)?;

    conn.revert_all_migrations(load_migrations()?)
        .map_err(|e| eyre::eyre!("failed to revert migrations: {e}"))?;
    let leftover: BTreeSet<String> = list_tables(&mut conn)?;
    if !leftover.is_empty() {
        eyre::bail!("tables left after revert: {leftover:?}");
    }

    tracing::info!("Migrations verified");
    Ok(())
}

fn list_tables(conn: &mut SqliteConnection) -> Result<BTreeSet<String>> {
    let tables: Vec<TableName> = diesel::sql_query(concat!(
        "SELECT name FROM sqlite_master WHERE type='table' ",
        "AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ",
        "ORDER BY name",
    ))
    .load(conn)
    .wrap_err("failed to query SQLite tables")?;
    Ok(tables.into_iter().map(|table| table.name).collect())
}

fn verify_slot_key(conn: &mut SqliteConnection) -> Result<()> {
    let indexes: Vec<IndexInfo> = diesel::sql_query("PRAGMA index_list(reservations)")
        .load(conn)
        .wrap_err("failed to list reservation indexes")?;

    for index in indexes.iter().filter(|index| index.unique == 1) {
        let columns: Vec<IndexColumn> =
            diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                .load(conn)
                .wrap_err(format!("failed to get columns of index {}", index.name))?;
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        if names == SLOT_KEY_COLUMNS {
            tracing::info!("Found slot key index {}", index.name);
            return Ok(());
        }
    }

    eyre::bail!("reservations has no unique index on {SLOT_KEY_COLUMNS:?}")
}

fn verify_venue_foreign_key(conn: &mut SqliteConnection) -> Result<()> {
    let keys: Vec<ForeignKeyInfo> = diesel::sql_query("PRAGMA foreign_key_list(reservations)")
        .load(conn)
        .wrap_err("failed to list reservation foreign keys")?;

    if keys
        .iter()
        .any(|key| key.table == "venues" && key.from == "venue_id")
    {
        Ok(())
    } else {
        eyre::bail!("reservations.venue_id does not reference venues")
    }
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
