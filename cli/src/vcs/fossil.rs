//! # Fossil Probe
//!
//! File: cli/src/vcs/fossil.rs
//!
//! ## Overview
//!
//! A Fossil checkout is marked by its SQLite checkout database, `_FOSSIL_`
//! (older releases) or `.fslckout`. All metadata lives in SQLite, so this
//! probe runs small read-only queries instead of reading text files:
//!
//! 1. In the checkout database, `vvar` gives the path of the repository
//!    database (`repository`) and the checked-out record id (`checkout`).
//! 2. In the repository database, `blob` maps that record id to its artifact
//!    hash. Without a `checkout` entry the newest blob is used.
//! 3. `tagxref` holds the branch name for that record id, preferring the
//!    value of the `branch` tag.
//!
//! `%h` and `%r` both show the abbreviated artifact hash. Status is not
//! supported.
//!
use super::{short_hash, Probe, ProbeContext};
use crate::core::error::{Result, VcpromptError};
use anyhow::Context;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

pub struct Fossil;

const CHECKOUT_DBS: [&str; 2] = ["_FOSSIL_", ".fslckout"];

/// Where the checkout's repository lives and what is checked out.
#[derive(Debug, PartialEq, Eq)]
pub struct Checkout {
    pub repository: PathBuf,
    pub rid: Option<i64>,
}

/// The checked-out artifact.
#[derive(Debug, PartialEq, Eq)]
pub struct Tip {
    pub uuid: String,
    pub rid: i64,
}

impl Probe for Fossil {
    fn name(&self) -> &'static str {
        "fossil"
    }

    fn claims(&self, dir: &Path) -> bool {
        checkout_db(dir).is_some()
    }

    fn branch(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let (conn, rid) = open_repository(dir)?;
        match current_tip(&conn, rid)? {
            Some(tip) => branch_of(&conn, tip.rid),
            None => Ok(None),
        }
    }

    fn hash(&self, dir: &Path, _ctx: &ProbeContext) -> Result<Option<String>> {
        let (conn, rid) = open_repository(dir)?;
        Ok(current_tip(&conn, rid)?.map(|tip| short_hash(&tip.uuid)))
    }
}

fn checkout_db(dir: &Path) -> Option<PathBuf> {
    CHECKOUT_DBS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn open_read_only(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open fossil database {}", path.display()))
}

/// Opens the repository database for the checkout in `dir`, returning it with
/// the checked-out record id.
fn open_repository(dir: &Path) -> Result<(Connection, Option<i64>)> {
    let db = checkout_db(dir)
        .ok_or_else(|| VcpromptError::NotFound(format!("fossil checkout in {}", dir.display())))?;
    let checkout = read_checkout(&open_read_only(&db)?)?;
    let repository = dir.join(&checkout.repository);
    Ok((open_read_only(&repository)?, checkout.rid))
}

/// Reads the `vvar` entries of a checkout database.
pub fn read_checkout(conn: &Connection) -> Result<Checkout> {
    let repository: Option<String> = conn
        .query_row(
            "SELECT value FROM vvar WHERE name = 'repository'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(VcpromptError::from)?;
    let repository =
        repository.ok_or_else(|| VcpromptError::NotFound("fossil repository setting".into()))?;

    let rid: Option<i64> = conn
        .query_row(
            "SELECT CAST(value AS INTEGER) FROM vvar WHERE name = 'checkout'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(VcpromptError::from)?;

    Ok(Checkout {
        repository: PathBuf::from(repository),
        rid,
    })
}

/// Finds the artifact for `rid`, or the newest artifact when `rid` is unknown.
pub fn current_tip(conn: &Connection, rid: Option<i64>) -> Result<Option<Tip>> {
    let tip = match rid {
        Some(rid) => conn
            .query_row("SELECT uuid, rid FROM blob WHERE rid = ?1", params![rid], row_to_tip)
            .optional(),
        None => conn
            .query_row("SELECT uuid, rid FROM blob ORDER BY rid DESC LIMIT 1", [], row_to_tip)
            .optional(),
    };
    Ok(tip.map_err(VcpromptError::from)?)
}

fn row_to_tip(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tip> {
    Ok(Tip {
        uuid: row.get(0)?,
        rid: row.get(1)?,
    })
}

/// Branch name recorded for `rid`.
pub fn branch_of(conn: &Connection, rid: i64) -> Result<Option<String>> {
    let tagged: Option<String> = conn
        .query_row(
            "SELECT tagxref.value FROM tagxref JOIN tag ON tag.tagid = tagxref.tagid \
             WHERE tagxref.rid = ?1 AND tag.tagname = 'branch' AND tagxref.value IS NOT NULL \
             LIMIT 1",
            params![rid],
            |row| row.get(0),
        )
        .optional()
        .map_err(VcpromptError::from)?;
    if tagged.is_some() {
        return Ok(tagged);
    }
    let any: Option<String> = conn
        .query_row(
            "SELECT value FROM tagxref WHERE rid = ?1 AND value IS NOT NULL LIMIT 1",
            params![rid],
            |row| row.get(0),
        )
        .optional()
        .map_err(VcpromptError::from)?;
    Ok(any)
}
