//! Unified application error type.
//! Every module (store, core, export, cli) returns AppError so that each
//! failure reaches the user as a single message and a no-op.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Stored document is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Regimental Number {0} already exists!")]
    DuplicateRegimental(String),

    #[error("From Date must be before To Date ({from} > {to})")]
    InvertedRange { from: String, to: String },

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid gender: {0} (use Male or Female)")]
    InvalidGender(String),

    #[error("Invalid attendance status: {0} (use P, A, R, M or C)")]
    InvalidStatus(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("Cadet not found: {0}")]
    CadetNotFound(String),

    #[error("No attendance found for date {0}")]
    NoAttendanceForDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration file is malformed: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
