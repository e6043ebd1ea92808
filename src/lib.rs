// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Sheetgen — sheet-driven app synthesis
//!
//! Sheetgen compiles a small set of tabular configuration sheets into the
//! complete source tree of a permission-aware, multi-page CRUD application
//! (React + TypeScript). The sheets are the source of truth: pages, table
//! columns, form fields, row actions and role metadata are rows; the
//! compiler turns them into a deterministic mapping of relative file path
//! to generated text.
//!
//! ## Core Concept
//!
//! A workbook carries six sheets — `GLOBAL`, `ROLES`, `PAGES`, `COLUMNS`,
//! `FORM_FIELDS`, `ACTIONS`. From that single input, sheetgen:
//!
//! - **Normalizes** raw rows into a typed configuration model
//! - **Merges** built-in and configured pages into one ordered route table
//!   (first definition of a page id wins)
//! - **Gates** every artifact with wildcard permission matching
//! - **Instantiates** a list screen, a form and a route entry per page
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetgen::{compile, ConfigModel, Workbook};
//!
//! # fn main() -> sheetgen::Result<()> {
//! let workbook = Workbook::sample();
//! let model = ConfigModel::load(&workbook)?;
//! let output = compile(&model)?;
//!
//! assert!(output.files.contains_key("src/App.tsx"));
//! assert!(output.files.contains_key("src/pages/users.tsx"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  WORKBOOK (sheet name → rows)                               │
//! │       │                                                     │
//! │       └──► ConfigModel::load ──► typed records              │
//! │                  │                                          │
//! │                  ├──► merge(builtins, configured)           │
//! │                  │        ──► route table + navigation      │
//! │                  │                                          │
//! │                  └──► artifact descriptors                  │
//! │                           │ (columns, fields, actions,      │
//! │                           │  routes — all plain data)       │
//! │                           ▼                                 │
//! │                    templates::render                        │
//! │                           ──► path → text map               │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decision logic (what goes into an artifact) lives in plain data
//! structures and pure functions; text rendering is isolated behind the
//! template layer, so both halves test independently. The pipeline is a
//! single sequential pass over immutable data: the same workbook always
//! produces a byte-identical file map.

// Core modules
pub mod artifact;
pub mod error;
pub mod merge;
pub mod model;
pub mod pages;
pub mod permission;
pub mod sheet;

// Pipeline and rendering
pub mod assemble;
pub mod compile;
pub mod templates;
pub mod util;

// Re-exports
pub use artifact::{
    component_name, form_view, list_view, nav_item, record_matches, route_entry, ActionControl,
    ColumnSpec, ControlKind, FieldControl, FormView, ListView, NavItem, RouteEntry,
};
pub use assemble::Assembler;
pub use compile::{compile, Compilation, Warning};
pub use error::{Error, Result};
pub use merge::{merge, MergedPage, MergedPages};
pub use model::{Action, Column, ConfigModel, FormField, GlobalSetting, Page, Role};
pub use pages::{
    builtin_authenticated, builtin_public, is_reserved, CATCH_ALL_ROUTE, RESERVED_PAGE_IDS,
};
pub use permission::{can_access_route, has_permission, split_permissions};
pub use sheet::{Row, Workbook};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
