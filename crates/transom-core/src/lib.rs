//! Core compilation pipeline for transom.
//!
//! Transom lets a Rust-served dashboard embed client-side logic authored as
//! small script modules, transcoded into browser-loadable ES modules by an
//! external source-to-source compiler.
//!
//! This crate provides:
//! - Content fingerprinting to skip redundant compiler runs
//! - Tagged-constant injection into module source text
//! - External compiler invocation with isolated working directories
//! - Entry-point synthesis publishing compiled functions under a global
//!   namespace
//! - Function mapping from module exports to browser-reachable references
//!
//! The typical flow: build a [`ModuleDescriptor`] for the source file, then
//! call [`BuildContext::compile_clientside`] or [`BuildContext::compile_props`]
//! and hand the resulting entry-point path to the web integration layer.

pub mod context;
pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod mapper;
pub mod module;
pub mod params;
pub mod patch;
pub mod pipeline;
pub mod transpiler;

pub use context::{BuildContext, DEFAULT_ROOT};
pub use entry::entry_point_source;
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use mapper::{
    Binding, BindingTable, CLIENTSIDE_NAMESPACE, ClientsideFunction, PROPS_NAMESPACE,
    clientside_mapper, map_exports, property_path_mapper,
};
pub use module::ModuleDescriptor;
pub use params::{ParamMap, ParamValue};
pub use patch::inject_params;
pub use pipeline::CompiledModule;
pub use transpiler::{DEFAULT_COMMAND, TARGET_DIR_NAME, Transpiler};
