//! Web integration for transom-compiled client-side modules.
//!
//! Two concerns, both keyed off the entry-point path the pipeline returns:
//!
//! - **Serving**: [`asset_router`] registers a static route exposing the
//!   compiled-artifact directory under a prefix derived from that directory's
//!   name, so `GET /<dir>/<path>` returns artifact files.
//! - **Splicing**: [`inject_script_tag`] rewrites the host's page template,
//!   inserting a module-type script tag immediately before the host's own
//!   script-injection placeholder. Ordering matters: the entry point must
//!   load and register its namespace before the host's bootstrap scripts run.
//!
//! [`publish`] does both in one call.

pub mod error;

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

pub use error::{Error, Result};

/// Placeholder marking the host template's script-injection point.
pub const SCRIPTS_PLACEHOLDER: &str = "{%scripts%}";

/// Router serving the entry point's directory under `/<dirname>`.
pub fn asset_router(entry_point: &Path) -> Result<Router> {
    let parts = EntryParts::of(entry_point)?;
    Ok(Router::new().nest_service(&format!("/{}", parts.dir_name), ServeDir::new(parts.dir)))
}

/// Module script tag referencing the served entry point.
pub fn script_tag(entry_point: &Path) -> Result<String> {
    let parts = EntryParts::of(entry_point)?;
    Ok(format!(
        "<script type='module' src='/{}/{}'></script>",
        parts.dir_name, parts.file_name
    ))
}

/// Insert the entry-point script tag ahead of the host's own scripts.
///
/// The tag replaces the [`SCRIPTS_PLACEHOLDER`] and re-emits the placeholder
/// after itself, so the host's scripts still load afterwards. A template
/// without the placeholder is returned unchanged with a warning.
pub fn inject_script_tag(template: &str, entry_point: &Path) -> Result<String> {
    let tag = script_tag(entry_point)?;
    if !template.contains(SCRIPTS_PLACEHOLDER) {
        tracing::warn!(
            "page template has no {} placeholder; script tag not injected",
            SCRIPTS_PLACEHOLDER
        );
        return Ok(template.to_string());
    }
    Ok(template.replace(
        SCRIPTS_PLACEHOLDER,
        &format!("{tag}\n            {SCRIPTS_PLACEHOLDER}"),
    ))
}

/// Register the asset route on `app` and splice the script tag into
/// `template`, returning both.
pub fn publish(app: Router, template: &str, entry_point: &Path) -> Result<(Router, String)> {
    let router = app.merge(asset_router(entry_point)?);
    let html = inject_script_tag(template, entry_point)?;
    Ok((router, html))
}

struct EntryParts<'a> {
    dir: &'a Path,
    dir_name: &'a str,
    file_name: &'a str,
}

impl<'a> EntryParts<'a> {
    fn of(entry_point: &'a Path) -> Result<Self> {
        let invalid = || Error::InvalidEntryPoint(entry_point.to_path_buf());
        let file_name = entry_point
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?;
        let dir = entry_point.parent().ok_or_else(invalid)?;
        let dir_name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?;
        Ok(Self {
            dir,
            dir_name,
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "/srv/app/__target__/calculator/calculator_index.js";

    #[test]
    fn test_script_tag_uses_directory_prefix() {
        let tag = script_tag(Path::new(ENTRY)).expect("Failed to build tag");
        assert_eq!(
            tag,
            "<script type='module' src='/calculator/calculator_index.js'></script>"
        );
    }

    #[test]
    fn test_inject_places_tag_before_host_scripts() {
        let template = "<html><body>{%app_entry%}<footer>{%scripts%}</footer></body></html>";
        let html = inject_script_tag(template, Path::new(ENTRY)).expect("Failed to inject");

        let tag_at = html
            .find("<script type='module'")
            .expect("tag must be present");
        let placeholder_at = html
            .find(SCRIPTS_PLACEHOLDER)
            .expect("placeholder must be preserved");
        assert!(tag_at < placeholder_at);
        assert!(html.contains("{%app_entry%}"));
    }

    #[test]
    fn test_inject_without_placeholder_is_identity() {
        let template = "<html><body>no placeholder here</body></html>";
        let html = inject_script_tag(template, Path::new(ENTRY)).expect("Failed to inject");
        assert_eq!(html, template);
    }

    #[test]
    fn test_rootless_entry_point_is_rejected() {
        assert!(matches!(
            script_tag(Path::new("/")),
            Err(Error::InvalidEntryPoint(_))
        ));
    }
}
