//! Entry-point synthesis.
//!
//! The entry point is the one script the host page loads directly. It imports
//! the compiled module's exports and publishes them on a global namespace
//! object for the host framework's client-side dispatch to find.

/// Generate the bootstrap script for a compiled module.
///
/// The emitted script imports the named exports from `./<module>.js` and
/// merges them under `window.<namespace>` keyed by module name:
///
/// ```js
/// import {add, sub} from './calculator.js'
///
/// window.clientside = Object.assign({}, window.clientside, {
///     calculator: {
///         add,
///         sub
///     }
/// });
/// ```
///
/// The merge copies the existing namespace object first, so entry points for
/// different modules coexist under one namespace; re-registering a module
/// replaces only its own key. Collision behavior is therefore deterministic
/// and keyed by (namespace, module).
pub fn entry_point_source(module: &str, exports: &[String], namespace: &str) -> String {
    let imports = exports.join(", ");
    let mut js = String::new();

    js.push_str(&format!("import {{{imports}}} from './{module}.js'\n\n"));
    js.push_str(&format!(
        "window.{namespace} = Object.assign({{}}, window.{namespace}, {{\n"
    ));
    js.push_str(&format!("    {module}: {{\n"));
    for (i, export) in exports.iter().enumerate() {
        js.push_str(&format!("        {export}"));
        if i + 1 < exports.len() {
            js.push(',');
        }
        js.push('\n');
    }
    js.push_str("    }\n});\n");
    js
}
