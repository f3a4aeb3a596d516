//! Function mapping: module exports to browser-reachable references.
//!
//! The mapping step is purely functional: it reads a module descriptor and
//! produces a fresh lookup table of proxies, leaving the descriptor (and the
//! source module it describes) untouched for callers that still need the
//! original.
//!
//! A mapper is any `Fn(&str, &str, &str) -> Binding` over
//! (namespace, module, function); [`clientside_mapper`] and
//! [`property_path_mapper`] are the two standard ones, and callers may supply
//! their own closure.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::module::ModuleDescriptor;

/// Default global namespace for clientside-callback exports.
pub const CLIENTSIDE_NAMESPACE: &str = "clientside";

/// Default global namespace for property-path exports.
pub const PROPS_NAMESPACE: &str = "props";

/// A framework-native reference to a compiled clientside function.
///
/// The host framework resolves the reference under its own well-known global
/// object, so the descriptor carries the module name as its namespace and the
/// function name within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientsideFunction {
    pub namespace: String,
    pub function_name: String,
}

/// A browser-side reachable reference to one compiled function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Binding {
    /// Structured callback descriptor for the host framework's output wiring.
    Clientside(ClientsideFunction),
    /// Dotted property path, e.g. `window.ns.module.function`, suitable as a
    /// nested configuration value handed to client-rendered components.
    PropertyPath(String),
}

/// Lookup table from export name to its browser-side reference.
pub type BindingTable = BTreeMap<String, Binding>;

/// Standard mapper producing clientside-callback descriptors.
pub fn clientside_mapper(_namespace: &str, module: &str, function: &str) -> Binding {
    Binding::Clientside(ClientsideFunction {
        namespace: module.to_string(),
        function_name: function.to_string(),
    })
}

/// Standard mapper producing `window.<namespace>.<module>.<function>` paths.
pub fn property_path_mapper(namespace: &str, module: &str, function: &str) -> Binding {
    Binding::PropertyPath(format!("window.{namespace}.{module}.{function}"))
}

/// Produce the binding table for a module's exports.
pub fn map_exports(
    module: &ModuleDescriptor,
    namespace: &str,
    mapper: impl Fn(&str, &str, &str) -> Binding,
) -> BindingTable {
    module
        .exports()
        .iter()
        .map(|function| {
            (
                function.clone(),
                mapper(namespace, module.name(), function),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_module() -> (TempDir, ModuleDescriptor) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("m.py");
        fs::write(&path, "def f(x):\n    return x\n").expect("Failed to write module");
        let module = ModuleDescriptor::from_path(&path).expect("Failed to build descriptor");
        (dir, module)
    }

    #[test]
    fn test_property_path_mapper() {
        let binding = property_path_mapper("ns", "m", "f");
        assert_eq!(binding, Binding::PropertyPath("window.ns.m.f".to_string()));
    }

    #[test]
    fn test_clientside_mapper_keys_by_module_and_function() {
        let binding = clientside_mapper("clientside", "calculator", "add");
        assert_eq!(
            binding,
            Binding::Clientside(ClientsideFunction {
                namespace: "calculator".to_string(),
                function_name: "add".to_string(),
            })
        );
    }

    #[test]
    fn test_closure_mapper_is_pluggable() {
        let (_dir, module) = test_module();

        let table = map_exports(&module, "ns", |ns, m, f| {
            Binding::PropertyPath(format!("{ns}:{m}:{f}"))
        });
        assert_eq!(
            table.get("f"),
            Some(&Binding::PropertyPath("ns:m:f".to_string()))
        );
    }

    #[test]
    fn test_map_exports_leaves_descriptor_intact() {
        let (_dir, module) = test_module();
        let before = module.exports().to_vec();

        let table = map_exports(&module, "ns", property_path_mapper);
        assert_eq!(table.len(), 1);
        assert_eq!(module.exports(), before.as_slice());
    }

    #[test]
    fn test_binding_serialization_shapes() {
        let clientside = clientside_mapper("clientside", "m", "f");
        assert_eq!(
            serde_json::to_value(&clientside).expect("Failed to serialize"),
            serde_json::json!({"namespace": "m", "function_name": "f"})
        );

        let path = property_path_mapper("ns", "m", "f");
        assert_eq!(
            serde_json::to_value(&path).expect("Failed to serialize"),
            serde_json::json!("window.ns.m.f")
        );
    }
}
