//! The `build` command.

use anyhow::{Context, bail};
use transom_core::{
    BuildContext, CLIENTSIDE_NAMESPACE, ModuleDescriptor, PROPS_NAMESPACE, ParamMap, ParamValue,
    Transpiler, clientside_mapper, property_path_mapper,
};

use crate::MapperKind;

pub fn execute(
    module_path: &str,
    namespace: Option<&str>,
    mapper: MapperKind,
    raw_params: &[String],
    root: &str,
    transpiler: Option<&str>,
    exports: Vec<String>,
) -> anyhow::Result<()> {
    let transpiler = match transpiler {
        Some(command) => Transpiler::with_command(command),
        None => Transpiler::detect()
            .context("transpiler not found on PATH; pass --transpiler to override")?,
    };
    let ctx = BuildContext::with_root(root, transpiler);

    let module = if exports.is_empty() {
        ModuleDescriptor::from_path(module_path)?
    } else {
        ModuleDescriptor::with_exports(module_path, exports)?
    };

    let params = parse_params(raw_params)?;

    let compiled = match mapper {
        MapperKind::Clientside => {
            let namespace = namespace.unwrap_or(CLIENTSIDE_NAMESPACE);
            ctx.compile_with(&module, namespace, clientside_mapper, &params)?
        }
        MapperKind::Props => {
            let namespace = namespace.unwrap_or(PROPS_NAMESPACE);
            ctx.compile_with(&module, namespace, property_path_mapper, &params)?
        }
    };

    if compiled.recompiled {
        tracing::info!(module = %compiled.name, "compiled");
    } else {
        tracing::info!(module = %compiled.name, "up to date");
    }

    println!("{}", compiled.entry_point.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&compiled.bindings)
            .context("failed to serialize bindings")?
    );

    Ok(())
}

fn parse_params(raw: &[String]) -> anyhow::Result<ParamMap> {
    let mut params = ParamMap::new();
    for spec in raw {
        let (key, value) = parse_param(spec)?;
        params.insert(key, value);
    }
    Ok(params)
}

/// Parse a `KEY=VALUE` spec, inferring the value type: int, then float, then
/// bool, falling back to a quoted string.
fn parse_param(spec: &str) -> anyhow::Result<(String, ParamValue)> {
    let Some((key, value)) = spec.split_once('=') else {
        bail!("expected KEY=VALUE, got '{spec}'");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("empty parameter key in '{spec}'");
    }
    let value = if let Ok(v) = value.parse::<i64>() {
        ParamValue::Int(v)
    } else if let Ok(v) = value.parse::<f64>() {
        ParamValue::Float(v)
    } else {
        match value {
            "true" | "True" => ParamValue::Bool(true),
            "false" | "False" => ParamValue::Bool(false),
            other => ParamValue::Str(other.to_string()),
        }
    };
    Ok((key.to_string(), value))
}
