//! The caching compilation pipeline.
//!
//! Orchestrates one module build end to end: fingerprint short-circuit,
//! tagged-constant injection, external compilation in an isolated working
//! directory, artifact relocation, entry-point synthesis and fingerprint
//! persistence. Either the whole recompilation commits (new artifacts, then
//! the new fingerprint) or nothing under the artifact root changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::context::BuildContext;
use crate::entry::entry_point_source;
use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use crate::mapper::{
    Binding, BindingTable, CLIENTSIDE_NAMESPACE, PROPS_NAMESPACE, clientside_mapper, map_exports,
    property_path_mapper,
};
use crate::module::ModuleDescriptor;
use crate::params::ParamMap;
use crate::patch::inject_params;

/// A module's compiled output.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    /// Logical module name.
    pub name: String,
    /// Global namespace the exports are published under.
    pub namespace: String,
    /// Path to the synthesized entry-point script.
    pub entry_point: PathBuf,
    /// Directory holding the compiler output and the entry point.
    pub artifact_dir: PathBuf,
    /// Export name to browser-side reference.
    pub bindings: BindingTable,
    /// False when the persisted fingerprint matched and the external
    /// compiler was skipped.
    pub recompiled: bool,
}

impl BuildContext {
    /// Compile with the clientside-callback mapper under the default
    /// namespace.
    pub fn compile_clientside(&self, module: &ModuleDescriptor) -> Result<CompiledModule> {
        self.compile_with(module, CLIENTSIDE_NAMESPACE, clientside_mapper, &ParamMap::new())
    }

    /// Compile with the property-path mapper under the default namespace.
    pub fn compile_props(
        &self,
        module: &ModuleDescriptor,
        params: &ParamMap,
    ) -> Result<CompiledModule> {
        self.compile_with(module, PROPS_NAMESPACE, property_path_mapper, params)
    }

    /// Compile a module, skipping the external compiler when the persisted
    /// fingerprint matches the current source bytes and parameters.
    ///
    /// On compiler failure the error carries the captured subprocess output
    /// and any previously committed artifacts and fingerprint are left
    /// intact.
    pub fn compile_with(
        &self,
        module: &ModuleDescriptor,
        namespace: &str,
        mapper: impl Fn(&str, &str, &str) -> Binding,
        params: &ParamMap,
    ) -> Result<CompiledModule> {
        let name = module.name();
        let entry_point = self.entry_point(name);
        let artifact_dir = self.artifact_dir(name);
        let bindings = map_exports(module, namespace, mapper);

        let source = fs::read(module.path())?;
        let fingerprint = Fingerprint::compute(&source, params);
        if Fingerprint::load(&self.fingerprint_file(name)) == Some(fingerprint)
            && entry_point.is_file()
        {
            tracing::info!(module = name, "artifacts up to date, skipping compilation");
            return Ok(CompiledModule {
                name: name.to_string(),
                namespace: namespace.to_string(),
                entry_point,
                artifact_dir,
                bindings,
                recompiled: false,
            });
        }

        // Stage the (possibly patched) source in a fresh working directory;
        // unique per invocation, so concurrent builds of different modules
        // cannot collide.
        let workdir = TempDir::new()?;
        let file_name = module
            .path()
            .file_name()
            .ok_or_else(|| Error::InvalidModulePath(module.path().to_path_buf()))?;
        let work_file = workdir.path().join(file_name);
        if params.is_empty() {
            fs::write(&work_file, &source)?;
        } else {
            let text = String::from_utf8_lossy(&source);
            fs::write(&work_file, inject_params(&text, params))?;
        }

        tracing::info!(module = name, "compiling");
        let produced = self.transpiler().build(name, &work_file)?;

        // Full directory replacement; stale artifacts from a previous module
        // version must not survive.
        fs::create_dir_all(self.root())?;
        if artifact_dir.exists() {
            fs::remove_dir_all(&artifact_dir)?;
        }
        move_dir(&produced, &artifact_dir)?;

        fs::write(
            &entry_point,
            entry_point_source(name, module.exports(), namespace),
        )?;
        // The fingerprint is written last: it marks the artifacts committed.
        fingerprint.store(&self.fingerprint_file(name))?;

        Ok(CompiledModule {
            name: name.to_string(),
            namespace: namespace.to_string(),
            entry_point,
            artifact_dir,
            bindings,
            recompiled: true,
        })
    }
}

/// Move a directory, falling back to copy-and-remove across filesystems.
fn move_dir(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            copy_dir_all(src, dst)?;
            fs::remove_dir_all(src)
        }
    }
}

fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
