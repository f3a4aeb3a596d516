//! The `clean` command.

use transom_core::{BuildContext, Transpiler};

pub fn execute(root: &str) -> anyhow::Result<()> {
    // The transpiler is never invoked for a clean.
    let ctx = BuildContext::with_root(root, Transpiler::default());
    ctx.clean()?;
    tracing::info!(root, "artifact root removed");
    println!("removed {root}");
    Ok(())
}
