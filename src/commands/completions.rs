//! Completions command handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io::{self, Write};

/// Write completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: CompletionShell) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions::<C>(shell, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Generate completions for `shell` into `out`.
pub fn write_completions<C: CommandFactory>(
    shell: CompletionShell,
    out: &mut dyn Write,
) -> Result<()> {
    let mut cmd = C::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
