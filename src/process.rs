use crate::errors::{OpenerError, Result};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

/// Run `program` with `args` in `cwd`, capturing its output.
///
/// Arguments are handed to the process as-is, no shell is involved. The
/// deadline covers both the child's exit and draining its pipes, so a
/// grandchild holding stdout open cannot stretch it. On expiry the child is
/// killed. A non-zero exit status is not an error here, callers decide what
/// it means.
pub fn run(program: &str, args: &[&str], cwd: &Path, timeout: Duration) -> Result<Output> {
    log::debug!("Running {} {:?} in {}", program, args, cwd.display());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(async {
        tokio::time::timeout(
            timeout,
            tokio::process::Command::new(program)
                .args(args)
                .current_dir(cwd)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
    });

    match output {
        Ok(output) => Ok(output?),
        Err(_) => {
            log::debug!("{} killed after {:?}", program, timeout);
            Err(OpenerError::Timeout {
                command: format!("{} {}", program, args.join(" ")),
                seconds: timeout.as_secs(),
            })
        }
    }
}
