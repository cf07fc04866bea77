//! Hand the saved figure to the platform's default viewer

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Build the launcher invocation for this platform
pub fn viewer_command(path: &Path) -> Command {
  let mut cmd = if cfg!(target_os = "windows") {
    let mut c = Command::new("cmd");
    c.args(["/C", "start", ""]);
    c
  } else if cfg!(target_os = "macos") {
    Command::new("open")
  } else {
    Command::new("xdg-open")
  };
  cmd.arg(path);
  cmd
}

/// Launch the viewer and wait for the launcher (not the viewer) to exit
pub fn open_viewer(path: &Path) -> io::Result<()> {
  let status = viewer_command(path)
    .stdin(Stdio::null())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()?;

  if !status.success() {
    return Err(io::Error::other(format!("viewer exited with {status}")));
  }

  tracing::debug!(path = %path.display(), "viewer launched");
  Ok(())
}
