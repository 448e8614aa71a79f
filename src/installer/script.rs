//! `start.sh` launch script

use std::path::{Path, PathBuf};

use normpath::PathExt;

use super::{Launch, ServerInstaller};
use crate::error::Result;
use crate::memory::MemoryRange;

pub const START_SCRIPT: &str = "start.sh";

/// Absolute form of the server root for the script's `cd`
fn absolute_root(root: &Path) -> PathBuf {
    root.normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

/// Render the launch script
///
/// `java` is a bundled runtime relative to `root`; without one the script
/// uses whatever `java` is on `PATH`.
pub fn render(root: &Path, launch: &Launch, memory: &MemoryRange, java: Option<&Path>) -> String {
    let java = java.map_or_else(
        || "java".to_string(),
        |path| shell_words::quote(&format!("./{}", path.display())).into_owned(),
    );

    let mut command = vec![java, "-Xms$RAM_MIN".to_string(), "-Xmx$RAM_MAX".to_string()];
    command.extend(launch.jvm_flags.iter().map(ToString::to_string));
    command.push("-jar".to_string());
    command.push(shell_words::quote(&launch.jar).into_owned());
    command.push(launch.nogui.to_string());

    let root = absolute_root(root);
    format!(
        "#!/bin/bash\ncd {}\nexport RAM_MIN=\"{}\"\nexport RAM_MAX=\"{}\"\n{}\n",
        shell_words::quote(&root.to_string_lossy()),
        memory.min,
        memory.max,
        command.join(" ")
    )
}

/// Write `start.sh` and make it executable
pub fn write(
    installer: &mut ServerInstaller<'_>,
    launch: &Launch,
    memory: &MemoryRange,
    java: Option<&Path>,
) -> Result<()> {
    let contents = render(installer.root(), launch, memory, java);
    let path = installer.save(START_SCRIPT, contents)?;
    set_executable(&path)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use crate::error::write_error;

    fs::set_permissions(path, fs::Permissions::from_mode(0o774)).map_err(|e| write_error(path, &e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
