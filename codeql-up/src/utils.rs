use crate::error::Result;
use std::fs;
use std::io;
use std::path::Path;

/// Extract a zip archive into `dest_dir`, creating directories as needed.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let outpath = dest_dir.join(entry.mangled_name());

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile)?;
        }

        // Preserve permissions recorded in the archive where present
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

/// Set the executable bit on a file (Unix only)
#[cfg(unix)]
pub fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(windows)]
pub fn make_executable(_path: &Path) -> io::Result<()> {
    // No-op on Windows
    Ok(())
}

/// Restore the executable bit on helper binaries found under any `bin/`
/// directory inside `tools_dir`, walked recursively.
///
/// Helper binaries are optional, so failures here are logged and never
/// abort the install.
pub fn fix_helper_permissions(tools_dir: &Path) {
    for entry in walkdir::WalkDir::new(tools_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    "Failed to walk tools directory for permissions {}: {e}",
                    tools_dir.display()
                );
                continue;
            }
        };

        let path = entry.path();
        let in_bin_dir = path
            .parent()
            .and_then(|parent| parent.file_name())
            .map_or(false, |name| name == "bin");

        if entry.file_type().is_file() && in_bin_dir {
            if let Err(e) = make_executable(path) {
                tracing::warn!(
                    "Failed to set executable permissions on {}: {e}",
                    path.display()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_zip_creates_nested_tree() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("dist.zip");
        write_test_zip(
            &archive,
            &[
                ("codeql/codeql", b"#!/bin/sh\n"),
                ("codeql/tools/linux64/bin/helper", b"helper"),
            ],
        );

        let dest = dir.path().join("out");
        extract_zip(&archive, &dest).unwrap();

        assert!(dest.join("codeql/codeql").is_file());
        assert!(dest.join("codeql/tools/linux64/bin/helper").is_file());
    }

    #[test]
    fn test_extract_zip_rejects_garbage() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let dest = dir.path().join("out");
        assert!(extract_zip(&archive, &dest).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("binary");
        fs::write(&file, "test").unwrap();

        make_executable(&file).unwrap();
        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert!(mode & 0o100 != 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_fix_helper_permissions_targets_bin_dirs_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let tools = dir.path().join("tools");

        let in_bin = tools.join("linux64/bin/helper");
        let outside_bin = tools.join("linux64/lib/helper.jar");
        fs::create_dir_all(in_bin.parent().unwrap()).unwrap();
        fs::create_dir_all(outside_bin.parent().unwrap()).unwrap();
        fs::write(&in_bin, "helper").unwrap();
        fs::write(&outside_bin, "jar").unwrap();
        fs::set_permissions(&in_bin, fs::Permissions::from_mode(0o644)).unwrap();
        fs::set_permissions(&outside_bin, fs::Permissions::from_mode(0o644)).unwrap();

        fix_helper_permissions(&tools);

        let bin_mode = fs::metadata(&in_bin).unwrap().permissions().mode();
        let lib_mode = fs::metadata(&outside_bin).unwrap().permissions().mode();
        assert!(bin_mode & 0o100 != 0);
        assert!(lib_mode & 0o111 == 0);
    }

    #[test]
    fn test_fix_helper_permissions_tolerates_missing_dir() {
        let dir = tempdir().unwrap();
        // Walking a directory that does not exist must not panic.
        fix_helper_permissions(&dir.path().join("no-such-tools"));
    }
}
