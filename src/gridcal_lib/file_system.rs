use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use log::debug;
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ctx;
use crate::error::Ctx;

/// Interactor with the actual physical file system.
#[derive(Clone, Copy, Debug)]
pub struct FileSystemInteractor {
    /// If true this will not write nor remove anything on the file system.
    pub dry_run: bool,
}

/// This defines all interactions of gridcal with the filesystem.
pub trait FileOperations {
    /// Read a file into raw bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read a file into a utf8 string.
    fn read_utf8(&self, path: &Path) -> Result<String>;

    /// Try to deserialize a toml file into a structure `T`.
    fn try_read_toml<T: DeserializeOwned>(&self, path: &Path) -> Result<T>;

    /// Try to serialize a struct `T` into a toml file.
    fn try_write_toml<T: Serialize>(&self, path: &Path, data: &T) -> Result<()>;

    /// Try to deserialize a json file into a structure `T`.
    fn try_read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T>;

    /// Try to serialize a struct `T` into a json file.
    ///
    /// The output is pretty printed, the simulator's documents are meant to
    /// stay editable by hand.
    fn try_write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()>;

    /// Write all bytes to a file.
    fn write_bytes_truncate(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Write a [String] to a file.
    fn write_utf8_truncate(&self, path: &Path, data: &str) -> Result<()>;

    /// Truncates the file and then runs [FileOperations::canonicalize].
    fn truncate_and_canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Given a path try to canonicalize it.
    ///
    /// This will fail for files that do not exist.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Remove a file, returning whether it existed at all.
    fn remove_file(&self, path: &Path) -> Result<bool>;

    /// Make a file possible to execute.
    fn set_permissions(&self, path: &Path, perms: u32) -> Result<()>;
}

impl FileOperations for FileSystemInteractor {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(ctx!(
          "Could not read the file {path:?}", ;
          "Ensure that the file exists and you have permissions to access it",
        ))
    }

    fn read_utf8(&self, path: &Path) -> Result<String> {
        String::from_utf8(self.read_bytes(path)?).with_context(ctx!(
          "{path:?} is not valid UTF-8", ;
          "The file doesn't seem to be human readable?",
        ))
    }

    fn try_read_toml<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        toml::from_str::<T>(&self.read_utf8(path)?).with_context(ctx!(
          "Could not deserialize toml file {path:?}", ;
          "Ensure that the file is valid toml",
        ))
    }

    fn try_write_toml<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        self.write_utf8_truncate(
            path,
            &toml::to_string::<T>(data).with_context(ctx!(
              "Could not serialize toml file {path:?}", ;
              "Ensure that the struct is valid toml",
            ))?,
        )
    }

    fn try_read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        serde_json::from_str::<T>(&self.read_utf8(path)?).with_context(ctx!(
          "Could not deserialize json file {path:?}", ;
          "Ensure that the file is valid json",
        ))
    }

    fn try_write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        self.write_utf8_truncate(
            path,
            &serde_json::to_string_pretty::<T>(data).with_context(ctx!(
              "Could not serialize json file {path:?}", ;
              "Ensure that the struct is valid json",
            ))?,
        )
    }

    fn write_utf8_truncate(&self, path: &Path, data: &str) -> Result<()> {
        self.write_bytes_truncate(path, data.as_bytes())
    }

    fn write_bytes_truncate(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.dry_run {
            debug!("Would have written to {path:?} (dry)");
            return Ok(());
        }

        fs::write(self.truncate_and_canonicalize(path)?, bytes).with_context(ctx!(
          "Could not write to the file {path:?}", ;
          "Ensure that you have permissions to write it",
        ))?;

        Ok(())
    }

    fn truncate_and_canonicalize(&self, path: &Path) -> Result<PathBuf> {
        if self.dry_run {
            if let Some(parent) = path.parent() {
                trace!("Would have created {parent:?} (dry)");
            }

            trace!("Would have created {path:?} (dry)");
            return Ok(path.to_path_buf());
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                debug!("Creating directories for {:?}", parent);
            }

            fs::create_dir_all(parent).with_context(ctx!(
              "Could not create parent directories for {parent:?}", ;
              "Ensure that you have sufficient permissions",
            ))?;
        }

        debug!("Creating a file at {:?}", path);
        File::create(path).with_context(ctx!(
           "Could not create {path:?}", ;
           "Ensure that you have sufficient permissions",
        ))?;

        self.canonicalize(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize().with_context(ctx!(
          "Could not canonicalize {path:?}", ;
          "Ensure that your path is valid",
        ))
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        if self.dry_run {
            debug!("Would have removed {path:?} (dry)");
            return Ok(true);
        }

        fs::remove_file(path).with_context(ctx!(
          "Could not remove the file {path:?}", ;
          "Ensure that you have permissions to modify it",
        ))?;

        Ok(true)
    }

    fn set_permissions(&self, path: &Path, perms: u32) -> Result<()> {
        if self.dry_run {
            debug!("Would have made {path:?} executable (dry)");
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, Permissions::from_mode(perms)).with_context(ctx!(
              "Could not make {path:?} executable", ;
             "Ensure that you have sufficient permissions",
            ))
        }
        #[cfg(not(unix))]
        {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/file_system.rs"]
mod tests;
