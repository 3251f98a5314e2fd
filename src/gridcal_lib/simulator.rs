use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;

use crate::bailc;
use crate::constants::KEY_CPU_COUNT;
use crate::constants::KEY_CPU_SPEED;
use crate::error::ctx;
use crate::error::Ctx;
use crate::file_system::FileOperations;

/// The tag-derived paths of the artifacts one simulator run leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// The job database the simulator writes.
    pub database: PathBuf,

    /// The job table the simulator exports next to the database.
    pub table: PathBuf,
}

impl Artifacts {
    /// Derive the artifact paths for one run tag.
    ///
    /// Tags keep runs from clobbering each other's output files.
    pub fn new(output_folder: &Path, site: &str, tag: &str) -> Self {
        let stem = format!("{site}_jobs_output_{tag}");

        Artifacts {
            database: output_folder.join(format!("{stem}.db")),
            table: output_folder.join(format!("{stem}.csv")),
        }
    }
}

/// Overwrite the given keys of a JSON document, keeping all other keys.
pub fn patch_document(
    fs: &impl FileOperations,
    path: &Path,
    overrides: &Map<String, Value>,
) -> Result<()> {
    let mut document: Value = fs.try_read_json(path)?;

    let object = match document.as_object_mut() {
        Some(object) => object,
        None => {
            bailc!(
                "{path:?} does not contain a JSON object", ;
                "The simulator reads its parameters from a top-level mapping", ;
                "Regenerate the file from the simulator's configuration template",
            );
        }
    };

    for (key, value) in overrides {
        object.insert(key.clone(), value.clone());
    }

    fs.try_write_json(path, &document)
}

/// Rewrite the CPU speeds of one site, leaving every other site untouched.
pub fn set_site_cpu_speed(
    fs: &impl FileOperations,
    path: &Path,
    site: &str,
    speeds: &[u64],
) -> Result<()> {
    let mut document: Value = fs.try_read_json(path)?;

    let entry = document.get_mut(site).with_context(ctx!(
      "The site {site:?} does not exist in {path:?}", ;
      "Pick one of the sites described in the site info file",
    ))?;

    let record = entry.as_object_mut().with_context(ctx!(
      "The entry for {site:?} in {path:?} is not a JSON object", ;
      "Each site must map to a record of site properties",
    ))?;

    record.insert(KEY_CPU_SPEED.to_string(), json!(speeds));

    fs.try_write_json(path, &document)
}

/// Read the number of CPU units of one site.
pub fn site_cpu_count(fs: &impl FileOperations, path: &Path, site: &str) -> Result<usize> {
    let document: Value = fs.try_read_json(path)?;

    document
        .get(site)
        .and_then(|entry| entry.get(KEY_CPU_COUNT))
        .and_then(Value::as_u64)
        .map(|count| count as usize)
        .with_context(ctx!(
          "Could not read {KEY_CPU_COUNT:?} for site {site:?} from {path:?}", ;
          "Each site entry must carry an integer {KEY_CPU_COUNT:?} field",
        ))
}

#[cfg(test)]
#[path = "tests/simulator.rs"]
mod tests;
