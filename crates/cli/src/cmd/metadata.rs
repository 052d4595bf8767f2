use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use nlopt_build_lib::metadata::PackageMetadata;
use nlopt_build_lib::platform::Os;

use super::load_metadata;
use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Serialize)]
struct MetadataReport<'a> {
  #[serde(flatten)]
  metadata: &'a PackageMetadata,
  platforms: &'static [Os],
  package_data: Option<Vec<String>>,
  limited_api: String,
}

/// Print the package metadata, with the package data for this host.
pub fn cmd_metadata(config: Option<&Path>, output: OutputFormat) -> Result<()> {
  let metadata = load_metadata(config)?;
  let report = MetadataReport {
    metadata: &metadata,
    platforms: metadata.platforms(),
    package_data: Os::current().map(|os| metadata.package_data(os)),
    limited_api: metadata.python_abi()?.limited_api_hex(),
  };

  if output.is_json() {
    return print_json(&report);
  }

  print_stat("Name", &metadata.name);
  print_stat("Version", &metadata.version);
  print_stat("License", &metadata.license);
  print_stat("Python", &metadata.python_requires);
  print_stat("Limited API", &report.limited_api);
  print_stat("Requires", &metadata.install_requires.join(", "));
  if let Some(files) = &report.package_data {
    print_stat("Package data", &files.join(", "));
  }
  print_stat("URL", &metadata.url);

  Ok(())
}
