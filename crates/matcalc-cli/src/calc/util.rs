use anyhow::Result;
use std::path::PathBuf;

pub fn validate_matrix_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("json") | Some("csv") | Some("tsv") => {}
        _ => anyhow::bail!("File must have a .json, .csv or .tsv extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}
