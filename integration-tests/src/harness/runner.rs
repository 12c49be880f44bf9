use logmerge_core::color::Palette;
use logmerge_core::{MergeError, MergeSettings, Merger, SourceInput, SourceName};
use std::path::Path;
use tokio::fs::File;
use tokio_util::sync::CancellationToken;

/// Merge files named the way the command line names them, returning the uncolored output.
pub async fn merge_files(
    settings: MergeSettings,
    paths: &[&Path],
    full_names: bool,
) -> Result<String, MergeError> {
    let mut merger = Merger::new(settings, vec![Palette::plain()]);

    for path in paths {
        let name = SourceName::parse(&path.to_string_lossy(), full_names);
        let file = File::open(&name.path).await.map_err(|source| MergeError::Read {
            alias: name.alias().to_string(),
            source,
        })?;
        merger.add_source(SourceInput::new(name.alias(), name.rolled, file));
    }

    let output = merger.run(Vec::new(), CancellationToken::new()).await?;
    Ok(String::from_utf8(output).expect("merged output is utf-8"))
}
