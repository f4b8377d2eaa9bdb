// マニフェスト読み込み - JSONから署名検証レコードを構築
// ファイル参照はディスパッチ前に全て読み込む

use crate::core::{ProcessingError, ProcessingResult, SignedRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    name: String,
    signature: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    path: Option<PathBuf>,
}

/// マニフェストファイルを読み込む
///
/// 相対パスはマニフェストのあるディレクトリを基準に解決する
pub fn load_manifest(path: &Path) -> ProcessingResult<Vec<SignedRecord>> {
    let origin = path.display().to_string();
    let json = std::fs::read_to_string(path)
        .map_err(|e| ProcessingError::manifest(&origin, e.to_string()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_manifest(&json, base_dir, &origin)
}

/// JSON文字列からレコードを構築
pub fn parse_manifest(
    json: &str,
    base_dir: &Path,
    origin: &str,
) -> ProcessingResult<Vec<SignedRecord>> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(json).map_err(|e| ProcessingError::manifest(origin, e.to_string()))?;

    entries
        .into_iter()
        .map(|entry| {
            let content = match (entry.content, entry.path) {
                (Some(content), None) => content.into_bytes(),
                (None, Some(file)) => {
                    let resolved = base_dir.join(&file);
                    std::fs::read(&resolved).map_err(|e| {
                        ProcessingError::manifest(
                            origin,
                            format!("{}: {} - {e}", entry.name, resolved.display()),
                        )
                    })?
                }
                _ => {
                    return Err(ProcessingError::manifest(
                        origin,
                        format!(
                            "{}: exactly one of \"content\" or \"path\" is required",
                            entry.name
                        ),
                    ))
                }
            };

            Ok(SignedRecord::new(entry.name, content, entry.signature))
        })
        .collect()
}
