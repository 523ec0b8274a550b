use crate::types::{DisplaySize, RepositoryInfo, or_null};
use anyhow::Result;
use serde::Serialize;

/// One repository in JSON output. Everything except `size` is a string.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    url: &'a str,
    size: DisplaySize,
    unit: String,
    language: String,
    stars: String,
    forks: String,
    last_commit: String,
}

impl<'a> From<&'a RepositoryInfo> for JsonRecord<'a> {
    fn from(info: &'a RepositoryInfo) -> Self {
        Self {
            url: &info.url,
            size: info.size,
            unit: info.unit.to_string(),
            language: or_null(&info.language),
            stars: or_null(&info.stars),
            forks: or_null(&info.forks),
            last_commit: or_null(&info.last_commit),
        }
    }
}

/// 単一リポジトリの詳細ブロック
fn verbose_block(info: &RepositoryInfo) -> String {
    format!(
        "Repository: {}\nSize: {} {}\nLanguage: {}\nStars: {}\nForks: {}\nLast Commit: {}\n\n",
        info.url,
        info.size,
        info.unit,
        or_null(&info.language),
        or_null(&info.stars),
        or_null(&info.forks),
        or_null(&info.last_commit)
    )
}

pub fn render_text(results: &[RepositoryInfo], verbose: bool) -> String {
    results
        .iter()
        .map(|info| {
            if verbose {
                verbose_block(info)
            } else {
                format!("{}: {} {}\n", info.url, info.size, info.unit)
            }
        })
        .collect()
}

pub fn render_json(results: &[RepositoryInfo]) -> Result<String> {
    let records: Vec<JsonRecord<'_>> = results.iter().map(JsonRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// 結果を出力
pub fn print_results(results: &[RepositoryInfo], json: bool, verbose: bool) -> Result<()> {
    if json {
        println!("{}", render_json(results)?);
    } else {
        print!("{}", render_text(results, verbose));
    }
    Ok(())
}
