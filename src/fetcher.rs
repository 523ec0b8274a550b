use crate::api::{ApiError, Branch, ForgeClient, RepoMetadata};
use crate::types::{RepoPath, RepositoryInfo};
use crate::units::{Unit, UnitError};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// Per-repository fetch settings
#[derive(Debug, Clone)]
pub struct FetchOptions<'a> {
    pub unit: &'a str,
    pub full_size: bool,
}

/// Extract owner and name from `https://<host>/<owner>/<repo>`.
/// URLs of any other shape yield empty or meaningless fields.
pub fn parse_repo_url(url: &str) -> RepoPath {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);

    let mut segments = rest.split('/').skip(1);
    let owner = segments.next().unwrap_or_default().to_string();
    let name = segments.next().unwrap_or_default();
    let name = name.strip_suffix(".git").unwrap_or(name).to_string();

    RepoPath { owner, name }
}

/// Log an upstream failure and fall back to the type's empty value
fn or_degraded<T: Default>(result: Result<T, ApiError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("{}", e);
        T::default()
    })
}

/// Sum of all branch sizes in kilobytes. Each branch's byte total is truncated
/// to whole kilobytes before being added.
fn full_size_kb(client: &ForgeClient, repo: &RepoPath) -> u64 {
    let branches: Vec<Branch> = or_degraded(client.branches(&repo.owner, &repo.name));
    tracing::debug!("{} branches found", branches.len());

    // Execute tree requests in parallel; collect keeps branch order
    let branch_kb: Vec<(String, u64)> = branches
        .par_iter()
        .map(|branch| {
            let tree = or_degraded(client.tree(&repo.owner, &repo.name, &branch.name));
            if tree.truncated {
                tracing::warn!(
                    "tree for branch {} was truncated by the API; size is incomplete",
                    branch.name
                );
            }
            (branch.name.clone(), tree.blob_bytes() / 1024)
        })
        .collect();

    branch_kb
        .iter()
        .map(|(name, kb)| {
            tracing::debug!("branch {}: {} KB", name, kb);
            kb
        })
        .sum()
}

/// Fetch size and metadata for a single repository
pub fn fetch_repository(
    client: &ForgeClient,
    url: &str,
    options: &FetchOptions<'_>,
) -> Result<RepositoryInfo, FetchError> {
    let unit: Unit = options.unit.parse()?;

    let repo = parse_repo_url(url);
    tracing::debug!("owner: {}, repo: {}", repo.owner, repo.name);

    let size_kb = if options.full_size {
        full_size_kb(client, &repo)
    } else {
        let sized: RepoMetadata = or_degraded(client.repository(&repo.owner, &repo.name));
        sized.size.unwrap_or(0)
    };
    tracing::debug!("total size: {} KB", size_kb);

    // Metadata always comes from its own request, whichever size path ran
    let metadata: RepoMetadata = or_degraded(client.repository(&repo.owner, &repo.name));

    Ok(RepositoryInfo {
        url: url.to_string(),
        size_kb,
        size: unit.convert(size_kb),
        unit,
        language: metadata.language,
        stars: metadata.stargazers_count,
        forks: metadata.forks_count,
        last_commit: metadata.updated_at,
    })
}
