//! Fetch and filter the remote skill database
//!
//! Two sequential fetches: a small pointer file whose body is the real
//! database URL, then the JSON database itself. The JSON is third-party and
//! loosely typed, so anomalies inside a single class or skill are logged and
//! skipped; only transport failures and a broken top level fail the load.

use crate::core::config::DbConfig;
use crate::core::error::{DbError, Result};
use crate::core::types::DbIdx;
use crate::fetch::SourceFetcher;
use crate::skills::catalog::{IgnoreSet, SkillCatalog};
use crate::skills::record::SkillRecord;
use crate::skills::source::{ClassEntry, SkillDocument, SkillEntry};
use std::time::Duration;

/// Fetch `url`, treating a missed deadline or an empty body as unavailable
async fn fetch_non_empty(
    fetcher: &dyn SourceFetcher,
    url: &str,
    deadline: Duration,
) -> Result<String> {
    let body = tokio::time::timeout(deadline, fetcher.fetch_text(url))
        .await
        .map_err(|_| {
            DbError::SourceUnavailable(format!("{}: timed out after {:?}", url, deadline))
        })??;

    if body.trim().is_empty() {
        return Err(DbError::SourceUnavailable(format!("{}: empty response", url)));
    }
    Ok(body)
}

/// Resolve the pointer resource to the current database URL
pub async fn fetch_database_url(
    fetcher: &dyn SourceFetcher,
    pointer_url: &str,
    deadline: Duration,
) -> Result<String> {
    let body = fetch_non_empty(fetcher, pointer_url, deadline).await?;
    Ok(body.trim().to_string())
}

/// Build the per-class catalog and the ignore set from a parsed document
pub fn build_skill_index(doc: &SkillDocument) -> (SkillCatalog, IgnoreSet) {
    let mut catalog = SkillCatalog::new();

    for (class_name, value) in &doc.classes {
        let class: ClassEntry = match serde_json::from_value(value.clone()) {
            Ok(class) => class,
            Err(e) => {
                tracing::warn!("Skipping class {}: {}", class_name, e);
                continue;
            }
        };

        if class.discipline().is_none() {
            continue;
        }
        catalog.add_class(class_name.as_str());

        for (list_name, elements) in class.index_lists() {
            for element in elements {
                let Some(db_index) = DbIdx::from_json(element) else {
                    tracing::warn!(
                        "Skipping non-index {} in {}.{}",
                        element,
                        class_name,
                        list_name
                    );
                    continue;
                };

                let Some(record) = resolve_skill(doc, class_name, db_index) else {
                    continue;
                };

                if !catalog.insert(class_name, record) {
                    tracing::debug!(
                        "Duplicate skill {} in {}; keeping the first entry",
                        db_index,
                        class_name
                    );
                }
            }
        }
    }

    let mut ignore = IgnoreSet::new();
    for element in &doc.misc {
        match DbIdx::from_json(element) {
            Some(db_index) => ignore.insert(db_index),
            None => tracing::warn!("Skipping non-index {} in misc", element),
        }
    }

    (catalog, ignore)
}

/// Look up one referenced skill; `None` when missing, malformed or deprecated
fn resolve_skill(doc: &SkillDocument, class_name: &str, db_index: DbIdx) -> Option<SkillRecord> {
    let Some(value) = doc.skills.get(&db_index.source_key()) else {
        tracing::warn!("{} references unknown skill {}", class_name, db_index);
        return None;
    };

    let entry: SkillEntry = match serde_json::from_value(value.clone()) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Skipping malformed skill {} in {}: {}", db_index, class_name, e);
            return None;
        }
    };

    if entry.is_deprecated() {
        return None;
    }

    Some(SkillRecord::new(db_index, entry.name).with_attributes(entry.attributes))
}

/// Fetch the pointer, fetch the database and build the catalog and ignore set
pub async fn load_skill_index(
    fetcher: &dyn SourceFetcher,
    config: &DbConfig,
) -> Result<(SkillCatalog, IgnoreSet)> {
    let deadline = config.fetch_timeout();
    let db_url = fetch_database_url(fetcher, &config.pointer_url, deadline).await?;
    tracing::info!("Skill database located at {}", db_url);

    let content = fetch_non_empty(fetcher, &db_url, deadline).await?;
    let doc = SkillDocument::parse(&content)?;
    let (catalog, ignore) = build_skill_index(&doc);

    tracing::info!(
        "Loaded skill database: {} classes, {} skills, {} ignored indices",
        catalog.class_names().len(),
        catalog.len(),
        ignore.len()
    );
    Ok((catalog, ignore))
}
