//! Scraped status file loading.

use std::path::Path;

use crate::error::Result;
use crate::models::ScrapedSnapshot;

async fn read_snapshot(path: &Path) -> Result<ScrapedSnapshot> {
    let raw = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Load the scraped status file.
///
/// Missing or unreadable files degrade to an empty snapshot, so every resort
/// falls back to manual-only fusion.
pub async fn load_snapshot(path: impl AsRef<Path>) -> ScrapedSnapshot {
    let path = path.as_ref();
    match read_snapshot(path).await {
        Ok(snapshot) => {
            log::debug!(
                "Loaded scraped status for {} resorts from {:?}",
                snapshot.resorts.len(),
                path
            );
            snapshot
        }
        Err(e) => {
            log::warn!("Scraped status unavailable at {:?}: {}", path, e);
            ScrapedSnapshot::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResortStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_loads_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resort-status.json");
        let body = r#"{
            "scrapedAt": "2025-01-15T06:00:00.000Z",
            "resorts": {
                "madarao": {"status": "PARTIAL", "baseDepthCm": 120, "liftsOpen": 7,
                            "slopesOpen": null, "temperature": -3, "weather": "雪",
                            "scrapedAt": "2025-01-15T06:00:00.000Z"}
            }
        }"#;
        tokio::fs::write(&path, body).await.unwrap();

        let snapshot = load_snapshot(&path).await;
        assert!(snapshot.scraped_at.is_some());
        let madarao = snapshot.get("madarao").unwrap();
        assert_eq!(madarao.status, ResortStatus::Partial);
        assert_eq!(madarao.lifts_open, Some(7));
        assert_eq!(madarao.slopes_open, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let snapshot = load_snapshot(tmp.path().join("absent.json")).await;
        assert_eq!(snapshot, ScrapedSnapshot::empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resort-status.json");
        tokio::fs::write(&path, "<html>404</html>").await.unwrap();
        assert_eq!(load_snapshot(&path).await, ScrapedSnapshot::empty());
    }
}
