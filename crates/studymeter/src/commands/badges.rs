use std::path::Path;

use anyhow::Context;
use studymeter_anki::{Collection, CollectionLocator};
use studymeter_core::{activity_dates, current_streak, render_badges, seen_count, DayBoundary};

use crate::cli::BadgesArgs;
use crate::output::atomic_write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub seen: usize,
    pub streak: u32,
}

pub fn run(args: &BadgesArgs) -> anyhow::Result<()> {
    let path = CollectionLocator::new()
        .profile(args.profile.as_str())
        .explicit(args.collection.clone())
        .locate()?;
    let boundary = if args.utc {
        DayBoundary::Utc
    } else {
        DayBoundary::Local
    };

    let metrics = read_metrics(&path, &args.deck, boundary)
        .with_context(|| format!("failed to read metrics from {}", path.display()))?;
    let changed = update_document(&args.readme, metrics, args.dry_run)?;

    if args.dry_run {
        println!(
            "Would update badges: {} Anki Chinese cards, {} day streak ({})",
            metrics.seen,
            metrics.streak,
            if changed { "changes pending" } else { "no changes" }
        );
    } else {
        println!(
            "Updated badges: {} Anki Chinese cards, {} day streak",
            metrics.seen, metrics.streak
        );
    }
    Ok(())
}

/// Read both metrics over one connection, closing it on every path
fn read_metrics(
    path: &Path,
    deck: &str,
    boundary: DayBoundary,
) -> studymeter_anki::Result<Metrics> {
    let col = Collection::open(path)?;
    let metrics = compute_metrics(&col, deck, boundary);
    col.close()?;
    metrics
}

fn compute_metrics(
    col: &Collection,
    deck: &str,
    boundary: DayBoundary,
) -> studymeter_anki::Result<Metrics> {
    let cards = col.deck_cards(deck, true)?;
    let dates = activity_dates(&col.review_events()?, boundary);
    Ok(Metrics {
        seen: seen_count(&cards),
        streak: current_streak(&dates, boundary.today()),
    })
}

/// Upsert the badges into `readme`; returns whether the content changed
fn update_document(readme: &Path, metrics: Metrics, dry_run: bool) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(readme)
        .with_context(|| format!("failed to read {}", readme.display()))?;
    let updated = render_badges(&content, metrics.seen as u64, u64::from(metrics.streak));

    if updated == content {
        tracing::debug!(path = %readme.display(), "badges already up to date");
        return Ok(false);
    }
    if !dry_run {
        atomic_write(readme, updated.as_bytes())
            .with_context(|| format!("failed to write {}", readme.display()))?;
        tracing::info!(path = %readme.display(), "wrote badges");
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};
    use std::path::PathBuf;

    const DAY_MS: i64 = 86_400_000;

    fn fixture_collection(dir: &Path) -> PathBuf {
        let path = dir.join("collection.anki2");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "
            CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL);
            CREATE TABLE decks (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
            CREATE TABLE cards (id INTEGER PRIMARY KEY, did INTEGER NOT NULL, reps INTEGER NOT NULL);
            CREATE TABLE revlog (id INTEGER PRIMARY KEY, cid INTEGER NOT NULL);
            INSERT INTO col VALUES (1, '{}');
            INSERT INTO decks VALUES (1, 'Mandarin: Vocabulary');
            INSERT INTO decks VALUES (2, 'Mandarin: Vocabulary' || char(31) || 'HSK2');
            INSERT INTO cards VALUES (1, 1, 4);
            INSERT INTO cards VALUES (2, 1, 0);
            INSERT INTO cards VALUES (3, 2, 2);
            ",
        )
        .unwrap();

        let now = chrono::Utc::now().timestamp_millis();
        for (i, ts) in [now, now - 60_000, now - DAY_MS].into_iter().enumerate() {
            conn.execute("INSERT INTO revlog VALUES (?1, ?2)", params![ts, i as i64])
                .unwrap();
        }
        path
    }

    fn args(dir: &Path, collection: PathBuf, dry_run: bool) -> BadgesArgs {
        BadgesArgs {
            collection: Some(collection),
            profile: "User 1".to_string(),
            deck: "Mandarin: Vocabulary".to_string(),
            readme: dir.join("README.md"),
            utc: true,
            dry_run,
        }
    }

    #[test]
    fn test_read_metrics() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = fixture_collection(dir.path());
        let metrics = read_metrics(&path, "Mandarin: Vocabulary", DayBoundary::Utc).unwrap();
        assert_eq!(metrics, Metrics { seen: 2, streak: 2 });
    }

    #[test]
    fn test_read_metrics_missing_deck() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = fixture_collection(dir.path());
        let err = read_metrics(&path, "Japanese", DayBoundary::Utc).unwrap_err();
        assert!(err.to_string().contains("Japanese"));
    }

    #[test]
    fn test_run_writes_badges_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let collection = fixture_collection(dir.path());
        std::fs::write(dir.path().join("README.md"), "# 中文\nProgress log\n").unwrap();

        run(&args(dir.path(), collection.clone(), false)).unwrap();
        let first = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(first.contains("Anki%20Chinese%20Cards-2-blue"));
        assert!(first.contains("Day%20Streak-2-orange"));

        run(&args(dir.path(), collection, false)).unwrap();
        let second = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let collection = fixture_collection(dir.path());
        std::fs::write(dir.path().join("README.md"), "# 中文\n").unwrap();

        run(&args(dir.path(), collection, true)).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "# 中文\n"
        );
    }

    #[test]
    fn test_missing_readme_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let collection = fixture_collection(dir.path());
        let err = run(&args(dir.path(), collection, false)).unwrap_err();
        assert!(err.to_string().contains("README.md"));
    }

    #[test]
    fn test_missing_collection_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.anki2");
        let err = run(&args(dir.path(), missing, false)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
