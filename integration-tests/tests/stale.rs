use integration_tests::harness::{CapturedEvents, capture_events, entry};
use logmerge_core::color::Palette;
use logmerge_core::{MergeSettings, Merger, SourceInput, StalePolicy};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::Level;

/// A fast source writes four entries right away; a slow source stays silent, then writes an
/// entry older than all of them and both streams end.
async fn late_source_run(stale: StalePolicy) -> (Vec<String>, CapturedEvents) {
    let (events, _guard) = capture_events();

    let settings = MergeSettings {
        batch_size: 0,
        stale,
        ..MergeSettings::default()
    };
    let mut merger = Merger::new(settings, vec![Palette::plain()]);
    let (fast_reader, mut fast) = tokio::io::duplex(4096);
    let (slow_reader, mut slow) = tokio::io::duplex(4096);
    merger.add_source(SourceInput::new("fast", false, fast_reader));
    merger.add_source(SourceInput::new("slow", false, slow_reader));

    let feed = async move {
        let early = [504, 505, 506, 507]
            .map(|ms| entry("info", 39, ms, "UTC", &format!("fast {ms}")))
            .join("\n");
        fast.write_all(early.as_bytes()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        slow.write_all(entry("info", 39, 500, "UTC", "slow 500").as_bytes())
            .await
            .unwrap();
    };

    let (merged, ()) = tokio::join!(merger.run(Vec::new(), CancellationToken::new()), feed);

    let lines = String::from_utf8(merged.unwrap())
        .unwrap()
        .lines()
        .map(|line| line.rsplit("  ").next().unwrap().to_string())
        .collect();
    (lines, events)
}

/// Past the stale timeout the silent source stops holding back output, with a warning
#[tokio::test]
async fn stale_timeout_flushes_without_the_silent_source() {
    // Act
    let (lines, events) =
        late_source_run(StalePolicy::ForceFlush(Duration::from_millis(50))).await;

    // Assert
    assert_eq!(
        lines,
        vec!["fast 504", "fast 505", "slow 500", "fast 506", "fast 507"]
    );

    let warnings = events.at_level(Level::WARN);
    assert_eq!(warnings.len(), 1, "unexpected warnings: {warnings:?}");
    assert_eq!(warnings[0].field("silent"), Some("slow"));
}

/// Without a timeout the merge waits for the silent source and stays fully ordered
#[tokio::test]
async fn waiting_policy_keeps_global_order() {
    // Act
    let (lines, events) = late_source_run(StalePolicy::Wait).await;

    // Assert
    assert_eq!(
        lines,
        vec!["slow 500", "fast 504", "fast 505", "fast 506", "fast 507"]
    );
    assert!(events.at_level(Level::WARN).is_empty());
}
