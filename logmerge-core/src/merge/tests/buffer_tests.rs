use crate::merge::MergeBuffer;
use crate::merge::tests::test_helpers::{record, texts};
use pretty_assertions::assert_eq;

#[test]
fn keeps_records_sorted_by_timestamp() {
    // Arrange
    let mut buffer = MergeBuffer::new();

    // Act
    for (ts, text) in [(30, "c"), (10, "a"), (20, "b"), (40, "d"), (5, "z")] {
        buffer.insert(record(0, ts, text));
    }

    // Assert
    assert_eq!(texts(buffer.iter()), vec!["z", "a", "b", "c", "d"]);
}

#[test]
fn equal_timestamps_keep_arrival_order() {
    // Arrange
    let mut buffer = MergeBuffer::new();

    // Act
    buffer.insert(record(0, 506, "line2"));
    buffer.insert(record(0, 506, "line3"));
    buffer.insert(record(0, 504, "line1"));
    buffer.insert(record(0, 504, "line1.5"));
    buffer.insert(record(0, 507, "line4"));

    // Assert
    assert_eq!(
        texts(buffer.iter()),
        vec!["line1", "line1.5", "line2", "line3", "line4"]
    );
}

#[test]
fn equal_timestamp_after_rewind_lands_behind_earlier_arrivals() {
    // Arrange
    let mut buffer = MergeBuffer::new();
    buffer.insert(record(0, 5, "first"));
    buffer.insert(record(1, 5, "second"));
    buffer.insert(record(0, 9, "late"));

    // Act
    buffer.insert(record(2, 5, "third"));

    // Assert
    assert_eq!(texts(buffer.iter()), vec!["first", "second", "third", "late"]);
}

#[test]
fn flush_before_removes_only_older_records() {
    // Arrange
    let mut buffer = MergeBuffer::new();
    for ts in [1, 2, 3, 4] {
        buffer.insert(record(0, ts, &ts.to_string()));
    }

    // Act
    let flushed: Vec<_> = buffer.flush_before(3).collect();

    // Assert
    assert_eq!(texts(flushed.iter()), vec!["1", "2"]);
    assert_eq!(texts(buffer.iter()), vec!["3", "4"]);
}

#[test]
fn flush_below_everything_is_a_no_op() {
    // Arrange
    let mut buffer = MergeBuffer::new();
    buffer.insert(record(0, 10, "x"));

    // Act
    let flushed = buffer.flush_before(10).count();

    // Assert
    assert_eq!(flushed, 0);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn inserts_after_a_flush_stay_sorted() {
    // Arrange
    let mut buffer = MergeBuffer::new();
    for ts in [1, 2, 3, 8] {
        buffer.insert(record(0, ts, &ts.to_string()));
    }
    buffer.insert(record(0, 5, "5"));
    buffer.flush_before(6).for_each(drop);

    // Act
    buffer.insert(record(0, 7, "7"));
    buffer.insert(record(0, 9, "9"));
    buffer.insert(record(0, 6, "6"));

    // Assert
    assert_eq!(texts(buffer.iter()), vec!["6", "7", "8", "9"]);
}

#[test]
fn drain_all_empties_the_buffer() {
    // Arrange
    let mut buffer = MergeBuffer::new();
    buffer.insert(record(0, 2, "b"));
    buffer.insert(record(0, 1, "a"));

    // Act
    let drained: Vec<_> = buffer.drain_all().collect();
    buffer.insert(record(0, 3, "c"));

    // Assert
    assert_eq!(texts(drained.iter()), vec!["a", "b"]);
    assert_eq!(texts(buffer.iter()), vec!["c"]);
}
