use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use structcopier::{copy, Reflect};

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Event {
  at: NaiveDateTime,
  stamp: DateTime<Utc>,
  epoch: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct EventRow {
  at: String,
  stamp: String,
  epoch: NaiveDateTime,
}

fn kickoff() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2023, 1, 15)
    .and_then(|date| date.and_hms_opt(10, 30, 0))
    .unwrap()
}

#[test]
fn test_timestamps_to_text_and_epoch() {
  let event = Event {
    at: kickoff(),
    stamp: kickoff().and_utc(),
    epoch: 1673778600,
  };
  let mut row = EventRow::default();
  copy(&mut row, &event).unwrap();
  assert_eq!(
    row,
    EventRow {
      at: "2023-01-15 10:30:00".into(),
      stamp: "2023-01-15 10:30:00".into(),
      epoch: kickoff(),
    }
  );
}

#[test]
fn test_text_and_epoch_to_timestamps() {
  let row = EventRow {
    at: "2023-01-15 10:30:00".into(),
    stamp: "2023-01-15 10:30:00".into(),
    epoch: kickoff(),
  };
  let mut event = Event::default();
  copy(&mut event, &row).unwrap();
  assert_eq!(event.at, kickoff());
  assert_eq!(event.stamp, kickoff().and_utc());
  assert_eq!(event.epoch, 1673778600);
}

#[test]
fn test_bad_text_keeps_timestamp() {
  let mut event = Event {
    at: kickoff(),
    ..Event::default()
  };
  let row = EventRow {
    at: "15/01/2023".into(),
    ..EventRow::default()
  };
  copy(&mut event, &row).unwrap();
  assert_eq!(event.at, kickoff());
}

#[test]
fn test_between_timestamp_types() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Stamped {
    at: DateTime<Utc>,
  }

  let mut stamped = Stamped::default();
  copy(&mut stamped, &Event { at: kickoff(), ..Event::default() }).unwrap();
  assert_eq!(stamped.at, kickoff().and_utc());
}

#[test]
fn test_scalars_through_text() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Counter {
    hits: i64,
    misses: String,
    ratio: f64,
  }

  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct CounterRow {
    hits: String,
    misses: u16,
    ratio: String,
  }

  let mut row = CounterRow::default();
  copy(&mut row, &Counter { hits: 42, misses: "7".into(), ratio: 2.75 }).unwrap();
  assert_eq!(row, CounterRow { hits: "42".into(), misses: 7, ratio: "2".into() });

  let mut counter = Counter { hits: 5, ..Counter::default() };
  copy(&mut counter, &CounterRow { hits: "many".into(), misses: 1, ratio: "0.5".into() }).unwrap();
  assert_eq!(counter.hits, 0);
  assert_eq!(counter.misses, "1");
}
