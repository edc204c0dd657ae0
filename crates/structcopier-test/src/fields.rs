use std::collections::HashMap;
use structcopier::{copy, copy_with, deep_fields, Options, Reflect};

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Audit {
  created_by: String,
  version: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Document {
  title: String,
  #[copier(flatten)]
  audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct DocumentView {
  title: String,
  created_by: String,
  version: i64,
}

#[test]
fn test_flatten_fields_order() {
  let names: Vec<_> = deep_fields(<Document as Reflect>::type_info())
    .iter()
    .map(|f| f.name())
    .collect();
  assert_eq!(names, vec!["title", "created_by", "version"]);
}

#[test]
fn test_copy_from_flattened() {
  let doc = Document {
    title: "handbook".into(),
    audit: Audit {
      created_by: "ming".into(),
      version: 3,
    },
  };
  let mut view = DocumentView::default();
  copy(&mut view, &doc).unwrap();
  assert_eq!(
    view,
    DocumentView {
      title: "handbook".into(),
      created_by: "ming".into(),
      version: 3,
    }
  );
}

#[test]
fn test_copy_into_flattened() {
  let view = DocumentView {
    title: "draft".into(),
    created_by: "uzi".into(),
    version: 9,
  };
  let mut doc = Document::default();
  copy(&mut doc, &view).unwrap();
  assert_eq!(doc.title, "draft");
  assert_eq!(doc.audit, Audit { created_by: "uzi".into(), version: 9 });
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Account {
  id: i64,
  #[copier(readonly)]
  balance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct AccountRow {
  id: i64,
  balance: i64,
}

#[test]
fn test_readonly_field() {
  let mut account = Account { id: 0, balance: 100 };
  copy(&mut account, &AccountRow { id: 1, balance: 5 }).unwrap();
  assert_eq!(account, Account { id: 1, balance: 100 });

  let mut row = AccountRow::default();
  copy(&mut row, &account).unwrap();
  assert_eq!(row, AccountRow { id: 1, balance: 100 });
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Session {
  id: u32,
  #[copier(skip)]
  token: String,
  #[copier(skip)]
  headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct SessionView {
  id: u32,
  token: String,
}

#[test]
fn test_skipped_field() {
  let session = Session {
    id: 4,
    token: "secret".into(),
    headers: HashMap::new(),
  };
  let mut view = SessionView::default();
  copy(&mut view, &session).unwrap();
  assert_eq!(view, SessionView { id: 4, token: String::new() });

  let mut session = Session::default();
  copy(&mut session, &SessionView { id: 5, token: "x".into() }).unwrap();
  assert_eq!(session.id, 5);
  assert!(session.token.is_empty());
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Item {
  #[copier(tag(json = "label"))]
  name: String,
  price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct ItemView {
  label: String,
  price: f32,
}

#[test]
fn test_custom_tag_key() {
  let item = Item {
    name: "pen".into(),
    price: 1.5,
  };

  let mut view = ItemView::default();
  copy(&mut view, &item).unwrap();
  assert_eq!(view, ItemView { label: String::new(), price: 1.5 });

  let mut view = ItemView::default();
  copy_with(&mut view, &item, &Options::new().tag_key("json")).unwrap();
  assert_eq!(view, ItemView { label: "pen".into(), price: 1.5 });
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Pair {
  a: i32,
  #[copier(alias = "a")]
  b: String,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct PairView {
  a: i64,
}

#[test]
fn test_alias_wins_over_name() {
  let mut view = PairView::default();
  copy(&mut view, &Pair { a: 1, b: "5".into() }).unwrap();
  assert_eq!(view.a, 5);
}

#[test]
fn test_alias_to_missing_field() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Source {
    #[copier(alias = "nowhere")]
    value: i32,
  }

  let mut view = PairView::default();
  copy(&mut view, &Source { value: 3 }).unwrap();
  assert_eq!(view, PairView::default());
}

#[test]
fn test_destination_alias_over_colliding_name() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Source {
    a: i64,
    b: String,
  }

  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Target {
    #[copier(alias = "b")]
    a: i32,
  }

  let mut target = Target::default();
  copy(&mut target, &Source { a: 1, b: "9".into() }).unwrap();
  assert_eq!(target.a, 9);
}

#[test]
fn test_readonly_descriptor() {
  let readonly: Vec<_> = deep_fields(<Account as Reflect>::type_info())
    .iter()
    .filter(|f| f.is_readonly())
    .map(|f| f.name())
    .collect();
  assert_eq!(readonly, vec!["balance"]);
}

#[test]
fn test_readonly_field_ignores_getter() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  #[copier(getter = "balance")]
  struct Ledger {
    id: i64,
  }

  impl Ledger {
    fn balance(&self) -> i64 {
      self.id * 100
    }
  }

  let mut account = Account { id: 0, balance: 7 };
  copy(&mut account, &Ledger { id: 2 }).unwrap();
  assert_eq!(account, Account { id: 2, balance: 7 });
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Revision {
  number: u32,
  #[copier(flatten)]
  audit: Option<Audit>,
}

#[test]
fn test_flattened_option() {
  let mut revision = Revision::default();
  copy(
    &mut revision,
    &DocumentView {
      title: "ignored".into(),
      created_by: "uzi".into(),
      version: 2,
    },
  )
  .unwrap();
  assert_eq!(revision.audit, Some(Audit { created_by: "uzi".into(), version: 2 }));

  let mut view = DocumentView::default();
  copy(&mut view, &Revision { number: 1, audit: None }).unwrap();
  assert_eq!(view, DocumentView::default());

  let names: Vec<_> = deep_fields(<Revision as Reflect>::type_info())
    .iter()
    .map(|f| f.name())
    .collect();
  assert_eq!(names, vec!["number", "created_by", "version"]);
}
