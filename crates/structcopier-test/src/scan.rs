use structcopier::{copy, Nullable, Reflect, Scan, ScanError};

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Contact {
  email: Option<String>,
  phone: Option<i64>,
  nick: String,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct ContactRow {
  email: Nullable<String>,
  phone: Nullable<i64>,
  nick: Nullable<String>,
}

#[test]
fn test_scan_into_nullable() {
  let contact = Contact {
    email: Some("faker@t1.gg".into()),
    phone: None,
    nick: "faker".into(),
  };
  let mut row = ContactRow {
    phone: Nullable::new(1),
    ..ContactRow::default()
  };
  copy(&mut row, &contact).unwrap();
  assert_eq!(row.email, Nullable::new("faker@t1.gg".to_string()));
  assert_eq!(row.phone.get(), None);
  assert_eq!(row.nick.get().map(String::as_str), Some("faker"));
}

#[test]
fn test_read_from_nullable() {
  let row = ContactRow {
    email: Nullable::new("bin@blg.gg".into()),
    phone: Nullable::new(13800000000),
    nick: Nullable::default(),
  };
  let mut contact = Contact {
    nick: "kept".into(),
    ..Contact::default()
  };
  copy(&mut contact, &row).unwrap();
  assert_eq!(contact.email.as_deref(), Some("bin@blg.gg"));
  assert_eq!(contact.phone, Some(13800000000));
  assert_eq!(contact.nick, "kept");
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[copier(scan)]
struct Tags {
  items: Vec<String>,
}

impl Scan for Tags {
  fn scan(&mut self, value: &dyn Reflect) -> Result<(), ScanError> {
    match value.downcast_ref::<String>() {
      Some(text) => {
        self.items = text
          .split(',')
          .map(str::trim)
          .filter(|item| !item.is_empty())
          .map(String::from)
          .collect();
        Ok(())
      }
      None => Err(ScanError::new(value, "Tags")),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Post {
  title: String,
  tags: Tags,
}

#[test]
fn test_custom_scanner() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct PostRow {
    title: String,
    tags: String,
  }

  let mut post = Post::default();
  copy(&mut post, &PostRow { title: "patch".into(), tags: "rust, reflect,".into() }).unwrap();
  assert_eq!(post.title, "patch");
  assert_eq!(post.tags.items, vec!["rust", "reflect"]);
}

#[test]
fn test_custom_scanner_rejects() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct PostRow {
    tags: i64,
  }

  let mut post = Post {
    tags: Tags { items: vec!["old".into()] },
    ..Post::default()
  };
  copy(&mut post, &PostRow { tags: 3 }).unwrap();
  assert_eq!(post.tags.items, vec!["old"]);
}

#[test]
fn test_scanner_struct_still_copies_fields() {
  let mut post = Post::default();
  let tags = Tags { items: vec!["a".into()] };
  copy(&mut post.tags, &tags).unwrap();
  assert_eq!(post.tags, tags);
}
