use structcopier::{copy, copy_with, Options, Reflect};

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[copier(getter = "full_name")]
struct Person {
  first: String,
  last: String,
  age: i32,
}

impl Person {
  fn full_name(&self) -> String {
    format!("{} {}", self.first, self.last)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[copier(setter = "age")]
struct Member {
  first: String,
  full_name: String,
  years: u32,
}

impl Member {
  fn age(&mut self, age: i32) {
    self.years = age.max(0) as u32;
  }
}

fn person() -> Person {
  Person {
    first: "Hao".into(),
    last: "Zhang".into(),
    age: 28,
  }
}

#[test]
fn test_getter_and_setter() {
  let mut member = Member::default();
  copy(&mut member, &person()).unwrap();
  assert_eq!(
    member,
    Member {
      first: "Hao".into(),
      full_name: "Hao Zhang".into(),
      years: 28,
    }
  );
}

#[test]
fn test_setter_type_mismatch() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct Older {
    age: i64,
  }

  let mut member = Member::default();
  copy(&mut member, &Older { age: 80 }).unwrap();
  assert_eq!(member.years, 0);
}

#[test]
fn test_getter_value_goes_through_rule() {
  let options = Options::new().rule(|dst, _, field| {
    field == "full_name"
      && match dst.downcast_mut::<String>() {
        Some(dst) => {
          *dst = "anonymous".into();
          true
        }
        None => false,
      }
  });
  let mut member = Member::default();
  copy_with(&mut member, &person(), &options).unwrap();
  assert_eq!(member.full_name, "anonymous");
}

#[test]
fn test_getter_into_other_type() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  #[copier(getter = "total")]
  struct Cart {
    prices: Vec<i64>,
  }

  impl Cart {
    fn total(&self) -> i64 {
      self.prices.iter().sum()
    }
  }

  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct CartView {
    total: String,
  }

  let mut view = CartView::default();
  copy(&mut view, &Cart { prices: vec![3, 4] }).unwrap();
  assert_eq!(view.total, "7");
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[copier(getter = "label", setter = "score")]
struct Badge {
  name: String,
  points: i32,
}

impl Badge {
  fn label(&self) -> String {
    format!("<{}>", self.name)
  }

  fn score(&mut self, score: i32) {
    self.points = score * 10;
  }
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
struct Holder {
  id: u32,
  #[copier(flatten)]
  badge: Badge,
}

#[test]
fn test_methods_of_flattened_field() {
  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct HolderView {
    id: u32,
    label: String,
  }

  #[derive(Debug, Clone, Default, PartialEq, Reflect)]
  struct ScoreInput {
    score: i32,
  }

  let holder = Holder {
    id: 1,
    badge: Badge {
      name: "a".into(),
      points: 0,
    },
  };
  let mut view = HolderView::default();
  copy(&mut view, &holder).unwrap();
  assert_eq!(view, HolderView { id: 1, label: "<a>".into() });

  let mut holder = Holder::default();
  copy(&mut holder, &ScoreInput { score: 3 }).unwrap();
  assert_eq!(holder.badge.points, 30);
}
