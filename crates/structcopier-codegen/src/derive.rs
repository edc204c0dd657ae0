use crate::attr::{check_tags, nested_items, FieldOpt, StructOpt};
use proc_macro2::TokenStream;
use proc_macro_error::{abort, abort_call_site, ResultExt};
use quote::{quote, ToTokens};
use syn::{parse_quote, Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type};

#[derive(Debug)]
pub struct Derive {
  ident: Ident,
  generics: Generics,
  fields: Vec<StructField>,
  getters: Vec<Ident>,
  setters: Vec<Ident>,
  scan: bool,
}

#[derive(Debug)]
struct StructField {
  ident: Ident,
  ty: Type,
  tags: Vec<(String, String)>,
  skip: bool,
  readonly: bool,
  flatten: bool,
}

impl Derive {
  pub fn from_derive_input(input: &DeriveInput) -> Self {
    let fields = match input.data {
      Data::Struct(ref data) => match data.fields {
        Fields::Named(ref fields) => fields
          .named
          .iter()
          .map(StructField::from_field)
          .collect(),
        _ => abort!(data.fields, "Only support named fields."),
      },
      _ => abort_call_site!("Only support struct."),
    };

    let mut getters = vec![];
    let mut setters = vec![];
    let mut scan = false;
    for item in nested_items(&input.attrs).unwrap_or_abort() {
      match StructOpt::from_nested_meta(&item) {
        Ok(StructOpt::Getter(ident)) => getters.push(ident),
        Ok(StructOpt::Setter(ident)) => setters.push(ident),
        Ok(StructOpt::Scan) => scan = true,
        Err(err) => abort!(item, "{}", err),
      }
    }

    Self {
      ident: input.ident.clone(),
      generics: input.generics.clone(),
      fields,
      getters,
      setters,
      scan,
    }
  }

  // type parameters end up inside `Vec`/`Option` field types
  fn bounded_generics(&self) -> Generics {
    let mut generics = self.generics.clone();
    for param in generics.params.iter_mut() {
      if let GenericParam::Type(ref mut param) = *param {
        param.bounds.push(parse_quote!(::structcopier::Reflect));
        param.bounds.push(parse_quote!(::std::clone::Clone));
        param.bounds.push(parse_quote!(::std::default::Default));
      }
    }
    generics.make_where_clause().predicates.push(parse_quote!(Self: ::std::clone::Clone));
    generics
  }

  fn visible_fields(&self) -> impl Iterator<Item = &StructField> {
    self.fields.iter().filter(|f| !f.skip)
  }

  fn get_reflect_tokens(&self) -> TokenStream {
    let scanner = if self.scan {
      quote! {
        fn as_scanner(&mut self) -> ::std::option::Option<&mut dyn ::structcopier::Scan> {
          ::std::option::Option::Some(self)
        }
      }
    } else {
      quote! {}
    };

    quote! {
      fn type_info() -> ::structcopier::TypeInfo {
        ::structcopier::TypeInfo::structure::<Self>()
      }

      fn reflect_type_info(&self) -> ::structcopier::TypeInfo {
        <Self as ::structcopier::Reflect>::type_info()
      }

      fn as_any(&self) -> &dyn ::structcopier::__private::Any {
        self
      }

      fn as_any_mut(&mut self) -> &mut dyn ::structcopier::__private::Any {
        self
      }

      fn as_reflect(&self) -> &dyn ::structcopier::Reflect {
        self
      }

      fn as_reflect_mut(&mut self) -> &mut dyn ::structcopier::Reflect {
        self
      }

      fn try_set(&mut self, value: &dyn ::structcopier::Reflect) -> bool {
        ::structcopier::__private::try_set_clone(self, value)
      }

      fn as_struct(&self) -> ::std::option::Option<&dyn ::structcopier::Struct> {
        ::std::option::Option::Some(self)
      }

      fn as_struct_mut(&mut self) -> ::std::option::Option<&mut dyn ::structcopier::Struct> {
        ::std::option::Option::Some(self)
      }

      #scanner
    }
  }

  fn get_struct_tokens(&self) -> TokenStream {
    let descriptors: Vec<_> = self.visible_fields().map(StructField::get_descriptor_tokens).collect();

    let direct: Vec<_> = self.visible_fields().filter(|f| !f.flatten).collect();
    let flattened: Vec<_> = self.visible_fields().filter(|f| f.flatten).map(|f| &f.ident).collect();

    let ref_arms = direct.iter().map(|f| {
      let name = f.ident.to_string();
      let ident = &f.ident;
      quote! {
        #name => ::std::option::Option::Some(&self.#ident as &dyn ::structcopier::Reflect)
      }
    });
    let mut_arms = direct.iter().map(|f| {
      let name = f.ident.to_string();
      let ident = &f.ident;
      if f.readonly {
        quote! {
          #name => ::std::option::Option::None
        }
      } else {
        quote! {
          #name => ::std::option::Option::Some(&mut self.#ident as &mut dyn ::structcopier::Reflect)
        }
      }
    });

    let setters = if self.setters.is_empty() && flattened.is_empty() {
      quote! {}
    } else {
      let names = self.setters.iter().map(|ident| ident.to_string());
      let methods = &self.setters;
      quote! {
        fn call_setter(&mut self, name: &str, value: &dyn ::structcopier::Reflect) -> bool {
          match name {
            #(#names => ::structcopier::__private::invoke_setter(self, Self::#methods, value),)*
            _ => {
              #(
                if ::structcopier::__private::flattened_setter(&mut self.#flattened, name, value) {
                  return true;
                }
              )*
              false
            }
          }
        }
      }
    };

    let getters = if self.getters.is_empty() && flattened.is_empty() {
      quote! {}
    } else {
      let names = self.getters.iter().map(|ident| ident.to_string());
      let methods = &self.getters;
      quote! {
        fn call_getter(&self, name: &str) -> ::std::option::Option<::std::boxed::Box<dyn ::structcopier::Reflect>> {
          match name {
            #(#names => ::structcopier::__private::invoke_getter(self, Self::#methods),)*
            _ => {
              #(
                if let ::std::option::Option::Some(value) = ::structcopier::__private::flattened_getter(&self.#flattened, name) {
                  return ::std::option::Option::Some(value);
                }
              )*
              ::std::option::Option::None
            }
          }
        }
      }
    };

    quote! {
      fn fields() -> ::std::vec::Vec<::structcopier::FieldDescriptor> {
        ::std::vec![#(#descriptors),*]
      }

      fn field(&self, name: &str) -> ::std::option::Option<&dyn ::structcopier::Reflect> {
        match name {
          #(#ref_arms,)*
          _ => {
            #(
              if let ::std::option::Option::Some(field) = ::structcopier::__private::flattened_field(&self.#flattened, name) {
                return ::std::option::Option::Some(field);
              }
            )*
            ::std::option::Option::None
          }
        }
      }

      fn field_mut(&mut self, name: &str) -> ::std::option::Option<&mut dyn ::structcopier::Reflect> {
        match name {
          #(#mut_arms,)*
          _ => {
            #(
              if let ::std::option::Option::Some(field) = ::structcopier::__private::flattened_field_mut(&mut self.#flattened, name) {
                return ::std::option::Option::Some(field);
              }
            )*
            ::std::option::Option::None
          }
        }
      }

      #setters
      #getters
    }
  }
}

impl ToTokens for Derive {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ident = &self.ident;
    let generics = self.bounded_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let reflect_items = self.get_reflect_tokens();
    let struct_items = self.get_struct_tokens();

    tokens.extend(quote! {
      impl #impl_generics ::structcopier::Reflect for #ident #ty_generics #where_clause {
        #reflect_items
      }

      impl #impl_generics ::structcopier::Struct for #ident #ty_generics #where_clause {
        #struct_items
      }
    });
  }
}

impl StructField {
  fn from_field(field: &syn::Field) -> Self {
    let ident = match field.ident {
      Some(ref ident) => ident.clone(),
      None => abort!(field, "Only support named fields."),
    };

    let mut this = Self {
      ident,
      ty: field.ty.clone(),
      tags: vec![],
      skip: false,
      readonly: false,
      flatten: false,
    };

    let mut opts = vec![];
    for item in nested_items(&field.attrs).unwrap_or_abort() {
      opts.extend(FieldOpt::from_nested_meta(&item).unwrap_or_else(|err| abort!(item, "{}", err)));
    }
    if let Err(err) = check_tags(&opts) {
      abort!(field, "{}", err);
    }

    for opt in opts {
      match opt {
        FieldOpt::Tag(key, value) => this.tags.push((key, value)),
        FieldOpt::Skip => this.skip = true,
        FieldOpt::Readonly => this.readonly = true,
        FieldOpt::Flatten => this.flatten = true,
      }
    }

    if this.flatten && !this.tags.is_empty() {
      abort!(field, "Flattened fields cannot carry tags.");
    }

    this
  }

  fn get_descriptor_tokens(&self) -> TokenStream {
    let name = self.ident.to_string();
    let ty = &self.ty;
    let mut tokens = quote! {
      ::structcopier::FieldDescriptor::new(#name, <#ty as ::structcopier::Reflect>::type_info)
    };
    if !self.tags.is_empty() {
      let tags = self.tags.iter().map(|(key, value)| quote!((#key, #value)));
      tokens = quote!(#tokens.with_tags(&[#(#tags),*]));
    }
    if self.readonly {
      tokens = quote!(#tokens.readonly());
    }
    if self.flatten {
      tokens = quote!(#tokens.flatten());
    }
    tokens
  }
}

#[test]
fn test_parse_fields() {
  let input: DeriveInput = syn::parse_quote! {
    #[copier(getter = "full_name")]
    struct User {
      #[copier(alias = "Id")]
      id: i64,
      name: String,
      #[copier(skip)]
      cache: Vec<u8>,
      #[copier(flatten)]
      base: Base,
      #[copier(readonly, tag(json = "created"))]
      created_at: String,
    }
  };
  let derive = Derive::from_derive_input(&input);
  let names: Vec<_> = derive.visible_fields().map(|f| f.ident.to_string()).collect();
  assert_eq!(names, vec!["id", "name", "base", "created_at"]);
  assert_eq!(derive.fields[0].tags, vec![("copy".to_string(), "Id".to_string())]);
  assert!(derive.fields[3].flatten);
  assert!(derive.fields[4].readonly);
  assert_eq!(derive.getters.len(), 1);
  assert!(!derive.scan);
}

#[test]
fn test_generated_tokens() {
  let input: DeriveInput = syn::parse_quote! {
    #[copier(setter = "nick")]
    struct Wrapper<T> {
      #[copier(readonly)]
      value: T,
    }
  };
  let tokens = Derive::from_derive_input(&input).into_token_stream().to_string();
  let bound = quote!(T: ::structcopier::Reflect + ::std::clone::Clone + ::std::default::Default).to_string();
  let readonly_arm = quote!("value" => ::std::option::Option::None).to_string();
  let setter_call = quote!(::structcopier::__private::invoke_setter(self, Self::nick, value)).to_string();
  assert!(tokens.contains(&bound));
  assert!(tokens.contains(&readonly_arm));
  assert!(tokens.contains(&setter_call));
  assert!(!tokens.contains("call_getter"));
}

#[test]
fn test_flattened_methods_are_reachable() {
  let input: DeriveInput = syn::parse_quote! {
    struct Outer {
      #[copier(flatten)]
      base: Option<Base>,
    }
  };
  let tokens = Derive::from_derive_input(&input).into_token_stream().to_string();
  let setter = quote!(::structcopier::__private::flattened_setter(&mut self.base, name, value)).to_string();
  let getter = quote!(::structcopier::__private::flattened_getter(&self.base, name)).to_string();
  let field_mut = quote!(::structcopier::__private::flattened_field_mut(&mut self.base, name)).to_string();
  assert!(tokens.contains(&setter));
  assert!(tokens.contains(&getter));
  assert!(tokens.contains(&field_mut));
}
