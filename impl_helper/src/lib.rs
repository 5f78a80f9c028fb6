use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields};

#[derive(Default)]
struct Helpers {
    get: bool,
    copy: bool,
    set: bool,
}

impl Helpers {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut helpers = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("helper")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("get") {
                    helpers.get = true;
                } else if meta.path.is_ident("copy") {
                    helpers.copy = true;
                } else if meta.path.is_ident("set") {
                    helpers.set = true;
                } else if meta.path.is_ident("all") {
                    helpers.get = true;
                    helpers.set = true;
                } else {
                    return Err(meta.error(format!(
                        "Unexpected expression in macro: {}.
                        Expected one of: get, copy, set or all",
                        meta.path
                            .segments
                            .iter()
                            .map(|segment| segment.ident.to_string())
                            .collect::<Vec<_>>()
                            .join("::")
                    )));
                }

                Ok(())
            })?;

            if helpers.get && helpers.copy {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`get` and `copy` both generate the field getter, pick one",
                ));
            }
        }

        Ok(helpers)
    }
}

/// Generates accessors for named struct fields marked with `#[helper(...)]`.
///
/// * `get` - `fn field(&self) -> &T`
/// * `copy` - `fn field(&self) -> T` for `Copy` fields
/// * `set` - `fn field_set(self, value: T) -> Self`
/// * `all` - `get` and `set`
#[proc_macro_derive(ImplHelper, attributes(helper))]
pub fn impl_helper(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let mut methods = Vec::default();

    if let Data::Struct(data_struct) = input.data {
        if let Fields::Named(fields) = data_struct.fields {
            for field in fields.named.iter() {
                let Some(field_name) = field.ident.as_ref() else {
                    continue;
                };
                let field_type = &field.ty;

                let helpers = match Helpers::parse(&field.attrs) {
                    Ok(helpers) => helpers,
                    Err(e) => return e.to_compile_error().into(),
                };

                if helpers.get {
                    methods.push(quote! {
                        pub fn #field_name(&self) -> &#field_type {
                            &self.#field_name
                        }
                    });
                }

                if helpers.copy {
                    methods.push(quote! {
                        pub fn #field_name(&self) -> #field_type {
                            self.#field_name
                        }
                    });
                }

                if helpers.set {
                    let fn_name =
                        syn::Ident::new(&format!("{}_set", field_name), field_name.span());

                    methods.push(quote! {
                        #[must_use = "method moves the value of self and returns the modified value"]
                        pub fn #fn_name(mut self, value: #field_type) -> Self {
                            self.#field_name = value;
                            self
                        }
                    });
                }
            }
        }
    }

    TokenStream::from(quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#methods)*
        }
    })
}
