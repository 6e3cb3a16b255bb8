use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::{Expr, Ident, ItemStruct, Token};

struct Args {
    path: Expr,
    title: Option<Expr>,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> Result<Self> {
        let path = input.parse()?;
        let mut title = None;

        while input.parse::<Option<Token![,]>>()?.is_some() {
            if input.is_empty() {
                break;
            }

            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;

            match key.to_string().as_str() {
                "title" if title.is_none() => title = Some(value),
                "title" => return Err(syn::Error::new(key.span(), "`title` is set more than once")),
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown argument `{}`, expected `title`", key),
                    ));
                }
            }
        }

        Ok(Args { path, title })
    }
}

/// Binds a view to a path, e.g. `#[route("/projects", title = "matsu.fi - Projects")]`.
#[proc_macro_attribute]
pub fn route(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let item_struct = syn::parse_macro_input!(item as ItemStruct);
    let attrs = syn::parse_macro_input!(attrs as Args);

    let struct_name = &item_struct.ident;
    let (impl_generics, ty_generics, where_clause) = item_struct.generics.split_for_impl();
    let path = &attrs.path;

    let title = attrs.title.map(|title| {
        quote! {
            fn title(&self) -> Option<String> {
                Some(#title.to_string())
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics matsu::route::InternalRoute for #struct_name #ty_generics #where_clause {
            fn route_raw(&self) -> String {
                #path.to_string()
            }

            #title
        }

        #item_struct
    };

    TokenStream::from(expanded)
}
