use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    ext::IdentExt, parse2, spanned::Spanned, Data, DeriveInput, Error, ExprPath, Field, Fields,
    Ident, LitStr, Meta, Result,
};

use crate::syn_utils::find_attr;

pub fn derive_stateful(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let Data::Struct(data) = &input.data else {
        bail!(input.ident.span(), "`Stateful` can only be derived for structs");
    };
    let Fields::Named(fields) = &data.fields else {
        bail!(input.ident.span(), "`Stateful` requires a struct with named fields");
    };

    let mut state_field = None;
    let mut properties = Vec::new();
    for field in &fields.named {
        if let Some(attr) = find_attr(&field.attrs, "state") {
            if state_field.is_some() {
                return Err(Error::new_spanned(
                    attr,
                    "only one field can be marked `#[state]`",
                ));
            }
            state_field = field.ident.clone();
        }
        if let Some(attr) = find_attr(&field.attrs, "property") {
            properties.push(PropertyArgs::parse(field, &attr.meta)?);
        }
    }
    let Some(state_field) = state_field else {
        bail!(
            Span::call_site(),
            "`Stateful` requires a field of type `State` marked `#[state]`"
        );
    };

    let ident = &input.ident;
    let vis = &input.vis;
    let (impl_g, type_g, where_clause) = input.generics.split_for_impl();
    let accessors = properties
        .iter()
        .map(|p| p.accessors(vis, &state_field));
    Ok(quote! {
        impl #impl_g ::statemut::Stateful for #ident #type_g #where_clause {
            fn state(&self) -> &::statemut::State {
                &self.#state_field
            }
        }
        impl #impl_g #ident #type_g #where_clause {
            #(#accessors)*
        }
    })
}

struct PropertyArgs<'a> {
    field: &'a Field,
    ident: &'a Ident,
    name: LitStr,
    get: Option<ExprPath>,
    set: Option<ExprPath>,
}

impl<'a> PropertyArgs<'a> {
    fn parse(field: &'a Field, meta: &Meta) -> Result<Self> {
        let Some(ident) = &field.ident else {
            bail!(field.span(), "`#[property]` requires a named field");
        };
        let mut this = Self {
            field,
            ident,
            name: LitStr::new(&ident.unraw().to_string(), ident.span()),
            get: None,
            set: None,
        };
        match meta {
            Meta::Path(_) => {}
            Meta::List(list) => list.parse_nested_meta(|meta| {
                if meta.path.is_ident("get") {
                    this.get = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("set") {
                    this.set = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("name") {
                    this.name = meta.value()?.parse()?;
                } else {
                    return Err(meta.error("expected `get`, `set` or `name`"));
                }
                Ok(())
            })?,
            Meta::NameValue(_) => {
                return Err(Error::new_spanned(
                    meta,
                    "expected `#[property]` or `#[property(...)]`",
                ));
            }
        }
        Ok(this)
    }

    fn accessors(&self, vis: &syn::Visibility, state_field: &Ident) -> TokenStream {
        let ident = self.ident;
        let ty = &self.field.ty;
        let name = &self.name;
        let setter = format_ident!("set_{}", ident.unraw(), span = ident.span());
        let record = quote! {
            ::statemut::State::record_read(
                &self.#state_field,
                ::core::option::Option::Some(#name),
            );
        };
        let dispatch = quote! {
            ::statemut::State::dispatch_state_event(
                &self.#state_field,
                ::core::option::Option::Some(#name),
            );
        };
        let get = if let Some(get) = &self.get {
            quote! {
                #vis fn #ident(&self) -> #ty {
                    #record
                    #get(self)
                }
            }
        } else {
            quote! {
                #vis fn #ident(&self) -> &#ty {
                    #record
                    &self.#ident
                }
            }
        };
        let store = if let Some(set) = &self.set {
            quote!(#set(self, value);)
        } else {
            quote!(self.#ident = value;)
        };
        quote! {
            #get
            #vis fn #setter(&mut self, value: #ty) {
                #store
                #dispatch
            }
        }
    }
}
