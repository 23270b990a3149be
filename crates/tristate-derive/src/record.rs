//! Record derive implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::Result, parse_macro_input, Data, DeriveInput, Error, Fields, Index, LitStr, Member,
    Visibility,
};

/// Main implementation function for the Record derive
pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// What the derive needs to know about one field
struct FieldInfo {
    member: Member,
    name: String,
    visible: bool,
    tag: String,
    type_name: String,
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Record)] can only be applied to structs",
            ))
        }
    };

    let fields = collect_fields(&data.fields)?;
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut where_clause = where_clause.cloned().unwrap_or_else(|| syn::parse_quote!(where));
    if input.generics.type_params().next().is_some() {
        for ty in visible_types(&data.fields) {
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: ::tristate_validation::Validatable));
        }
    }

    let entries = fields.iter().map(field_entry);
    let type_name = ident.to_string();

    Ok(quote! {
        impl #impl_generics ::tristate_validation::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::tristate_validation::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::tristate_validation::Validatable for #ident #ty_generics #where_clause {
            fn field_value(&self) -> ::tristate_validation::FieldValue<'_> {
                ::tristate_validation::FieldValue::Record(self)
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> Result<Vec<FieldInfo>> {
    let mut collected = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        let mut tag = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("valid")) {
            if tag.is_some() {
                return Err(Error::new_spanned(attr, "duplicate #[valid] attribute"));
            }
            let spec: LitStr = attr.parse_args().map_err(|_| {
                Error::new_spanned(attr, "expected a rule string, e.g. #[valid(\"required\")]")
            })?;
            tag = Some(spec.value());
        }

        collected.push(FieldInfo {
            member,
            name,
            visible: matches!(field.vis, Visibility::Public(_)),
            tag: tag.unwrap_or_default(),
            type_name: field.ty.to_token_stream().to_string().replace(' ', ""),
        });
    }

    Ok(collected)
}

fn visible_types(fields: &Fields) -> impl Iterator<Item = &syn::Type> {
    fields
        .iter()
        .filter(|field| matches!(field.vis, Visibility::Public(_)))
        .map(|field| &field.ty)
}

fn field_entry(field: &FieldInfo) -> TokenStream2 {
    let FieldInfo {
        member,
        name,
        visible,
        tag,
        type_name,
    } = field;

    // Hidden fields are listed without being read, so their types need no bound.
    let value = if *visible {
        quote! { ::tristate_validation::Validatable::field_value(&self.#member) }
    } else {
        quote! { ::tristate_validation::FieldValue::Unsupported(#type_name) }
    };

    quote! {
        ::tristate_validation::Field::new(#name, #visible, #tag, #value)
    }
}
