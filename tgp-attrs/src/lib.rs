mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use tgp_attrs::ErrorKind;
/// use tgp_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "division by zero", labels = ["this divisor evaluated to zero"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, paired in order with the spans of the error.        |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to a [`String`] (or an array of them for
/// `labels`). For structs with named fields, the expression is evaluated with the members of the
/// struct in scope, so they can be used in the expression (tuple structs are not supported).
///
/// Errors built outside of any source code have no spans; their labels are dropped and the
/// report points at the start of the source.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
