//! Procedural macros for capload.
//!
//! - `#[capability]` - exports a function as a capability at link time

use proc_macro::TokenStream;

mod capability;

/// Export a function as a capability of a module.
///
/// The function must have the shape `fn(Args) -> Result<Value, BoxError>`.
/// It stays callable as a plain function; in addition an export record is
/// submitted through `inventory`, so `capload::import::CollectedImporter`
/// finds it under `module` when that module is imported.
///
/// # Arguments
///
/// - `module = "..."` (required): module path the export belongs to
/// - `attribute = "..."`: attribute name, defaults to the function name
///
/// # Example
///
/// ```rust,ignore
/// #[capload::capability(module = "examples.mod")]
/// fn say_hello(_args: Args) -> Result<Value, BoxError> {
///     Ok(Value::from("hi"))
/// }
/// ```
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    capability::capability_impl(attr, item)
}
