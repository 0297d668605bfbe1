pub mod markup;
pub mod percent;

pub use markup::{help_url, html_encode, js_escape};
pub use percent::{decode, encode, encode_token, unescape, CodecError};
