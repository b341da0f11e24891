pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessTokenClaims;
pub use codec::TokenCodec;
pub use errors::TokenError;
