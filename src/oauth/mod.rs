pub mod authorize;
pub mod pkce;
pub mod revoke;
pub mod token;

pub use authorize::{build_authorize_url, AuthorizeUrlOptions};
pub use pkce::{generate_pkce, PkceChallenge};
pub use revoke::{revoke_token, token_for, Revocation, RevokedTokens, TokenTypeHint};
pub use token::{exchange_code, refresh_token, AccessTokenOptions, TokenSet};
