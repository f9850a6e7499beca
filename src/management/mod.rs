mod albums;
mod oauth;
mod token;

pub use albums::AlbumListing;
pub use albums::AlbumService;
pub use oauth::AuthRequired;
pub use oauth::AuthStatus;
pub use oauth::AuthorizationPrompt;
pub use oauth::CallbackSettings;
pub use oauth::OAuthFlow;
pub use token::FileTokenStore;
pub use token::TokenStore;
