// Credential issuing/verification and the request extractor built on it.
// Account registration and password handling live outside this service.

pub mod credentials;
pub mod extractor;

pub use credentials::CredentialIssuer;
pub use extractor::AuthUser;
