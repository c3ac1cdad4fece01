//! Concrete repository implementations backed by PostgreSQL.

pub mod account;
pub mod card;
pub mod credential;
pub mod note;

pub use account::AccountRepository;
pub use card::CardRepository;
pub use credential::CredentialRepository;
pub use note::NoteRepository;
