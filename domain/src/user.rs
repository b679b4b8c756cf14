pub use entity_api::user::{
    find_by_email, find_by_id, generate_hash, AuthSession, Backend, Credentials,
};
