// Session identifier generation

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Identifier length; 32 alphanumerics carry about 190 bits of entropy.
pub const SESSION_ID_LEN: usize = 32;

/// Unguessable session token drawn from the OS CSPRNG.
pub fn generate_session_id() -> String {
    OsRng.sample_iter(&Alphanumeric).take(SESSION_ID_LEN).map(char::from).collect()
}
