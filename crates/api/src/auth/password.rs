use bcrypt::BcryptError;

pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
        bcrypt::hash(password, cost)
    }

    /// Constant-time comparison against a stored bcrypt hash.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(password, hash)
    }
}
