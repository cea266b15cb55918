use magic_crypt::MagicCryptTrait;

use crate::Encryptor;

pub const MIN_KEY_LEN: usize = 16;

/// Protects the session file payload at rest.
pub struct MagicEncryptor {
    encryptor: magic_crypt::MagicCrypt256,
}

impl MagicEncryptor {
    pub fn new(key: &str) -> anyhow::Result<Self> {
        if key.len() < MIN_KEY_LEN {
            return Err(anyhow::anyhow!(
                "session key length must be >= {}",
                MIN_KEY_LEN
            ));
        }
        Ok(MagicEncryptor {
            encryptor: magic_crypt::new_magic_crypt!(key, 256),
        })
    }
}

impl Encryptor for MagicEncryptor {
    fn encrypt(&self, data: &str) -> String {
        self.encryptor.encrypt_str_to_base64(data)
    }

    fn decrypt(&self, data: &str) -> anyhow::Result<String> {
        self.encryptor
            .decrypt_base64_to_string(data.trim())
            .map_err(|e| anyhow::anyhow!("can't decrypt session: {}", e))
    }
}
