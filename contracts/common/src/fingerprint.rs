use soroban_sdk::{xdr::ToXdr, Address, BytesN, Env};

/// Width in bytes of a registry fingerprint.
pub const FINGERPRINT_LEN: usize = 4;

/// Derives the compact registry key for a handler or vault address.
///
/// The key is the first four bytes of `keccak256(xdr(address))`. Short keys
/// can collide; the registry rejects a confirmation whose key is already
/// bound to a different address.
pub fn fingerprint(env: &Env, target: &Address) -> BytesN<4> {
    let digest: BytesN<32> = env.crypto().keccak256(&target.clone().to_xdr(env)).into();
    let bytes = digest.to_array();
    let mut key = [0u8; FINGERPRINT_LEN];
    key.copy_from_slice(&bytes[..FINGERPRINT_LEN]);
    BytesN::from_array(env, &key)
}
