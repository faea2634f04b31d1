use anyhow::{Context, Result, bail};
use ring_sig::errors::RingSigError;
use ring_sig::glue::primitive::HashChoice;
use ring_sig::keypair::{KeyRing, KeyRingDocument, RingParams};
use ring_sig::signature::SignatureValue;

use std::fs;
use std::path::{Path, PathBuf};

const SELFTEST_MESSAGES: (&str, &str) = ("hello", "world!");

pub fn keygen(count: usize, bits: usize, hash: HashChoice, output: Option<PathBuf>) -> Result<()> {
    let params = RingParams::try_with(bits, hash)?;
    log::info!("generating {} keys of {} bits", count, bits);

    let ring = KeyRing::generate(count, params).context("Failed to generate ring")?;

    let path = output.unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("ring_export_{}.json", timestamp))
    });
    write_ring(&ring, &path)?;

    println!("Wrote ring of {} keys to {}", ring.size(), path.display());
    Ok(())
}

pub fn export_public(ring: &Path, output: &Path) -> Result<()> {
    let ring = load_ring(ring)?;
    write_ring(&ring.public_view(), output)?;

    println!("Wrote public ring to {}", output.display());
    Ok(())
}

pub fn sign(
    ring: &Path,
    index: usize,
    message: &str,
    compact: bool,
    output: Option<&Path>,
) -> Result<()> {
    let ring = load_ring(ring)?;
    let signature = ring
        .sign(message.as_bytes(), index)
        .with_context(|| format!("Failed to sign as ring member {}", index))?;

    let rendered = if compact {
        signature.to_base64()?
    } else {
        serde_json::to_string_pretty(&signature)?
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write signature to {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn verify(ring: &Path, signature: &Path, message: &str) -> Result<bool> {
    let ring = load_ring(ring)?;
    let signature = load_signature(signature)?;

    match ring.verify(message.as_bytes(), &signature) {
        Ok(valid) => Ok(valid),
        Err(RingSigError::MalformedSignature(reason)) => {
            log::warn!("rejecting malformed signature: {}", reason);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Signs two messages at every ring position and checks that each signature
/// verifies for its own message and not for the other one.
pub fn selftest(size: usize, bits: usize) -> Result<bool> {
    let (first, second) = SELFTEST_MESSAGES;
    let mut passed = true;

    for hash in HashChoice::ALL {
        let ring = KeyRing::generate(size, RingParams::try_with(bits, hash)?)
            .context("Failed to generate selftest ring")?;

        for signer in 0..ring.size() {
            let first_signature = ring.sign(first.as_bytes(), signer)?;
            let second_signature = ring.sign(second.as_bytes(), signer)?;

            let ok = ring.verify(first.as_bytes(), &first_signature)?
                && ring.verify(second.as_bytes(), &second_signature)?
                && !ring.verify(first.as_bytes(), &second_signature)?;

            println!("{} signer {}: {}", hash, signer, ok);
            passed &= ok;
        }
    }

    Ok(passed)
}

fn load_ring(path: &Path) -> Result<KeyRing> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ring from {}", path.display()))?;
    let document: KeyRingDocument = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a ring export", path.display()))?;

    Ok(KeyRing::try_from(document)?)
}

fn write_ring(ring: &KeyRing, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&ring.to_document()?)?;
    fs::write(path, json).with_context(|| format!("Failed to write ring to {}", path.display()))
}

fn load_signature(path: &Path) -> Result<SignatureValue> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read signature from {}", path.display()))?;

    if text.trim_start().starts_with('{') {
        return Ok(serde_json::from_str(&text)?);
    }

    match SignatureValue::from_base64(&text) {
        Ok(signature) => Ok(signature),
        Err(e) => bail!("{} is neither JSON nor base64: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selftest_passes_on_small_ring() -> Result<()> {
        assert!(selftest(2, 384)?);
        Ok(())
    }

    #[test]
    fn test_sign_and_verify_through_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ring_path = dir.path().join("ring.json");
        let public_path = dir.path().join("public.json");
        let signature_path = dir.path().join("signature.b64");

        keygen(3, 256, HashChoice::Sha1, Some(ring_path.clone()))?;
        export_public(&ring_path, &public_path)?;
        sign(&ring_path, 2, "hello", true, Some(&signature_path))?;

        assert!(verify(&public_path, &signature_path, "hello")?);
        assert!(!verify(&public_path, &signature_path, "world!")?);
        Ok(())
    }

    #[test]
    fn test_verify_rejects_ring_with_zero_modulus() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let ring_path = dir.path().join("ring.json");
        let signature_path = dir.path().join("signature.json");

        fs::write(
            &ring_path,
            r#"{"params":{"modulus_bits":256,"hash":"sha1"},"keys":[{"modulus":"0","public_exponent":"11"},{"modulus":"ad5","public_exponent":"11"}]}"#,
        )?;
        fs::write(
            &signature_path,
            r#"{"glue_value":"1","responses":["2","3"]}"#,
        )?;

        assert!(verify(&ring_path, &signature_path, "hello").is_err());
        Ok(())
    }
}
