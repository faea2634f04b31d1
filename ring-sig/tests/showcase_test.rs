use ring_sig::errors::RingSigError;
use ring_sig::glue::primitive::HashChoice;
use ring_sig::keypair::{KeyRing, KeyRingDocument, RingParams, TrapdoorKey};
use ring_sig::signature::SignatureValue;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use std::sync::Once;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    });
}

fn build_ring(size: usize, hash: HashChoice) -> Result<KeyRing, RingSigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(size as u64);
    let keys = (0..size)
        .map(|_| TrapdoorKey::generate(&mut rng, 512))
        .collect::<Result<Vec<_>, _>>()?;

    KeyRing::try_with(keys, RingParams::try_with(512, hash)?)
}

#[test]
fn showcase_exported_ring_and_signature() -> Result<(), RingSigError> {
    init_logging();

    let ring = build_ring(5, HashChoice::Sha3_256)?;
    let message = "Вітання від кільцевого підпису".as_bytes();

    let signature = ring.sign(message, 3)?;

    // what a signer would publish: the public ring and the signature
    let ring_json = serde_json::to_string_pretty(&ring.public_view().to_document()?)?;
    let signature_json = serde_json::to_string_pretty(&signature)?;
    dbg!(&signature_json);

    let verifier = KeyRing::try_from(serde_json::from_str::<KeyRingDocument>(&ring_json)?)?;
    let received: SignatureValue = serde_json::from_str(&signature_json)?;

    assert!(verifier.verify(message, &received)?);
    assert!(!verifier.verify(b"another message", &received)?);

    let compact = signature.to_base64()?;
    assert!(verifier.verify(message, &SignatureValue::from_base64(&compact)?)?);

    Ok(())
}

#[test]
fn showcase_concurrent_signers_share_one_ring() -> Result<(), RingSigError> {
    init_logging();

    let ring = build_ring(4, HashChoice::Sha1)?;

    let results: Vec<Result<bool, RingSigError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..ring.size())
            .map(|signer| {
                let ring = &ring;
                scope.spawn(move || {
                    let message = format!("message from member {}", signer);
                    let signature = ring.sign(message.as_bytes(), signer)?;
                    ring.verify(message.as_bytes(), &signature)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("signer thread panicked"))
            .collect()
    });

    for result in results {
        assert!(result?);
    }
    Ok(())
}

#[test]
fn showcase_signature_for_other_ring_size_is_rejected() -> Result<(), RingSigError> {
    init_logging();

    let small = build_ring(3, HashChoice::Sha3_256)?;
    let large = build_ring(4, HashChoice::Sha3_256)?;

    let signature = small.sign(b"hello", 0)?;

    assert!(matches!(
        large.verify(b"hello", &signature),
        Err(RingSigError::MalformedSignature(_))
    ));
    assert!(!large.is_valid(b"hello", &signature));
    Ok(())
}
