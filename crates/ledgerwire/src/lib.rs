//! Schema-driven binary decoding for length-delimited ledger records.
//!
//! One untyped structural decoder does all the wire work: it resolves a
//! [`DecodingPlan`] for a [`TypeDescriptor`] in a [`SchemaRegistry`], reads
//! fields in plan order from a bounds-checked cursor, and produces a
//! [`DecodedValue`] graph or a structural error carrying the failing field
//! path. Typed records sit on top as thin [`WireRecord`] facades.
//!
//! Records can nest other serialized records as opaque byte fields
//! ([`OpaqueBlob`]): the outer decode captures the range without interpreting
//! it, and the caller decodes it on demand with a separately supplied
//! descriptor. This is how a signed transaction carries the exact bytes that
//! were signed while still allowing the inner transaction to be inspected.
//!
//! # Example
//!
//! ```
//! use ledgerwire::{decode_value, DecodingPlan, PrimitiveKind, SchemaRegistry, TypeDescriptor};
//!
//! let mut registry = SchemaRegistry::new();
//! let descriptor = TypeDescriptor::new("t:Greeting");
//! registry
//!     .register(
//!         descriptor.clone(),
//!         DecodingPlan::new().field("field1", PrimitiveKind::Str),
//!     )
//!     .unwrap();
//!
//! let data = [0x01, 0x00, 0x00, 0x00, 0x03, b'a', b'b', b'c'];
//! let value = decode_value(&registry, &descriptor, &data).unwrap();
//! assert_eq!(value.get("field1").unwrap().as_str().unwrap(), "abc");
//! ```

mod blob;
mod decoder;
mod descriptor;
mod dump;
mod encoder;
mod error;
mod facade;
mod registry;
mod schema;
mod value;

pub mod records;

pub use blob::OpaqueBlob;
pub use decoder::{decode_value, Decoder, TRAILING_FIELD};
pub use descriptor::TypeDescriptor;
pub use dump::{dump_bytes, dump_value};
pub use encoder::{encode, EncodeError};
pub use error::{DecodeError, FieldPath, PathSegment};
pub use facade::{dump, parse, strip_magic, WireRecord, MAGIC};
pub use registry::SchemaRegistry;
pub use schema::{DecodingPlan, FieldKind, FieldSpec, PrimitiveKind};
pub use value::{DecodedValue, Scalar};

pub use ledgerwire_buffers::{BufferError, Cursor, Writer};

#[cfg(test)]
mod tests {
    use super::records::*;
    use super::*;
    use proptest::prelude::*;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        register_wire_schemas(&mut registry).unwrap();
        registry
    }

    fn write_public_key(w: &mut Writer, material: &[u8]) {
        w.u8(1);
        w.u32(material.len() as u32);
        w.buf(material);
    }

    /// A magic-prefixed WireTransaction with one input, one command, a
    /// notary name, and a framed time window.
    fn wire_transaction_bytes() -> Vec<u8> {
        let mut w = Writer::new();
        w.buf(&MAGIC);
        w.u8(4);
        // inputs: one StateRef
        w.u32(1);
        w.u8(2);
        w.u32(4);
        w.buf(&[0x11, 0x22, 0x33, 0x44]);
        w.u32(0);
        // commands: one Command with one signer
        w.u32(1);
        w.u8(2);
        w.u32(1);
        write_public_key(&mut w, b"key-1");
        w.u32(3);
        w.buf(b"pay");
        // notary
        w.u32(6);
        w.utf8("Notary");
        // time_window: framed Instant, 1 + 8 + 4 bytes
        w.u32(13);
        w.u8(2);
        w.i64(1_700_000_000);
        w.i32(42);
        w.flush()
    }

    /// A magic-prefixed SignedTransaction whose tx_bits blob holds the full
    /// serialized WireTransaction, magic included.
    fn signed_transaction_bytes() -> Vec<u8> {
        let inner = wire_transaction_bytes();
        let mut w = Writer::new();
        w.buf(&MAGIC);
        w.u8(2);
        w.u32(inner.len() as u32);
        w.buf(&inner);
        // sigs: one DigitalSignature
        w.u32(1);
        w.u8(2);
        w.u32(3);
        w.buf(b"sig");
        write_public_key(&mut w, b"key-1");
        w.flush()
    }

    #[test]
    fn envelope_double_decode() {
        let registry = registry();
        let bytes = signed_transaction_bytes();

        let stx: SignedTransaction = parse(&registry, &bytes).unwrap();
        assert_eq!(stx.sigs.len(), 1);
        assert_eq!(stx.sigs[0].bytes, b"sig");
        assert_eq!(stx.sigs[0].by.encoded, b"key-1");
        assert_eq!(stx.tx_bits.len(), wire_transaction_bytes().len());

        // The captured blob is the exact serialized inner record; decode it
        // independently, without touching the outer buffer again.
        let wtx: WireTransaction = parse(&registry, stx.tx_bits.bytes()).unwrap();
        assert_eq!(
            wtx,
            WireTransaction {
                inputs: vec![StateRef {
                    tx_hash: vec![0x11, 0x22, 0x33, 0x44],
                    index: 0,
                }],
                commands: vec![Command {
                    signers: vec![PublicKey {
                        encoded: b"key-1".to_vec(),
                    }],
                    payload: b"pay".to_vec(),
                }],
                notary: "Notary".to_string(),
                time_window: Instant {
                    epoch_seconds: 1_700_000_000,
                    nanos: 42,
                },
            }
        );
    }

    #[test]
    fn blob_decode_as_uses_its_own_cursor() {
        let registry = registry();
        // Raw Instant record, not magic-prefixed: the engine-level blob API
        // takes bytes exactly as the outer record captured them.
        let mut w = Writer::new();
        w.u8(2);
        w.i64(7);
        w.i32(8);
        let raw = w.flush();
        let blob = OpaqueBlob::new(&raw);
        let value = blob
            .decode_as(&registry, &TypeDescriptor::new(INSTANT))
            .unwrap();
        assert_eq!(value.get("epoch_seconds").unwrap().as_i64().unwrap(), 7);
        assert_eq!(value.get("nanos").unwrap().as_i32().unwrap(), 8);
        // A second decode of the same blob is independent and equal.
        assert_eq!(
            value,
            blob.decode_as(&registry, &TypeDescriptor::new(INSTANT))
                .unwrap()
        );
    }

    #[test]
    fn sigs_preserve_wire_order() {
        let registry = registry();
        let inner = wire_transaction_bytes();
        let mut w = Writer::new();
        w.buf(&MAGIC);
        w.u8(2);
        w.u32(inner.len() as u32);
        w.buf(&inner);
        w.u32(3);
        for label in [b"s-0", b"s-1", b"s-2"] {
            w.u8(2);
            w.u32(3);
            w.buf(label);
            write_public_key(&mut w, b"k");
        }
        let bytes = w.flush();
        let stx: SignedTransaction = parse(&registry, &bytes).unwrap();
        let labels: Vec<&[u8]> = stx.sigs.iter().map(|s| s.bytes.as_slice()).collect();
        assert_eq!(labels, [b"s-0", b"s-1", b"s-2"]);
    }

    #[test]
    fn truncated_transaction_never_parses_partially() {
        let registry = registry();
        let bytes = signed_transaction_bytes();
        for cut in [1, MAGIC.len() + 1, bytes.len() / 2, bytes.len() - 1] {
            let result = parse::<SignedTransaction>(&registry, &bytes[..cut]);
            assert!(
                matches!(
                    result,
                    Err(DecodeError::BadMagic) | Err(DecodeError::TruncatedInput { .. })
                ),
                "cut at {cut}: {result:?}"
            );
        }
    }

    #[test]
    fn dump_of_tx_bits_is_deterministic_and_readable() {
        let registry = registry();
        let bytes = signed_transaction_bytes();
        let stx: SignedTransaction = parse(&registry, &bytes).unwrap();
        let first = dump(stx.tx_bits.bytes());
        let second = dump(stx.tx_bits.bytes());
        assert_eq!(first, second);
        assert!(first.starts_with("00000000  6c 64 67 72 01 00 00 00"));
        assert!(first.contains("|ldgr"));
    }

    #[test]
    fn schema_mismatch_when_type_and_plan_drift() {
        let mut registry = SchemaRegistry::new();
        // Same descriptor, different layout than the typed facade expects.
        registry
            .register(
                TypeDescriptor::new(INSTANT),
                DecodingPlan::new().field("epoch_seconds", PrimitiveKind::I64),
            )
            .unwrap();
        let mut w = Writer::new();
        w.buf(&MAGIC);
        w.u8(1);
        w.i64(5);
        let bytes = w.flush();
        assert!(matches!(
            parse::<Instant>(&registry, &bytes),
            Err(DecodeError::SchemaMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_round_trip_reproduces_value(
            name in "[a-z]{0,12}",
            count in any::<u64>(),
            flags in proptest::collection::vec(any::<bool>(), 0..8),
            payload in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut registry = SchemaRegistry::new();
            let descriptor = TypeDescriptor::new("t:Mixed");
            registry
                .register(
                    descriptor.clone(),
                    DecodingPlan::new()
                        .field("name", PrimitiveKind::Str)
                        .field("count", PrimitiveKind::U64)
                        .field(
                            "flags",
                            FieldKind::sequence(FieldKind::Primitive(PrimitiveKind::Bool)),
                        )
                        .field("payload", FieldKind::Blob),
                )
                .unwrap();
            let value = DecodedValue::Composite {
                descriptor: descriptor.clone(),
                fields: vec![
                    ("name".to_string(), DecodedValue::Scalar(Scalar::Str(name.as_str()))),
                    ("count".to_string(), DecodedValue::Scalar(Scalar::U64(count))),
                    (
                        "flags".to_string(),
                        DecodedValue::Seq(
                            flags
                                .iter()
                                .map(|b| DecodedValue::Scalar(Scalar::Bool(*b)))
                                .collect(),
                        ),
                    ),
                    (
                        "payload".to_string(),
                        DecodedValue::Blob(OpaqueBlob::new(&payload)),
                    ),
                ],
            };
            let bytes = encode(&registry, &descriptor, &value).unwrap();
            let decoded = decode_value(&registry, &descriptor, &bytes).unwrap();
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn prop_short_prefixes_fail_with_truncation(cut in 0usize..8) {
            let registry = registry();
            let mut w = Writer::new();
            w.u8(2);
            w.i64(1);
            w.i32(2);
            let full = w.flush();
            let cut = cut.min(full.len() - 1);
            let result = decode_value(
                &registry,
                &TypeDescriptor::new(INSTANT),
                &full[..cut],
            );
            prop_assert!(
                matches!(result, Err(DecodeError::TruncatedInput { .. })),
                "expected TruncatedInput, got {:?}",
                result
            );
        }
    }
}
