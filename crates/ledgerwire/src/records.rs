//! Standard ledger record types and their decoding plans.
//!
//! These are the concrete records the diagnostic tooling works with. A
//! signed transaction wraps the serialized transaction it signs as an opaque
//! blob (`tx_bits`), so verifying tooling can hash and inspect the exact
//! bytes before deciding to decode them as a [`WireTransaction`].

use crate::blob::OpaqueBlob;
use crate::descriptor::TypeDescriptor;
use crate::error::DecodeError;
use crate::facade::WireRecord;
use crate::registry::SchemaRegistry;
use crate::schema::{DecodingPlan, FieldKind, PrimitiveKind};
use crate::value::DecodedValue;

pub const PUBLIC_KEY: &str = "ledgerwire:PublicKey";
pub const INSTANT: &str = "ledgerwire:Instant";
pub const DIGITAL_SIGNATURE: &str = "ledgerwire:DigitalSignature";
pub const STATE_REF: &str = "ledgerwire:StateRef";
pub const COMMAND: &str = "ledgerwire:Command";
pub const WIRE_TRANSACTION: &str = "ledgerwire:WireTransaction";
pub const SIGNED_TRANSACTION: &str = "ledgerwire:SignedTransaction";

/// Registers the decoding plans for all standard ledger records.
///
/// Call once while the registry is still exclusively owned; idempotent.
pub fn register_wire_schemas(registry: &mut SchemaRegistry) -> Result<(), DecodeError> {
    registry.register(
        TypeDescriptor::new(PUBLIC_KEY),
        DecodingPlan::new().field("encoded", PrimitiveKind::Bytes),
    )?;
    registry.register(
        TypeDescriptor::new(INSTANT),
        DecodingPlan::new()
            .field("epoch_seconds", PrimitiveKind::I64)
            .field("nanos", PrimitiveKind::I32),
    )?;
    registry.register(
        TypeDescriptor::new(DIGITAL_SIGNATURE),
        DecodingPlan::new()
            .field("bytes", PrimitiveKind::Bytes)
            .field("by", FieldKind::composite(PUBLIC_KEY)),
    )?;
    registry.register(
        TypeDescriptor::new(STATE_REF),
        DecodingPlan::new()
            .field("tx_hash", PrimitiveKind::Bytes)
            .field("index", PrimitiveKind::U32),
    )?;
    registry.register(
        TypeDescriptor::new(COMMAND),
        DecodingPlan::new()
            .field("signers", FieldKind::sequence(FieldKind::composite(PUBLIC_KEY)))
            .field("payload", PrimitiveKind::Bytes),
    )?;
    registry.register(
        TypeDescriptor::new(WIRE_TRANSACTION),
        DecodingPlan::new()
            .field("inputs", FieldKind::sequence(FieldKind::composite(STATE_REF)))
            .field("commands", FieldKind::sequence(FieldKind::composite(COMMAND)))
            .field("notary", PrimitiveKind::Str)
            .field("time_window", FieldKind::framed_composite(INSTANT)),
    )?;
    registry.register(
        TypeDescriptor::new(SIGNED_TRANSACTION),
        DecodingPlan::new()
            .field("tx_bits", FieldKind::Blob)
            .field("sigs", FieldKind::sequence(FieldKind::composite(DIGITAL_SIGNATURE))),
    )?;
    Ok(())
}

/// An encoded public key, kept as opaque key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub encoded: Vec<u8>,
}

impl<'a> WireRecord<'a> for PublicKey {
    const DESCRIPTOR: &'static str = PUBLIC_KEY;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        Ok(PublicKey {
            encoded: value.get("encoded")?.as_bytes()?.to_vec(),
        })
    }
}

/// A point in time as seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    pub epoch_seconds: i64,
    pub nanos: i32,
}

impl<'a> WireRecord<'a> for Instant {
    const DESCRIPTOR: &'static str = INSTANT;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        Ok(Instant {
            epoch_seconds: value.get("epoch_seconds")?.as_i64()?,
            nanos: value.get("nanos")?.as_i32()?,
        })
    }
}

/// A signature over a transaction's `tx_bits`, and the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalSignature {
    pub bytes: Vec<u8>,
    pub by: PublicKey,
}

impl<'a> WireRecord<'a> for DigitalSignature {
    const DESCRIPTOR: &'static str = DIGITAL_SIGNATURE;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        Ok(DigitalSignature {
            bytes: value.get("bytes")?.as_bytes()?.to_vec(),
            by: PublicKey::from_value(value.get("by")?)?,
        })
    }
}

/// A reference to an output of a previous transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRef {
    pub tx_hash: Vec<u8>,
    pub index: u32,
}

impl<'a> WireRecord<'a> for StateRef {
    const DESCRIPTOR: &'static str = STATE_REF;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        Ok(StateRef {
            tx_hash: value.get("tx_hash")?.as_bytes()?.to_vec(),
            index: value.get("index")?.as_u32()?,
        })
    }
}

/// An instruction to the ledger, with the keys required to sign for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub signers: Vec<PublicKey>,
    pub payload: Vec<u8>,
}

impl<'a> WireRecord<'a> for Command {
    const DESCRIPTOR: &'static str = COMMAND;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        let signers = value
            .get("signers")?
            .as_seq()?
            .iter()
            .map(PublicKey::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Command {
            signers,
            payload: value.get("payload")?.as_bytes()?.to_vec(),
        })
    }
}

/// The transaction content that gets signed.
#[derive(Debug, Clone, PartialEq)]
pub struct WireTransaction {
    pub inputs: Vec<StateRef>,
    pub commands: Vec<Command>,
    pub notary: String,
    pub time_window: Instant,
}

impl<'a> WireRecord<'a> for WireTransaction {
    const DESCRIPTOR: &'static str = WIRE_TRANSACTION;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        let inputs = value
            .get("inputs")?
            .as_seq()?
            .iter()
            .map(StateRef::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        let commands = value
            .get("commands")?
            .as_seq()?
            .iter()
            .map(Command::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WireTransaction {
            inputs,
            commands,
            notary: value.get("notary")?.as_str()?.to_string(),
            time_window: Instant::from_value(value.get("time_window")?)?,
        })
    }
}

/// A serialized transaction plus the signatures over it.
///
/// `tx_bits` borrows the exact signed bytes from the input buffer. The blob
/// holds a complete magic-prefixed [`WireTransaction`] record; decode it with
/// [`crate::parse`] or [`OpaqueBlob::decode_as`] in a second step.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction<'a> {
    pub tx_bits: OpaqueBlob<'a>,
    pub sigs: Vec<DigitalSignature>,
}

impl<'a> WireRecord<'a> for SignedTransaction<'a> {
    const DESCRIPTOR: &'static str = SIGNED_TRANSACTION;

    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
        let sigs = value
            .get("sigs")?
            .as_seq()?
            .iter()
            .map(DigitalSignature::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SignedTransaction {
            tx_bits: value.get("tx_bits")?.as_blob()?,
            sigs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_is_idempotent() {
        let mut registry = SchemaRegistry::new();
        register_wire_schemas(&mut registry).unwrap();
        register_wire_schemas(&mut registry).unwrap();
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_all_descriptors_resolve() {
        let mut registry = SchemaRegistry::new();
        register_wire_schemas(&mut registry).unwrap();
        for name in [
            PUBLIC_KEY,
            INSTANT,
            DIGITAL_SIGNATURE,
            STATE_REF,
            COMMAND,
            WIRE_TRANSACTION,
            SIGNED_TRANSACTION,
        ] {
            assert!(registry.resolve(&TypeDescriptor::new(name)).is_ok(), "{name}");
        }
    }
}
