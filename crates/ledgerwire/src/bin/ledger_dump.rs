//! Diagnostic driver: parse a signed transaction file, dump the transaction
//! bytes it signs, then decode those bytes as the inner transaction.

use std::env;
use std::fs;
use std::process::ExitCode;

use ledgerwire::records::{register_wire_schemas, SignedTransaction, WireTransaction};
use ledgerwire::{
    dump, dump_value, parse, strip_magic, Cursor, Decoder, SchemaRegistry, WireRecord,
};

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: ledger-dump <signed-transaction-file>");
        return ExitCode::from(2);
    };
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ledger-dump: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let mut registry = SchemaRegistry::new();
    register_wire_schemas(&mut registry)?;

    let stx: SignedTransaction = parse(&registry, &bytes)?;
    println!("{}", dump(stx.tx_bits.bytes()));

    let body = strip_magic(stx.tx_bits.bytes())?;
    let mut cursor = Cursor::new(body);
    let value = Decoder::new(&registry).decode(&WireTransaction::descriptor(), &mut cursor)?;
    println!("{}", dump_value(&value));
    let _wtx = WireTransaction::from_value(&value)?;
    Ok(())
}
