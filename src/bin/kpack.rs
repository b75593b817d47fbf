//! kpack CLI — decode/encode Kafka wire buffers from the command line.
//!
//! Buffers travel as hex on the command line or as raw bytes on stdin
//! (`-`); decoded value trees are printed as JSON.

use clap::{Args, Parser, Subcommand};
use kpack::format::{self, Primitive, Token};
use kpack::{decode, decode_varint, encode, encode_varint, Value};
use std::io::Read;
use std::process;

#[derive(Parser)]
#[command(name = "kpack", about = "Kafka wire-format codec (struct-style format strings)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a buffer to a JSON value tree
    Decode(DecodeArgs),
    /// Encode a JSON argument list to hex
    Encode(EncodeArgs),
    /// Varint helpers
    Varint {
        #[command(subcommand)]
        command: VarintCommand,
    },
}

#[derive(Subcommand)]
enum VarintCommand {
    /// Encode a non-negative integer as a varint (hex output)
    Encode { value: u64 },
    /// Decode one varint from the front of a hex buffer
    Decode { hex: String },
}

#[derive(Args)]
struct DecodeArgs {
    /// Format string, e.g. "[iSi]" or "iVi"
    format: String,

    /// Buffer as hex (- to read raw bytes from stdin)
    input: String,

    /// Offset to start decoding at
    #[arg(short, long, default_value_t = 0)]
    offset: usize,
}

#[derive(Args)]
struct EncodeArgs {
    /// Format string (fixed-width and V tokens only)
    format: String,

    /// Arguments as a JSON array, e.g. '[1, 300, 2]'
    args: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(msg) = run(cli.command) {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Decode(args) => {
            let buff = read_buffer(&args.input)?;
            let values = decode(&args.format, &buff, args.offset).map_err(|e| e.to_string())?;
            let json: Vec<serde_json::Value> = values.iter().map(value_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?);
        }
        Command::Encode(args) => {
            let tokens = format::parse(&args.format).map_err(|e| e.to_string())?;
            let json: Vec<serde_json::Value> =
                serde_json::from_str(&args.args).map_err(|e| format!("bad JSON args: {e}"))?;
            let values = json_to_args(&tokens, &json)?;
            // Worst case: 10 bytes per varint, 8 per fixed-width token.
            let mut buff = vec![0u8; tokens.len() * 10];
            let written =
                encode(&args.format, &mut buff, 0, &values).map_err(|e| e.to_string())?;
            println!("{}", to_hex(&buff[..written]));
        }
        Command::Varint { command } => match command {
            VarintCommand::Encode { value } => {
                let mut buff = [0u8; 10];
                let written = encode_varint(&mut buff, 0, value).map_err(|e| e.to_string())?;
                println!("{}", to_hex(&buff[..written]));
            }
            VarintCommand::Decode { hex } => {
                let buff = from_hex(&hex)?;
                let (size, value) = decode_varint(&buff, 0).map_err(|e| e.to_string())?;
                println!("{value} ({size} byte(s))");
            }
        },
    }
    Ok(())
}

fn read_buffer(input: &str) -> Result<Vec<u8>, String> {
    if input == "-" {
        let mut buff = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buff)
            .map_err(|e| e.to_string())?;
        Ok(buff)
    } else {
        from_hex(input)
    }
}

fn from_hex(s: &str) -> Result<Vec<u8>, String> {
    let s: String = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if s.len() % 2 != 0 {
        return Err("hex input has odd length".into());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn value_to_json(value: &Value) -> serde_json::Value {
    use serde_json::json;
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(v) => json!(v),
        Value::I8(v) => json!(v),
        Value::U8(v) => json!(v),
        Value::I16(v) => json!(v),
        Value::U16(v) => json!(v),
        Value::I32(v) => json!(v),
        Value::U32(v) => json!(v),
        Value::I64(v) => json!(v),
        Value::U64(v) => json!(v),
        Value::F32(v) => json!(v),
        Value::F64(v) => json!(v),
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => json!(s),
            Err(_) => json!(b),
        },
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
    }
}

/// Binds one JSON argument per value-taking token, converting JSON numbers
/// to the variant the token requires.
fn json_to_args(tokens: &[Token], json: &[serde_json::Value]) -> Result<Vec<Value>, String> {
    let mut args = Vec::new();
    let mut next = json.iter();
    for token in tokens {
        let value = match token {
            Token::Primitive(Primitive::Pad) => continue,
            Token::Primitive(p) => {
                let j = next.next().ok_or("too few JSON arguments")?;
                json_to_primitive(*p, j)?
            }
            Token::Varint => {
                let j = next.next().ok_or("too few JSON arguments")?;
                Value::U64(j.as_u64().ok_or_else(|| {
                    format!("token 'V' needs a non-negative integer, got {j}")
                })?)
            }
            // Let the library report these as unsupported on the encode path.
            Token::Array(_) | Token::Str | Token::Bytes => continue,
        };
        args.push(value);
    }
    Ok(args)
}

fn json_to_primitive(p: Primitive, j: &serde_json::Value) -> Result<Value, String> {
    let fail = || format!("token '{}' cannot take JSON value {j}", p.code());
    let int = |j: &serde_json::Value| j.as_i64().ok_or_else(fail);
    Ok(match p {
        Primitive::Pad => unreachable!("pad consumes no argument"),
        Primitive::Char => {
            let s = j.as_str().ok_or_else(fail)?;
            if s.len() != 1 {
                return Err(fail());
            }
            Value::Bytes(s.as_bytes().to_vec())
        }
        Primitive::Bool => Value::Bool(j.as_bool().ok_or_else(fail)?),
        Primitive::I8 => Value::I8(i8::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::U8 => Value::U8(u8::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::I16 => Value::I16(i16::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::U16 => Value::U16(u16::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::I32 => Value::I32(i32::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::U32 => Value::U32(u32::try_from(int(j)?).map_err(|_| fail())?),
        Primitive::I64 => Value::I64(int(j)?),
        Primitive::U64 => Value::U64(j.as_u64().ok_or_else(fail)?),
        Primitive::F32 => Value::F32(j.as_f64().ok_or_else(fail)? as f32),
        Primitive::F64 => Value::F64(j.as_f64().ok_or_else(fail)?),
    })
}
