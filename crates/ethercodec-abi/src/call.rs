//! Function-call and constructor calldata.
//!
//! - Calldata = 4-byte selector || ABI-encoded inputs tuple
//! - Constructor arguments carry no selector; they are appended to the
//!   contract bytecode by the caller

use ethercodec_core::{hexstr, AbiError, AbiValue, DecodedCall};
use tracing::{debug, trace};

use crate::decoder::AbiDecoder;
use crate::encoder::encode_params;
use crate::json::{Abi, AbiEntry};

/// Encode a call to the function `name`.
///
/// Overloads are tried in declaration order; the first whose inputs accept
/// `args` (same arity, every value fits its parameter type) is used.
pub fn encode_call(name: &str, args: &[AbiValue], abi: &Abi) -> Result<Vec<u8>, AbiError> {
    let function = select_function(name, args, abi)?;
    let selector = function.selector();
    let encoded = encode_params(&function.input_types(), args)?;

    let mut calldata = Vec::with_capacity(4 + encoded.len());
    calldata.extend_from_slice(&selector);
    calldata.extend_from_slice(&encoded);
    debug!(
        function = %function.signature(),
        len = calldata.len(),
        "encoded call"
    );
    Ok(calldata)
}

/// Encode constructor arguments (no selector).
///
/// An interface without a constructor accepts only an empty argument list.
pub fn encode_constructor(args: &[AbiValue], abi: &Abi) -> Result<Vec<u8>, AbiError> {
    match abi.constructor() {
        Some(ctor) => encode_params(&ctor.input_types(), args),
        None if args.is_empty() => Ok(Vec::new()),
        None => Err(AbiError::SelectorNotFound {
            function: "constructor".into(),
        }),
    }
}

/// Decode calldata back into the function it calls.
pub fn decode_call(calldata: &[u8], abi: &Abi) -> Result<DecodedCall, AbiError> {
    decode_call_with(&AbiDecoder::default(), calldata, abi)
}

/// [`decode_call`] with explicit decoder limits.
pub fn decode_call_with(
    decoder: &AbiDecoder,
    calldata: &[u8],
    abi: &Abi,
) -> Result<DecodedCall, AbiError> {
    if calldata.len() < 4 {
        return Err(AbiError::TruncatedData {
            offset: 0,
            needed: 4,
            available: calldata.len(),
        });
    }
    let selector = [calldata[0], calldata[1], calldata[2], calldata[3]];
    let function = abi
        .function_by_selector(selector)
        .ok_or_else(|| AbiError::SelectorNotFound {
            function: hexstr::encode(selector),
        })?;

    let values = decoder.decode_params(&function.input_types(), &calldata[4..])?;
    trace!(function = %function.signature(), "decoded call");
    Ok(DecodedCall {
        function_name: function.name.clone(),
        selector,
        inputs: function.input_names().into_iter().zip(values).collect(),
    })
}

fn select_function<'a>(name: &str, args: &[AbiValue], abi: &'a Abi) -> Result<&'a AbiEntry, AbiError> {
    let mut candidates = abi.functions().filter(|f| f.name == name).peekable();
    if candidates.peek().is_none() {
        return Err(AbiError::SelectorNotFound {
            function: name.to_string(),
        });
    }
    candidates
        .find(|f| {
            f.inputs.len() == args.len()
                && f.inputs.iter().zip(args).all(|(p, v)| v.matches(&p.ty))
        })
        .ok_or_else(|| AbiError::SelectorNotFound {
            function: format!("{name} with {} argument(s)", args.len()),
        })
}
