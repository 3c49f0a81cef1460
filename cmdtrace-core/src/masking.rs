// cmdtrace-core/src/masking.rs
//! Redaction of the literal argument vector a user typed.
//!
//! Two maskers are provided:
//!
//! * [`mask_with_vocabulary`] keeps only tokens found in a [`Vocabulary`]
//!   built from the host's command tree and replaces everything else.
//! * [`mask_heuristic`] needs no vocabulary. It keeps positional tokens and
//!   flag names and replaces whatever it takes to be a flag value. Used when
//!   the command tree is not available yet.
//!
//! Neither function fails; unknown input degrades to [`MASK`].
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::structure::StructureMap;
use crate::vocabulary::{build_vocabulary, Vocabulary};

/// Redaction sentinel substituted for every sensitive token.
pub const MASK: &str = "*****";

const EQ: char = '=';

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Masks `args` against `vocabulary`, one input token at a time.
///
/// Flag-like tokens joined with `=` are split on the first `=` and each part
/// is checked on its own, so `--flag=value` keeps `--flag` when it is known
/// and always replaces `value`. Empty parts are dropped.
pub fn mask_with_vocabulary<S: AsRef<str>>(vocabulary: &Vocabulary, args: &[S]) -> Vec<String> {
    let mut output = Vec::with_capacity(args.len());

    for arg in args {
        let arg = arg.as_ref();
        if is_flag(arg) {
            match arg.split_once(EQ) {
                Some((flag, value)) => {
                    push_masked(vocabulary, flag, &mut output);
                    push_masked(vocabulary, value, &mut output);
                }
                None => push_masked(vocabulary, arg, &mut output),
            }
        } else {
            push_masked(vocabulary, arg, &mut output);
        }
    }

    debug!(
        "Masked {} argument(s) into {} token(s), {} redacted.",
        args.len(),
        output.len(),
        output.iter().filter(|t| *t == MASK).count()
    );
    output
}

fn push_masked(vocabulary: &Vocabulary, part: &str, output: &mut Vec<String>) {
    if part.is_empty() {
        return;
    }
    if vocabulary.contains(part) {
        output.push(part.to_string());
    } else {
        output.push(MASK.to_string());
    }
}

/// Builds the vocabulary of `structure` and masks `args` with it.
pub fn mask_cli<S: AsRef<str>>(structure: &StructureMap, args: &[S]) -> Vec<String> {
    let vocabulary = build_vocabulary(structure);
    mask_with_vocabulary(&vocabulary, args)
}

/// Masks `args` from syntax alone.
///
/// A flag without `=` is assumed to take the following token as its value,
/// which is replaced whatever it is, even another flag or a command name.
/// Positional tokens are never replaced.
pub fn mask_heuristic<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut masked: Vec<String> = Vec::with_capacity(args.len());
    let mut iter = args.iter().map(AsRef::as_ref);

    while let Some(arg) = iter.next() {
        if is_flag(arg) {
            match arg.split_once(EQ) {
                Some((flag, _)) => {
                    masked.push(flag.to_string());
                    masked.push(MASK.to_string());
                }
                None => {
                    masked.push(arg.to_string());
                    if let Some(next) = iter.next() {
                        if !next.is_empty() {
                            masked.push(MASK.to_string());
                        }
                    }
                }
            }
        } else {
            masked.push(arg.to_string());
        }
    }

    masked.retain(|token| !token.is_empty());
    masked
}
