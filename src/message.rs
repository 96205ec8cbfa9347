// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction and cleanup of failure messages.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
};
use swrite::{swrite, SWrite};

/// Fallback text used when formatting one of the message parts panics.
pub(crate) static MESSAGE_FALLBACK: &str =
    "[Creating the feedback message failed due to a panic]";

/// Formats each part in argument order and concatenates the results.
///
/// `Display` impls are caller-supplied and not guaranteed not to panic, so the
/// whole operation runs under `catch_unwind`: a panicking formatter yields
/// [`MESSAGE_FALLBACK`] instead of unwinding into the check machinery.
pub(crate) fn concat(parts: &[&dyn fmt::Display]) -> String {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut out = String::new();
        for part in parts {
            swrite!(out, "{}", part);
        }
        out
    }))
    .unwrap_or_else(|_| MESSAGE_FALLBACK.to_owned())
}

/// Removes ANSI escapes and non-printable characters from a recorded message,
/// keeping newlines and tabs.
pub(crate) fn sanitize(message: &str) -> String {
    // strip_str's VTE parser consumes tabs along with the escape sequences,
    // so shield them across the call. Escape sequences never contain a tab.
    let mut stripped = String::new();
    for (i, segment) in message.split('\t').enumerate() {
        if i > 0 {
            stripped.push('\t');
        }
        stripped.push_str(&strip_ansi_escapes::strip_str(segment));
    }
    stripped.replace(
        |c| matches!(c, '\x00'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f'),
        "",
    )
}

/// Returns the textual message carried by a panic payload, if it carries one.
///
/// Payloads produced by `panic!` with a message are `String` or `&'static str`;
/// anything else (e.g. `panic_any` with a custom type) is opaque.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Describes a panic caught while evaluating a caller-supplied comparison.
pub(crate) fn describe_panic(payload: &(dyn Any + Send)) -> String {
    match payload_message(payload) {
        Some(text) => concat(&[&"panic: [", &text, &"]"]),
        None => "panic (unknown payload type).".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    struct PanickyDisplay;

    impl fmt::Display for PanickyDisplay {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("broken formatter")
        }
    }

    #[test]
    fn concat_preserves_argument_order() {
        let message = concat(&[&"Err #", &42, &". Answer given is [", &5.15, &"]."]);
        assert_eq!(message, "Err #42. Answer given is [5.15].");
    }

    #[test]
    fn concat_falls_back_on_panicking_display() {
        let message = concat(&[&"prefix ", &PanickyDisplay, &" suffix"]);
        assert_eq!(message, MESSAGE_FALLBACK);
    }

    #[test]
    fn sanitize_strips_ansi_escapes() {
        let styled = format!("{}", "broken".red());
        assert_ne!(styled, "broken");
        assert_eq!(sanitize(&styled), "broken");
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize("a\x07b\x00c"), "abc");
        // Newlines and tabs survive.
        assert_eq!(sanitize("a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn sanitize_keeps_tabs_next_to_ansi_escapes() {
        let styled = format!("{}\tplain", "red".red());
        assert_eq!(sanitize(&styled), "red\tplain");
    }

    #[test]
    fn payload_message_recognizes_both_string_forms() {
        let payload: Box<dyn Any + Send> = Box::new("static text");
        assert_eq!(payload_message(payload.as_ref()), Some("static text"));

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned text"));
        assert_eq!(payload_message(payload.as_ref()), Some("owned text"));

        let payload: Box<dyn Any + Send> = Box::new(17_u32);
        assert_eq!(payload_message(payload.as_ref()), None);
    }
}
