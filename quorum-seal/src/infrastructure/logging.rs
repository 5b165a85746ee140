//! Tracing helpers.

use std::fmt::Debug;
use tracing::{warn, Span};

/// Record `field_value` under `field_name` on the current span, so every
/// event emitted inside the span carries it:
///
/// ```text
///   INFO quorum_seal_server::operations::signing_room: Share accepted.
///     in quorum_seal_server::operations::signing_room::sign_document with room_id: "abc-DEF-ghi-JKL"
/// ```
///
/// The span must declare the field up front (`fields(room_id)`). Debug
/// builds warn when it does not.
pub fn record_field(field_name: &str, field_value: &dyn Debug) {
    let span = Span::current();
    if cfg!(debug_assertions) && !span.has_field(field_name) {
        warn!("Span does not declare field {}", field_name);
    }
    let _ = span.record(field_name, &format!("{field_value:?}"));
}
