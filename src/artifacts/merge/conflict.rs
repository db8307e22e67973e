use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR: &str = "=======\n";
pub const GIVEN_MARKER: &str = ">>>>>>>\n";

/// Render both sides of a conflicted file between markers.
///
/// An absent side renders as nothing. A non-empty side without a trailing
/// newline gets one so every marker starts its own line.
pub fn render_conflict(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let mut rendered = Vec::new();

    rendered.extend_from_slice(CURRENT_MARKER.as_bytes());
    push_side(&mut rendered, current);
    rendered.extend_from_slice(SEPARATOR.as_bytes());
    push_side(&mut rendered, given);
    rendered.extend_from_slice(GIVEN_MARKER.as_bytes());

    Bytes::from(rendered)
}

fn push_side(rendered: &mut Vec<u8>, side: Option<&[u8]>) {
    let side = side.unwrap_or_default();
    rendered.extend_from_slice(side);
    if !side.is_empty() && !side.ends_with(b"\n") {
        rendered.push(b'\n');
    }
}
